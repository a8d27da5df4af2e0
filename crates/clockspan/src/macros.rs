// Copyright (c) 2026 Clockspan Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Call-site capturing macros
//!
//! These expand at the instrumented code's location, so `file!()` and
//! `line!()` resolve to the caller rather than to this crate, and they route
//! through the process-wide service from [`global`](crate::global). Callers
//! holding their own [`ClockService`](crate::ClockService) use its methods
//! directly instead.

/// Expands to the enclosing function's module path as a `&'static str`.
///
/// This is the capture primitive behind [`clock_start!`](crate::clock_start)
/// and [`clock_stop!`](crate::clock_stop), exported because it is useful on
/// its own. The path is derived from the type name of a function item
/// declared in place and cached per call site, so repeated evaluation costs
/// one atomic load.
///
/// Inside a closure the path ends in `{{closure}}`, which names the closure
/// rather than the function that defined it.
///
/// # Example
///
/// ```rust
/// fn lookup() -> &'static str {
///     clockspan::enclosing_fn!()
/// }
///
/// assert!(lookup().ends_with("::lookup"));
/// ```
#[macro_export]
macro_rules! enclosing_fn {
    () => {{
        fn __here() {}
        fn __name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        static __NAME: ::std::sync::OnceLock<&'static str> = ::std::sync::OnceLock::new();
        *__NAME.get_or_init(|| {
            let name = __name_of(__here);
            name.strip_suffix("::__here").unwrap_or(name)
        })
    }};
}

/// Begin a timing interval at the current call site.
///
/// The interval is keyed by source file and enclosing function, so the
/// matching [`clock_stop!`](crate::clock_stop) may sit on any line of the
/// same function. Brackets nest: each `clock_start!` pushes an interval and
/// each `clock_stop!` pops the most recent one on the calling thread.
///
/// # Example
///
/// ```rust
/// use clockspan::{clock_start, clock_stop};
///
/// fn index_block(rows: &[u64]) -> u64 {
///     clock_start!();
///     let sum = rows.iter().sum();
///     clock_stop!();
///     sum
/// }
///
/// assert_eq!(index_block(&[1, 2, 3]), 6);
/// ```
#[macro_export]
macro_rules! clock_start {
    () => {{
        let site = $crate::CallSite::new(::std::file!(), $crate::enclosing_fn!());
        $crate::global().start(site, ::std::line!());
    }};
}

/// End the most recent interval at the current call site and evaluate to
/// the elapsed nanoseconds.
///
/// Usable as a statement or as an expression:
///
/// ```rust
/// use clockspan::{clock_start, clock_stop};
///
/// clock_start!();
/// let nanos = clock_stop!();
/// println!("took {nanos} ns");
/// ```
///
/// A stop with no interval in flight for this call site on the calling
/// thread evaluates to `0` and reports nothing.
#[macro_export]
macro_rules! clock_stop {
    () => {{
        let site = $crate::CallSite::new(::std::file!(), $crate::enclosing_fn!());
        $crate::global().stop(site, ::std::line!())
    }};
}

/// Time one invocation of a callable and evaluate to the elapsed
/// nanoseconds.
///
/// The callee and every argument are bound to locals before the measured
/// window opens, so argument evaluation and capture setup are not counted.
/// The callable's return value is discarded; calls that need it should time
/// a surrounding bracket with [`clock_start!`](crate::clock_start) and
/// [`clock_stop!`](crate::clock_stop) instead.
///
/// A callable written as a plain path is reported under that path followed
/// by `()`; any other callable expression is reported as `lambda()`. The
/// distinction is purely syntactic: a bare identifier counts as a path even
/// when it names a closure binding. For a custom label, call
/// [`ClockService::measure`](crate::ClockService::measure) directly with
/// [`CalleeName::Named`](crate::CalleeName::Named).
///
/// # Example
///
/// ```rust
/// use clockspan::clock;
///
/// fn checksum(data: Vec<u8>) -> u64 {
///     data.iter().map(|&b| u64::from(b)).sum()
/// }
///
/// // Reported as `checksum()`
/// let nanos = clock!(checksum, vec![1, 2, 3]);
/// println!("checksum took {nanos} ns");
///
/// // Reported as `lambda()`
/// clock!(|| checksum(vec![4, 5, 6]));
/// ```
#[macro_export]
macro_rules! clock {
    ($f:path $(, $arg:expr)* $(,)?) => {{
        let __callee = $f;
        $crate::__clock_bind!(
            ($crate::global(), ::std::file!(), ::std::line!(),
                $crate::CalleeName::Named(::std::concat!(::std::stringify!($f), "()")))
            (__callee) [] [$($arg),*]
        )
    }};
    ($f:expr $(, $arg:expr)* $(,)?) => {{
        let __callee = $f;
        $crate::__clock_bind!(
            ($crate::global(), ::std::file!(), ::std::line!(), $crate::CalleeName::Lambda)
            (__callee) [] [$($arg),*]
        )
    }};
}

// Binds one argument per step, outside the measured window. Hygiene keeps
// every level's `__arg` distinct, so the accumulated idents each resolve to
// their own binding.
#[doc(hidden)]
#[macro_export]
macro_rules! __clock_bind {
    (($service:expr, $file:expr, $line:expr, $name:expr) ($callee:ident) [$($bound:ident)*] []) => {
        $service.measure($file, $line, $name, || $callee($($bound),*))
    };
    (($service:expr, $file:expr, $line:expr, $name:expr) ($callee:ident) [$($bound:ident)*] [$head:expr $(, $tail:expr)*]) => {{
        let __arg = $head;
        $crate::__clock_bind!(($service, $file, $line, $name) ($callee) [$($bound)* __arg] [$($tail),*])
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_enclosing_fn_names_this_function() {
        let name = crate::enclosing_fn!();
        assert!(name.starts_with("clockspan"));
        assert!(name.ends_with("::tests::test_enclosing_fn_names_this_function"));
    }

    #[test]
    fn test_enclosing_fn_is_stable_across_calls() {
        assert_eq!(crate::enclosing_fn!(), crate::enclosing_fn!());
    }

    #[test]
    fn test_enclosing_fn_marks_closures() {
        let inside = (|| crate::enclosing_fn!())();
        assert!(inside.contains("{{closure}}"));
    }
}
