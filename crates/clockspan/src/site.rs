// Copyright (c) 2026 Clockspan Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Call-site and callee identity types

use std::fmt;

/// Identity of a start/stop bracket: source file plus enclosing function.
///
/// The line number is deliberately not part of the identity, so a start and
/// a stop written on different lines of the same function still match. Two
/// call sites are equal exactly when both components are equal.
///
/// Both components are `&'static str` because they originate in
/// compile-time capture (`file!()` and [`enclosing_fn!`](crate::enclosing_fn)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    file: &'static str,
    function: &'static str,
}

impl CallSite {
    /// Create a call site from a source file name and a function path
    pub fn new(file: &'static str, function: &'static str) -> Self {
        Self { file, function }
    }

    /// Source file name
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// Enclosing function path
    pub fn function(&self) -> &'static str {
        self.function
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.file, self.function)
    }
}

/// How a measured callable is named in report lines
///
/// The distinction is made where the callable is written down, not by
/// inspecting its type name at runtime: the [`clock!`](crate::clock) macro
/// classifies a plain path as [`Named`](CalleeName::Named) and every other
/// callable expression as [`Lambda`](CalleeName::Lambda).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalleeName {
    /// A callable with a source-level path, reported under that path
    Named(&'static str),
    /// A closure or other anonymous callable
    Lambda,
}

impl CalleeName {
    /// Label used in report lines
    pub fn label(&self) -> &'static str {
        match self {
            CalleeName::Named(name) => name,
            CalleeName::Lambda => "lambda()",
        }
    }
}

impl fmt::Display for CalleeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_call_site_display() {
        let site = CallSite::new("a.cpp", "main");
        assert_eq!(site.to_string(), "a.cpp::main");
    }

    #[test]
    fn test_call_site_equality_ignores_nothing() {
        let site = CallSite::new("a.cpp", "main");
        assert_eq!(site, CallSite::new("a.cpp", "main"));
        assert_ne!(site, CallSite::new("b.cpp", "main"));
        assert_ne!(site, CallSite::new("a.cpp", "helper"));
    }

    #[test]
    fn test_call_site_usable_as_map_key() {
        let mut map = HashMap::new();
        map.insert(CallSite::new("a.cpp", "main"), 1u32);
        map.insert(CallSite::new("a.cpp", "helper"), 2u32);
        assert_eq!(map.get(&CallSite::new("a.cpp", "main")), Some(&1));
    }

    #[test]
    fn test_callee_name_labels() {
        assert_eq!(CalleeName::Named("compute()").label(), "compute()");
        assert_eq!(CalleeName::Lambda.label(), "lambda()");
        assert_eq!(CalleeName::Lambda.to_string(), "lambda()");
    }
}
