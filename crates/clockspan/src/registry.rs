// Copyright (c) 2026 Clockspan Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Two-level registry of in-flight intervals
//!
//! Intervals are keyed by call site, then by thread, each leaf holding a
//! LIFO stack. The outer map takes its write lock only on the first touch of
//! a new key; after that every operation runs under read locks plus the
//! per-thread stack's own mutex, which is uncontended in correct use because
//! a stack is only ever pushed and popped by its owning thread.
//!
//! Entries are never removed. A drained stack stays in place for the
//! lifetime of the registry, bounding memory by the number of distinct
//! (call site, thread) pairs rather than by measurement count.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::interval::Interval;
use crate::site::CallSite;
use crate::thread_id::ThreadToken;

type IntervalStack = Arc<Mutex<Vec<Interval>>>;
type ThreadStacks = Arc<RwLock<HashMap<ThreadToken, IntervalStack>>>;

/// Registry of in-flight intervals, keyed by call site and thread
pub struct SiteRegistry {
    sites: RwLock<HashMap<CallSite, ThreadStacks>>,
}

impl SiteRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            sites: RwLock::new(HashMap::new()),
        }
    }

    /// Push a new interval for `(site, thread)`, creating map entries on
    /// first touch.
    ///
    /// The interval's start instant is re-stamped in place once it sits on
    /// the stack, so neither map traversal nor the push itself (including a
    /// `Vec` reallocation) lands inside the measured window.
    pub fn push(&self, site: CallSite, thread: ThreadToken, line: u32) {
        let stack = self.stack(site, thread);
        let mut stack = lock(&stack);
        stack.push(Interval::begin(line));
        if let Some(interval) = stack.last_mut() {
            interval.restart();
        }
    }

    /// Pop the most recently pushed interval for `(site, thread)`.
    ///
    /// Returns `None` when nothing is in flight. The lookup creates no map
    /// entries; an unmatched stop leaves the registry untouched.
    pub fn pop(&self, site: CallSite, thread: ThreadToken) -> Option<Interval> {
        let stack = self.existing_stack(site, thread)?;
        let mut stack = lock(&stack);
        stack.pop()
    }

    /// Number of intervals in flight for `(site, thread)`.
    ///
    /// `None` means the pair has never started an interval; `Some(0)` means
    /// its stack exists but is drained. Stacks persisting after drain is the
    /// documented retention behavior, observable through this accessor.
    pub fn depth(&self, site: CallSite, thread: ThreadToken) -> Option<usize> {
        let stack = self.existing_stack(site, thread)?;
        let depth = lock(&stack).len();
        Some(depth)
    }

    /// Number of distinct call sites seen so far
    pub fn site_count(&self) -> usize {
        read(&self.sites).len()
    }

    fn existing_stack(&self, site: CallSite, thread: ThreadToken) -> Option<IntervalStack> {
        let sites = read(&self.sites);
        let threads = read(sites.get(&site)?);
        threads.get(&thread).cloned()
    }

    fn stack(&self, site: CallSite, thread: ThreadToken) -> IntervalStack {
        if let Some(stack) = self.existing_stack(site, thread) {
            return stack;
        }
        self.create_stack(site, thread)
    }

    fn create_stack(&self, site: CallSite, thread: ThreadToken) -> IntervalStack {
        let threads = {
            let sites = read(&self.sites);
            sites.get(&site).cloned()
        };
        let threads = match threads {
            Some(threads) => threads,
            None => {
                let mut sites = write(&self.sites);
                Arc::clone(sites.entry(site).or_insert_with(|| {
                    debug!("first measurement at call site {}", site);
                    Arc::new(RwLock::new(HashMap::new()))
                }))
            }
        };
        let mut threads = write(&threads);
        Arc::clone(threads.entry(thread).or_default())
    }
}

impl Default for SiteRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// A poisoned lock only means another thread panicked mid-measurement; the
// data behind it is still usable.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(function: &'static str) -> CallSite {
        CallSite::new("registry.rs", function)
    }

    #[test]
    fn test_push_pop_is_lifo() {
        let registry = SiteRegistry::new();
        let thread = ThreadToken::current();
        let site = site("lifo");

        registry.push(site, thread, 1);
        registry.push(site, thread, 2);
        registry.push(site, thread, 3);

        assert_eq!(registry.pop(site, thread).map(|i| i.line()), Some(3));
        assert_eq!(registry.pop(site, thread).map(|i| i.line()), Some(2));
        assert_eq!(registry.pop(site, thread).map(|i| i.line()), Some(1));
        assert!(registry.pop(site, thread).is_none());
    }

    #[test]
    fn test_pop_on_untouched_pair_creates_nothing() {
        let registry = SiteRegistry::new();
        let thread = ThreadToken::current();

        assert!(registry.pop(site("untouched"), thread).is_none());
        assert_eq!(registry.depth(site("untouched"), thread), None);
        assert_eq!(registry.site_count(), 0);
    }

    #[test]
    fn test_drained_stack_persists() {
        let registry = SiteRegistry::new();
        let thread = ThreadToken::current();
        let site = site("drained");

        registry.push(site, thread, 7);
        assert_eq!(registry.depth(site, thread), Some(1));
        assert!(registry.pop(site, thread).is_some());

        assert_eq!(registry.depth(site, thread), Some(0));
        assert_eq!(registry.site_count(), 1);
    }

    #[test]
    fn test_sites_do_not_share_stacks() {
        let registry = SiteRegistry::new();
        let thread = ThreadToken::current();

        registry.push(site("first"), thread, 10);
        registry.push(site("second"), thread, 20);

        assert_eq!(registry.pop(site("first"), thread).map(|i| i.line()), Some(10));
        assert_eq!(registry.pop(site("second"), thread).map(|i| i.line()), Some(20));
        assert_eq!(registry.site_count(), 2);
    }

    #[test]
    fn test_threads_do_not_share_stacks() {
        let registry = SiteRegistry::new();
        let here = ThreadToken::current();
        let there = std::thread::spawn(ThreadToken::current).join().unwrap();
        let site = site("threads");

        registry.push(site, here, 1);
        registry.push(site, there, 2);

        assert_eq!(registry.pop(site, here).map(|i| i.line()), Some(1));
        assert_eq!(registry.pop(site, there).map(|i| i.line()), Some(2));
        assert!(registry.pop(site, here).is_none());
    }
}
