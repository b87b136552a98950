//! Busy indicator shared by every network call.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::trace;

/// Counts in-flight operations.
///
/// Operations nest (a save triggers a refresh), so the indicator is a depth
/// counter rather than a flag. It shows while the depth is non-zero.
#[derive(Debug, Clone, Default)]
pub struct LoadingIndicator {
    depth: Arc<AtomicUsize>,
}

impl LoadingIndicator {
    /// Creates an idle indicator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while any operation holds a guard.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.depth() > 0
    }

    /// Returns the number of live guards.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth.load(Ordering::SeqCst)
    }

    /// Shows the indicator until the returned guard is dropped.
    #[must_use = "the indicator is released as soon as the guard is dropped"]
    pub fn acquire(&self, scope: &'static str) -> LoadingGuard {
        let depth = self.depth.fetch_add(1, Ordering::SeqCst) + 1;
        trace!(scope, depth, "loading started");
        LoadingGuard {
            depth: Arc::clone(&self.depth),
            scope,
        }
    }
}

/// Keeps the [`LoadingIndicator`] shown; released on drop.
#[derive(Debug)]
pub struct LoadingGuard {
    depth: Arc<AtomicUsize>,
    scope: &'static str,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        let depth = self.depth.fetch_sub(1, Ordering::SeqCst) - 1;
        trace!(scope = self.scope, depth, "loading finished");
    }
}
