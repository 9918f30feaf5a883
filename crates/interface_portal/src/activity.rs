//! In-flight flags for page calls
//!
//! A page marks a call as running by holding an [`ActivityGuard`]. The flag
//! lives behind an `Arc`, so a view holding a clone of the [`Activity`] sees
//! it while the page itself is mutably borrowed by the pending call. The
//! guard clears the flag on drop, which also covers a call whose future is
//! dropped before it completes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A shared "call in flight" flag
#[derive(Debug, Clone, Default)]
pub struct Activity {
    active: Arc<AtomicBool>,
}

impl Activity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Marks the activity as running; `None` when it already is
    pub fn begin(&self) -> Option<ActivityGuard> {
        self.active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ActivityGuard {
                active: Arc::clone(&self.active),
            })
    }
}

/// Clears its [`Activity`] when dropped
#[must_use = "the activity ends as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ActivityGuard {
    active: Arc<AtomicBool>,
}

impl Drop for ActivityGuard {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
    }
}
