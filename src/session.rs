//! Session state consulted by the navigation guard.
//!
//! Replaces a process-wide "already checked" flag with an explicit object
//! owned by the router and reset on logout.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Whether the current session has passed an identity check.
///
/// Clones share the same flag, so a router and anything else holding the
/// state observe one value. Starts unchecked; [`SessionState::reset`] returns
/// it to unchecked (e.g. on logout).
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    checked: Arc<AtomicBool>,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.checked.load(Ordering::Acquire)
    }

    pub fn mark_checked(&self) {
        self.checked.store(true, Ordering::Release);
    }

    pub fn reset(&self) {
        self.checked.store(false, Ordering::Release);
    }
}
