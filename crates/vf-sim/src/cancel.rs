//! Cooperative cancellation for a running simulation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared stop flag, checked by [`Sim::run`][crate::Sim::run] between steps.
///
/// Clones share the flag, so one clone can be handed to another thread (a
/// signal handler, a UI) while the simulation holds the other.  A step that
/// has started always completes.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
