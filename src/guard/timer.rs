//! One-shot lockout timer bound to its owner's lifetime.

use tokio::{task::JoinHandle, time::Instant};
use tracing::trace;

/// Handle to a scheduled callback. Dropping the handle cancels it.
#[derive(Debug)]
pub struct LockoutTimer {
    deadline: Instant,
    handle: JoinHandle<()>,
}

impl LockoutTimer {
    /// Run `on_fire` once `deadline` is reached. Must be called from within a
    /// tokio runtime.
    pub fn schedule<F>(deadline: Instant, on_fire: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            trace!("lockout timer fired");
            on_fire();
        });

        Self { deadline, handle }
    }

    #[must_use]
    pub const fn deadline(&self) -> Instant {
        self.deadline
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for LockoutTimer {
    fn drop(&mut self) {
        if !self.handle.is_finished() {
            trace!("cancelling lockout timer");
            self.handle.abort();
        }
    }
}
