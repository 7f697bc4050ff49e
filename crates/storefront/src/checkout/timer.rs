//! Simulated payment delay.

use std::time::Duration;

use tokio::runtime::{Handle, TryCurrentError};
use tokio::task::JoinHandle;
use tracing::debug;

/// A cancellable delay standing in for a payment round trip.
///
/// The delay runs as a spawned task, so waiting on it never blocks the
/// runtime. Dropping the timer aborts the task.
#[derive(Debug)]
pub struct PaymentTimer {
    handle: Option<JoinHandle<()>>,
    delay: Duration,
}

impl PaymentTimer {
    /// Start the delay on the current Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `TryCurrentError` when called outside a runtime.
    pub fn start(delay: Duration) -> Result<Self, TryCurrentError> {
        let runtime = Handle::try_current()?;
        debug!(delay_ms = delay.as_millis(), "Starting payment timer");
        let handle = runtime.spawn(tokio::time::sleep(delay));
        Ok(Self {
            handle: Some(handle),
            delay,
        })
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether the delay is still running or waiting to be observed.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.handle.is_some()
    }

    /// Wait for the delay to elapse.
    ///
    /// Returns `false` if the timer was cancelled or has already been
    /// waited on. Dropping the returned future leaves the timer running.
    pub async fn wait(&mut self) -> bool {
        let Some(handle) = self.handle.as_mut() else {
            return false;
        };

        let elapsed = handle.await.is_ok();
        self.handle = None;
        elapsed
    }

    /// Abort the delay. A later [`wait`](Self::wait) returns `false`.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("Cancelled payment timer");
        }
    }
}

impl Drop for PaymentTimer {
    fn drop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}
