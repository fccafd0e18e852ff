//! Cancellable one-shot timers.
//!
//! `OneShotTimer` is the scheduling primitive behind the watchdog's warning
//! and logout deadlines: a spawned task that waits out a delay and runs a
//! callback, unless cancelled first. Cancellation is explicit (a
//! `CancellationToken` per timer) so teardown can prove no callback fires
//! after it.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A scheduled callback that fires once after `delay` unless disarmed.
///
/// Dropping the handle disarms the timer, so holding at most one
/// `OneShotTimer` per deadline slot keeps at most one live timer per slot:
/// re-arming by replacement cancels the previous schedule.
///
/// Must be created from within a tokio runtime.
#[derive(Debug)]
pub struct OneShotTimer {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl OneShotTimer {
    /// Arm a timer that runs `callback` after `delay`.
    ///
    /// The deadline is anchored at the call, not at the spawned task's first
    /// poll, so `arm` marks the exact reset instant.
    pub fn arm<F, Fut>(delay: Duration, callback: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let deadline = tokio::time::Instant::now() + delay;
        let token = CancellationToken::new();
        let fire = token.clone();

        let task = tokio::spawn(async move {
            tokio::select! {
                _ = fire.cancelled() => {}
                _ = tokio::time::sleep_until(deadline) => callback().await,
            }
        });

        Self { token, task }
    }

    /// Cancel the pending fire. A timer that already fired is unaffected.
    pub fn disarm(&self) {
        self.token.cancel();
    }

    /// Whether the timer task is still pending (armed and not yet fired).
    pub fn is_pending(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for OneShotTimer {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
