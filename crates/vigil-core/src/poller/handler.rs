//! Session-validity polling.
//!
//! [`SessionPoller`] runs one non-overlapping loop: issue a check, await the
//! verdict, classify it, sleep the interval, repeat. At most one request is
//! outstanding at any time. Two ways out: the server invalidates the session
//! (one-shot navigation to the login destination, gated by
//! `handling_invalid`), or the transport fails `max_failures` times in a row
//! (silent degrade, no navigation).

use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::nav::Navigator;
use crate::poller::traits::SessionCheck;
use crate::poller::types::{PollerConfig, PollerStatus, SessionVerdict};

/// The session-validity poller. Clonable handle over shared state.
pub struct SessionPoller<C: SessionCheck> {
    inner: Arc<PollerInner<C>>,
}

impl<C: SessionCheck> Clone for SessionPoller<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct PollerInner<C> {
    config: PollerConfig,
    check: C,
    navigator: Arc<dyn Navigator>,
    state: Mutex<PollerState>,
}

struct PollerState {
    is_monitoring: bool,
    consecutive_failures: u32,
    handling_invalid: bool,
    last_check_at: Option<chrono::DateTime<chrono::Utc>>,
    cancel: Option<CancellationToken>,
    task: Option<JoinHandle<()>>,
}

impl<C: SessionCheck> SessionPoller<C> {
    /// Create a stopped poller. Call [`start`](Self::start) to begin.
    pub fn new(config: PollerConfig, check: C, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            inner: Arc::new(PollerInner {
                config,
                check,
                navigator,
                state: Mutex::new(PollerState {
                    is_monitoring: false,
                    consecutive_failures: 0,
                    handling_invalid: false,
                    last_check_at: None,
                    cancel: None,
                    task: None,
                }),
            }),
        }
    }

    /// Start the polling loop. No-op when already polling.
    pub fn start(&self) {
        let cancel = {
            let mut state = self.inner.lock_state();
            if state.is_monitoring {
                info!(event = "core.poller.already_running");
                return;
            }
            state.is_monitoring = true;
            state.handling_invalid = false;
            state.consecutive_failures = 0;

            let cancel = CancellationToken::new();
            state.cancel = Some(cancel.clone());
            cancel
        };

        let inner = self.inner.clone();
        let task = tokio::spawn(run_loop(inner, cancel));
        self.inner.lock_state().task = Some(task);

        info!(
            event = "core.poller.started",
            interval_ms = self.inner.config.interval.as_millis() as u64,
            max_failures = self.inner.config.max_failures,
        );
    }

    /// Halt the loop. Scheduled iterations observe the stopped flag and the
    /// cancelled token and exit without further requests. Safe to repeat.
    pub fn stop(&self) {
        self.inner.halt();
        info!(event = "core.poller.stopped");
    }

    /// Snapshot of the current poller state.
    pub fn status(&self) -> PollerStatus {
        let state = self.inner.lock_state();
        PollerStatus {
            is_monitoring: state.is_monitoring,
            consecutive_failures: state.consecutive_failures,
            handling_invalid: state.handling_invalid,
            last_check_at: state.last_check_at,
        }
    }

    #[cfg(test)]
    fn handle_invalid(&self, verdict: &SessionVerdict) {
        self.inner.handle_invalid(verdict);
    }
}

async fn run_loop<C: SessionCheck>(inner: Arc<PollerInner<C>>, cancel: CancellationToken) {
    loop {
        {
            let mut state = inner.lock_state();
            if !state.is_monitoring || cancel.is_cancelled() {
                break;
            }
            state.last_check_at = Some(chrono::Utc::now());
        }

        let outcome = tokio::select! {
            _ = cancel.cancelled() => break,
            outcome = inner.check.check() => outcome,
        };

        match outcome {
            Ok(verdict) if verdict.valid => {
                inner.lock_state().consecutive_failures = 0;
            }
            Ok(verdict) => {
                inner.handle_invalid(&verdict);
                break;
            }
            Err(e) => {
                let failures = {
                    let mut state = inner.lock_state();
                    state.consecutive_failures += 1;
                    state.consecutive_failures
                };
                warn!(
                    event = "core.poller.check_failed",
                    error = %e,
                    consecutive_failures = failures,
                );

                if failures >= inner.config.max_failures {
                    // Silent degrade: stop nagging a dead network. No
                    // navigation, nothing surfaced to the user.
                    warn!(event = "core.poller.degraded", failures = failures);
                    inner.halt();
                    break;
                }
            }
        }

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(inner.config.interval) => {}
        }
    }
}

impl<C> PollerInner<C> {
    fn lock_state(&self) -> std::sync::MutexGuard<'_, PollerState> {
        self.state.lock().expect("poller state lock poisoned")
    }

    /// Terminal action for an invalidated session. `handling_invalid` makes
    /// it at-most-once even when several in-flight verdicts resolve invalid.
    fn handle_invalid(&self, verdict: &SessionVerdict) {
        {
            let mut state = self.lock_state();
            if state.handling_invalid {
                debug!(event = "core.poller.invalid_already_handled");
                return;
            }
            state.handling_invalid = true;
        }

        self.halt();

        let reason = verdict.invalidation();
        error!(
            event = "core.poller.session_invalidated",
            reason = reason.as_str(),
            detail = verdict.message.as_deref().unwrap_or(reason.describe()),
        );
        self.navigator.navigate(&self.config.login_url);
    }

    /// Shared teardown: clear the running flag and cancel the loop.
    fn halt(&self) {
        let mut state = self.lock_state();
        state.is_monitoring = false;
        if let Some(cancel) = state.cancel.take() {
            cancel.cancel();
        }
        state.task.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::LoggingNavigator;
    use crate::poller::errors::PollerError;
    use std::collections::VecDeque;
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::advance;

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    /// Drive the paused clock until the condition holds.
    async fn wait_until(mut condition: impl FnMut() -> bool) {
        for _ in 0..200 {
            if condition() {
                return;
            }
            advance(Duration::from_millis(500)).await;
            settle().await;
        }
        panic!("condition not reached while driving the paused clock");
    }

    fn valid() -> SessionVerdict {
        SessionVerdict {
            valid: true,
            reason: None,
            message: None,
        }
    }

    fn invalid(reason: &str) -> SessionVerdict {
        SessionVerdict {
            valid: false,
            reason: Some(reason.to_string()),
            message: None,
        }
    }

    fn transport_err() -> PollerError {
        PollerError::Transport {
            message: "connection reset".to_string(),
        }
    }

    /// Check stub that replays a script, then reports valid forever.
    #[derive(Clone)]
    struct ScriptedCheck {
        script: Arc<Mutex<VecDeque<Result<SessionVerdict, PollerError>>>>,
        calls: Arc<AtomicUsize>,
    }

    impl ScriptedCheck {
        fn new(script: Vec<Result<SessionVerdict, PollerError>>) -> Self {
            Self {
                script: Arc::new(Mutex::new(script.into_iter().collect())),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl SessionCheck for ScriptedCheck {
        fn check(&self) -> impl Future<Output = Result<SessionVerdict, PollerError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let result = self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(valid()));
            async move { result }
        }
    }

    fn test_poller(
        script: Vec<Result<SessionVerdict, PollerError>>,
    ) -> (SessionPoller<ScriptedCheck>, ScriptedCheck, Arc<LoggingNavigator>) {
        let check = ScriptedCheck::new(script);
        let navigator = Arc::new(LoggingNavigator::new());
        let config = PollerConfig::new(Duration::from_millis(3000), 3, "/login").unwrap();
        let poller = SessionPoller::new(config, check.clone(), navigator.clone());
        (poller, check, navigator)
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_transport_failures_stop_polling_silently() {
        let (poller, check, navigator) = test_poller(vec![
            Err(transport_err()),
            Err(transport_err()),
            Err(transport_err()),
        ]);
        poller.start();

        wait_until(|| !poller.status().is_monitoring).await;
        assert_eq!(check.calls(), 3);
        assert!(navigator.destinations().is_empty());
        assert!(!poller.status().handling_invalid);

        // A fourth would-be poll never fires.
        advance(Duration::from_secs(60)).await;
        settle().await;
        assert_eq!(check.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_verdict_navigates_to_login_once() {
        let (poller, check, navigator) = test_poller(vec![Ok(invalid("multi_device_login"))]);
        poller.start();

        wait_until(|| !poller.status().is_monitoring).await;
        assert_eq!(check.calls(), 1);
        assert_eq!(navigator.destinations(), vec!["/login"]);
        assert!(poller.status().handling_invalid);

        // The loop is gone; time passing changes nothing.
        advance(Duration::from_secs(60)).await;
        settle().await;
        assert_eq!(check.calls(), 1);
        assert_eq!(navigator.destinations(), vec!["/login"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_valid_response_resets_failure_counter() {
        let (poller, check, navigator) = test_poller(vec![
            Err(transport_err()),
            Ok(valid()),
            Err(transport_err()),
            Err(transport_err()),
            Err(transport_err()),
        ]);
        poller.start();

        // The single early failure is forgiven by the valid response; only
        // the later run of three stops the poller.
        wait_until(|| !poller.status().is_monitoring).await;
        assert_eq!(check.calls(), 5);
        assert!(navigator.destinations().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_invalid_resolutions_navigate_once() {
        let (poller, _check, navigator) = test_poller(vec![]);
        poller.start();

        // Two in-flight checks resolving invalid at the same time: only the
        // first caller past the gate acts.
        let verdict = invalid("multi_device_login");
        poller.handle_invalid(&verdict);
        poller.handle_invalid(&verdict);

        assert_eq!(navigator.destinations(), vec!["/login"]);
        assert!(!poller.status().is_monitoring);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_future_iterations() {
        let (poller, check, navigator) = test_poller(vec![]);
        poller.start();

        wait_until(|| check.calls() >= 2).await;
        poller.stop();
        let frozen = check.calls();

        advance(Duration::from_secs(60)).await;
        settle().await;
        assert_eq!(check.calls(), frozen);
        assert!(navigator.destinations().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_twice_is_idempotent() {
        let (poller, _check, _navigator) = test_poller(vec![]);
        poller.start();
        poller.stop();

        let first = poller.status();
        poller.stop();
        let second = poller.status();
        assert_eq!(first, second);
        assert!(!second.is_monitoring);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_is_idempotent() {
        let (poller, check, _navigator) = test_poller(vec![]);
        poller.start();
        poller.start();

        assert!(poller.status().is_monitoring);

        // One loop, one check per interval: after two intervals at most
        // three checks have been issued (initial + two sleeps).
        advance(Duration::from_millis(3000)).await;
        settle().await;
        advance(Duration::from_millis(3000)).await;
        settle().await;
        assert!(check.calls() <= 3, "double start spawned a second loop");

        poller.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_tracks_last_check_time() {
        let (poller, check, _navigator) = test_poller(vec![]);
        assert!(poller.status().last_check_at.is_none());

        poller.start();
        wait_until(|| check.calls() >= 1).await;
        assert!(poller.status().last_check_at.is_some());

        poller.stop();
    }
}
