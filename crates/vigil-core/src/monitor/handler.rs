//! Activity-timeout monitoring.
//!
//! [`InactivityMonitor`] owns a debounced last-activity clock plus one
//! warning timer and one logout timer. Activity signals reset both timers;
//! silence lets the warning fire at the configured lead and the forced
//! logout fire at the configured timeout. The logout is a terminal action:
//! it runs at most once per monitoring lifetime, guarded by
//! `logout_in_progress`, and implies `stop()`.

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::monitor::sources::{ActivitySource, SourceHandle};
use crate::monitor::traits::WarningPresenter;
use crate::monitor::types::{ActivitySignal, MonitorConfig, MonitorStatus};
use crate::nav::Navigator;
use crate::sched::OneShotTimer;

/// Clonable handle that feeds activity signals to a monitor.
///
/// Holds a weak reference, so recorders held by long-lived sources never keep
/// a dropped monitor alive; recording into a dropped monitor is a no-op.
#[derive(Clone)]
pub struct ActivityRecorder {
    inner: Weak<MonitorInner>,
}

impl ActivityRecorder {
    /// Record an activity signal. Ignored when the monitor is stopped, gone,
    /// or mid-logout, or when the signal lands inside the debounce window.
    pub fn record(&self, signal: ActivitySignal) {
        if let Some(inner) = self.inner.upgrade() {
            MonitorInner::record(&inner, signal);
        }
    }
}

/// The activity-timeout monitor. Clonable handle over shared state.
///
/// Constructed once at the composition root and explicitly owned; `start()`
/// is idempotent, so double-initialization collapses to one running monitor.
#[derive(Clone)]
pub struct InactivityMonitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    config: MonitorConfig,
    presenter: Arc<dyn WarningPresenter>,
    navigator: Arc<dyn Navigator>,
    sources: Mutex<Vec<Box<dyn ActivitySource>>>,
    state: Mutex<MonitorState>,
}

struct MonitorState {
    is_monitoring: bool,
    last_activity_at: Instant,
    warning_shown: bool,
    logout_in_progress: bool,
    // At most one live timer per slot: re-arming replaces (and thereby
    // cancels) the previous schedule.
    warning_timer: Option<OneShotTimer>,
    logout_timer: Option<OneShotTimer>,
    attached: Vec<SourceHandle>,
}

impl InactivityMonitor {
    /// Create a stopped monitor. Call [`start`](Self::start) to begin.
    pub fn new(
        config: MonitorConfig,
        presenter: Arc<dyn WarningPresenter>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            inner: Arc::new(MonitorInner {
                config,
                presenter,
                navigator,
                sources: Mutex::new(Vec::new()),
                state: Mutex::new(MonitorState {
                    is_monitoring: false,
                    last_activity_at: Instant::now(),
                    warning_shown: false,
                    logout_in_progress: false,
                    warning_timer: None,
                    logout_timer: None,
                    attached: Vec::new(),
                }),
            }),
        }
    }

    /// Register an activity source. Sources attach on the next `start()`.
    pub fn add_source(&self, source: Box<dyn ActivitySource>) {
        self.inner
            .sources
            .lock()
            .expect("monitor sources lock poisoned")
            .push(source);
    }

    /// Start monitoring: attach sources and arm both timers relative to now.
    ///
    /// No-op when already monitoring.
    pub fn start(&self) {
        {
            let mut state = self.inner.lock_state();
            if state.is_monitoring {
                info!(event = "core.monitor.already_running");
                return;
            }
            state.is_monitoring = true;
            state.logout_in_progress = false;
            state.warning_shown = false;
            state.last_activity_at = Instant::now();
            MonitorInner::arm_timers(&self.inner, &mut state);
        }

        MonitorInner::attach_sources(&self.inner);

        info!(
            event = "core.monitor.started",
            inactivity_timeout_secs = self.inner.config.inactivity_timeout.as_secs(),
            warning_lead_secs = self.inner.config.warning_lead.as_secs(),
        );
    }

    /// Stop monitoring: detach sources and cancel both timers.
    ///
    /// Safe to call repeatedly. Does not clear `logout_in_progress`, so a
    /// monitor stopped by its own terminal action still reports it.
    pub fn stop(&self) {
        self.inner.halt();
        info!(event = "core.monitor.stopped");
    }

    /// Record an activity signal, resetting the timers when it lands outside
    /// the debounce window.
    pub fn record_activity(&self, signal: ActivitySignal) {
        MonitorInner::record(&self.inner, signal);
    }

    /// A recorder handle for wiring into activity sources and the warning
    /// affordance.
    pub fn recorder(&self) -> ActivityRecorder {
        ActivityRecorder {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Snapshot of the current monitor state.
    pub fn status(&self) -> MonitorStatus {
        let state = self.inner.lock_state();
        let idle_for = Instant::now().duration_since(state.last_activity_at);
        let remaining = if state.is_monitoring && state.logout_timer.is_some() {
            self.inner.config.inactivity_timeout.saturating_sub(idle_for)
        } else {
            Duration::ZERO
        };

        MonitorStatus {
            is_monitoring: state.is_monitoring,
            warning_shown: state.warning_shown,
            logout_in_progress: state.logout_in_progress,
            idle_for,
            remaining,
        }
    }
}

impl MonitorInner {
    fn lock_state(&self) -> std::sync::MutexGuard<'_, MonitorState> {
        self.state.lock().expect("monitor state lock poisoned")
    }

    /// Arm both timers relative to now. Replacing the slot contents cancels
    /// any previous schedule, keeping at most one live timer per slot.
    fn arm_timers(inner: &Arc<Self>, state: &mut MonitorState) {
        let weak = Arc::downgrade(inner);
        state.warning_timer = Some(OneShotTimer::arm(inner.config.warning_lead, move || {
            async move {
                if let Some(inner) = weak.upgrade() {
                    inner.on_warning_deadline();
                }
            }
        }));

        let weak = Arc::downgrade(inner);
        state.logout_timer = Some(OneShotTimer::arm(
            inner.config.inactivity_timeout,
            move || async move {
                if let Some(inner) = weak.upgrade() {
                    inner.on_logout_deadline();
                }
            },
        ));
    }

    /// Attach every registered source, best-effort: a source that fails to
    /// attach is logged and skipped, never fatal to `start()`.
    fn attach_sources(inner: &Arc<Self>) {
        let sources = inner.sources.lock().expect("monitor sources lock poisoned");
        let mut handles = Vec::new();

        for source in sources.iter() {
            let recorder = ActivityRecorder {
                inner: Arc::downgrade(inner),
            };
            match source.attach(recorder) {
                Ok(handle) => {
                    debug!(event = "core.monitor.source_attached", source = source.name());
                    handles.push(handle);
                }
                Err(e) => {
                    warn!(
                        event = "core.monitor.source_attach_failed",
                        source = source.name(),
                        error = %e,
                    );
                }
            }
        }

        if !handles.is_empty() {
            inner.lock_state().attached.extend(handles);
        }
    }

    fn record(inner: &Arc<Self>, signal: ActivitySignal) {
        let had_warning = {
            let mut state = inner.lock_state();
            if !state.is_monitoring || state.logout_in_progress {
                return;
            }

            let now = Instant::now();
            if now.duration_since(state.last_activity_at) <= inner.config.activity_debounce {
                // Inside the debounce window: collapse into the prior reset.
                return;
            }

            state.last_activity_at = now;
            let had_warning = state.warning_shown;
            state.warning_shown = false;
            Self::arm_timers(inner, &mut state);
            had_warning
        };

        // Presenter is invoked outside the state lock so an affordance that
        // records activity synchronously cannot deadlock.
        if had_warning {
            inner.presenter.dismiss();
        }

        debug!(
            event = "core.monitor.activity_recorded",
            signal = signal.as_str()
        );
    }

    /// Warning-timer callback. Guards re-checked under the lock: a timer
    /// firing concurrently with teardown must observe it and do nothing.
    fn on_warning_deadline(&self) {
        let remaining = {
            let mut state = self.lock_state();
            if !state.is_monitoring || state.logout_in_progress || state.warning_shown {
                return;
            }
            state.warning_shown = true;
            self.config.inactivity_timeout - self.config.warning_lead
        };

        warn!(
            event = "core.monitor.warning_shown",
            remaining_secs = remaining.as_secs()
        );
        self.presenter.show(remaining);
    }

    /// Logout-timer callback: the terminal action. `logout_in_progress`
    /// makes it at-most-once even if a stale timer fires during a race.
    fn on_logout_deadline(&self) {
        {
            let mut state = self.lock_state();
            if !state.is_monitoring || state.logout_in_progress {
                return;
            }
            state.logout_in_progress = true;
        }

        error!(
            event = "core.monitor.inactivity_logout",
            destination = %self.config.logout_url,
        );

        self.halt();
        self.navigator.navigate(&self.config.logout_url);
    }

    /// Shared teardown: cancel timers, detach sources, clear the running
    /// flag. Leaves `logout_in_progress` untouched.
    fn halt(&self) {
        let handles = {
            let mut state = self.lock_state();
            state.is_monitoring = false;
            state.warning_timer.take();
            state.logout_timer.take();
            std::mem::take(&mut state.attached)
        };

        for handle in handles {
            handle.detach();
        }
    }
}
