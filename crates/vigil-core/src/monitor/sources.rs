//! Activity source attachment.
//!
//! A source is anything that can observe user activity (a DOM bridge, a
//! terminal input loop, a test script) and feed it to the monitor. Sources
//! are attached on `start()` and detached on `stop()`; a source that fails
//! to attach is logged and skipped so monitoring stays best-effort.

use tokio::task::JoinHandle;
use tracing::debug;

use crate::monitor::errors::MonitorError;
use crate::monitor::handler::ActivityRecorder;

/// A feed of user-activity signals.
pub trait ActivitySource: Send + Sync {
    /// Name used in attachment logs.
    fn name(&self) -> &'static str;

    /// Begin delivering signals to `recorder`.
    ///
    /// Delivery must happen from a task or later callback, never
    /// synchronously inside `attach` itself.
    fn attach(&self, recorder: ActivityRecorder) -> Result<SourceHandle, MonitorError>;
}

/// Handle to an attached source; stops delivery when detached.
#[derive(Debug)]
pub struct SourceHandle {
    name: &'static str,
    task: Option<JoinHandle<()>>,
}

impl SourceHandle {
    /// Handle for a source that delivers from a spawned task.
    pub fn from_task(name: &'static str, task: JoinHandle<()>) -> Self {
        Self {
            name,
            task: Some(task),
        }
    }

    /// Handle for a source with no delivery task of its own (e.g. one that
    /// hands the recorder to an existing event loop).
    pub fn detached(name: &'static str) -> Self {
        Self { name, task: None }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Stop delivery.
    pub(crate) fn detach(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        debug!(event = "core.monitor.source_detached", source = self.name);
    }
}
