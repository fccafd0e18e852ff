//! vigil-core: Core library for the vigil session watchdog
//!
//! This library provides the client-side timeout state machine for a
//! web admin panel: an inactivity monitor that forces a logout after a
//! period of silence, and a session-validity poller that forces a return to
//! the login page when the server says another device took over. It is used
//! by the CLI and by anything else that embeds the watchdog.
//!
//! # Main Entry Points
//!
//! - [`monitor`] - Activity-timeout monitoring with warning and forced logout
//! - [`poller`] - Session-validity polling against the check endpoint
//! - [`config`] - Configuration management
//! - [`nav`] - Navigation seam shared by both terminal actions

pub mod config;
pub mod errors;
pub mod events;
pub mod logging;
pub mod monitor;
pub mod nav;
pub mod poller;
pub mod sched;

// Re-export commonly used types at crate root for convenience
pub use config::VigilConfig;
pub use monitor::{
    ActivityRecorder, ActivitySignal, ActivitySource, InactivityMonitor, MonitorConfig,
    MonitorError, MonitorStatus, SourceHandle, WarningPresenter,
};
pub use nav::{LoggingNavigator, Navigator};
pub use poller::{
    HttpSessionCheck, InvalidationReason, PollerConfig, PollerError, PollerStatus, SessionCheck,
    SessionPoller, SessionVerdict,
};

// Re-export logging initialization
pub use logging::init_logging;
