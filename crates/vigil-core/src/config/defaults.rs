//! Default implementations for configuration types.
//!
//! This module contains all `Default` implementations and helper functions
//! for providing default values in serde deserialization.

use crate::config::types::{MonitorSettings, PollerSettings, ServerSettings};

/// Returns the default admin-panel base URL.
///
/// Used by serde `#[serde(default = "...")]` attribute.
pub fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

/// Returns the default session-check endpoint path.
pub fn default_check_path() -> String {
    "/api/check-session".to_string()
}

/// Returns the default logout destination path.
pub fn default_logout_path() -> String {
    "/logout".to_string()
}

/// Returns the default login destination path.
pub fn default_login_path() -> String {
    "/login".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            check_path: default_check_path(),
            logout_path: default_logout_path(),
            login_path: default_login_path(),
        }
    }
}

impl MonitorSettings {
    /// Returns the inactivity timeout in seconds, defaulting to 300.
    pub fn inactivity_timeout_secs(&self) -> u64 {
        self.inactivity_timeout_secs.unwrap_or(300)
    }

    /// Returns the warning lead in seconds, defaulting to 240.
    pub fn warning_lead_secs(&self) -> u64 {
        self.warning_lead_secs.unwrap_or(240)
    }

    /// Returns the activity debounce in milliseconds, defaulting to 1000.
    pub fn activity_debounce_ms(&self) -> u64 {
        self.activity_debounce_ms.unwrap_or(1000)
    }
}

impl PollerSettings {
    /// Returns the poll interval in milliseconds, defaulting to 3000.
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms.unwrap_or(3000)
    }

    /// Returns the failure threshold, defaulting to 3.
    pub fn max_failures(&self) -> u32 {
        self.max_failures.unwrap_or(3)
    }
}
