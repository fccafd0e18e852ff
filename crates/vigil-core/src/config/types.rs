//! Configuration type definitions for the vigil watchdog.
//!
//! This module contains all configuration struct definitions used throughout
//! vigil. These types are serialized/deserialized from TOML config files.
//!
//! # Example Configuration
//!
//! ```toml
//! [monitor]
//! inactivity_timeout_secs = 300
//! warning_lead_secs = 240
//! activity_debounce_ms = 1000
//!
//! [poller]
//! interval_ms = 3000
//! max_failures = 3
//!
//! [server]
//! base_url = "http://127.0.0.1:5000"
//! ```

use serde::{Deserialize, Serialize};

/// Main configuration loaded from TOML config files.
///
/// This is the primary configuration structure that gets loaded from:
/// 1. User config: `~/.vigil/config.toml`
/// 2. Project config: `./.vigil/config.toml`
///
/// Project config values override user config values.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VigilConfig {
    /// Inactivity monitor configuration
    #[serde(default)]
    pub monitor: MonitorSettings,

    /// Session-validity poller configuration
    #[serde(default)]
    pub poller: PollerSettings,

    /// Admin-panel server endpoints
    #[serde(default)]
    pub server: ServerSettings,
}

/// Inactivity monitor configuration.
///
/// Controls how long a session may sit idle before the warning and the
/// forced logout fire.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MonitorSettings {
    /// Seconds of inactivity before the forced logout.
    /// Default: 300 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inactivity_timeout_secs: Option<u64>,

    /// Seconds of inactivity before the expiry warning is shown.
    /// Must be shorter than the inactivity timeout. Default: 240 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_lead_secs: Option<u64>,

    /// Milliseconds within which repeated activity signals collapse into
    /// one effective reset. Default: 1000ms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_debounce_ms: Option<u64>,
}

/// Session-validity poller configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PollerSettings {
    /// Milliseconds between session checks.
    /// Default: 3000ms. Sub-second intervals are a server-load policy call
    /// and are logged as a warning when used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_ms: Option<u64>,

    /// Consecutive transport failures tolerated before polling stops.
    /// Default: 3.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_failures: Option<u32>,
}

/// Admin-panel server endpoints.
///
/// Paths are resolved against `base_url` when building absolute URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Base URL of the admin panel.
    #[serde(default = "super::defaults::default_base_url")]
    pub base_url: String,

    /// Session-check endpoint path.
    #[serde(default = "super::defaults::default_check_path")]
    pub check_path: String,

    /// Logout destination path (inactivity terminal action).
    #[serde(default = "super::defaults::default_logout_path")]
    pub logout_path: String,

    /// Login destination path (session-invalidation terminal action).
    #[serde(default = "super::defaults::default_login_path")]
    pub login_path: String,
}

impl ServerSettings {
    /// Resolve a path against the configured base URL.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub fn check_url(&self) -> String {
        self.url_for(&self.check_path)
    }

    pub fn logout_url(&self) -> String {
        self.url_for(&self.logout_path)
    }

    pub fn login_url(&self) -> String {
        self.url_for(&self.login_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vigil_config_serialization() {
        let config = VigilConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: VigilConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.server.base_url, parsed.server.base_url);
    }

    #[test]
    fn test_monitor_settings_serialization() {
        let settings = MonitorSettings {
            inactivity_timeout_secs: Some(600),
            warning_lead_secs: Some(540),
            activity_debounce_ms: Some(500),
        };
        let toml_str = toml::to_string(&settings).unwrap();
        assert!(toml_str.contains("inactivity_timeout_secs = 600"));
        assert!(toml_str.contains("warning_lead_secs = 540"));
    }

    #[test]
    fn test_server_settings_deserialize_partial() {
        let toml_str = r#"
base_url = "https://admin.school.example"
"#;
        let settings: ServerSettings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.base_url, "https://admin.school.example");
        assert_eq!(settings.check_path, "/api/check-session");
        assert_eq!(settings.logout_path, "/logout");
        assert_eq!(settings.login_path, "/login");
    }

    #[test]
    fn test_url_for_strips_trailing_slash() {
        let settings = ServerSettings {
            base_url: "http://127.0.0.1:5000/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            settings.check_url(),
            "http://127.0.0.1:5000/api/check-session"
        );
        assert_eq!(settings.logout_url(), "http://127.0.0.1:5000/logout");
        assert_eq!(settings.login_url(), "http://127.0.0.1:5000/login");
    }
}
