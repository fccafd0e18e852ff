use std::time::Duration;

use crate::monitor::errors::MonitorError;

/// A user-activity signal delivered to the monitor.
///
/// The variants mirror the activity surface of the admin panel: anything a
/// user does that proves they are still at the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivitySignal {
    PointerPress,
    KeyPress,
    Scroll,
    Touch,
    Input,
    Focus,
    Change,
    /// The "stay signed in" affordance on the expiry warning. Deliberately
    /// routed through the same path as every other signal.
    StaySignedIn,
}

impl ActivitySignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivitySignal::PointerPress => "pointer_press",
            ActivitySignal::KeyPress => "key_press",
            ActivitySignal::Scroll => "scroll",
            ActivitySignal::Touch => "touch",
            ActivitySignal::Input => "input",
            ActivitySignal::Focus => "focus",
            ActivitySignal::Change => "change",
            ActivitySignal::StaySignedIn => "stay_signed_in",
        }
    }
}

/// Immutable configuration for one [`InactivityMonitor`] instance.
///
/// [`InactivityMonitor`]: crate::monitor::InactivityMonitor
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Inactivity duration after which the forced logout fires.
    pub inactivity_timeout: Duration,
    /// Inactivity duration after which the expiry warning is shown.
    pub warning_lead: Duration,
    /// Window within which repeated signals collapse into one reset.
    pub activity_debounce: Duration,
    /// Destination of the terminal logout navigation.
    pub logout_url: String,
}

impl MonitorConfig {
    /// Build a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::InvalidConfiguration` unless
    /// `activity_debounce < warning_lead < inactivity_timeout` holds with a
    /// non-zero timeout.
    pub fn new(
        inactivity_timeout: Duration,
        warning_lead: Duration,
        activity_debounce: Duration,
        logout_url: impl Into<String>,
    ) -> Result<Self, MonitorError> {
        if inactivity_timeout.is_zero() {
            return Err(MonitorError::InvalidConfiguration {
                message: "inactivity timeout must be greater than zero".to_string(),
            });
        }

        if warning_lead >= inactivity_timeout {
            return Err(MonitorError::InvalidConfiguration {
                message: format!(
                    "warning lead ({:?}) must be shorter than inactivity timeout ({:?})",
                    warning_lead, inactivity_timeout
                ),
            });
        }

        if activity_debounce >= warning_lead {
            return Err(MonitorError::InvalidConfiguration {
                message: format!(
                    "activity debounce ({:?}) must be shorter than warning lead ({:?})",
                    activity_debounce, warning_lead
                ),
            });
        }

        Ok(Self {
            inactivity_timeout,
            warning_lead,
            activity_debounce,
            logout_url: logout_url.into(),
        })
    }
}

/// Point-in-time view of monitor state, for status output and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorStatus {
    pub is_monitoring: bool,
    pub warning_shown: bool,
    pub logout_in_progress: bool,
    /// Time since the last effective activity signal.
    pub idle_for: Duration,
    /// Time until the forced logout, zero when no logout timer is armed.
    pub remaining: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_activity_signal_names() {
        assert_eq!(ActivitySignal::PointerPress.as_str(), "pointer_press");
        assert_eq!(ActivitySignal::StaySignedIn.as_str(), "stay_signed_in");
    }

    #[test]
    fn test_monitor_config_valid() {
        let config = MonitorConfig::new(secs(300), secs(240), secs(1), "/logout").unwrap();
        assert_eq!(config.inactivity_timeout, secs(300));
        assert_eq!(config.warning_lead, secs(240));
        assert_eq!(config.logout_url, "/logout");
    }

    #[test]
    fn test_monitor_config_rejects_zero_timeout() {
        let result = MonitorConfig::new(secs(0), secs(0), secs(0), "/logout");
        assert!(result.is_err());
    }

    #[test]
    fn test_monitor_config_rejects_lead_not_shorter_than_timeout() {
        let result = MonitorConfig::new(secs(300), secs(300), secs(1), "/logout");
        assert!(result.is_err());

        let result = MonitorConfig::new(secs(300), secs(301), secs(1), "/logout");
        assert!(result.is_err());
    }

    #[test]
    fn test_monitor_config_rejects_debounce_not_shorter_than_lead() {
        let result = MonitorConfig::new(secs(300), secs(240), secs(240), "/logout");
        assert!(result.is_err());
    }
}
