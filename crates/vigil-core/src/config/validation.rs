//! Configuration validation.
//!
//! Applied after the full hierarchy is merged, so values from any layer are
//! checked against each other rather than in isolation.

use crate::config::types::VigilConfig;
use crate::errors::ConfigError;
use tracing::warn;

/// Validate a merged configuration.
///
/// # Errors
///
/// Returns `ConfigError::InvalidConfiguration` when timer relationships or
/// poller bounds are inconsistent.
pub fn validate_config(config: &VigilConfig) -> Result<(), ConfigError> {
    let timeout = config.monitor.inactivity_timeout_secs();
    let lead = config.monitor.warning_lead_secs();

    if timeout == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "monitor.inactivity_timeout_secs must be greater than 0".to_string(),
        });
    }

    if lead >= timeout {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "monitor.warning_lead_secs ({}) must be shorter than monitor.inactivity_timeout_secs ({})",
                lead, timeout
            ),
        });
    }

    if config.poller.interval_ms() == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "poller.interval_ms must be greater than 0".to_string(),
        });
    }

    if config.poller.max_failures() == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "poller.max_failures must be greater than 0".to_string(),
        });
    }

    if config.server.base_url.trim().is_empty() {
        return Err(ConfigError::InvalidConfiguration {
            message: "server.base_url cannot be empty".to_string(),
        });
    }

    // Sub-second polling is a server-load policy decision, not a default
    // anyone should inherit silently.
    if config.poller.interval_ms() < 1000 {
        warn!(
            event = "core.poller.aggressive_interval",
            interval_ms = config.poller.interval_ms(),
            "Session poll interval is below 1s; confirm the server is sized for this"
        );
    }

    Ok(())
}
