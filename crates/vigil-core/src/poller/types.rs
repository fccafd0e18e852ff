use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::poller::errors::PollerError;

/// Session verdict returned by the check endpoint.
///
/// Success and non-success responses carry the same shape; a non-success
/// status with a readable body is an invalidity report, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionVerdict {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SessionVerdict {
    /// Classify the server-supplied reason string.
    pub fn invalidation(&self) -> InvalidationReason {
        match self.reason.as_deref() {
            Some("multi_device_login") => InvalidationReason::MultiDeviceLogin,
            Some("session_inactive") => InvalidationReason::SessionInactive,
            _ => InvalidationReason::Other,
        }
    }
}

/// Why the server invalidated the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidationReason {
    /// Another device signed in with the same credentials.
    MultiDeviceLogin,
    /// The server marked this session inactive.
    SessionInactive,
    /// No recognized reason supplied.
    Other,
}

impl InvalidationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvalidationReason::MultiDeviceLogin => "multi_device_login",
            InvalidationReason::SessionInactive => "session_inactive",
            InvalidationReason::Other => "other",
        }
    }

    /// Human-readable fallback when the server sends no message of its own.
    pub fn describe(&self) -> &'static str {
        match self {
            InvalidationReason::MultiDeviceLogin => {
                "Signed in from another device; this session has been closed"
            }
            InvalidationReason::SessionInactive => {
                "Session marked inactive after another device signed in"
            }
            InvalidationReason::Other => "Session invalidated",
        }
    }
}

/// Immutable configuration for one [`SessionPoller`] instance.
///
/// [`SessionPoller`]: crate::poller::SessionPoller
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Pause between a completed check and the next request.
    pub interval: Duration,
    /// Consecutive transport failures tolerated before the poller stops.
    pub max_failures: u32,
    /// Destination of the session-invalidated navigation.
    pub login_url: String,
}

impl PollerConfig {
    /// Build a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `PollerError::InvalidConfiguration` for a zero interval or a
    /// zero failure threshold.
    pub fn new(
        interval: Duration,
        max_failures: u32,
        login_url: impl Into<String>,
    ) -> Result<Self, PollerError> {
        if interval.is_zero() {
            return Err(PollerError::InvalidConfiguration {
                message: "poll interval must be greater than zero".to_string(),
            });
        }

        if max_failures == 0 {
            return Err(PollerError::InvalidConfiguration {
                message: "failure threshold must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            interval,
            max_failures,
            login_url: login_url.into(),
        })
    }
}

/// Point-in-time view of poller state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerStatus {
    pub is_monitoring: bool,
    pub consecutive_failures: u32,
    pub handling_invalid: bool,
    /// When the most recent check was issued.
    pub last_check_at: Option<DateTime<Utc>>,
}
