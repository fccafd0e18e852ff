use crate::errors::VigilError;

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("Invalid monitor configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Activity source '{name}' failed to attach: {message}")]
    SourceAttachFailed { name: String, message: String },
}

impl VigilError for MonitorError {
    fn error_code(&self) -> &'static str {
        match self {
            MonitorError::InvalidConfiguration { .. } => "MONITOR_INVALID_CONFIGURATION",
            MonitorError::SourceAttachFailed { .. } => "ACTIVITY_SOURCE_ATTACH_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, MonitorError::InvalidConfiguration { .. })
    }
}
