use crate::errors::VigilError;

#[derive(Debug, thiserror::Error)]
pub enum PollerError {
    #[error("Invalid poller configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Failed to build HTTP client: {message}")]
    ClientBuild { message: String },

    #[error("Session check transport failure: {message}")]
    Transport { message: String },

    #[error("Session check returned an unreadable body: {message}")]
    Decode { message: String },
}

impl VigilError for PollerError {
    fn error_code(&self) -> &'static str {
        match self {
            PollerError::InvalidConfiguration { .. } => "POLLER_INVALID_CONFIGURATION",
            PollerError::ClientBuild { .. } => "POLLER_CLIENT_BUILD_FAILED",
            PollerError::Transport { .. } => "POLLER_TRANSPORT_FAILURE",
            PollerError::Decode { .. } => "POLLER_DECODE_FAILURE",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, PollerError::InvalidConfiguration { .. })
    }
}
