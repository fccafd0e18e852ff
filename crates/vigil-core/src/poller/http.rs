//! HTTP implementation of the session-check seam.
//!
//! Talks to the admin panel's session-check endpoint with credentials (a
//! cookie store holds the session cookie, mirroring a browser's
//! `credentials: include`). Requests carry no explicit timeout; a hung
//! request delays the next poll iteration rather than failing it.

use std::future::Future;

use crate::poller::errors::PollerError;
use crate::poller::traits::SessionCheck;
use crate::poller::types::SessionVerdict;

/// Session check against an HTTP endpoint.
pub struct HttpSessionCheck {
    client: reqwest::Client,
    check_url: String,
}

impl HttpSessionCheck {
    /// Build a check against `check_url` with a fresh cookie store.
    ///
    /// # Errors
    ///
    /// Returns `PollerError::ClientBuild` when the HTTP client cannot be
    /// constructed.
    pub fn new(check_url: impl Into<String>) -> Result<Self, PollerError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| PollerError::ClientBuild {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            check_url: check_url.into(),
        })
    }

    /// Build a check that reuses an existing client (and its cookie store).
    pub fn with_client(client: reqwest::Client, check_url: impl Into<String>) -> Self {
        Self {
            client,
            check_url: check_url.into(),
        }
    }

    pub fn check_url(&self) -> &str {
        &self.check_url
    }
}

impl SessionCheck for HttpSessionCheck {
    fn check(&self) -> impl Future<Output = Result<SessionVerdict, PollerError>> + Send {
        async move {
            let response = self
                .client
                .get(&self.check_url)
                .header(reqwest::header::ACCEPT, "application/json")
                .send()
                .await
                .map_err(|e| PollerError::Transport {
                    message: e.to_string(),
                })?;

            let status = response.status();
            if status.is_success() {
                return response
                    .json::<SessionVerdict>()
                    .await
                    .map_err(|e| PollerError::Decode {
                        message: e.to_string(),
                    });
            }

            // Non-success statuses carry the same JSON shape. The status code
            // alone asserts invalidity, so an unreadable body degrades to a
            // generic invalidation rather than a transport failure.
            match response.json::<SessionVerdict>().await {
                Ok(verdict) => Ok(SessionVerdict {
                    valid: false,
                    ..verdict
                }),
                Err(_) => Ok(SessionVerdict {
                    valid: false,
                    reason: None,
                    message: Some(format!("session check returned {}", status)),
                }),
            }
        }
    }
}
