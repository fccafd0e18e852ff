//! Session-check seam.

use std::future::Future;

use crate::poller::errors::PollerError;
use crate::poller::types::SessionVerdict;

/// Authority that answers "is my session still the authoritative one?".
///
/// The poller awaits each check to completion before sleeping its interval,
/// so implementations never see overlapping calls from one poller.
pub trait SessionCheck: Send + Sync + 'static {
    fn check(&self) -> impl Future<Output = Result<SessionVerdict, PollerError>> + Send;
}
