//! Warning presentation seam.

use std::time::Duration;

/// Surface that presents the session-expiry warning.
///
/// Implementations render the warning however the embedding allows (banner,
/// terminal line, notification). The "stay signed in" control they expose
/// must feed an [`ActivityRecorder`] so that accepting the warning is exactly
/// a recorded activity signal.
///
/// [`ActivityRecorder`]: crate::monitor::ActivityRecorder
pub trait WarningPresenter: Send + Sync {
    /// Present the warning with the time remaining until forced logout.
    fn show(&self, remaining: Duration);

    /// Dismiss a previously shown warning. Must tolerate being called when
    /// no warning is visible.
    fn dismiss(&self);
}
