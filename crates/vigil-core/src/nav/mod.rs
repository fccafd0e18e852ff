//! Navigation seam for terminal actions.
//!
//! Both watchdog components end their lifecycle the same way: a one-way
//! navigation of the embedding surface (browser, terminal, test harness) to a
//! destination URL. The surface differs per embedding, so it sits behind a
//! trait.

use std::sync::Mutex;

use tracing::info;

/// Where terminal navigations land.
///
/// Implementations perform the navigation effect and nothing else. Repeat
/// navigations after the first are no-ops at the surface (the page is already
/// gone), so implementations need not guard against duplicates; the callers'
/// guard flags do that.
pub trait Navigator: Send + Sync {
    /// Perform a one-way navigation to `destination`.
    fn navigate(&self, destination: &str);
}

/// Navigator that records destinations and logs them.
///
/// Useful as a test double and as a fallback surface when no browser is
/// available.
#[derive(Debug, Default)]
pub struct LoggingNavigator {
    destinations: Mutex<Vec<String>>,
}

impl LoggingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destinations navigated to, in order.
    pub fn destinations(&self) -> Vec<String> {
        self.destinations.lock().expect("navigator lock poisoned").clone()
    }
}

impl Navigator for LoggingNavigator {
    fn navigate(&self, destination: &str) {
        info!(event = "core.nav.navigated", destination = destination);
        self.destinations
            .lock()
            .expect("navigator lock poisoned")
            .push(destination.to_string());
    }
}
