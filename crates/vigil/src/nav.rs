//! Terminal-action surface for the watch command.

use std::sync::Arc;

use tokio::sync::Notify;
use tracing::warn;

use vigil_core::Navigator;

/// Navigator that opens terminal navigations in the default browser and
/// signals the watch loop that the session is over.
///
/// Falls back to printing the destination when the browser cannot be opened
/// (or was disabled with `--no-browser`); the navigation effect still counts.
pub struct WatchNavigator {
    open_browser: bool,
    session_ended: Arc<Notify>,
}

impl WatchNavigator {
    pub fn new(open_browser: bool, session_ended: Arc<Notify>) -> Self {
        Self {
            open_browser,
            session_ended,
        }
    }
}

impl Navigator for WatchNavigator {
    fn navigate(&self, destination: &str) {
        if self.open_browser
            && let Err(e) = webbrowser::open(destination)
        {
            warn!(
                event = "cli.browser_open_failed",
                destination = destination,
                error = %e,
            );
        }
        println!("Navigating to {}", destination);
        self.session_ended.notify_one();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_navigate_signals_session_end() {
        let session_ended = Arc::new(Notify::new());
        let navigator = WatchNavigator::new(false, session_ended.clone());

        navigator.navigate("http://127.0.0.1:5000/logout");

        // notify_one stores a permit, so a later wait completes immediately.
        tokio::time::timeout(std::time::Duration::from_secs(1), session_ended.notified())
            .await
            .expect("navigate should signal the watch loop");
    }
}
