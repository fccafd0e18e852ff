//! Terminal warning presentation for the watch command.

use std::time::Duration;

use vigil_core::WarningPresenter;

/// Prints the expiry warning to stdout. The stay-signed-in affordance is the
/// `s` input line, which the stdin source routes through the same recorder
/// path as every other activity signal.
pub struct TerminalPresenter;

impl WarningPresenter for TerminalPresenter {
    fn show(&self, remaining: Duration) {
        println!(
            "Session expiring: you will be signed out in {}s. Type 's' then Enter to stay signed in.",
            remaining.as_secs()
        );
    }

    fn dismiss(&self) {
        println!("Staying signed in.");
    }
}
