//! Stdin activity source for the watch command.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use vigil_core::{ActivityRecorder, ActivitySignal, ActivitySource, MonitorError, SourceHandle};

/// Treats every line on stdin as user activity.
///
/// A line of `s` is the stay-signed-in affordance; anything else is generic
/// input. EOF ends the source quietly (the monitor keeps running on its
/// timers alone).
pub struct StdinActivitySource;

impl ActivitySource for StdinActivitySource {
    fn name(&self) -> &'static str {
        "stdin"
    }

    fn attach(&self, recorder: ActivityRecorder) -> Result<SourceHandle, MonitorError> {
        let task = tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let signal = if line.trim().eq_ignore_ascii_case("s") {
                            ActivitySignal::StaySignedIn
                        } else {
                            ActivitySignal::Input
                        };
                        recorder.record(signal);
                    }
                    Ok(None) => break,
                    Err(e) => {
                        warn!(event = "cli.stdin_read_failed", error = %e);
                        break;
                    }
                }
            }
        });

        Ok(SourceHandle::from_task("stdin", task))
    }
}
