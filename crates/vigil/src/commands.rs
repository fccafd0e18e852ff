use std::sync::Arc;
use std::time::Duration;

use clap::ArgMatches;
use tokio::sync::Notify;
use tracing::{error, warn};

use vigil_core::config::validation::validate_config;
use vigil_core::{
    HttpSessionCheck, InactivityMonitor, MonitorConfig, PollerConfig, SessionCheck, SessionPoller,
    VigilConfig, events,
};

use crate::nav::WatchNavigator;
use crate::presenter::TerminalPresenter;
use crate::sources::StdinActivitySource;

pub async fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    match matches.subcommand() {
        Some(("watch", sub_matches)) => handle_watch_command(sub_matches).await,
        Some(("check", sub_matches)) => handle_check_command(sub_matches).await,
        Some(("completions", sub_matches)) => handle_completions_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}

/// Load the config hierarchy, falling back to defaults on failure.
fn load_config() -> VigilConfig {
    match vigil_core::config::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            warn!(
                event = "cli.config_load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            VigilConfig::default()
        }
    }
}

fn apply_server_override(config: &mut VigilConfig, matches: &ArgMatches) {
    if let Some(server) = matches.get_one::<String>("server") {
        config.server.base_url = server.clone();
    }
}

async fn handle_watch_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config();
    apply_server_override(&mut config, matches);
    if let Some(timeout) = matches.get_one::<u64>("timeout") {
        config.monitor.inactivity_timeout_secs = Some(*timeout);
    }
    if let Some(warning) = matches.get_one::<u64>("warning") {
        config.monitor.warning_lead_secs = Some(*warning);
    }
    if let Some(interval) = matches.get_one::<u64>("interval") {
        config.poller.interval_ms = Some(*interval);
    }
    validate_config(&config)?;

    let monitor_config = MonitorConfig::new(
        Duration::from_secs(config.monitor.inactivity_timeout_secs()),
        Duration::from_secs(config.monitor.warning_lead_secs()),
        Duration::from_millis(config.monitor.activity_debounce_ms()),
        config.server.logout_url(),
    )?;
    let poller_config = PollerConfig::new(
        Duration::from_millis(config.poller.interval_ms()),
        config.poller.max_failures(),
        config.server.login_url(),
    )?;

    let session_ended = Arc::new(Notify::new());
    let navigator = Arc::new(WatchNavigator::new(
        !matches.get_flag("no-browser"),
        session_ended.clone(),
    ));

    let monitor = InactivityMonitor::new(
        monitor_config,
        Arc::new(TerminalPresenter),
        navigator.clone(),
    );
    monitor.add_source(Box::new(StdinActivitySource));
    monitor.start();

    let check = HttpSessionCheck::new(config.server.check_url())?;
    let poller = SessionPoller::new(poller_config, check, navigator.clone());
    poller.start();

    println!(
        "Watching session at {} (logout after {}s idle, warning at {}s).",
        config.server.base_url,
        config.monitor.inactivity_timeout_secs(),
        config.monitor.warning_lead_secs(),
    );
    println!("Any input line counts as activity; 's' stays signed in; Ctrl-C quits.");

    tokio::select! {
        _ = session_ended.notified() => {
            println!("Session ended; watchdog exiting.");
        }
        _ = tokio::signal::ctrl_c() => {
            println!("Interrupted; stopping watchdog.");
        }
    }

    monitor.stop();
    poller.stop();
    events::log_app_shutdown();
    Ok(())
}

async fn handle_check_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config();
    apply_server_override(&mut config, matches);

    let check = HttpSessionCheck::new(config.server.check_url())?;
    let verdict = match check.check().await {
        Ok(verdict) => verdict,
        Err(e) => {
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
    } else if verdict.valid {
        println!("Session valid");
    } else {
        let reason = verdict.invalidation();
        println!(
            "Session invalid ({}): {}",
            reason.as_str(),
            verdict.message.as_deref().unwrap_or(reason.describe()),
        );
    }

    Ok(())
}

fn handle_completions_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let shell = matches
        .get_one::<String>("shell")
        .ok_or("Shell argument is required")?;

    let generator = match shell.as_str() {
        "bash" => clap_complete::Shell::Bash,
        "zsh" => clap_complete::Shell::Zsh,
        "fish" => clap_complete::Shell::Fish,
        other => return Err(format!("Unsupported shell: {}", other).into()),
    };

    let mut cli = crate::app::build_cli();
    clap_complete::generate(generator, &mut cli, "vigil", &mut std::io::stdout());
    Ok(())
}
