use vigil_core::init_logging;

mod app;
mod commands;
mod nav;
mod presenter;
mod sources;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = app::build_cli();
    let matches = app.get_matches();

    // Extract verbosity before initializing logging
    let verbose = matches.get_flag("verbose");
    init_logging(!verbose);

    commands::run_command(&matches).await?;

    Ok(())
}
