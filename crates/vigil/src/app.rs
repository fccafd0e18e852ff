use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("vigil")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Client-side session watchdog for web admin panels")
        .long_about("vigil watches a signed-in admin session from the client side. An inactivity monitor warns after a quiet period and forces a logout when it runs out, and a session poller returns to the login page the moment the server reports that another device took over the session.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("watch")
                .about("Run the inactivity monitor and session poller until a forced logout")
                .arg(
                    Arg::new("server")
                        .long("server")
                        .short('s')
                        .help("Admin panel base URL (overrides config)")
                )
                .arg(
                    Arg::new("timeout")
                        .long("timeout")
                        .value_parser(clap::value_parser!(u64))
                        .help("Inactivity timeout in seconds (overrides config)")
                )
                .arg(
                    Arg::new("warning")
                        .long("warning")
                        .value_parser(clap::value_parser!(u64))
                        .help("Warning lead in seconds (overrides config)")
                )
                .arg(
                    Arg::new("interval")
                        .long("interval")
                        .value_parser(clap::value_parser!(u64))
                        .help("Session poll interval in milliseconds (overrides config)")
                )
                .arg(
                    Arg::new("no-browser")
                        .long("no-browser")
                        .help("Log terminal navigations instead of opening a browser")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("check")
                .about("Run a single session check and print the verdict")
                .arg(
                    Arg::new("server")
                        .long("server")
                        .short('s')
                        .help("Admin panel base URL (overrides config)")
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .help("Shell to generate completions for")
                        .required(true)
                        .value_parser(["bash", "zsh", "fish"])
                        .index(1)
                )
        )
}
