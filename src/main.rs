mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use deeplucid::config::load_config;
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool, extra_filter: Option<&str>) {
    let filter_level = if verbose { Level::DEBUG } else { Level::INFO };

    let mut filter = EnvFilter::from_default_env().add_directive(filter_level.into());
    for directive in extra_filter.into_iter().flat_map(|f| f.split(',')) {
        match directive.trim().parse::<tracing_subscriber::filter::Directive>() {
            Ok(d) => filter = filter.add_directive(d),
            Err(e) => eprintln!("Ignoring invalid log filter '{}': {}", directive, e),
        }
    }

    // stdout carries the protocol, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true) // Show module path
        .with_level(true) // Show log level
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::time())
        .init();
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            match e.kind() {
                ErrorKind::DisplayVersion | ErrorKind::DisplayHelp => {
                    e.print().ok();
                    std::process::exit(0);
                }
                _ => {
                    e.print().ok();
                    std::process::exit(2);
                }
            }
        }
    };

    if let Some(Commands::Version) = cli.command {
        cli::print_version();
        return;
    }

    let config = match load_config(&cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(cli.verbose, config.log_filter.as_deref());
    tracing::debug!("Verbose mode enabled");

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {}", e);
            std::process::exit(1);
        }
    };

    let result = runtime.block_on(deeplucid::daemon::run_server(&config));
    // a pending stdin read would otherwise keep the runtime alive after a signal
    runtime.shutdown_timeout(std::time::Duration::from_secs(1));

    if let Err(e) = result {
        tracing::error!("Server error: {:#}", e);
        std::process::exit(1);
    }
}
