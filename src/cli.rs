use clap::{Args, Parser, Subcommand};
use deeplucid::config::CliOverrides;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "deeplucid")]
#[command(about = "deeplucid - UCPF cognitive tools over MCP stdio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Enable debug logging (written to stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a JSON configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve MCP over stdin/stdout (the default)
    Serve(ServeArgs),
    /// Display version information
    Version,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Start with state management enabled
    #[arg(long)]
    pub enable_state: bool,

    /// Maximum number of sessions kept at once
    #[arg(long, value_name = "N")]
    pub max_sessions: Option<usize>,

    /// Idle seconds before a session expires
    #[arg(long, value_name = "SECS")]
    pub session_expiry_secs: Option<u64>,
}

impl Cli {
    pub fn overrides(&self) -> CliOverrides {
        let serve = match &self.command {
            Some(Commands::Serve(args)) => args.clone(),
            _ => ServeArgs::default(),
        };

        CliOverrides {
            config_path: self.config.clone(),
            enable_state: serve.enable_state,
            max_sessions: serve.max_sessions,
            session_expiry_secs: serve.session_expiry_secs,
        }
    }
}

pub fn print_version() {
    println!("deeplucid {}", env!("CARGO_PKG_VERSION"));
}
