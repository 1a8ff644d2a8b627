//! bs CLI - reload orchestrator.
//!
//! Provides commands for:
//! - `reload`: Announce changed paths as one batch
//! - `stream`: Announce paths read from stdin as one stream session

mod bus;
mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ReloadArgs, StreamArgs};
use output::Output;

/// bs - decides between CSS injection and full page reloads.
#[derive(Parser)]
#[command(name = "bs", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Announce changed files.
    Reload(ReloadArgs),
    /// Announce files read line by line from stdin.
    Stream(StreamArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Reload(args) => args.common.verbose,
            Self::Stream(args) => args.common.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Reload(args) => args.execute(&output),
        Commands::Stream(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
