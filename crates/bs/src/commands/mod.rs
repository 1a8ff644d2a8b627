//! CLI command implementations.

pub(crate) mod reload;
pub(crate) mod stream;

pub(crate) use reload::ReloadArgs;
pub(crate) use stream::StreamArgs;

use std::io::{self, BufRead};
use std::path::PathBuf;

use bs_config::{CliSettings, Config};
use bs_reload::{BatchReport, EventBus, Reloader, StreamSession, reloader_config_from_config};
use clap::Args;

use crate::bus::JsonLinesBus;
use crate::error::CliError;
use crate::output::Output;

/// Arguments shared by all commands.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover bs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Injectable extension (repeatable, overrides config).
    #[arg(long = "inject", value_name = "EXT")]
    inject: Vec<String>,

    /// Enable verbose output (debug logs on stderr).
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Load configuration with CLI overrides applied.
    fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            inject_file_types: (!self.inject.is_empty()).then(|| self.inject.clone()),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }

    /// Build a reloader that prints every event to stdout as it is published.
    fn reloader(&self) -> Result<Reloader<JsonLinesBus<io::Stdout>>, CliError> {
        let config = self.load_config()?;
        tracing::debug!(
            config = ?config.config_path,
            inject = ?config.reload.inject_file_types,
            "Configuration loaded"
        );

        let bus = JsonLinesBus::new(io::stdout());
        Ok(Reloader::with_config(bus, &reloader_config_from_config(&config)))
    }
}

/// Write every non-empty line of `reader` into the session.
///
/// Returns the number of accepted lines.
fn feed_lines<B: EventBus, R: BufRead>(
    session: &mut StreamSession<'_, B>,
    reader: R,
) -> Result<usize, CliError> {
    let mut accepted = 0;
    for line in reader.lines() {
        let line = line?;
        let path = line.trim();
        if path.is_empty() {
            continue;
        }
        if session.write(path) {
            accepted += 1;
        }
    }
    Ok(accepted)
}

/// Print the batch summary line.
fn print_summary(output: &Output, report: BatchReport) {
    if report.is_empty() {
        output.warning("No events published");
    } else {
        output.success(&summary(report));
    }
}

/// Human-readable batch summary.
fn summary(report: BatchReport) -> String {
    let mut parts = Vec::new();
    if report.signaled {
        parts.push("reload signal".to_owned());
    }
    if report.injected > 0 {
        parts.push(format!("{} injected", report.injected));
    }
    if report.reloaded {
        parts.push("full reload".to_owned());
    }
    parts.join(", ")
}
