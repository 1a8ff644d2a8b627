//! `bs stream` command implementation.

use std::io;

use bs_reload::StreamOptions;
use clap::Args;

use super::{CommonArgs, feed_lines, print_summary};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the stream command.
#[derive(Args)]
pub(crate) struct StreamArgs {
    /// Reload the page once when the stream ends.
    #[arg(long)]
    once: bool,

    /// Only accept paths matching this glob (repeatable).
    #[arg(long = "match", value_name = "GLOB")]
    match_patterns: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl StreamArgs {
    /// Execute the stream command.
    ///
    /// Reads newline-separated paths from stdin until EOF, then ends the session.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, a match pattern or stdin is invalid.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let reloader = self.common.reloader()?;

        let mut session = reloader.stream(&self.options())?;
        let accepted = feed_lines(&mut session, io::stdin().lock())?;
        tracing::debug!(accepted, "Stdin closed, ending stream session");
        let report = session.end();

        print_summary(output, report);
        Ok(())
    }

    fn options(&self) -> StreamOptions {
        StreamOptions {
            once: self.once,
            match_patterns: self.match_patterns.clone(),
        }
    }
}
