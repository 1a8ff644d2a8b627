//! `bs reload` command implementation.

use std::io;

use bs_reload::{ChangeRequest, Reload};
use clap::Args;

use super::{CommonArgs, feed_lines, print_summary};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the reload command.
#[derive(Args)]
pub(crate) struct ReloadArgs {
    /// Changed paths or glob patterns (none reloads every browser).
    paths: Vec<String>,

    /// Raw JSON reload argument (null, string, array or stream options).
    #[arg(long, conflicts_with = "paths")]
    json: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl ReloadArgs {
    /// Execute the reload command.
    ///
    /// A JSON stream request reads the session's files from stdin.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, the request or stdin is invalid.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let request = self.request()?;
        let reloader = self.common.reloader()?;

        let report = match reloader.reload(request)? {
            Reload::Dispatched(report) => report,
            Reload::Stream(mut session) => {
                feed_lines(&mut session, io::stdin().lock())?;
                session.end()
            }
        };

        print_summary(output, report);
        Ok(())
    }

    /// Resolve command-line arguments into a request.
    fn request(&self) -> Result<ChangeRequest, CliError> {
        if let Some(json) = &self.json {
            return Ok(ChangeRequest::from_json_str(json)?);
        }

        Ok(match self.paths.as_slice() {
            [] => ChangeRequest::NoArgs,
            [path] => ChangeRequest::SinglePath(path.clone()),
            paths => ChangeRequest::PathList(paths.to_vec()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bs_reload::StreamOptions;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ReloadArgs,
    }

    fn parse(argv: &[&str]) -> ReloadArgs {
        let mut full = vec!["bs"];
        full.extend_from_slice(argv);
        TestCli::parse_from(full).args
    }

    #[test]
    fn test_request_no_paths() {
        assert_eq!(parse(&[]).request().unwrap(), ChangeRequest::NoArgs);
    }

    #[test]
    fn test_request_single_path() {
        assert_eq!(
            parse(&["css/core.css"]).request().unwrap(),
            ChangeRequest::SinglePath("css/core.css".to_owned())
        );
    }

    #[test]
    fn test_request_many_paths() {
        assert_eq!(
            parse(&["css/core.css", "index.html"]).request().unwrap(),
            ChangeRequest::PathList(vec!["css/core.css".to_owned(), "index.html".to_owned()])
        );
    }

    #[test]
    fn test_request_json() {
        assert_eq!(
            parse(&["--json", r#"{"stream": true, "once": true}"#])
                .request()
                .unwrap(),
            ChangeRequest::StreamMode(StreamOptions::once())
        );
    }

    #[test]
    fn test_request_invalid_json() {
        let err = parse(&["--json", "{"]).request().unwrap_err();
        assert!(matches!(err, CliError::Reload(_)));
    }

    #[test]
    fn test_json_conflicts_with_paths() {
        let result = TestCli::try_parse_from(["bs", "a.css", "--json", "null"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_common_flags() {
        let args = parse(&["-v", "--inject", "css", "--inject", "png", "a.png"]);

        assert!(args.common.verbose);
        assert_eq!(args.common.inject, vec!["css", "png"]);
        assert_eq!(args.paths, vec!["a.png"]);
    }
}
