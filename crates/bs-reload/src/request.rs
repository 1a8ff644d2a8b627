//! Caller requests.
//!
//! A reload call accepts several argument shapes (nothing, a path, a list of
//! paths, stream options). They are resolved once into a [`ChangeRequest`] so
//! the rest of the engine never inspects argument shape.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ReloadError;

/// Options for a stream session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamOptions {
    /// Reload the page exactly once when the session ends.
    pub once: bool,
    /// Glob patterns restricting which written files enter the batch.
    ///
    /// Empty means every file is accepted.
    pub match_patterns: Vec<String>,
}

impl StreamOptions {
    /// Options for a legacy `once` session.
    #[must_use]
    pub fn once() -> Self {
        Self {
            once: true,
            match_patterns: Vec::new(),
        }
    }

    /// Restrict the session to files matching a glob pattern.
    #[must_use]
    pub fn with_match(mut self, pattern: impl Into<String>) -> Self {
        self.match_patterns.push(pattern.into());
        self
    }
}

/// Raw caller input to a reload call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChangeRequest {
    /// Unconditional full reload.
    NoArgs,
    /// One path or glob pattern.
    SinglePath(String),
    /// Ordered list of paths.
    PathList(Vec<String>),
    /// Open a stream session.
    StreamMode(StreamOptions),
}

/// `match` accepts a single pattern or a list.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// Options object as sent by loosely typed callers.
#[derive(Deserialize)]
struct RawOptions {
    #[serde(default)]
    stream: bool,
    #[serde(default)]
    once: bool,
    #[serde(default, rename = "match")]
    match_patterns: Option<OneOrMany>,
}

impl ChangeRequest {
    /// Resolve a JSON argument into a request.
    ///
    /// `null` is a bare reload, a string is a single path, an array of strings
    /// is a path list and an object with `"stream": true` opens a session.
    pub fn from_json(value: Value) -> Result<Self, ReloadError> {
        match value {
            Value::Null => Ok(Self::NoArgs),
            Value::String(path) => Ok(Self::SinglePath(path)),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(path) => Ok(path),
                    other => Err(ReloadError::InvalidRequest(format!(
                        "path list entries must be strings, got {other}"
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::PathList),
            Value::Object(_) => {
                let raw: RawOptions = serde_json::from_value(value)?;
                if !raw.stream {
                    return Err(ReloadError::InvalidRequest(
                        "options object requires \"stream\": true".to_owned(),
                    ));
                }
                let match_patterns = match raw.match_patterns {
                    None => Vec::new(),
                    Some(OneOrMany::One(pattern)) => vec![pattern],
                    Some(OneOrMany::Many(patterns)) => patterns,
                };
                Ok(Self::StreamMode(StreamOptions {
                    once: raw.once,
                    match_patterns,
                }))
            }
            other => Err(ReloadError::InvalidRequest(format!(
                "unsupported reload argument: {other}"
            ))),
        }
    }

    /// Parse a JSON document into a request.
    pub fn from_json_str(json: &str) -> Result<Self, ReloadError> {
        Self::from_json(serde_json::from_str(json)?)
    }

    /// True for a bare reload with no arguments.
    #[must_use]
    pub fn is_no_args(&self) -> bool {
        matches!(self, Self::NoArgs)
    }
}

impl From<()> for ChangeRequest {
    fn from((): ()) -> Self {
        Self::NoArgs
    }
}

impl From<&str> for ChangeRequest {
    fn from(path: &str) -> Self {
        Self::SinglePath(path.to_owned())
    }
}

impl From<String> for ChangeRequest {
    fn from(path: String) -> Self {
        Self::SinglePath(path)
    }
}

impl From<Vec<String>> for ChangeRequest {
    fn from(paths: Vec<String>) -> Self {
        Self::PathList(paths)
    }
}

impl From<&[&str]> for ChangeRequest {
    fn from(paths: &[&str]) -> Self {
        Self::PathList(paths.iter().map(|p| (*p).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ChangeRequest {
    fn from(paths: [&str; N]) -> Self {
        Self::PathList(paths.iter().map(|p| (*p).to_owned()).collect())
    }
}

impl From<StreamOptions> for ChangeRequest {
    fn from(options: StreamOptions) -> Self {
        Self::StreamMode(options)
    }
}
