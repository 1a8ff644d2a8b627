//! Public reload entry points.

use crate::classifier::{Classifier, DEFAULT_INJECT_FILE_TYPES};
use crate::descriptor::normalize;
use crate::dispatcher::{BatchReport, Dispatcher};
use crate::error::ReloadError;
use crate::event::EventBus;
use crate::request::{ChangeRequest, StreamOptions};
use crate::stream::StreamSession;

/// Reloader configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReloaderConfig {
    /// Extensions that are injected instead of reloading the page.
    pub inject_file_types: Vec<String>,
}

impl Default for ReloaderConfig {
    fn default() -> Self {
        Self {
            inject_file_types: DEFAULT_INJECT_FILE_TYPES
                .iter()
                .map(|ext| (*ext).to_owned())
                .collect(),
        }
    }
}

/// Result of a reload call.
pub enum Reload<'a, B: EventBus> {
    /// The request was dispatched as one batch.
    Dispatched(BatchReport),
    /// A stream session was opened; write files and call `end`.
    Stream(StreamSession<'a, B>),
}

impl<'a, B: EventBus> Reload<'a, B> {
    /// Report of a dispatched request.
    #[must_use]
    pub fn report(&self) -> Option<BatchReport> {
        match self {
            Self::Dispatched(report) => Some(*report),
            Self::Stream(_) => None,
        }
    }

    /// Stream session, if one was opened.
    #[must_use]
    pub fn into_stream(self) -> Option<StreamSession<'a, B>> {
        match self {
            Self::Dispatched(_) => None,
            Self::Stream(session) => Some(session),
        }
    }
}

/// Reload orchestrator.
///
/// Owns the event bus it publishes on. Each call is independent: nothing is
/// remembered between batches.
pub struct Reloader<B: EventBus> {
    dispatcher: Dispatcher<B>,
}

impl<B: EventBus> Reloader<B> {
    /// Create a reloader with the default configuration.
    #[must_use]
    pub fn new(bus: B) -> Self {
        Self::with_config(bus, &ReloaderConfig::default())
    }

    /// Create a reloader with the given configuration.
    #[must_use]
    pub fn with_config(bus: B, config: &ReloaderConfig) -> Self {
        let classifier = Classifier::new(&config.inject_file_types);
        Self {
            dispatcher: Dispatcher::new(bus, classifier),
        }
    }

    /// Event bus events are published on.
    #[must_use]
    pub fn bus(&self) -> &B {
        self.dispatcher.bus()
    }

    /// Classifier deciding between injection and reload.
    #[must_use]
    pub fn classifier(&self) -> &Classifier {
        self.dispatcher.classifier()
    }

    /// Handle a reload request.
    ///
    /// # Errors
    ///
    /// Returns `ReloadError::InvalidPattern` if a stream `match` pattern is invalid.
    pub fn reload(&self, request: impl Into<ChangeRequest>) -> Result<Reload<'_, B>, ReloadError> {
        let request = request.into();
        if let ChangeRequest::StreamMode(options) = &request {
            return self.stream(options).map(Reload::Stream);
        }

        let descriptors = normalize(&request);
        Ok(Reload::Dispatched(
            self.dispatcher.dispatch(&descriptors, request.is_no_args()),
        ))
    }

    /// Reload every connected browser.
    pub fn reload_all(&self) -> BatchReport {
        self.dispatcher.dispatch(&[], true)
    }

    /// Announce a single changed path.
    pub fn reload_path(&self, path: impl Into<String>) -> BatchReport {
        let descriptors = normalize(&ChangeRequest::SinglePath(path.into()));
        self.dispatcher.dispatch(&descriptors, false)
    }

    /// Announce several changed paths as one batch.
    pub fn reload_paths<I, S>(&self, paths: I) -> BatchReport
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let request = ChangeRequest::PathList(paths.into_iter().map(Into::into).collect());
        self.dispatcher.dispatch(&normalize(&request), false)
    }

    /// Open a stream session.
    ///
    /// # Errors
    ///
    /// Returns `ReloadError::InvalidPattern` if a `match` pattern is invalid.
    pub fn stream(&self, options: &StreamOptions) -> Result<StreamSession<'_, B>, ReloadError> {
        StreamSession::open(&self.dispatcher, options)
    }
}

/// Create reloader configuration from `bs.toml` configuration.
#[must_use]
pub fn reloader_config_from_config(config: &bs_config::Config) -> ReloaderConfig {
    ReloaderConfig {
        inject_file_types: config.reload.inject_file_types.clone(),
    }
}
