//! Stream sessions.
//!
//! Build pipelines write files one at a time and close the session when done.
//! All files written to a session form one batch, dispatched when the session
//! ends.

use crate::descriptor::{ChangeDescriptor, FileLike};
use crate::dispatcher::{BatchReport, Dispatcher};
use crate::error::ReloadError;
use crate::event::EventBus;
use crate::request::StreamOptions;

/// Open stream session accumulating one batch.
///
/// Ending the session consumes it, so nothing can be written after close.
/// Dropping an open session discards the batch without publishing.
pub struct StreamSession<'a, B: EventBus> {
    dispatcher: &'a Dispatcher<B>,
    once: bool,
    patterns: Vec<glob::Pattern>,
    pending: Vec<ChangeDescriptor>,
    finished: bool,
}

impl<'a, B: EventBus> StreamSession<'a, B> {
    /// Open a session feeding the given dispatcher.
    ///
    /// # Errors
    ///
    /// Returns `ReloadError::InvalidPattern` if a `match` pattern is not a valid glob.
    pub(crate) fn open(
        dispatcher: &'a Dispatcher<B>,
        options: &StreamOptions,
    ) -> Result<Self, ReloadError> {
        let patterns = options
            .match_patterns
            .iter()
            .map(|pattern| {
                glob::Pattern::new(pattern).map_err(|source| ReloadError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(once = options.once, patterns = patterns.len(), "Stream session opened");

        Ok(Self {
            dispatcher,
            once: options.once,
            patterns,
            pending: Vec::new(),
            finished: false,
        })
    }

    /// Write a file into the session.
    ///
    /// Returns `false` if the file was filtered out by the session's `match`
    /// patterns.
    pub fn write<F: FileLike + ?Sized>(&mut self, file: &F) -> bool {
        let path = file.path();
        if !self.matches(path) {
            tracing::debug!(path, "Stream item does not match, skipping");
            return false;
        }

        self.pending.push(ChangeDescriptor::new(path));
        true
    }

    /// Number of files accepted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True if no file has been accepted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Close the session and dispatch the accumulated batch.
    pub fn end(mut self) -> BatchReport {
        self.finished = true;
        let pending = std::mem::take(&mut self.pending);
        self.dispatcher.dispatch_session(&pending, self.once)
    }

    fn matches(&self, path: &str) -> bool {
        self.patterns.is_empty() || self.patterns.iter().any(|p| p.matches(path))
    }
}

impl<B: EventBus, F: FileLike> Extend<F> for StreamSession<'_, B> {
    fn extend<I: IntoIterator<Item = F>>(&mut self, iter: I) {
        for file in iter {
            self.write(&file);
        }
    }
}

impl<B: EventBus> Drop for StreamSession<'_, B> {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!(
                pending = self.pending.len(),
                "Stream session dropped without end, discarding batch"
            );
        }
    }
}
