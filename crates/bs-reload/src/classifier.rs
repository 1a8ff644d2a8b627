//! Injectability classification.
//!
//! Decides per descriptor whether the change can be hot-swapped in the browser
//! or needs a full page reload. The rule is a closed allow-list of extensions.

use std::collections::BTreeSet;

use crate::descriptor::ChangeDescriptor;
use crate::event::{DEFAULT_NAMESPACE, FileChange};

/// Extensions injected when nothing else is configured.
pub const DEFAULT_INJECT_FILE_TYPES: &[&str] = &["css"];

/// Outcome of classifying one descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReloadDecision {
    /// Hot-swap the asset with this payload.
    Inject(FileChange),
    /// Reload the whole page.
    FullReload,
}

impl ReloadDecision {
    /// True for [`ReloadDecision::FullReload`].
    #[must_use]
    pub fn is_full_reload(&self) -> bool {
        matches!(self, Self::FullReload)
    }
}

/// Allow-list classifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classifier {
    inject_file_types: BTreeSet<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_INJECT_FILE_TYPES.iter().copied())
    }
}

impl Classifier {
    /// Create a classifier injecting the given extensions.
    ///
    /// Extensions are compared case-insensitively; a leading dot is ignored.
    /// Empty entries are dropped since an empty extension never injects.
    #[must_use]
    pub fn new<I, S>(inject_file_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let inject_file_types = inject_file_types
            .into_iter()
            .map(|ext| normalize_extension(ext.as_ref()))
            .filter(|ext| !ext.is_empty())
            .collect();
        Self { inject_file_types }
    }

    /// Extensions that are injected, sorted.
    pub fn inject_file_types(&self) -> impl Iterator<Item = &str> {
        self.inject_file_types.iter().map(String::as_str)
    }

    /// Check whether an extension is on the allow-list.
    #[must_use]
    pub fn is_injectable(&self, extension: &str) -> bool {
        !extension.is_empty() && self.inject_file_types.contains(extension)
    }

    /// Classify a descriptor.
    #[must_use]
    pub fn classify(&self, descriptor: &ChangeDescriptor) -> ReloadDecision {
        if !self.is_injectable(descriptor.extension()) {
            return ReloadDecision::FullReload;
        }

        ReloadDecision::Inject(FileChange {
            path: descriptor.path().to_owned(),
            basename: descriptor.basename().to_owned(),
            log: true,
            namespace: DEFAULT_NAMESPACE.to_owned(),
            event: "change".to_owned(),
            ext: descriptor.extension().to_owned(),
        })
    }
}

/// Lowercase and strip a leading dot (`.CSS` -> `css`).
fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}
