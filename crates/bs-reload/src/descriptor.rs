//! Path normalization.
//!
//! Turns caller input into an ordered sequence of [`ChangeDescriptor`]s. Paths
//! are never checked for existence and glob characters are taken literally.

use crate::request::ChangeRequest;

/// A single announced change, derived from a path string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeDescriptor {
    path: String,
    basename: String,
    extension: String,
}

impl ChangeDescriptor {
    /// Create a descriptor from a path or glob pattern.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let basename = basename(&path).to_owned();
        let extension = extension(&basename);
        Self {
            path,
            basename,
            extension,
        }
    }

    /// Create a descriptor from a file-like object's path.
    #[must_use]
    pub fn from_file<F: FileLike + ?Sized>(file: &F) -> Self {
        Self::new(file.path())
    }

    /// Path as announced by the caller.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last path segment.
    #[must_use]
    pub fn basename(&self) -> &str {
        &self.basename
    }

    /// Lowercased extension without the dot (empty if none).
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }
}

/// Extract the last `/`-separated segment, ignoring trailing separators.
fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or_default()
}

/// Extract the lowercased suffix after the final dot of a basename.
///
/// Dotfiles (`.env`) and names ending with a dot (`file.`) have no extension.
fn extension(basename: &str) -> String {
    match basename.rfind('.') {
        Some(0) | None => String::new(),
        Some(idx) => basename[idx + 1..].to_lowercase(),
    }
}

/// Object carrying at least a path attribute, as written to a stream session.
pub trait FileLike {
    /// Path of the file (relative or absolute, globs allowed).
    fn path(&self) -> &str;
}

impl FileLike for str {
    fn path(&self) -> &str {
        self
    }
}

impl FileLike for String {
    fn path(&self) -> &str {
        self
    }
}

impl<T: FileLike + ?Sized> FileLike for &T {
    fn path(&self) -> &str {
        (**self).path()
    }
}

/// Owned file reference as produced by build pipelines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VirtualFile {
    /// File path.
    pub path: String,
}

impl VirtualFile {
    /// Create a file reference for a path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl FileLike for VirtualFile {
    fn path(&self) -> &str {
        &self.path
    }
}

/// Normalize a request into descriptors, preserving order and duplicates.
///
/// `NoArgs` and `StreamMode` produce no descriptors: the former is an
/// unconditional reload, the latter receives its items through a session.
#[must_use]
pub fn normalize(request: &ChangeRequest) -> Vec<ChangeDescriptor> {
    match request {
        ChangeRequest::NoArgs | ChangeRequest::StreamMode(_) => Vec::new(),
        ChangeRequest::SinglePath(path) => vec![ChangeDescriptor::new(path.as_str())],
        ChangeRequest::PathList(paths) => paths
            .iter()
            .map(|path| ChangeDescriptor::new(path.as_str()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::StreamOptions;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_descriptor_nested_path() {
        let descriptor = ChangeDescriptor::new("css/core.css");

        assert_eq!(descriptor.path(), "css/core.css");
        assert_eq!(descriptor.basename(), "core.css");
        assert_eq!(descriptor.extension(), "css");
    }

    #[test]
    fn test_descriptor_wildcard_taken_literally() {
        let descriptor = ChangeDescriptor::new("*.css");

        assert_eq!(descriptor.path(), "*.css");
        assert_eq!(descriptor.basename(), "*.css");
        assert_eq!(descriptor.extension(), "css");
    }

    #[test]
    fn test_descriptor_extension_lowercased() {
        let descriptor = ChangeDescriptor::new("styles/MAIN.CSS");

        assert_eq!(descriptor.basename(), "MAIN.CSS");
        assert_eq!(descriptor.extension(), "css");
    }

    #[test]
    fn test_descriptor_uses_final_dot() {
        assert_eq!(ChangeDescriptor::new("app.min.js").extension(), "js");
        assert_eq!(ChangeDescriptor::new("archive.tar.GZ").extension(), "gz");
    }

    #[test]
    fn test_descriptor_without_extension() {
        let descriptor = ChangeDescriptor::new("Makefile");

        assert_eq!(descriptor.basename(), "Makefile");
        assert_eq!(descriptor.extension(), "");
    }

    #[test]
    fn test_descriptor_dot_in_directory_only() {
        let descriptor = ChangeDescriptor::new("v1.2/index");

        assert_eq!(descriptor.basename(), "index");
        assert_eq!(descriptor.extension(), "");
    }

    #[test]
    fn test_descriptor_dotfile_and_trailing_dot() {
        assert_eq!(ChangeDescriptor::new(".env").extension(), "");
        assert_eq!(ChangeDescriptor::new("config/.css").extension(), "");
        assert_eq!(ChangeDescriptor::new("file.").extension(), "");
    }

    #[test]
    fn test_descriptor_trailing_separator() {
        let descriptor = ChangeDescriptor::new("assets/css/");
        assert_eq!(descriptor.basename(), "css");
        assert_eq!(descriptor.extension(), "");
    }

    #[test]
    fn test_descriptor_empty_path() {
        let descriptor = ChangeDescriptor::new("");

        assert_eq!(descriptor.path(), "");
        assert_eq!(descriptor.basename(), "");
        assert_eq!(descriptor.extension(), "");
    }

    #[test]
    fn test_descriptor_from_file() {
        let file = VirtualFile::new("dist/app.css");
        let descriptor = ChangeDescriptor::from_file(&file);

        assert_eq!(descriptor.basename(), "app.css");
        assert_eq!(descriptor.extension(), "css");
        assert_eq!(ChangeDescriptor::from_file("index.html").extension(), "html");
    }

    #[test]
    fn test_normalize_no_args() {
        assert!(normalize(&ChangeRequest::NoArgs).is_empty());
    }

    #[test]
    fn test_normalize_stream_mode() {
        let request = ChangeRequest::StreamMode(StreamOptions::once());
        assert!(normalize(&request).is_empty());
    }

    #[test]
    fn test_normalize_single_path() {
        let descriptors = normalize(&ChangeRequest::SinglePath("index.html".to_owned()));

        assert_eq!(descriptors, vec![ChangeDescriptor::new("index.html")]);
    }

    #[test]
    fn test_normalize_list_preserves_order_and_duplicates() {
        let request = ChangeRequest::PathList(vec![
            "b.css".to_owned(),
            "a.css".to_owned(),
            "b.css".to_owned(),
        ]);

        let paths: Vec<_> = normalize(&request)
            .iter()
            .map(|d| d.path().to_owned())
            .collect();

        assert_eq!(paths, vec!["b.css", "a.css", "b.css"]);
    }
}
