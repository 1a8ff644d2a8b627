//! Error types for reload requests.
//!
//! Classification and dispatch are total. Errors only arise while resolving
//! loosely typed input at the boundary.

/// Reload request error.
#[derive(Debug, thiserror::Error)]
pub enum ReloadError {
    /// Stream `match` pattern is not a valid glob.
    #[error("Invalid match pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Pattern as given by the caller.
        pattern: String,
        /// Underlying glob error.
        source: glob::PatternError,
    },
    /// Request has an unsupported shape.
    #[error("Invalid reload request: {0}")]
    InvalidRequest(String),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
