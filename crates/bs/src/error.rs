//! CLI error types.

use bs_config::ConfigError;
use bs_reload::ReloadError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Reload(#[from] ReloadError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
