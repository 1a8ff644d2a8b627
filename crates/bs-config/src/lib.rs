//! Configuration management for bs.
//!
//! Parses `bs.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [reload]
//! inject_file_types = ["css"]
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override injectable extensions.
    pub inject_file_types: Option<Vec<String>>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "bs.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reload decision configuration.
    pub reload: ReloadConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Reload decision configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReloadConfig {
    /// Extensions injected in place instead of reloading the page.
    pub inject_file_types: Vec<String>,
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            inject_file_types: vec!["css".to_owned()],
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `bs.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and validated together with
    /// the file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(inject_file_types) = &settings.inject_file_types {
            self.reload.inject_file_types.clone_from(inject_file_types);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_config_from(current)
    }

    /// Search for config file starting at `dir` and walking up.
    fn discover_config_from(mut dir: PathBuf) -> Option<PathBuf> {
        loop {
            let candidate = dir.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically by [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_reload()?;
        Ok(())
    }

    /// Validate reload configuration.
    fn validate_reload(&self) -> Result<(), ConfigError> {
        for ext in &self.reload.inject_file_types {
            let normalized = ext.trim().trim_start_matches('.');
            if normalized.is_empty() {
                return Err(ConfigError::Validation(
                    "reload.inject_file_types cannot contain empty extensions".to_owned(),
                ));
            }
            if normalized.contains(['.', '/', '\\']) {
                return Err(ConfigError::Validation(format!(
                    "reload.inject_file_types: '{ext}' is not a plain extension"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.reload.inject_file_types, vec!["css".to_owned()]);
        assert!(config.config_path.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.reload.inject_file_types, vec!["css".to_owned()]);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[reload]
inject_file_types = ["css", "png", "svg"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.reload.inject_file_types,
            vec!["css".to_owned(), "png".to_owned(), "svg".to_owned()]
        );
    }

    #[test]
    fn test_parse_invalid_type() {
        let result: Result<Config, _> = toml::from_str("[reload]\ninject_file_types = \"css\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_empty_extension() {
        let mut config = Config::default();
        config.reload.inject_file_types = vec!["css".to_owned(), ".".to_owned()];

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_validate_extension_with_path() {
        let mut config = Config::default();
        config.reload.inject_file_types = vec!["styles/css".to_owned()];

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("styles/css"));
    }

    #[test]
    fn test_validate_leading_dot_allowed() {
        let mut config = Config::default();
        config.reload.inject_file_types = vec![".css".to_owned(), "PNG".to_owned()];

        config.validate().unwrap();
    }

    #[test]
    fn test_empty_inject_list_is_valid() {
        let mut config = Config::default();
        config.reload.inject_file_types = Vec::new();

        config.validate().unwrap();
    }

    #[test]
    fn test_apply_cli_settings_inject_file_types() {
        let mut config = Config::default();
        let overrides = CliSettings {
            inject_file_types: Some(vec!["css".to_owned(), "jpg".to_owned()]),
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.reload.inject_file_types,
            vec!["css".to_owned(), "jpg".to_owned()]
        );
    }

    #[test]
    fn test_apply_empty_cli_settings() {
        let mut config = Config::default();

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.reload.inject_file_types, vec!["css".to_owned()]); // Unchanged
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[reload]\ninject_file_types = [\"css\", \"map\"]\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(
            config.reload.inject_file_types,
            vec!["css".to_owned(), "map".to_owned()]
        );
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(
            matches!(err, ConfigError::NotFound(ref p) if p == &path),
            "Expected ConfigError::NotFound, got {err:?}"
        );
    }

    #[test]
    fn test_load_applies_and_validates_cli_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bs.toml");
        std::fs::write(&path, "[reload]\ninject_file_types = [\"css\"]\n").unwrap();
        let overrides = CliSettings {
            inject_file_types: Some(vec!["styles/css".to_owned()]),
        };

        let err = Config::load(Some(&path), Some(&overrides)).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bs.toml");
        std::fs::write(&path, "[reload\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&config_path, "").unwrap();
        let nested = dir.path().join("src").join("styles");
        std::fs::create_dir_all(&nested).unwrap();

        let discovered = Config::discover_config_from(nested);

        assert_eq!(discovered, Some(config_path));
    }

    #[test]
    fn test_discover_config_none() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a");
        std::fs::create_dir_all(&nested).unwrap();

        // Walks up past the temp dir, so only assert nothing inside it is found
        let discovered = Config::discover_config_from(nested);
        assert!(discovered.is_none_or(|p| !p.starts_with(dir.path())));
    }
}
