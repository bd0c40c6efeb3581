//! Configuration management.

use serde::Deserialize;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "scm-provenance";
const CONFIG_FILE: &str = "config.toml";

/// Main configuration for scm-provenance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvenanceConfig {
    /// Repository to inspect; the current directory when unset.
    pub repo_path: Option<PathBuf>,
    /// How the CLI prints attributes.
    pub output_format: OutputFormat,
    /// Logging settings, overridable from the environment.
    pub logging: LoggingSettings,
}

/// CLI output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One `key=value` per line.
    #[default]
    Text,
    /// A JSON array of `{key, value}` entries.
    Json,
}

impl OutputFormat {
    /// Parses a format name; unknown names fall back to text.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoggingSettings {
    /// Level or filter directive (`info`, `scm_provenance=debug`).
    pub level: Option<String>,
    /// `pretty` or `json`.
    pub format: Option<String>,
    /// Log file; stderr when unset.
    pub file: Option<PathBuf>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Repository path.
    pub repo_path: Option<String>,
    /// Output format.
    pub output_format: Option<String>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
}

impl ProvenanceConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?;

        Self::parse(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid configuration TOML.
    pub fn parse(contents: &str) -> crate::Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location
    /// (`<config dir>/scm-provenance/config.toml`).
    ///
    /// Returns default configuration if no readable config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        Self::load_from_file(&path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
            Self::default()
        })
    }

    /// Platform-specific config file path, if a home directory is known.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join(APP_DIR).join(CONFIG_FILE))
    }

    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(repo_path) = file.repo_path {
            config.repo_path = Some(PathBuf::from(repo_path));
        }
        if let Some(format) = file.output_format {
            config.output_format = OutputFormat::parse(&format);
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        config
    }

    /// Sets the repository path.
    #[must_use]
    pub fn with_repo_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.repo_path = Some(path.into());
        self
    }
}
