//! Structured logging configuration.

use crate::config::LoggingSettings;
use crate::context::EnvSource;
use std::path::PathBuf;

const DEFAULT_LEVEL: &str = "warn";
const VERBOSE_LEVEL: &str = "debug";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parses a format name; unknown names fall back to pretty.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// `EnvFilter` directive.
    pub filter: String,
    /// Log file; stderr when `None`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: DEFAULT_LEVEL.to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Builds logging configuration from config settings with overrides from
    /// `env`.
    ///
    /// Later sources win: config file, `SCM_PROVENANCE_LOG_FORMAT` /
    /// `SCM_PROVENANCE_LOG_LEVEL`, a non-empty `RUST_LOG` (replacing the whole
    /// filter), then `--verbose`.
    #[must_use]
    pub fn from_settings(
        settings: Option<&LoggingSettings>,
        verbose: bool,
        env: &dyn EnvSource,
    ) -> Self {
        let mut config = Self::default();

        if let Some(settings) = settings {
            if let Some(format) = &settings.format {
                config.format = LogFormat::parse(format);
            }
            if let Some(level) = non_empty(settings.level.as_deref()) {
                config.filter = level.to_string();
            }
            config.file.clone_from(&settings.file);
        }

        if let Some(format) = env.get("SCM_PROVENANCE_LOG_FORMAT") {
            config.format = LogFormat::parse(&format);
        }
        if let Some(level) = non_empty(env.get("SCM_PROVENANCE_LOG_LEVEL").as_deref()) {
            config.filter = level.to_string();
        }
        if let Some(directive) = non_empty(env.get("RUST_LOG").as_deref()) {
            config.filter = directive.to_string();
        }
        if verbose {
            config.filter = VERBOSE_LEVEL.to_string();
        }

        config
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
