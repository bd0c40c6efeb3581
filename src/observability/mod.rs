//! Logging setup.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the binary (or to the host process embedding the library).

mod logging;

pub use logging::{LogFormat, LoggingConfig};

use crate::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static LOGGING_INIT: OnceLock<()> = OnceLock::new();

/// Installs the global `tracing` subscriber.
///
/// Events go to stderr, or are appended to `config.file` (without ANSI
/// colours) when one is set.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for a malformed filter directive and
/// [`Error::OperationFailed`] if logging was already initialized or the log
/// file cannot be opened.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    if LOGGING_INIT.get().is_some() {
        return Err(already_initialized());
    }

    let filter = build_filter(&config.filter)?;
    let (writer, ansi) = match &config.file {
        Some(path) => (BoxMakeWriter::new(open_log_file(path)?), false),
        None => (BoxMakeWriter::new(io::stderr), true),
    };

    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true);
    let registry = tracing_subscriber::registry().with(filter);
    let installed = match config.format {
        LogFormat::Json => registry
            .with(fmt.json().with_current_span(true).with_span_list(true))
            .try_init(),
        LogFormat::Pretty => registry.with(fmt.pretty()).try_init(),
    };
    installed.map_err(|_| already_initialized())?;

    LOGGING_INIT.set(()).map_err(|()| already_initialized())
}

fn already_initialized() -> Error {
    Error::OperationFailed {
        operation: "logging_init".to_string(),
        cause: "a global subscriber is already installed".to_string(),
    }
}

fn build_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|e| Error::InvalidInput(format!("log filter '{directive}': {e}")))
}

/// Opens `path` for appending; the subscriber serialises writes through the
/// mutex.
fn open_log_file(path: &Path) -> Result<Mutex<File>> {
    let open = || -> io::Result<File> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(path)
    };

    open().map(Mutex::new).map_err(|e| Error::OperationFailed {
        operation: "open_log_file".to_string(),
        cause: format!("{}: {e}", path.display()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_accepts_directives() {
        assert!(build_filter("info").is_ok());
        assert!(build_filter("scm_provenance=debug,git2=warn").is_ok());
    }

    #[test]
    fn test_filter_rejects_garbage() {
        let err = build_filter("scm_provenance=loudest").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_log_file_appends_and_creates_parents() {
        use std::io::Write;

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("provenance.log");

        open_log_file(&path).unwrap().lock().unwrap().write_all(b"first\n").unwrap();
        open_log_file(&path).unwrap().lock().unwrap().write_all(b"second\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_log_file_in_unwritable_location() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = open_log_file(&file.path().join("provenance.log")).unwrap_err();
        assert!(matches!(err, Error::OperationFailed { operation, .. } if operation == "open_log_file"));
    }
}
