//! Binary entry point for scm-provenance.
//!
//! Detects the CI context from the environment, inspects the checkout and
//! prints the resulting SCM attributes.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use anyhow::Context;
use clap::Parser;
use scm_provenance::config::{OutputFormat, ProvenanceConfig};
use scm_provenance::observability::{self, LoggingConfig};
use scm_provenance::{AttributeList, ProcessEnv, assemble_from_env};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Prints source-control provenance attributes for the current CI run.
#[derive(Parser)]
#[command(name = "scm-provenance")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Repository to inspect (default: config value, then current directory).
    #[arg(short, long, env = "SCM_PROVENANCE_REPOSITORY_PATH")]
    repository_path: Option<PathBuf>,

    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format: text or json.
    #[arg(short, long)]
    format: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    let logging = LoggingConfig::from_settings(Some(&config.logging), cli.verbose, &ProcessEnv);
    if let Err(e) = observability::init_logging(&logging) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

fn load_config(path: Option<&Path>) -> scm_provenance::Result<ProvenanceConfig> {
    match path {
        Some(path) => ProvenanceConfig::load_from_file(path),
        None => Ok(ProvenanceConfig::load_default()),
    }
}

fn run(cli: &Cli, config: &ProvenanceConfig) -> anyhow::Result<()> {
    let repo_path = resolve_repo_path(cli.repository_path.as_deref(), config);
    let format = cli
        .format
        .as_deref()
        .map_or(config.output_format, OutputFormat::parse);

    let attributes = assemble_from_env(&ProcessEnv, &repo_path);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render(&mut out, &attributes, format).context("failed to write attributes")?;
    out.flush().context("failed to flush output")?;
    Ok(())
}

fn resolve_repo_path(cli_path: Option<&Path>, config: &ProvenanceConfig) -> PathBuf {
    cli_path
        .map(Path::to_path_buf)
        .or_else(|| config.repo_path.clone())
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn render(out: &mut impl Write, attributes: &AttributeList, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for (key, value) in attributes.iter() {
                writeln!(out, "{key}={value}")?;
            }
        },
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, attributes)?;
            writeln!(out)?;
        },
    }
    Ok(())
}
