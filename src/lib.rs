//! # scm-provenance
//!
//! Source-control provenance for test-report telemetry.
//!
//! The crate answers three questions about the build that produced a test
//! report, using nothing but the process environment and the local checkout:
//!
//! - which CI provider ran it, and whether it is a branch build or a change
//!   request (pull/merge request);
//! - for change requests, who authored and committed the changes;
//! - for change requests, how large the change is (lines and files).
//!
//! The answers are produced as an ordered [`AttributeList`] that a telemetry
//! emitter attaches to its spans and metrics.
//!
//! ## Features
//!
//! - Precedence-ordered CI detectors: Local, Github, Jenkins, Gitlab
//! - Merge-base aware contributor mining over git history
//! - Tree-to-tree diff statistics
//! - Best-effort assembly: a missing remote, a shallow clone or an unknown
//!   target branch only removes the attributes that depend on it
//!
//! ## Example
//!
//! ```rust,no_run
//! use scm_provenance::context::ProcessEnv;
//! use scm_provenance::services::assemble_from_env;
//!
//! let attributes = assemble_from_env(&ProcessEnv, std::path::Path::new("."));
//! for (key, value) in attributes.iter() {
//!     println!("{key} = {value}");
//! }
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;
use thiserror::Error as ThisError;

pub mod config;
pub mod context;
pub mod git;
pub mod models;
pub mod observability;
pub mod services;

pub use config::ProvenanceConfig;
pub use context::{EnvSource, ExecutionContext, ProcessEnv, Provider};
pub use git::{GitRepository, ScmRepository};
pub use models::{AttributeList, AttributeValue, ChangeSizeStats, CloneInfo, ContributorSet};
pub use services::{AttributeAssembler, assemble_from_env};

/// Error type for provenance operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `NotAGitRepository` | No `.git` marker at the repository path |
/// | `OpenFailed` | git storage exists but cannot be opened |
/// | `BranchNotFound` | Target branch or its upstream merge config is missing |
/// | `RefResolution` | A reference cannot be resolved to an object |
/// | `CommitLookup` | A commit id/revision does not name a readable commit |
/// | `NoCommonAncestor` | HEAD and target share no history (or it was truncated) |
/// | `TreeResolution` | A tree cannot be read or diffed |
/// | `NoRemote` | The requested remote is not configured |
/// | `InvalidInput` | Malformed configuration |
/// | `OperationFailed` | Config file I/O, logging setup |
///
/// Every variant except the last two is recovered inside
/// [`AttributeAssembler`]; none of them reach the caller of `assemble`.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The path does not contain a git repository.
    #[error("not a git repository: {}", .0.display())]
    NotAGitRepository(PathBuf),

    /// The repository exists but could not be opened.
    #[error("failed to open repository at {}: {cause}", .path.display())]
    OpenFailed {
        /// Repository path.
        path: PathBuf,
        /// The underlying cause.
        cause: String,
    },

    /// A branch (or its upstream merge reference) does not exist.
    #[error("branch not found: {0}")]
    BranchNotFound(String),

    /// A reference could not be resolved.
    #[error("cannot resolve reference '{reference}': {cause}")]
    RefResolution {
        /// The reference being resolved.
        reference: String,
        /// The underlying cause.
        cause: String,
    },

    /// A commit could not be read.
    #[error("cannot look up commit '{spec}': {cause}")]
    CommitLookup {
        /// The revision or commit id.
        spec: String,
        /// The underlying cause.
        cause: String,
    },

    /// HEAD and the target commit share no ancestor.
    #[error("no common ancestor between {head} and {target}")]
    NoCommonAncestor {
        /// HEAD commit id.
        head: String,
        /// Target commit id.
        target: String,
    },

    /// A tree could not be resolved or diffed.
    #[error("tree resolution failed: {0}")]
    TreeResolution(String),

    /// The remote is not configured.
    #[error("remote not found: {0}")]
    NoRemote(String),

    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An ambient operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for provenance operations.
pub type Result<T> = std::result::Result<T, Error>;
