//! Execution-context detection for CI providers.
//!
//! This module infers how the current process is being run (a developer's
//! machine, Github Actions, Jenkins or Gitlab CI) purely from environment
//! variables, and whether the run is a plain branch build or a change request.
//!
//! # Overview
//!
//! Detectors are evaluated in a fixed order and the first applicable one wins:
//!
//! | Order | Provider | Applicable when |
//! |-------|----------|-----------------|
//! | 1 | Local | `BRANCH` is set |
//! | 2 | Github | `GITHUB_SHA` is set |
//! | 3 | Jenkins | `JENKINS_URL` is set |
//! | 4 | Gitlab | `CI_COMMIT_REF_NAME` is set |
//!
//! Later detectors are never consulted, even when their variables are present.
//! A stray `BRANCH` on a CI runner therefore shadows the CI detector.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use scm_provenance::context::{Provider, resolve};
//!
//! let env: HashMap<String, String> = [
//!     ("GITHUB_SHA", "0123456"),
//!     ("GITHUB_REF_NAME", "feature/pr-23"),
//! ]
//! .into_iter()
//! .map(|(k, v)| (k.to_string(), v.to_string()))
//! .collect();
//!
//! let ctx = resolve(&env).unwrap();
//! assert_eq!(ctx.provider(), Provider::Github);
//! assert!(!ctx.is_change_request());
//! assert_eq!(ctx.target_branch_name(), "feature/pr-23");
//! ```

mod detector;
mod env;

pub use detector::{ExecutionContext, Provider, resolve};
pub use env::{EnvSource, ProcessEnv};
