//! Attribution services.
//!
//! Services combine the execution context with repository access to produce
//! telemetry attributes:
//!
//! - [`contributors`]: commit range resolution and contributor mining
//! - [`diff_stats`]: line and file counts between two snapshots
//! - [`AttributeAssembler`]: best-effort orchestration of both

mod assembler;
pub mod contributors;
pub mod diff_stats;

#[cfg(test)]
pub(crate) mod fake;

pub use assembler::{AttributeAssembler, assemble_from_env};
pub use contributors::{CommitRange, compute_range, mine_contributors};
pub use diff_stats::compute_file_stats;
