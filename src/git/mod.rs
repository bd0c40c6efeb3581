//! Git access.
//!
//! [`ScmRepository`] is the read-only capability surface the attribution
//! services depend on; [`GitRepository`] implements it on top of git2.

mod local;
mod remote;
mod repository;

pub use local::GitRepository;
pub use remote::redact_credentials;
pub use repository::{CommitInfo, FileStat, HeadRef, ScmRepository, TreeId};
