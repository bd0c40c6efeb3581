//! Attribute keys emitted by the engine.

/// Version-control system, always `git`.
pub const SCM_TYPE: &str = "scm.type";
/// CI provider name (`Github`, `Jenkins`, `Gitlab`).
pub const SCM_PROVIDER: &str = "scm.provider";
/// Full name of the checked-out HEAD reference.
pub const SCM_BRANCH: &str = "scm.branch";
/// Target branch of a change request.
pub const SCM_BASE_REF: &str = "scm.baseRef";
/// Author emails of the change request commits.
pub const SCM_AUTHORS: &str = "scm.authors";
/// Committer emails of the change request commits.
pub const SCM_COMMITTERS: &str = "scm.committers";
/// URLs of the `origin` remote.
pub const SCM_REPOSITORY: &str = "scm.repository";
/// Lines added by the change request.
pub const GIT_ADDITIONS: &str = "scm.git.additions";
/// Lines deleted by the change request.
pub const GIT_DELETIONS: &str = "scm.git.deletions";
/// Files touched by the change request.
pub const GIT_MODIFIED_FILES: &str = "scm.git.files.modified";
/// Whether the checkout is a shallow clone.
pub const GIT_CLONE_SHALLOW: &str = "scm.git.clone.shallow";
/// Number of shallow boundary commits.
pub const GIT_CLONE_DEPTH: &str = "scm.git.clone.depth";

/// The only supported version-control system.
pub const SCM_TYPE_GIT: &str = "git";
