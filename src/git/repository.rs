//! Capability trait over a version-control checkout.

use crate::Result;

/// A commit as seen by the attribution services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// Full commit id.
    pub id: String,
    /// Author email.
    pub author_email: String,
    /// Committer email.
    pub committer_email: String,
    /// Author time, milliseconds since the Unix epoch.
    pub author_time_ms: i64,
    /// Committer time, milliseconds since the Unix epoch.
    pub committer_time_ms: i64,
}

/// The checked-out HEAD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadRef {
    /// Full reference name, e.g. `refs/heads/main`, or `HEAD` when detached.
    pub name: String,
    /// Commit id HEAD points at.
    pub target: String,
}

/// Opaque tree identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TreeId(pub String);

/// Per-file line counts of a tree diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    /// Path of the file (new path, or old path for deletions).
    pub path: String,
    /// Added lines.
    pub additions: u64,
    /// Deleted lines.
    pub deletions: u64,
}

/// Read-only operations over a local checkout.
///
/// Implementations never mutate the repository. Every method may fail
/// independently; callers decide how much of a failure to tolerate.
pub trait ScmRepository {
    /// Resolves HEAD.
    fn head_ref(&self) -> Result<HeadRef>;

    /// Returns the upstream merge reference configured for a local branch.
    ///
    /// Fails with [`Error::BranchNotFound`](crate::Error::BranchNotFound)
    /// when the branch has no such configuration.
    fn resolve_branch(&self, name: &str) -> Result<String>;

    /// Resolves a reference or revision to a commit id.
    fn resolve_reference(&self, reference: &str) -> Result<String>;

    /// URLs of a remote.
    fn remote_urls(&self, name: &str) -> Result<Vec<String>>;

    /// Shallow boundary commits; empty for a full clone.
    fn shallow_commits(&self) -> Result<Vec<String>>;

    /// Reads the commit named by a commit id or revision.
    fn commit_at(&self, spec: &str) -> Result<CommitInfo>;

    /// Nearest common ancestor of two commits, if any.
    fn merge_base(&self, a: &CommitInfo, b: &CommitInfo) -> Result<Option<CommitInfo>>;

    /// Ancestry of `from` (inclusive) whose committer time is strictly
    /// greater than `since_ms`, newest first.
    fn log_since(&self, from: &CommitInfo, since_ms: i64) -> Result<Vec<CommitInfo>>;

    /// Root tree of a commit.
    fn tree_of(&self, commit: &CommitInfo) -> Result<TreeId>;

    /// Per-file stats of the change from `from` into `to`.
    fn diff(&self, from: &TreeId, to: &TreeId) -> Result<Vec<FileStat>>;
}
