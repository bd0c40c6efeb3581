//! Change size of a commit range.

use super::contributors::CommitRange;
use crate::Result;
use crate::git::ScmRepository;
use crate::models::ChangeSizeStats;
use std::collections::BTreeSet;
use tracing::debug;

/// Sums line additions and deletions between the target tree and the head
/// tree of `range`, and counts the distinct files touched.
///
/// Binary files count as modified with no line changes.
///
/// # Errors
///
/// [`crate::Error::TreeResolution`] when either tree cannot be read or the
/// diff between them fails.
pub fn compute_file_stats<R: ScmRepository + ?Sized>(
    repo: &R,
    range: &CommitRange,
) -> Result<ChangeSizeStats> {
    let from = repo.tree_of(&range.target)?;
    let to = repo.tree_of(&range.head)?;

    let mut stats = ChangeSizeStats::default();
    let mut paths = BTreeSet::new();
    for file in repo.diff(&from, &to)? {
        stats.additions = stats.additions.saturating_add(file.additions);
        stats.deletions = stats.deletions.saturating_add(file.deletions);
        paths.insert(file.path);
    }
    stats.modified_files = u64::try_from(paths.len()).unwrap_or(u64::MAX);

    debug!(
        additions = stats.additions,
        deletions = stats.deletions,
        files = stats.modified_files,
        "file stats computed"
    );
    Ok(stats)
}
