//! Commit range resolution and contributor mining.
//!
//! For a change request the range is `target..head`, where `target` is the
//! upstream merge reference of the target branch and `head` is the commit
//! announced by the CI provider (or HEAD when none was announced).

use crate::context::ExecutionContext;
use crate::git::{CommitInfo, ScmRepository};
use crate::models::ContributorSet;
use crate::{Error, Result};
use tracing::debug;

/// Offset added to the merge-base author time so the ancestor itself is not
/// walked.
///
/// Commits recorded within this window after the ancestor are misclassified
/// as part of the base history.
pub const ANCESTOR_BOUNDARY_MS: i64 = 1;

/// The two commits a change request is measured between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRange {
    /// Commit under test.
    pub head: CommitInfo,
    /// Tip of the target branch.
    pub target: CommitInfo,
}

/// Resolves the head and target commits for a context.
///
/// # Errors
///
/// [`Error::BranchNotFound`] when the target branch has no upstream merge
/// reference, [`Error::RefResolution`] when that reference or HEAD does not
/// resolve, [`Error::CommitLookup`] when a commit cannot be read.
pub fn compute_range<R: ScmRepository + ?Sized>(
    repo: &R,
    ctx: &ExecutionContext,
) -> Result<CommitRange> {
    let target_branch = ctx.target_branch_name();
    let merge_ref = repo.resolve_branch(target_branch)?;
    let target_id = repo.resolve_reference(&merge_ref)?;
    let target = repo.commit_at(&target_id)?;

    let head = if ctx.commit().is_empty() {
        let head = repo.head_ref()?;
        repo.commit_at(&head.target)?
    } else {
        repo.commit_at(ctx.commit())?
    };

    debug!(
        head = %head.id,
        target = %target.id,
        target_branch,
        "commit range resolved"
    );
    Ok(CommitRange { head, target })
}

/// Collects the distinct author and committer emails of the commits reachable
/// from `head` that are newer than the merge base of the range.
///
/// # Errors
///
/// [`Error::NoCommonAncestor`] when the histories do not meet (including
/// shallow clones truncated above the merge base); walk failures surface as
/// [`Error::CommitLookup`].
pub fn mine_contributors<R: ScmRepository + ?Sized>(
    repo: &R,
    range: &CommitRange,
) -> Result<ContributorSet> {
    let ancestor = repo
        .merge_base(&range.head, &range.target)?
        .ok_or_else(|| Error::NoCommonAncestor {
            head: range.head.id.clone(),
            target: range.target.id.clone(),
        })?;

    let since_ms = ancestor.author_time_ms.saturating_add(ANCESTOR_BOUNDARY_MS);

    let mut contributors = ContributorSet::default();
    let mut walked = 0_usize;
    for commit in repo.log_since(&range.head, since_ms)? {
        contributors.authors.insert(commit.author_email);
        contributors.committers.insert(commit.committer_email);
        walked += 1;
    }

    debug!(
        ancestor = %ancestor.id,
        walked,
        authors = contributors.authors.len(),
        committers = contributors.committers.len(),
        "contributors mined"
    );
    Ok(contributors)
}
