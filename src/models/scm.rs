//! Results of the mining steps.

use super::attributes::AttributeList;
use super::semconv;
use std::collections::BTreeSet;

/// Distinct author and committer emails over a commit range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributorSet {
    /// Author emails.
    pub authors: BTreeSet<String>,
    /// Committer emails.
    pub committers: BTreeSet<String>,
}

impl ContributorSet {
    /// Returns `true` when no commit was walked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty() && self.committers.is_empty()
    }

    /// Attributes for this set; empty sets are not emitted.
    #[must_use]
    pub fn to_attributes(&self) -> AttributeList {
        let mut attributes = AttributeList::new();
        if !self.authors.is_empty() {
            attributes.insert(
                semconv::SCM_AUTHORS,
                self.authors.iter().cloned().collect::<Vec<_>>(),
            );
        }
        if !self.committers.is_empty() {
            attributes.insert(
                semconv::SCM_COMMITTERS,
                self.committers.iter().cloned().collect::<Vec<_>>(),
            );
        }
        attributes
    }
}

/// Size of a change request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSizeStats {
    /// Added lines.
    pub additions: u64,
    /// Deleted lines.
    pub deletions: u64,
    /// Number of touched files.
    pub modified_files: u64,
}

impl ChangeSizeStats {
    /// Attributes for these stats; all three keys are always emitted together.
    #[must_use]
    pub fn to_attributes(&self) -> AttributeList {
        let mut attributes = AttributeList::new();
        attributes.insert(semconv::GIT_ADDITIONS, self.additions);
        attributes.insert(semconv::GIT_DELETIONS, self.deletions);
        attributes.insert(semconv::GIT_MODIFIED_FILES, self.modified_files);
        attributes
    }
}

/// Shallow-clone information.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CloneInfo {
    /// Whether the repository has a shallow boundary.
    pub shallow: bool,
    /// Number of shallow boundary commits.
    pub depth: u64,
}

impl CloneInfo {
    /// Derives clone info from the shallow-commit list.
    #[must_use]
    pub fn from_shallow_commits(commits: &[String]) -> Self {
        let depth = u64::try_from(commits.len()).unwrap_or(u64::MAX);
        Self {
            shallow: depth > 0,
            depth,
        }
    }

    /// Attributes for this clone; both keys are always emitted.
    #[must_use]
    pub fn to_attributes(&self) -> AttributeList {
        let mut attributes = AttributeList::new();
        attributes.insert(semconv::GIT_CLONE_SHALLOW, self.shallow);
        attributes.insert(semconv::GIT_CLONE_DEPTH, self.depth);
        attributes
    }
}
