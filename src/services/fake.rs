//! In-memory repository for service tests.

use crate::git::{CommitInfo, FileStat, HeadRef, ScmRepository, TreeId};
use crate::{Error, Result};
use std::collections::HashMap;

/// Scriptable [`ScmRepository`]; anything not configured fails.
#[derive(Debug, Default)]
pub struct FakeRepository {
    pub head: Option<HeadRef>,
    /// Branch name to upstream merge reference.
    pub branches: HashMap<String, String>,
    /// Reference to commit id.
    pub refs: HashMap<String, String>,
    pub commits: HashMap<String, CommitInfo>,
    pub remotes: HashMap<String, Vec<String>>,
    /// `None` simulates an unreadable shallow file.
    pub shallow: Option<Vec<String>>,
    pub merge_base: Option<String>,
    /// History returned by `log_since`, newest first.
    pub log: Vec<CommitInfo>,
    pub trees_fail: bool,
    pub diff: Vec<FileStat>,
}

pub fn commit(id: &str, email: &str, seconds: i64) -> CommitInfo {
    CommitInfo {
        id: id.to_string(),
        author_email: email.to_string(),
        committer_email: email.to_string(),
        author_time_ms: seconds * 1000,
        committer_time_ms: seconds * 1000,
    }
}

impl FakeRepository {
    /// A repository where `feature` (HEAD, one commit by `dev@test.com`)
    /// diverges from `main` at `base`.
    pub fn diverged() -> Self {
        let base = commit("base", "maintainer@test.com", 1_000);
        let main = commit("main-tip", "maintainer@test.com", 1_500);
        let feature = commit("feature-tip", "dev@test.com", 2_000);

        let mut repo = Self {
            head: Some(HeadRef {
                name: "refs/heads/feature".to_string(),
                target: feature.id.clone(),
            }),
            shallow: Some(Vec::new()),
            merge_base: Some(base.id.clone()),
            log: vec![feature.clone(), base.clone()],
            diff: vec![FileStat {
                path: "src/lib.rs".to_string(),
                additions: 4,
                deletions: 1,
            }],
            ..Self::default()
        };
        repo.branches
            .insert("main".to_string(), "refs/heads/main".to_string());
        repo.refs
            .insert("refs/heads/main".to_string(), main.id.clone());
        repo.remotes.insert(
            "origin".to_string(),
            vec!["https://github.com/org/repo.git".to_string()],
        );
        for c in [base, main, feature] {
            repo.commits.insert(c.id.clone(), c);
        }
        repo
    }
}

impl ScmRepository for FakeRepository {
    fn head_ref(&self) -> Result<HeadRef> {
        self.head.clone().ok_or_else(|| Error::RefResolution {
            reference: "HEAD".to_string(),
            cause: "unborn".to_string(),
        })
    }

    fn resolve_branch(&self, name: &str) -> Result<String> {
        self.branches
            .get(name)
            .cloned()
            .ok_or_else(|| Error::BranchNotFound(name.to_string()))
    }

    fn resolve_reference(&self, reference: &str) -> Result<String> {
        self.refs
            .get(reference)
            .cloned()
            .ok_or_else(|| Error::RefResolution {
                reference: reference.to_string(),
                cause: "missing".to_string(),
            })
    }

    fn remote_urls(&self, name: &str) -> Result<Vec<String>> {
        self.remotes
            .get(name)
            .cloned()
            .ok_or_else(|| Error::NoRemote(name.to_string()))
    }

    fn shallow_commits(&self) -> Result<Vec<String>> {
        self.shallow.clone().ok_or_else(|| Error::OperationFailed {
            operation: "read_shallow".to_string(),
            cause: "unreadable".to_string(),
        })
    }

    fn commit_at(&self, spec: &str) -> Result<CommitInfo> {
        self.commits
            .get(spec)
            .cloned()
            .ok_or_else(|| Error::CommitLookup {
                spec: spec.to_string(),
                cause: "missing".to_string(),
            })
    }

    fn merge_base(&self, _a: &CommitInfo, _b: &CommitInfo) -> Result<Option<CommitInfo>> {
        Ok(self
            .merge_base
            .as_ref()
            .and_then(|id| self.commits.get(id))
            .cloned())
    }

    fn log_since(&self, _from: &CommitInfo, since_ms: i64) -> Result<Vec<CommitInfo>> {
        Ok(self
            .log
            .iter()
            .filter(|c| c.committer_time_ms > since_ms)
            .cloned()
            .collect())
    }

    fn tree_of(&self, commit: &CommitInfo) -> Result<TreeId> {
        if self.trees_fail {
            return Err(Error::TreeResolution(format!("no tree for {}", commit.id)));
        }
        Ok(TreeId(commit.id.clone()))
    }

    fn diff(&self, _from: &TreeId, _to: &TreeId) -> Result<Vec<FileStat>> {
        Ok(self.diff.clone())
    }
}
