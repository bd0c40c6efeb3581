//! git2-backed repository access.

use super::remote::redact_credentials;
use super::repository::{CommitInfo, FileStat, HeadRef, ScmRepository, TreeId};
use crate::{Error, Result};
use git2::{ErrorCode, Oid, Patch, Repository, Signature, Sort};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A local git checkout opened read-only.
pub struct GitRepository {
    repo: Repository,
    path: PathBuf,
}

impl std::fmt::Debug for GitRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepository")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl GitRepository {
    /// Opens the repository at `path`.
    ///
    /// Parent directories are not searched: `path` must be the working tree
    /// root (or a bare repository).
    ///
    /// # Errors
    ///
    /// [`Error::NotAGitRepository`] when there is no repository marker at
    /// `path`, [`Error::OpenFailed`] when the marker exists but git storage
    /// cannot be read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|e| {
            if path.join(".git").exists() {
                Error::OpenFailed {
                    path: path.to_path_buf(),
                    cause: e.message().to_string(),
                }
            } else {
                Error::NotAGitRepository(path.to_path_buf())
            }
        })?;

        debug!(path = %path.display(), "repository opened");
        Ok(Self {
            repo,
            path: path.to_path_buf(),
        })
    }

    /// Path the repository was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse_oid(id: &str) -> Result<Oid> {
        Oid::from_str(id).map_err(|e| Error::CommitLookup {
            spec: id.to_string(),
            cause: e.message().to_string(),
        })
    }

    fn find_commit(&self, id: &str) -> Result<git2::Commit<'_>> {
        let oid = Self::parse_oid(id)?;
        self.repo.find_commit(oid).map_err(|e| Error::CommitLookup {
            spec: id.to_string(),
            cause: e.message().to_string(),
        })
    }
}

fn email_of(signature: &Signature<'_>) -> String {
    String::from_utf8_lossy(signature.email_bytes()).into_owned()
}

fn millis_of(signature: &Signature<'_>) -> i64 {
    signature.when().seconds().saturating_mul(1000)
}

fn commit_info(commit: &git2::Commit<'_>) -> CommitInfo {
    let author = commit.author();
    let committer = commit.committer();
    CommitInfo {
        id: commit.id().to_string(),
        author_email: email_of(&author),
        committer_email: email_of(&committer),
        author_time_ms: millis_of(&author),
        committer_time_ms: millis_of(&committer),
    }
}

fn tree_error(e: &git2::Error) -> Error {
    Error::TreeResolution(e.message().to_string())
}

fn usize_to_u64(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

impl ScmRepository for GitRepository {
    fn head_ref(&self) -> Result<HeadRef> {
        let head = self.repo.head().map_err(|e| Error::RefResolution {
            reference: "HEAD".to_string(),
            cause: e.message().to_string(),
        })?;

        let name = String::from_utf8_lossy(head.name_bytes()).into_owned();
        let commit = head.peel_to_commit().map_err(|e| Error::CommitLookup {
            spec: name.clone(),
            cause: e.message().to_string(),
        })?;

        Ok(HeadRef {
            name,
            target: commit.id().to_string(),
        })
    }

    fn resolve_branch(&self, name: &str) -> Result<String> {
        if name.is_empty() {
            return Err(Error::BranchNotFound(String::new()));
        }

        self.repo
            .config()
            .and_then(|config| config.get_string(&format!("branch.{name}.merge")))
            .map_err(|_| Error::BranchNotFound(name.to_string()))
    }

    fn resolve_reference(&self, reference: &str) -> Result<String> {
        let object = self
            .repo
            .revparse_single(reference)
            .map_err(|e| Error::RefResolution {
                reference: reference.to_string(),
                cause: e.message().to_string(),
            })?;

        let commit = object.peel_to_commit().map_err(|e| Error::RefResolution {
            reference: reference.to_string(),
            cause: e.message().to_string(),
        })?;

        Ok(commit.id().to_string())
    }

    fn remote_urls(&self, name: &str) -> Result<Vec<String>> {
        let no_remote = || Error::NoRemote(name.to_string());
        self.repo.find_remote(name).map_err(|_| no_remote())?;

        // a remote may carry several `url` entries; git2's Remote::url only reports the last
        let config = self.repo.config().map_err(|_| no_remote())?;
        let mut entries = config
            .multivar(&format!("remote.{name}.url"), None)
            .map_err(|_| no_remote())?;

        let mut urls = Vec::new();
        while let Some(entry) = entries.next() {
            let entry = entry.map_err(|_| no_remote())?;
            let url = String::from_utf8_lossy(entry.value_bytes());
            if !url.is_empty() {
                urls.push(redact_credentials(&url));
            }
        }

        if urls.is_empty() {
            return Err(no_remote());
        }
        Ok(urls)
    }

    fn shallow_commits(&self) -> Result<Vec<String>> {
        let shallow_file = self.repo.path().join("shallow");
        match std::fs::read_to_string(&shallow_file) {
            Ok(contents) => Ok(contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(Error::OperationFailed {
                operation: "read_shallow".to_string(),
                cause: format!("{}: {e}", shallow_file.display()),
            }),
        }
    }

    fn commit_at(&self, spec: &str) -> Result<CommitInfo> {
        let object = self
            .repo
            .revparse_single(spec)
            .map_err(|e| Error::CommitLookup {
                spec: spec.to_string(),
                cause: e.message().to_string(),
            })?;

        let commit = object.peel_to_commit().map_err(|e| Error::CommitLookup {
            spec: spec.to_string(),
            cause: e.message().to_string(),
        })?;

        Ok(commit_info(&commit))
    }

    fn merge_base(&self, a: &CommitInfo, b: &CommitInfo) -> Result<Option<CommitInfo>> {
        let a_oid = Self::parse_oid(&a.id)?;
        let b_oid = Self::parse_oid(&b.id)?;

        match self.repo.merge_base(a_oid, b_oid) {
            Ok(oid) => self.find_commit(&oid.to_string()).map(|c| Some(commit_info(&c))),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(Error::CommitLookup {
                spec: format!("{}...{}", a.id, b.id),
                cause: e.message().to_string(),
            }),
        }
    }

    fn log_since(&self, from: &CommitInfo, since_ms: i64) -> Result<Vec<CommitInfo>> {
        let walk_error = |e: git2::Error| Error::CommitLookup {
            spec: from.id.clone(),
            cause: e.message().to_string(),
        };

        let mut revwalk = self.repo.revwalk().map_err(walk_error)?;
        revwalk.set_sorting(Sort::TIME).map_err(walk_error)?;
        revwalk.push(Self::parse_oid(&from.id)?).map_err(walk_error)?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid.map_err(walk_error)?;
            let commit = self.repo.find_commit(oid).map_err(walk_error)?;
            let info = commit_info(&commit);
            // committer clocks are not monotonic along ancestry, so filter rather than stop
            if info.committer_time_ms > since_ms {
                commits.push(info);
            }
        }

        Ok(commits)
    }

    fn tree_of(&self, commit: &CommitInfo) -> Result<TreeId> {
        let oid = Oid::from_str(&commit.id).map_err(|e| tree_error(&e))?;
        let commit = self.repo.find_commit(oid).map_err(|e| tree_error(&e))?;
        let tree = commit.tree().map_err(|e| tree_error(&e))?;
        Ok(TreeId(tree.id().to_string()))
    }

    fn diff(&self, from: &TreeId, to: &TreeId) -> Result<Vec<FileStat>> {
        let find_tree = |id: &TreeId| {
            Oid::from_str(&id.0)
                .and_then(|oid| self.repo.find_tree(oid))
                .map_err(|e| tree_error(&e))
        };
        let old_tree = find_tree(from)?;
        let new_tree = find_tree(to)?;

        let diff = self
            .repo
            .diff_tree_to_tree(Some(&old_tree), Some(&new_tree), None)
            .map_err(|e| tree_error(&e))?;

        let mut stats = Vec::with_capacity(diff.deltas().len());
        for (idx, delta) in diff.deltas().enumerate() {
            let path = delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path())
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default();

            // binary deltas have no patch; they still count as a modified file
            let (additions, deletions) = match Patch::from_diff(&diff, idx) {
                Ok(Some(patch)) => {
                    let (_, additions, deletions) =
                        patch.line_stats().map_err(|e| tree_error(&e))?;
                    (usize_to_u64(additions), usize_to_u64(deletions))
                },
                Ok(None) => (0, 0),
                Err(e) => return Err(tree_error(&e)),
            };

            stats.push(FileStat {
                path,
                additions,
                deletions,
            });
        }

        Ok(stats)
    }
}
