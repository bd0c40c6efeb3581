//! CI execution-context detection implementation.

use super::env::EnvSource;
use tracing::debug;

/// CI system that produced the execution context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// No provider (only used for contexts built by hand).
    None,
    /// A developer machine, driven by `BRANCH` / `TARGET_BRANCH`.
    Local,
    /// Github Actions.
    Github,
    /// Jenkins multibranch pipelines.
    Jenkins,
    /// Gitlab CI.
    Gitlab,
}

impl Provider {
    /// Returns the value emitted as `scm.provider`.
    ///
    /// Local and unknown providers have no name and are not emitted.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None | Self::Local => "",
            Self::Github => "Github",
            Self::Jenkins => "Jenkins",
            Self::Gitlab => "Gitlab",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Execution context of the current run.
///
/// Built once by [`resolve`] and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    branch: String,
    change_request: bool,
    commit: String,
    provider: Provider,
    target_branch: String,
}

impl ExecutionContext {
    /// Creates a context from its parts.
    #[must_use]
    pub fn new(
        provider: Provider,
        branch: impl Into<String>,
        commit: impl Into<String>,
        change_request: bool,
        target_branch: impl Into<String>,
    ) -> Self {
        Self {
            branch: branch.into(),
            change_request,
            commit: commit.into(),
            provider,
            target_branch: target_branch.into(),
        }
    }

    /// Branch being built, as reported by the provider.
    #[must_use]
    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Whether the run evaluates a pull/merge request.
    #[must_use]
    pub const fn is_change_request(&self) -> bool {
        self.change_request
    }

    /// Commit announced by the provider; empty when HEAD should be used.
    #[must_use]
    pub fn commit(&self) -> &str {
        &self.commit
    }

    /// Provider that recognised the environment.
    #[must_use]
    pub const fn provider(&self) -> Provider {
        self.provider
    }

    /// Raw target branch as reported by the provider.
    #[must_use]
    pub fn target_branch(&self) -> &str {
        &self.target_branch
    }

    /// Branch whose history bounds the diff.
    ///
    /// The target branch for change requests, the branch itself otherwise.
    /// Every consumer naming "the branch to compare against" goes through here.
    #[must_use]
    pub fn target_branch_name(&self) -> &str {
        if self.change_request {
            &self.target_branch
        } else {
            &self.branch
        }
    }
}

type Detector = fn(&dyn EnvSource) -> Option<ExecutionContext>;

const DETECTORS: [(Provider, Detector); 4] = [
    (Provider::Local, from_local),
    (Provider::Github, from_github),
    (Provider::Jenkins, from_jenkins),
    (Provider::Gitlab, from_gitlab),
];

/// Resolves the execution context from the environment.
///
/// Returns `None` when no detector recognises the environment; callers then
/// skip SCM attribution altogether.
pub fn resolve(env: &dyn EnvSource) -> Option<ExecutionContext> {
    DETECTORS.iter().find_map(|(provider, detect)| {
        let ctx = detect(env)?;
        debug!(
            provider = ?provider,
            branch = ctx.branch(),
            change_request = ctx.is_change_request(),
            "execution context resolved"
        );
        Some(ctx)
    })
}

/// `BRANCH` is mandatory; a non-empty `TARGET_BRANCH` marks a change request.
fn from_local(env: &dyn EnvSource) -> Option<ExecutionContext> {
    let branch = env.var("BRANCH");
    if branch.is_empty() {
        return None;
    }

    let target = env.var("TARGET_BRANCH");
    let change_request = !target.is_empty();

    Some(ExecutionContext::new(
        Provider::Local,
        branch,
        "",
        change_request,
        target,
    ))
}

fn from_github(env: &dyn EnvSource) -> Option<ExecutionContext> {
    let sha = env.var("GITHUB_SHA");
    if sha.is_empty() {
        return None;
    }

    // Both refs are only present on pull_request events.
    let base_ref = env.var("GITHUB_BASE_REF");
    let head_ref = env.var("GITHUB_HEAD_REF");
    let change_request = !base_ref.is_empty() && !head_ref.is_empty();

    Some(ExecutionContext::new(
        Provider::Github,
        env.var("GITHUB_REF_NAME"),
        sha,
        change_request,
        base_ref,
    ))
}

fn from_jenkins(env: &dyn EnvSource) -> Option<ExecutionContext> {
    if env.var("JENKINS_URL").is_empty() {
        return None;
    }

    let change_request = !env.var("CHANGE_ID").is_empty();
    let branch = env.var("BRANCH_NAME");
    let target = if change_request {
        env.var("CHANGE_TARGET")
    } else {
        branch.clone()
    };

    Some(ExecutionContext::new(
        Provider::Jenkins,
        branch,
        env.var("GIT_COMMIT"),
        change_request,
        target,
    ))
}

fn from_gitlab(env: &dyn EnvSource) -> Option<ExecutionContext> {
    let ref_name = env.var("CI_COMMIT_REF_NAME");
    if ref_name.is_empty() {
        return None;
    }

    // CI_COMMIT_BRANCH is only populated on branch pipelines.
    let change_request = env.var("CI_COMMIT_BRANCH").is_empty();

    Some(ExecutionContext::new(
        Provider::Gitlab,
        ref_name,
        env.var("CI_MERGE_REQUEST_SOURCE_BRANCH_SHA"),
        change_request,
        env.var("CI_MERGE_REQUEST_TARGET_BRANCH_NAME"),
    ))
}
