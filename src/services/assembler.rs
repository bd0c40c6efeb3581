//! Attribute assembly.
//!
//! Every step after context resolution is best effort: a failing step is
//! logged and its keys are left out, the rest of the list is still produced.

use super::contributors::{compute_range, mine_contributors};
use super::diff_stats::compute_file_stats;
use crate::context::{self, EnvSource, ExecutionContext};
use crate::git::{GitRepository, ScmRepository};
use crate::models::{AttributeList, CloneInfo, semconv};
use crate::Result;
use std::path::Path;
use tracing::{debug, instrument, warn};

const ORIGIN: &str = "origin";

/// Builds the SCM attribute list for one execution context.
pub struct AttributeAssembler<'a, R: ScmRepository + ?Sized> {
    ctx: &'a ExecutionContext,
    repo: &'a R,
}

impl<'a, R: ScmRepository + ?Sized> AttributeAssembler<'a, R> {
    /// Creates an assembler over a resolved context and an open repository.
    #[must_use]
    pub const fn new(ctx: &'a ExecutionContext, repo: &'a R) -> Self {
        Self { ctx, repo }
    }

    /// Produces the attribute list. Never fails.
    #[instrument(
        skip(self),
        fields(
            provider = %self.ctx.provider(),
            change_request = self.ctx.is_change_request()
        )
    )]
    pub fn assemble(&self) -> AttributeList {
        let mut attributes = AttributeList::new();
        attributes.insert(semconv::SCM_TYPE, semconv::SCM_TYPE_GIT);

        let provider = self.ctx.provider().as_str();
        if !provider.is_empty() {
            attributes.insert(semconv::SCM_PROVIDER, provider);
        }

        let clone = self.clone_info().unwrap_or_else(|e| {
            debug!(error = %e, "shallow state unreadable, assuming full clone");
            CloneInfo::default()
        });
        attributes.extend(clone.to_attributes());

        fold(&mut attributes, "repository", self.repository());
        fold(&mut attributes, "branch", self.branch());

        if self.ctx.is_change_request() {
            self.change_request(&mut attributes);
        }

        debug!(count = attributes.len(), "attributes assembled");
        attributes
    }

    fn clone_info(&self) -> Result<CloneInfo> {
        let commits = self.repo.shallow_commits()?;
        Ok(CloneInfo::from_shallow_commits(&commits))
    }

    fn repository(&self) -> Result<AttributeList> {
        let urls = self.repo.remote_urls(ORIGIN)?;
        let mut delta = AttributeList::new();
        delta.insert(semconv::SCM_REPOSITORY, urls);
        Ok(delta)
    }

    fn branch(&self) -> Result<AttributeList> {
        let head = self.repo.head_ref()?;
        let mut delta = AttributeList::new();
        delta.insert(semconv::SCM_BRANCH, head.name);
        Ok(delta)
    }

    fn change_request(&self, attributes: &mut AttributeList) {
        let target = self.ctx.target_branch();
        if !target.is_empty() {
            attributes.insert(semconv::SCM_BASE_REF, target);
        }

        let range = match compute_range(self.repo, self.ctx) {
            Ok(range) => range,
            Err(e) => {
                warn!(
                    target_branch = target,
                    error = %e,
                    "commit range unavailable, skipping contributors and file stats"
                );
                return;
            },
        };

        fold(
            attributes,
            "contributors",
            mine_contributors(self.repo, &range).map(|set| set.to_attributes()),
        );
        fold(
            attributes,
            "file_stats",
            compute_file_stats(self.repo, &range).map(|stats| stats.to_attributes()),
        );
    }
}

fn fold(attributes: &mut AttributeList, step: &str, result: Result<AttributeList>) {
    match result {
        Ok(delta) => attributes.extend(delta),
        Err(e) => warn!(step, error = %e, "step not contributing attributes"),
    }
}

/// Resolves the context from `env`, opens the repository at `path` and
/// assembles its attributes.
///
/// Returns an empty list when no context applies or the repository cannot be
/// opened.
#[must_use]
pub fn assemble_from_env(env: &dyn EnvSource, path: &Path) -> AttributeList {
    let Some(ctx) = context::resolve(env) else {
        debug!("no execution context detected");
        return AttributeList::new();
    };

    match GitRepository::open(path) {
        Ok(repo) => AttributeAssembler::new(&ctx, &repo).assemble(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "repository unavailable");
            AttributeList::new()
        },
    }
}
