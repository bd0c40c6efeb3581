//! Execution-context detection over synthetic environments.
//!
//! Detection tables cover every provider's branch and change-request shapes;
//! property tests check the precedence order over arbitrary combinations of
//! trigger variables.

// Tests use unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use scm_provenance::context::{Provider, resolve};
use std::collections::HashMap;
use test_case::test_case;

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

// ============================================================================
// Detection tables
// ============================================================================

#[test_case(&[("BRANCH", "feature")], Provider::Local, false, "feature" ; "local branch")]
#[test_case(&[("BRANCH", "feature"), ("TARGET_BRANCH", "main")], Provider::Local, true, "main" ; "local change request")]
#[test_case(&[("GITHUB_SHA", "abc123"), ("GITHUB_REF_NAME", "main")], Provider::Github, false, "main" ; "github push")]
#[test_case(
    &[
        ("GITHUB_SHA", "abc123"),
        ("GITHUB_REF_NAME", "42/merge"),
        ("GITHUB_BASE_REF", "main"),
        ("GITHUB_HEAD_REF", "feature"),
    ],
    Provider::Github, true, "main" ;
    "github pull request"
)]
#[test_case(
    &[("GITHUB_SHA", "abc123"), ("GITHUB_REF_NAME", "main"), ("GITHUB_BASE_REF", "main")],
    Provider::Github, false, "main" ;
    "github base ref alone is not a pull request"
)]
#[test_case(
    &[("JENKINS_URL", "https://ci.example.com"), ("BRANCH_NAME", "develop"), ("GIT_COMMIT", "abc123")],
    Provider::Jenkins, false, "develop" ;
    "jenkins branch"
)]
#[test_case(
    &[
        ("JENKINS_URL", "https://ci.example.com"),
        ("BRANCH_NAME", "PR-7"),
        ("CHANGE_ID", "7"),
        ("CHANGE_TARGET", "main"),
    ],
    Provider::Jenkins, true, "main" ;
    "jenkins change request"
)]
#[test_case(
    &[("CI_COMMIT_REF_NAME", "main"), ("CI_COMMIT_BRANCH", "main")],
    Provider::Gitlab, false, "main" ;
    "gitlab branch pipeline"
)]
#[test_case(
    &[
        ("CI_COMMIT_REF_NAME", "feature"),
        ("CI_MERGE_REQUEST_TARGET_BRANCH_NAME", "main"),
        ("CI_MERGE_REQUEST_SOURCE_BRANCH_SHA", "abc123"),
    ],
    Provider::Gitlab, true, "main" ;
    "gitlab merge request"
)]
fn test_detection(vars: &[(&str, &str)], provider: Provider, change_request: bool, target: &str) {
    let ctx = resolve(&env(vars)).unwrap();

    assert_eq!(ctx.provider(), provider);
    assert_eq!(ctx.is_change_request(), change_request);
    assert_eq!(ctx.target_branch_name(), target);
}

#[test_case(&[] ; "empty environment")]
#[test_case(&[("BRANCH", "")] ; "blank local branch")]
#[test_case(&[("GITHUB_REF_NAME", "main")] ; "github without sha")]
#[test_case(&[("BRANCH_NAME", "main"), ("CHANGE_ID", "1")] ; "jenkins without url")]
#[test_case(&[("CI_COMMIT_BRANCH", "main")] ; "gitlab without ref name")]
fn test_no_context(vars: &[(&str, &str)]) {
    assert!(resolve(&env(vars)).is_none());
}

#[test]
fn test_github_carries_commit() {
    let ctx = resolve(&env(&[("GITHUB_SHA", "abc123"), ("GITHUB_REF_NAME", "main")])).unwrap();
    assert_eq!(ctx.commit(), "abc123");
    assert_eq!(ctx.branch(), "main");
}

#[test]
fn test_local_has_no_commit() {
    let ctx = resolve(&env(&[("BRANCH", "feature")])).unwrap();
    assert_eq!(ctx.commit(), "");
    assert_eq!(ctx.provider().as_str(), "");
}

// ============================================================================
// Precedence
// ============================================================================

const LOCAL: &[(&str, &str)] = &[("BRANCH", "local-branch")];
const GITHUB: &[(&str, &str)] = &[("GITHUB_SHA", "abc123"), ("GITHUB_REF_NAME", "gh-branch")];
const JENKINS: &[(&str, &str)] = &[("JENKINS_URL", "https://ci"), ("BRANCH_NAME", "jk-branch")];
const GITLAB: &[(&str, &str)] = &[("CI_COMMIT_REF_NAME", "gl-branch"), ("CI_COMMIT_BRANCH", "gl-branch")];

proptest! {
    /// Property: the highest-precedence provider present always wins.
    #[test]
    fn prop_precedence(
        local in any::<bool>(),
        github in any::<bool>(),
        jenkins in any::<bool>(),
        gitlab in any::<bool>(),
    ) {
        let mut vars = Vec::new();
        for (present, pairs) in [(gitlab, GITLAB), (jenkins, JENKINS), (github, GITHUB), (local, LOCAL)] {
            if present {
                vars.extend_from_slice(pairs);
            }
        }

        let expected = [
            (local, Provider::Local),
            (github, Provider::Github),
            (jenkins, Provider::Jenkins),
            (gitlab, Provider::Gitlab),
        ]
        .into_iter()
        .find_map(|(present, provider)| present.then_some(provider));

        let resolved = resolve(&env(&vars)).map(|ctx| ctx.provider());
        prop_assert_eq!(resolved, expected);
    }

    /// Property: unrelated variables never produce a context.
    #[test]
    fn prop_unrelated_vars_ignored(key in "X_[A-Z]{1,12}", value in "[a-z0-9]{0,16}") {
        prop_assert!(resolve(&env(&[(key.as_str(), value.as_str())])).is_none());
    }

    /// Property: the detected branch is the provider's branch variable verbatim.
    #[test]
    fn prop_branch_verbatim(branch in "[a-zA-Z0-9/_.-]{1,40}") {
        let ctx = resolve(&env(&[("BRANCH", branch.as_str())])).unwrap();
        prop_assert_eq!(ctx.branch(), branch.as_str());
    }
}
