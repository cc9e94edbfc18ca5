//! Built-in tag detection.
//!
//! Responsibilities:
//! - Compute the environment-name, CI and OS tags from an environment snapshot.
//!
//! Does NOT handle:
//! - Evaluating tags against sources (see `sources::collect`).
//!
//! Invariants:
//! - Never enables the reserved `overwrite` tag.
//! - Detection only reads the given snapshot, so results are reproducible in tests.

use crate::constants::{CI_ENV_VAR, CI_PROVIDERS, CI_TAG};
use crate::types::{EnvMap, TagSet};

/// Tags enabled for `env_name` (e.g. `"dev"`), the CI provider detected in
/// `env`, and the current operating system.
pub fn builtin_tags(env_name: Option<&str>, env: &EnvMap) -> TagSet {
    let mut tags = TagSet::new();

    if let Some(name) = env_name.filter(|n| !n.is_empty()) {
        tags.enable(name);
    }

    let ci_flag = env
        .get(CI_ENV_VAR)
        .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
    let mut in_ci = ci_flag;
    for (var, provider) in CI_PROVIDERS {
        if env.contains_key(*var) {
            tags.enable(format!("{CI_TAG}@{provider}"));
            in_ci = true;
        }
    }
    if in_ci {
        tags.enable(CI_TAG);
    }

    for os_tag in os_tags(std::env::consts::OS, cfg!(unix)) {
        tags.enable(os_tag);
    }

    tags
}

fn os_tags(os: &str, unix_family: bool) -> Vec<&'static str> {
    let mut tags = Vec::new();
    match os {
        "linux" => tags.push("linux"),
        "windows" => tags.push("windows"),
        "macos" => tags.push("darwin"),
        _ => {}
    }
    if unix_family {
        tags.push("unix");
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::OVERWRITE_TAG;

    fn env(pairs: &[(&str, &str)]) -> EnvMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_env_name_tag() {
        let tags = builtin_tags(Some("dev"), &EnvMap::new());
        assert!(tags.is_enabled("dev"));
        assert!(!tags.is_enabled("test"));
        assert!(!tags.is_enabled(CI_TAG));
    }

    #[test]
    fn test_empty_env_name_is_ignored() {
        let tags = builtin_tags(Some(""), &EnvMap::new());
        assert!(!tags.is_enabled(""));
    }

    #[test]
    fn test_generic_ci_flag() {
        assert!(builtin_tags(None, &env(&[("CI", "true")])).is_enabled("ci"));
        assert!(builtin_tags(None, &env(&[("CI", "1")])).is_enabled("ci"));
        assert!(!builtin_tags(None, &env(&[("CI", "false")])).is_enabled("ci"));
    }

    #[test]
    fn test_ci_provider_tags() {
        let tags = builtin_tags(None, &env(&[("GITHUB_ACTIONS", "true"), ("CI", "true")]));
        assert!(tags.is_enabled("ci"));
        assert!(tags.is_enabled("ci@github"));
        assert!(!tags.is_enabled("ci@gitlab"));

        let tags = builtin_tags(None, &env(&[("GITLAB_CI", "")]));
        assert!(tags.is_enabled("ci"));
        assert!(tags.is_enabled("ci@gitlab"));
    }

    #[test]
    fn test_os_tags() {
        assert_eq!(os_tags("linux", true), vec!["linux", "unix"]);
        assert_eq!(os_tags("macos", true), vec!["darwin", "unix"]);
        assert_eq!(os_tags("windows", false), vec!["windows"]);
        assert_eq!(os_tags("freebsd", true), vec!["unix"]);
    }

    #[test]
    fn test_overwrite_never_enabled() {
        let tags = builtin_tags(Some(OVERWRITE_TAG), &env(&[("CI", "1")]));
        assert!(!tags.is_enabled(OVERWRITE_TAG));
    }
}
