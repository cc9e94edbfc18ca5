//! Centralized constants for the envlayer crate.
//!
//! This module contains the reserved names and lookup tables shared by the
//! source collector, the loader and the built-in tag detection.

// =============================================================================
// Tags
// =============================================================================

/// Reserved tag that routes a source subtree into the overwrite group.
///
/// Recognized structurally during collection, never through enabled flags.
pub const OVERWRITE_TAG: &str = "overwrite";

/// Tag enabled when any continuous integration environment is detected.
pub const CI_TAG: &str = "ci";

/// Environment variables identifying a CI provider, with the provider suffix
/// used to build `ci@<provider>` tags.
pub const CI_PROVIDERS: &[(&str, &str)] = &[
    ("GITHUB_ACTIONS", "github"),
    ("TRAVIS", "travis"),
    ("CIRCLECI", "circle"),
    ("SEMAPHORE", "semaphore"),
    ("DRONE", "drone"),
    ("GITLAB_CI", "gitlab"),
    ("JENKINS_URL", "jenkins"),
    ("BUILDKITE", "buildkite"),
];

/// Generic CI flag variable, honoured when set to `true` or `1`.
pub const CI_ENV_VAR: &str = "CI";

// =============================================================================
// Loader
// =============================================================================

/// Gate variable: when set to `1` or `true`, `Loader::load` is a no-op.
pub const DISABLED_ENV_VAR: &str = "ENVLAYER_DISABLED";

