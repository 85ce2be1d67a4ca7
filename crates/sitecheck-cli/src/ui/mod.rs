//! Terminal UI utilities for status output and the run summary.
//!
//! Handles environment detection (CI, TTY) and degrades gracefully when
//! terminal features aren't available.

// Submodules
mod format;
mod messages;
mod spinner;

// Re-exports for convenient access
pub use format::{format_duration, print_run_summary};
pub use messages::{debug, error, info, success, warning};
pub use spinner::Spinner;

/// Check if running in a CI environment.
///
/// Detects common CI environment variables from GitHub Actions, GitLab CI,
/// CircleCI, and Travis CI.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
}

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR environment variables, falls back to
/// terminal capability detection.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::user_attended_stderr()
}

/// Initialize color support based on environment.
///
/// owo-colors respects NO_COLOR and terminal capabilities on its own; this
/// performs the detection up front so later output is consistent.
pub fn init_colors() {
    let _ = should_use_color();
}
