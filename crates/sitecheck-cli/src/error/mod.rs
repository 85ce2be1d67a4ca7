//! Error handling for the sitecheck CLI.
//!
//! Two tiers, mirroring the run semantics: recoverable page-level problems
//! (navigation failures, console errors) are data and never appear here;
//! this hierarchy is for pipeline failures - configuration mistakes,
//! browser launch problems, filesystem errors - which abort the run with
//! exit code 1.

mod miette;

pub use self::miette::cli_error_to_miette;

use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
///
/// Converts automatically from domain-specific errors via `From`.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (file not found, invalid values, ...)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Browser automation errors (launch, CDP, screenshot, ...)
    #[error("Browser error: {0}")]
    Browser(#[from] sitecheck_browser::BrowserError),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors while writing the report
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
///
/// Each variant carries a hint pointing at the fix.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file doesn't exist at the given location
    #[error("Config file not found: {}\n\nHint: Create a sitecheck.config.json file or check the --config path", .0.display())]
    NotFound(PathBuf),

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },

    /// Missing required configuration field
    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField {
        /// Name of the missing field
        field: String,
        /// Helpful hint for providing the field
        hint: String,
    },
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Attach a file path; not-found I/O errors become `FileNotFound`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Attach a helpful hint to the error message.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    /// Prefix the error with a context message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            match err {
                CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                    CliError::FileNotFound(path.as_ref().to_path_buf())
                }
                other => other,
            }
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}\n\nHint: {}", err, hint))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_not_found_carries_hint() {
        let err = ConfigError::NotFound(PathBuf::from("sitecheck.config.json"));
        let msg = err.to_string();
        assert!(msg.contains("Config file not found"));
        assert!(msg.contains("sitecheck.config.json"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn config_error_invalid_value_formats_all_parts() {
        let err = ConfigError::InvalidValue {
            field: "page.timeout".to_string(),
            value: "0".to_string(),
            hint: "Must be a positive number of milliseconds".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Invalid value for 'page.timeout'"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn cli_error_from_config_error() {
        let config_err = ConfigError::MissingField {
            field: "output.reportFile".to_string(),
            hint: "Provide a file name".to_string(),
        };
        let cli_err: CliError = config_err.into();
        assert!(matches!(cli_err, CliError::Config(_)));
    }

    #[test]
    fn with_path_maps_not_found() {
        let io_err: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = io_err.with_path("commands/sitecheck.md").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn with_path_keeps_other_io_errors() {
        let io_err: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = io_err.with_path("commands/sitecheck.md").unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }

    #[test]
    fn with_hint_appends_hint() {
        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::other("disk full"));
        let err = result.with_hint("Free some space").unwrap_err();
        assert!(err.to_string().contains("Hint: Free some space"));
    }

    #[test]
    fn context_prefixes_message() {
        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::other("boom"));
        let err = result.context("failed to install command file").unwrap_err();
        assert!(err.to_string().starts_with("failed to install command file"));
    }
}
