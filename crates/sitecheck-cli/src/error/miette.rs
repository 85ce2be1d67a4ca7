//! Miette diagnostic conversion for CLI errors.
//!
//! Turns the structured error hierarchy into miette reports at the binary
//! boundary so failures render as readable diagnostics.

use crate::error::CliError;
use ::miette::Report;

/// Convert `CliError` to a miette `Report`.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => ::miette::miette!("Configuration error: {}", e),
        CliError::Browser(e) => ::miette::miette!("Browser error: {}", e),
        other => ::miette::miette!("{}", other),
    }
}
