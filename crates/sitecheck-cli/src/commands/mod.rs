//! Command implementations for the sitecheck CLI.
//!
//! - [`run`] - the check pipeline: launch, navigate, monitor, score, report
//! - [`install`] - copy the slash-command definition into place
//! - [`uninstall`] - remove it again
//!
//! Each command lives in its own module and provides an `execute` function
//! taking the parsed arguments.

pub mod install;
pub mod run;
pub mod uninstall;

// Re-export execute functions for convenience
pub use install::execute as install_execute;
pub use run::execute as run_execute;
pub use uninstall::execute as uninstall_execute;
