//! sitecheck - website health checker.
//!
//! Entry point: parses arguments, initializes logging, and dispatches to
//! the selected command. The process exit code encodes the outcome: 0 for
//! a clean run, 2 when the page produced errors, 1 when the pipeline
//! itself failed.

use clap::Parser;
use sitecheck_cli::{cli, commands, error, logger, ui};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> miette::Result<ExitCode> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors();

    let result = match args.into_command() {
        cli::Command::Run(run_args) => commands::run_execute(run_args).await,
        cli::Command::Install(install_args) => commands::install_execute(install_args).map(|()| ExitCode::SUCCESS),
        cli::Command::Uninstall(uninstall_args) => {
            commands::uninstall_execute(uninstall_args).map(|()| ExitCode::SUCCESS)
        }
    };

    // Convert CLI errors to miette diagnostics; an Err exits with code 1.
    result.map_err(error::cli_error_to_miette)
}
