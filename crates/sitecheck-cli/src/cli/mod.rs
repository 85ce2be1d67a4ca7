//! Command-line interface definition.
//!
//! The common invocation is `sitecheck <URL>` - a single positional URL
//! with optional overrides. Subcommands cover the explicit `run` form and
//! the install/uninstall utilities for the editor slash command.

use clap::{Args, Parser, Subcommand, ValueEnum};
use sitecheck_browser::WaitUntil;
use std::path::PathBuf;

/// sitecheck - load a URL, capture errors, score the result
#[derive(Parser, Debug)]
#[command(
    name = "sitecheck",
    version,
    about = "Website health checker",
    long_about = "Loads a URL in headless Chrome, passively collects console logs,\n\
                  page errors, and failed network requests over a fixed monitoring\n\
                  window, then writes a JSON report with a 0-100 health score.",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Bare invocation: `sitecheck <URL> [flags]`
    #[command(flatten)]
    pub run: RunArgs,
}

impl Cli {
    /// Resolves the bare `sitecheck <URL>` form into the run command.
    #[must_use]
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Run(self.run))
    }
}

/// Available sitecheck subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a website and write the health report
    ///
    /// Launches headless Chrome, navigates to the URL, monitors page
    /// activity for a fixed window, and writes a JSON report plus an
    /// optional screenshot. Exits 0 when no errors were observed, 2
    /// otherwise.
    Run(RunArgs),

    /// Install the editor slash command
    ///
    /// Copies the bundled command definition into the user configuration
    /// directory (~/.claude/commands), creating it if needed.
    Install(InstallArgs),

    /// Remove the installed editor slash command
    ///
    /// Deletes the command definition from the user configuration
    /// directory. Missing files are reported, not treated as failures.
    Uninstall(UninstallArgs),
}

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Target URL to check (defaults to https://example.com)
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Path to a sitecheck.config.json file
    ///
    /// When omitted, sitecheck.config.json in the working directory is
    /// used if present, falling back to built-in defaults.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output directory for the report and screenshot
    #[arg(short = 'd', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Navigation timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout: Option<u64>,

    /// Monitoring window duration in milliseconds
    ///
    /// How long to keep observing after navigation settles, so timers,
    /// deferred scripts, and late network calls are captured.
    #[arg(long, value_name = "MS")]
    pub duration: Option<u64>,

    /// Readiness condition navigation waits for
    #[arg(long, value_enum, value_name = "CONDITION")]
    pub wait_until: Option<WaitUntilArg>,

    /// Skip the screenshot
    #[arg(long)]
    pub no_screenshot: bool,

    /// Run with a visible browser window instead of headless
    #[arg(long)]
    pub visible: bool,
}

/// Arguments for the install command
#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Install into DIR instead of ~/.claude/commands
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

/// Arguments for the uninstall command
#[derive(Args, Debug)]
pub struct UninstallArgs {
    /// Remove from DIR instead of ~/.claude/commands
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

/// CLI mirror of [`WaitUntil`] so the library type stays clap-free.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitUntilArg {
    /// Wait until the DOM has been parsed
    Domcontentloaded,
    /// Wait until the load event fired
    Load,
}

impl From<WaitUntilArg> for WaitUntil {
    fn from(arg: WaitUntilArg) -> Self {
        match arg {
            WaitUntilArg::Domcontentloaded => WaitUntil::DomContentLoaded,
            WaitUntilArg::Load => WaitUntil::Load,
        }
    }
}
