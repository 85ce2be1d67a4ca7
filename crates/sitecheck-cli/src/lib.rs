//! sitecheck - website health checker.
//!
//! This crate provides the command-line interface around
//! `sitecheck-browser`: it loads a URL in headless Chrome, observes the
//! page over a fixed monitoring window, scores what it saw, and writes a
//! JSON report plus an optional screenshot.
//!
//! # Architecture
//!
//! - [`error`] - error types with actionable hints
//! - [`logger`] - structured logging with tracing
//! - [`ui`] - terminal output: status messages, spinner, run summary
//! - `cli` - clap argument surface
//! - `config` - configuration loading and validation
//! - [`analysis`] - severity classification and the health score
//! - [`report`] - the JSON report document and writers
//! - `commands` - run / install / uninstall implementations

// Public modules
pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod report;
pub mod ui;

// Re-export commonly used types
pub use error::{CliError, ConfigError, Result, ResultExt};
