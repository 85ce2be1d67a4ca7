//! Error types for browser monitoring operations.
//!
//! The hierarchy distinguishes the failure modes a monitoring run can hit:
//! launch failures, CDP connection problems, navigation errors, wait
//! timeouts, and script execution issues. Each variant carries enough
//! context to point at the failing operation.

use std::time::Duration;
use thiserror::Error;

/// The main error type for all browser monitoring operations.
///
/// Uses thiserror for Display implementations and error source chaining.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Failed to launch the browser process.
    ///
    /// Typically means Chrome/Chromium is not installed, the configured
    /// executable path is wrong, or the process died during startup.
    #[error("failed to launch browser: {reason}")]
    LaunchFailed {
        /// Human-readable reason for the launch failure
        reason: String,
        /// Optional underlying error that caused the failure
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to establish or use the Chrome DevTools Protocol connection.
    #[error("CDP connection failed: {0}")]
    ConnectionFailed(String),

    /// Navigation to a URL failed.
    ///
    /// Callers in the monitoring pipeline record this as data rather than
    /// propagating it; it still exists as an error so lower layers can
    /// report the URL and reason uniformly.
    #[error("navigation to '{url}' failed: {reason}")]
    NavigationFailed {
        /// The URL that failed to load
        url: String,
        /// Reason for the navigation failure
        reason: String,
    },

    /// A wait condition was not satisfied within the timeout.
    #[error("wait condition '{condition}' timed out after {timeout:?}")]
    WaitTimeout {
        /// Description of the condition that timed out
        condition: String,
        /// How long we waited before timing out
        timeout: Duration,
    },

    /// JavaScript execution in the page context failed.
    #[error("JavaScript execution failed: {0}")]
    ScriptExecutionFailed(String),

    /// An operation was attempted on a closed browser instance.
    #[error("browser instance is already closed")]
    AlreadyClosed,

    /// Wraps errors from the chromiumoxide library.
    #[error("chromiumoxide error: {0}")]
    ChromiumOxide(#[from] chromiumoxide::error::CdpError),
}

impl BrowserError {
    /// Returns true if this error represents an elapsed deadline.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, BrowserError::WaitTimeout { .. })
    }
}

/// A specialized Result type for browser operations.
pub type Result<T> = std::result::Result<T, BrowserError>;
