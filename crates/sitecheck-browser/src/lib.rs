//! # sitecheck-browser
//!
//! Headless Chrome monitoring primitives built on chromiumoxide.
//!
//! This crate launches a browser, opens a page with event collection
//! attached, and passively records what the page does: console messages,
//! uncaught exceptions, failed network requests, and performance metrics.
//! It knows nothing about scoring or reports - that lives in the CLI.
//!
//! ## Architecture
//!
//! - **Browser**: manages the Chrome process lifecycle
//! - **MonitoredPage**: a tab with listeners attached before navigation,
//!   plus navigation/settle/metrics/screenshot operations
//! - **EventSink / EventLog**: append-only event interface and its
//!   accumulating implementation
//! - **collector**: translation from CDP events to the typed event model
//! - **WaitConfig**: readiness polling with timeouts
//!
//! ## Example Usage
//!
//! ```ignore
//! use sitecheck_browser::{Browser, BrowserOptions, WaitUntil};
//! use std::time::Duration;
//!
//! let browser = Browser::launch(BrowserOptions::default()).await?;
//! let page = browser.new_page().await?;
//!
//! let status = page
//!     .navigate("https://example.com", WaitUntil::DomContentLoaded, Duration::from_secs(30))
//!     .await;
//! page.settle(Duration::from_secs(5)).await;
//! page.sample_metrics().await?;
//!
//! let events = page.events().snapshot();
//! println!("{} console messages, {} errors", events.logs.len(), events.errors.len());
//!
//! browser.close().await?;
//! ```
//!
//! ## Testing Strategy
//!
//! 1. **Unit tests**: browser-free logic (event log semantics, abort
//!    filtering, readiness predicates)
//! 2. **Integration tests**: real browser runs in `tests/integration.rs`,
//!    `#[ignore]`d because they require Chrome
//!
//! Run with `cargo test` (unit) or `cargo test -- --ignored` (integration).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod browser;
mod collector;
pub mod error;
pub mod events;
pub mod page;
pub mod wait;

// Re-export main types for convenience
pub use browser::{Browser, BrowserOptions};
pub use error::{BrowserError, Result};
pub use events::{
    CollectedEvents, ErrorEntry, EventLog, EventSink, LogEntry, LogLevel, MetricsSnapshot,
    NavigationError, NetworkError, PageError, SourceLocation,
};
pub use page::{MonitoredPage, NavigationStatus, WaitUntil};
pub use wait::{DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT, WaitConfig};
