//! Typed page events and the append-only event sink.
//!
//! Everything the monitoring run observes (console messages, page
//! exceptions, failed network requests, performance metrics) is modeled
//! here as plain serializable types. The collector writes them through the
//! [`EventSink`] trait, which keeps it decoupled from how events are
//! stored; [`EventLog`] is the accumulating implementation used by real
//! runs.
//!
//! # Design Rationale
//!
//! `EventLog` uses `Arc<Mutex<...>>` instead of channels because:
//! 1. The reporter needs to query accumulated events after the run
//! 2. Arrival order must be preserved
//! 3. No backpressure concerns (a single page over a few seconds)
//! 4. Simpler API - no need to drain channels

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// The severity level of a console message.
///
/// Maps directly to JavaScript console methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// `console.log()`
    Log,
    /// `console.info()`
    Info,
    /// `console.warn()`
    Warning,
    /// `console.error()`
    Error,
    /// `console.debug()`
    Debug,
    /// Catch-all for other console APIs (table, trace, assert, ...)
    Other,
}

impl LogLevel {
    /// Returns true if this is an error-level message.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, LogLevel::Error)
    }

    /// Returns true if this is a warning-level message.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(self, LogLevel::Warning)
    }
}

/// Script position a console message originated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
    /// Script URL.
    pub url: String,
    /// Zero-based line number within the script.
    pub line_number: i64,
    /// Zero-based column number within the line.
    pub column_number: i64,
}

/// A captured console message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Severity level; serialized as `type` to match the report schema.
    #[serde(rename = "type")]
    pub level: LogLevel,

    /// The formatted message text. Multiple arguments are joined with spaces.
    pub text: String,

    /// Source location, when the runtime reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

impl LogEntry {
    /// Creates a new log entry without a source location.
    #[must_use]
    pub fn new(level: LogLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            location: None,
        }
    }

    /// Attaches a source location.
    #[must_use]
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }
}

/// An uncaught exception thrown by the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageError {
    /// Always `"pageerror"`; serialized as `type` to match the report schema.
    #[serde(rename = "type")]
    pub kind: String,

    /// The exception message, e.g. `TypeError: x is not a function`.
    pub message: String,

    /// Formatted stack trace.
    pub stack: String,
}

impl PageError {
    /// Creates a new page error entry.
    #[must_use]
    pub fn new(message: impl Into<String>, stack: impl Into<String>) -> Self {
        Self {
            kind: "pageerror".to_string(),
            message: message.into(),
            stack: stack.into(),
        }
    }
}

/// A single entry in the error list.
///
/// Errors come from two places: console messages with error severity and
/// uncaught page exceptions. Both serialize with their original shape
/// (untagged), so the report carries `{type, text, location}` for console
/// errors and `{type: "pageerror", message, stack}` for exceptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorEntry {
    /// An uncaught exception reported by the page runtime.
    Page(PageError),
    /// A console message with error severity.
    Console(LogEntry),
}

impl ErrorEntry {
    /// Textual content used for severity classification: the exception
    /// message for page errors, the console text otherwise.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            ErrorEntry::Page(error) => &error.message,
            ErrorEntry::Console(entry) => &entry.text,
        }
    }
}

/// A genuinely failed network request.
///
/// Client-side aborts never produce one of these; the collector filters
/// them before they reach the sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkError {
    /// The request URL.
    pub url: String,
    /// Failure reason as reported by the browser, e.g. `net::ERR_FAILED`.
    pub error: String,
    /// HTTP method of the failed request.
    pub method: String,
    /// Resource type in lowercase (document, image, xhr, ...).
    pub resource_type: String,
}

/// A point-in-time snapshot of the page's performance metrics.
///
/// Keys are CDP metric names (`JSHeapUsedSize`, `Nodes`, ...). Snapshots
/// replace each other; they are never merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricsSnapshot {
    /// Metric name to value.
    pub values: BTreeMap<String, f64>,
}

impl MetricsSnapshot {
    /// Builds a snapshot from name/value pairs.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self {
            values: pairs.into_iter().collect(),
        }
    }

    /// Returns true if no metrics were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A recorded (non-fatal) navigation failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationError {
    /// What went wrong.
    pub message: String,
    /// True when the navigation deadline elapsed, false for other failures
    /// (unreachable host, TLS error, ...).
    pub timeout: bool,
}

/// Append-only destination for observed page events.
///
/// Subscriptions write into this interface instead of registering raw
/// callbacks on the automation runtime, so storage (and tests) stay
/// independent of chromiumoxide.
pub trait EventSink: Send + Sync {
    /// Records a console message.
    fn record_log(&self, entry: LogEntry);

    /// Records an uncaught page exception.
    fn record_page_error(&self, error: PageError);

    /// Records a failed (non-aborted) network request.
    fn record_network_failure(&self, failure: NetworkError);

    /// Records a performance metrics snapshot (last write wins).
    fn record_metrics(&self, snapshot: MetricsSnapshot);
}

#[derive(Debug, Default)]
struct EventLogInner {
    logs: Vec<LogEntry>,
    errors: Vec<ErrorEntry>,
    warnings: Vec<LogEntry>,
    network_errors: Vec<NetworkError>,
    metrics: Option<MetricsSnapshot>,
}

/// Thread-safe event accumulator.
///
/// Cheaply cloneable (Arc); the CDP listener tasks and the caller share
/// one log. Events are kept in arrival order.
///
/// Console messages are appended to `logs` unconditionally and
/// additionally to `errors` or `warnings` by severity; the duplication is
/// intentional, the report relies on it for totals and severity buckets.
///
/// # Behavior on Mutex Poisoning
///
/// A write under a poisoned mutex is silently dropped; reads recover the
/// inner value. Poisoning means a panic already happened elsewhere, which
/// is the primary failure to surface.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    inner: Arc<Mutex<EventLogInner>>,
}

/// Immutable snapshot of everything an [`EventLog`] accumulated.
#[derive(Debug, Clone, Default)]
pub struct CollectedEvents {
    /// All console messages, in arrival order.
    pub logs: Vec<LogEntry>,
    /// Console errors and page exceptions, in arrival order.
    pub errors: Vec<ErrorEntry>,
    /// Console warnings, in arrival order.
    pub warnings: Vec<LogEntry>,
    /// Failed network requests, in arrival order.
    pub network_errors: Vec<NetworkError>,
    /// The most recent performance metrics snapshot.
    pub metrics: MetricsSnapshot,
}

impl EventLog {
    /// Creates a new, empty event log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all captured console messages as a snapshot.
    #[must_use]
    pub fn logs(&self) -> Vec<LogEntry> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .logs
            .clone()
    }

    /// Returns all error entries (console errors and page exceptions).
    #[must_use]
    pub fn errors(&self) -> Vec<ErrorEntry> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .errors
            .clone()
    }

    /// Returns all warning-level console messages.
    #[must_use]
    pub fn warnings(&self) -> Vec<LogEntry> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .warnings
            .clone()
    }

    /// Returns all recorded network failures.
    #[must_use]
    pub fn network_errors(&self) -> Vec<NetworkError> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .network_errors
            .clone()
    }

    /// Returns the count of error entries.
    ///
    /// More efficient than `errors().len()` as it doesn't clone.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .errors
            .len()
    }

    /// Returns the total number of console messages captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .logs
            .len()
    }

    /// Returns true if no console messages have been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Takes an immutable snapshot of everything collected so far.
    #[must_use]
    pub fn snapshot(&self) -> CollectedEvents {
        let inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        CollectedEvents {
            logs: inner.logs.clone(),
            errors: inner.errors.clone(),
            warnings: inner.warnings.clone(),
            network_errors: inner.network_errors.clone(),
            metrics: inner.metrics.clone().unwrap_or_default(),
        }
    }
}

impl EventSink for EventLog {
    fn record_log(&self, entry: LogEntry) {
        if let Ok(mut inner) = self.inner.lock() {
            if entry.level.is_error() {
                inner.errors.push(ErrorEntry::Console(entry.clone()));
            } else if entry.level.is_warning() {
                inner.warnings.push(entry.clone());
            }
            inner.logs.push(entry);
        }
    }

    fn record_page_error(&self, error: PageError) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.errors.push(ErrorEntry::Page(error));
        }
    }

    fn record_network_failure(&self, failure: NetworkError) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.network_errors.push(failure);
        }
    }

    fn record_metrics(&self, snapshot: MetricsSnapshot) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.metrics = Some(snapshot);
        }
    }
}
