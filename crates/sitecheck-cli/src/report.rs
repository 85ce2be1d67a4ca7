//! The JSON report document and file writers.
//!
//! The report schema is stable: a summary block, severity-bucketed errors
//! plus the raw network failures, warnings, performance data, the
//! navigation error when one was recorded, and a bounded tail of raw log
//! entries.

use crate::analysis::{Analysis, SeverityBuckets};
use crate::error::Result;
use serde::Serialize;
use sitecheck_browser::{
    CollectedEvents, ErrorEntry, LogEntry, MetricsSnapshot, NavigationError, NetworkError,
};
use std::path::{Path, PathBuf};

/// Upper bound on raw log entries included in the report. Older entries
/// beyond the bound are dropped; the summary still counts them.
pub const MAX_REPORT_LOGS: usize = 100;

/// Everything a single run produced, before analysis.
///
/// Created at invocation start, filled by the collector during the
/// monitoring window, then consumed once to build the report.
#[derive(Debug)]
pub struct RunRecord {
    /// The checked URL.
    pub url: String,
    /// ISO-8601 timestamp of the run start.
    pub timestamp: String,
    /// Total run duration in milliseconds.
    pub duration_ms: u64,
    /// Finalized event lists.
    pub events: CollectedEvents,
    /// Wall-clock navigation time in milliseconds.
    pub navigation_time_ms: u64,
    /// Recorded navigation failure, if any.
    pub navigation_error: Option<NavigationError>,
}

/// The serialized report document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Run identification, totals, and the health score.
    pub summary: Summary,
    /// Severity buckets plus raw network failures.
    pub errors: ErrorsBlock,
    /// Warning-level console entries.
    pub warnings: Vec<LogEntry>,
    /// Performance metrics and navigation time.
    pub performance: PerformanceBlock,
    /// Recorded navigation failure, omitted when navigation succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation_error: Option<NavigationError>,
    /// The most recent raw log entries, order preserved, at most
    /// [`MAX_REPORT_LOGS`].
    pub all_logs: Vec<LogEntry>,
}

/// Report summary block.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// The checked URL.
    pub url: String,
    /// ISO-8601 timestamp of the run start.
    pub timestamp: String,
    /// Total run duration in milliseconds.
    pub duration: u64,
    /// Health score in [0, 100].
    pub health_score: u8,
    /// Number of console messages observed.
    pub total_logs: usize,
    /// Number of error entries.
    pub total_errors: usize,
    /// Number of warning entries.
    pub total_warnings: usize,
    /// Number of failed network requests.
    pub total_network_errors: usize,
}

/// Error section: severity buckets plus raw network failures.
#[derive(Debug, Serialize)]
pub struct ErrorsBlock {
    /// High-severity errors.
    pub high: Vec<ErrorEntry>,
    /// Medium-severity errors.
    pub medium: Vec<ErrorEntry>,
    /// Low-severity errors.
    pub low: Vec<ErrorEntry>,
    /// Failed network requests as observed.
    pub network: Vec<NetworkError>,
}

/// Performance section.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceBlock {
    /// The most recent metrics snapshot.
    pub metrics: MetricsSnapshot,
    /// Wall-clock navigation time in milliseconds.
    pub navigation_time: u64,
}

/// Assembles the report document from a finished run and its analysis.
///
/// Consumes the record; the severity buckets move out of the analysis.
#[must_use]
pub fn build_report(record: RunRecord, analysis: Analysis) -> Report {
    let Analysis {
        total_logs,
        total_errors,
        total_warnings,
        total_network_errors,
        severity,
        health_score,
    } = analysis;
    let SeverityBuckets { high, medium, low } = severity;

    Report {
        summary: Summary {
            url: record.url,
            timestamp: record.timestamp,
            duration: record.duration_ms,
            health_score,
            total_logs,
            total_errors,
            total_warnings,
            total_network_errors,
        },
        errors: ErrorsBlock {
            high,
            medium,
            low,
            network: record.events.network_errors,
        },
        warnings: record.events.warnings,
        performance: PerformanceBlock {
            metrics: record.events.metrics,
            navigation_time: record.navigation_time_ms,
        },
        navigation_error: record.navigation_error,
        all_logs: tail(record.events.logs, MAX_REPORT_LOGS),
    }
}

/// Keeps the most recent `cap` entries, preserving order.
fn tail(mut logs: Vec<LogEntry>, cap: usize) -> Vec<LogEntry> {
    let start = logs.len().saturating_sub(cap);
    logs.split_off(start)
}

/// Writes the report as pretty-printed JSON, creating the output directory
/// (recursively) if needed. Returns the report path.
pub fn write_report(report: &Report, dir: &Path, file_name: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let path = dir.join(file_name);
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(&path, json)?;

    Ok(path)
}

/// Writes screenshot bytes next to the report. Returns the image path.
pub fn write_screenshot(bytes: &[u8], dir: &Path, file_name: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let path = dir.join(file_name);
    std::fs::write(&path, bytes)?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::config::AnalysisSettings;
    use sitecheck_browser::{LogLevel, PageError};

    fn record_with_logs(count: usize) -> RunRecord {
        let mut events = CollectedEvents::default();
        for i in 0..count {
            events.logs.push(LogEntry::new(LogLevel::Log, format!("entry {i}")));
        }
        RunRecord {
            url: "https://example.com".into(),
            timestamp: "2026-08-05T12:00:00.000Z".into(),
            duration_ms: 6_200,
            events,
            navigation_time_ms: 850,
            navigation_error: None,
        }
    }

    fn build(record: RunRecord) -> Report {
        let analysis = analyze(&record.events, record.navigation_error.as_ref(), &AnalysisSettings::default());
        build_report(record, analysis)
    }

    #[test]
    fn log_tail_is_capped_at_100_most_recent() {
        let report = build(record_with_logs(150));

        assert_eq!(report.all_logs.len(), MAX_REPORT_LOGS);
        // The oldest 50 were dropped; order of the rest is preserved.
        assert_eq!(report.all_logs.first().unwrap().text, "entry 50");
        assert_eq!(report.all_logs.last().unwrap().text, "entry 149");
        // The summary still counts everything that was collected.
        assert_eq!(report.summary.total_logs, 150);
    }

    #[test]
    fn log_tail_keeps_everything_under_the_cap() {
        let report = build(record_with_logs(7));

        assert_eq!(report.all_logs.len(), 7);
        assert_eq!(report.all_logs.first().unwrap().text, "entry 0");
        assert_eq!(report.all_logs.last().unwrap().text, "entry 6");
    }

    #[test]
    fn report_serializes_with_original_field_names() {
        let mut record = record_with_logs(1);
        record.events.errors.push(ErrorEntry::Page(PageError::new(
            "TypeError: boom",
            "    at <anonymous>:1:1",
        )));
        record.navigation_error = Some(NavigationError {
            message: "timed out".into(),
            timeout: true,
        });

        let report = build(record);
        let json = serde_json::to_value(&report).unwrap();

        assert!(json["summary"]["healthScore"].is_number());
        assert!(json["summary"]["totalNetworkErrors"].is_number());
        assert!(json["errors"]["high"].is_array());
        assert!(json["errors"]["network"].is_array());
        assert!(json["performance"]["navigationTime"].is_number());
        assert_eq!(json["navigationError"]["timeout"], true);
        assert!(json["allLogs"].is_array());
    }

    #[test]
    fn navigation_error_is_omitted_when_absent() {
        let report = build(record_with_logs(1));
        let json = serde_json::to_value(&report).unwrap();

        assert!(json.get("navigationError").is_none());
    }

    #[test]
    fn write_report_creates_nested_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("deep").join("output");

        let report = build(record_with_logs(2));
        let path = write_report(&report, &nested, "test-report.json").expect("write report");

        assert!(path.exists());
        let contents = std::fs::read_to_string(&path).expect("read back");
        let parsed: serde_json::Value = serde_json::from_str(&contents).expect("valid json");
        assert_eq!(parsed["summary"]["url"], "https://example.com");
    }

    #[test]
    fn write_screenshot_writes_bytes() {
        let dir = tempfile::tempdir().expect("tempdir");

        let path = write_screenshot(&[0x89, b'P', b'N', b'G'], dir.path(), "screenshot.png")
            .expect("write screenshot");

        assert_eq!(std::fs::read(&path).expect("read back"), vec![0x89, b'P', b'N', b'G']);
    }
}
