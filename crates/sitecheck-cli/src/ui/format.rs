//! Formatting utilities for durations and the run summary.

use crate::report::Report;
use console::Term;
use owo_colors::OwoColorize;
use std::path::Path;
use std::time::Duration;

/// Format a duration in human-readable form (ms, s, m:s).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use sitecheck_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    }
}

/// Colors the health score by band: green ≥ 90, yellow ≥ 70, red below.
fn score_label(score: u8) -> String {
    let label = format!("{score}/100");
    match score {
        90..=100 => format!("{}", label.green().bold()),
        70..=89 => format!("{}", label.yellow().bold()),
        _ => format!("{}", label.red().bold()),
    }
}

/// Print the human-readable run summary to stderr.
pub fn print_run_summary(report: &Report, report_path: &Path) {
    let term = Term::stderr();
    let width = (term.size().1 as usize).min(80);
    let rule = "─".repeat(width);

    eprintln!("\n{rule}");
    eprintln!("{}", "Website check complete".bold().underline());
    eprintln!();
    eprintln!("  {} {}", "URL:".bold(), report.summary.url);
    eprintln!("  {} {}", "Health Score:".bold(), score_label(report.summary.health_score));
    eprintln!(
        "  {} {}",
        "Duration:".bold(),
        format_duration(Duration::from_millis(report.summary.duration))
    );
    eprintln!("  {} {}", "Total Logs:".bold(), report.summary.total_logs);
    eprintln!("  {} {}", "Errors:".bold(), report.summary.total_errors);
    eprintln!("  {} {}", "Warnings:".bold(), report.summary.total_warnings);
    eprintln!("  {} {}", "Network Errors:".bold(), report.summary.total_network_errors);

    if report.summary.total_errors > 0 {
        eprintln!();
        eprintln!("  {}", "Error Classification:".bold());
        eprintln!("    {} {}", "High:".red(), report.errors.high.len());
        eprintln!("    {} {}", "Medium:".yellow(), report.errors.medium.len());
        eprintln!("    {} {}", "Low:".dimmed(), report.errors.low.len());
    }

    if let Some(nav_error) = &report.navigation_error {
        eprintln!();
        let cause = if nav_error.timeout { "timed out" } else { "failed" };
        eprintln!(
            "  {} navigation {}: {}",
            "⚠".yellow().bold(),
            cause,
            nav_error.message.yellow()
        );
    }

    eprintln!();
    eprintln!("  {} {}", "Report:".bold(), report_path.display());
    eprintln!("{rule}\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::config::AnalysisSettings;
    use crate::report::{RunRecord, build_report};
    use sitecheck_browser::CollectedEvents;

    #[test]
    fn format_duration_milliseconds() {
        assert_eq!(format_duration(Duration::from_millis(0)), "0ms");
        assert_eq!(format_duration(Duration::from_millis(999)), "999ms");
    }

    #[test]
    fn format_duration_seconds() {
        assert_eq!(format_duration(Duration::from_millis(1000)), "1.00s");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
        assert_eq!(format_duration(Duration::from_millis(59_999)), "60.00s");
    }

    #[test]
    fn format_duration_minutes() {
        assert_eq!(format_duration(Duration::from_secs(60)), "1m 0s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    }

    #[test]
    fn print_run_summary_does_not_panic() {
        let record = RunRecord {
            url: "https://example.com".into(),
            timestamp: "2026-08-05T12:00:00.000Z".into(),
            duration_ms: 6_200,
            events: CollectedEvents::default(),
            navigation_time_ms: 850,
            navigation_error: None,
        };
        let analysis = analyze(&record.events, None, &AnalysisSettings::default());
        let report = build_report(record, analysis);

        print_run_summary(&report, Path::new("./output/test-report.json"));
    }
}
