//! Severity classification and the health score.
//!
//! A pure pass over the finalized event lists. Classification and scoring
//! never mutate their inputs, and the resulting [`Analysis`] is never
//! mutated after creation.

use crate::config::{AnalysisSettings, ScorePenalties, SeverityThresholds};
use serde::Serialize;
use sitecheck_browser::{CollectedEvents, ErrorEntry, NavigationError};

/// Error entries partitioned by severity.
///
/// The buckets are mutually exclusive and together contain every error
/// entry exactly once.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeverityBuckets {
    /// Errors matching a high-severity keyword.
    pub high: Vec<ErrorEntry>,
    /// Errors matching a medium-severity keyword (and no high keyword).
    pub medium: Vec<ErrorEntry>,
    /// Everything else.
    pub low: Vec<ErrorEntry>,
}

impl SeverityBuckets {
    /// Total entries across all three buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.high.len() + self.medium.len() + self.low.len()
    }

    /// True when no errors were classified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Derived totals, severity partition, and health score for one run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Number of console messages observed.
    pub total_logs: usize,
    /// Number of error entries (console errors + page exceptions).
    pub total_errors: usize,
    /// Number of warning entries.
    pub total_warnings: usize,
    /// Number of failed network requests.
    pub total_network_errors: usize,
    /// Error entries partitioned by severity.
    pub severity: SeverityBuckets,
    /// Health score in [0, 100]; 100 means no detected problems.
    pub health_score: u8,
}

/// Analyzes the finalized event lists into totals, severity buckets, and
/// the health score.
#[must_use]
pub fn analyze(
    events: &CollectedEvents,
    navigation_error: Option<&NavigationError>,
    settings: &AnalysisSettings,
) -> Analysis {
    let severity = classify_severity(&events.errors, &settings.severity_thresholds);
    let health_score = health_score(
        events.errors.len(),
        events.warnings.len(),
        events.network_errors.len(),
        navigation_error.is_some(),
        &settings.health_score,
    );

    Analysis {
        total_logs: events.logs.len(),
        total_errors: events.errors.len(),
        total_warnings: events.warnings.len(),
        total_network_errors: events.network_errors.len(),
        severity,
        health_score,
    }
}

/// Partitions error entries into severity buckets.
///
/// Keywords are tested as case-sensitive substrings with first-match-wins
/// precedence: high before medium; anything unmatched is low.
#[must_use]
pub fn classify_severity(errors: &[ErrorEntry], thresholds: &SeverityThresholds) -> SeverityBuckets {
    let mut buckets = SeverityBuckets::default();

    for error in errors {
        let text = error.text();

        if thresholds.high.iter().any(|keyword| text.contains(keyword.as_str())) {
            buckets.high.push(error.clone());
        } else if thresholds.medium.iter().any(|keyword| text.contains(keyword.as_str())) {
            buckets.medium.push(error.clone());
        } else {
            buckets.low.push(error.clone());
        }
    }

    buckets
}

/// Computes the subtractive health score, clamped to [0, 100].
#[must_use]
pub fn health_score(
    errors: usize,
    warnings: usize,
    network_errors: usize,
    navigation_failed: bool,
    penalties: &ScorePenalties,
) -> u8 {
    let mut deduction: i64 = 0;

    deduction = deduction.saturating_add((errors as i64).saturating_mul(i64::from(penalties.error_penalty)));
    deduction = deduction.saturating_add((warnings as i64).saturating_mul(i64::from(penalties.warning_penalty)));
    deduction = deduction
        .saturating_add((network_errors as i64).saturating_mul(i64::from(penalties.network_error_penalty)));

    if navigation_failed {
        deduction = deduction.saturating_add(i64::from(penalties.navigation_timeout_penalty));
    }

    100i64.saturating_sub(deduction).clamp(0, 100) as u8
}
