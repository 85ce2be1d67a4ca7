//! Configuration for a check run with multi-source loading.
//!
//! Merges settings from CLI flags, `SITECHECK_*` environment variables,
//! and `sitecheck.config.json`. Priority: CLI > environment > file >
//! defaults. The resulting value is built once at startup and passed by
//! reference into each pipeline stage - there is no global configuration.

mod defaults;
mod loading;
mod validation;

use serde::{Deserialize, Serialize};
use sitecheck_browser::WaitUntil;
use std::path::PathBuf;

pub use defaults::DEFAULT_URL;

/// Top-level configuration - loaded from sitecheck.config.json, env, and
/// CLI flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CheckConfig {
    /// Browser launch settings
    #[serde(default)]
    pub browser: BrowserSettings,

    /// Page viewport and navigation settings
    #[serde(default)]
    pub page: PageSettings,

    /// Monitoring window and screenshot settings
    #[serde(default)]
    pub monitoring: MonitoringSettings,

    /// Output directory and file names
    #[serde(default)]
    pub output: OutputSettings,

    /// Severity keywords and score penalties
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

/// Browser launch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BrowserSettings {
    /// Run without a visible window
    #[serde(default = "defaults::default_headless")]
    pub headless: bool,

    /// Chrome executable path; defaults to the CHROME_PATH environment
    /// variable, then auto-detection
    #[serde(default = "defaults::default_executable_path", skip_serializing_if = "Option::is_none")]
    pub executable_path: Option<String>,

    /// Chrome command-line arguments
    #[serde(default = "defaults::default_browser_args")]
    pub args: Vec<String>,
}

/// Page viewport and navigation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PageSettings {
    /// Viewport dimensions
    #[serde(default)]
    pub viewport: Viewport,

    /// Navigation timeout in milliseconds
    #[serde(default = "defaults::default_navigation_timeout_ms")]
    pub timeout: u64,

    /// Readiness condition navigation waits for
    #[serde(default = "defaults::default_wait_until")]
    pub wait_until: WaitUntil,
}

/// Viewport dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Viewport {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Monitoring window and screenshot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MonitoringSettings {
    /// How long to keep observing after navigation, in milliseconds
    #[serde(default = "defaults::default_monitoring_duration_ms")]
    pub duration: u64,

    /// Capture a screenshot alongside the report
    #[serde(default = "defaults::default_screenshot")]
    pub screenshot: bool,

    /// Capture the full scrollable page instead of the viewport
    #[serde(default = "defaults::default_full_page_screenshot")]
    pub full_page_screenshot: bool,
}

/// Output directory and file names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OutputSettings {
    /// Directory the report and screenshot are written into
    #[serde(default = "defaults::default_output_dir")]
    pub dir: PathBuf,

    /// Report file name
    #[serde(default = "defaults::default_report_file")]
    pub report_file: String,

    /// Screenshot file name
    #[serde(default = "defaults::default_screenshot_file")]
    pub screenshot_file: String,
}

/// Severity keywords and score penalties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AnalysisSettings {
    /// Keyword lists for the high/medium/low severity buckets
    #[serde(default)]
    pub severity_thresholds: SeverityThresholds,

    /// Penalty weights for the health score
    #[serde(default)]
    pub health_score: ScorePenalties,
}

/// Keyword lists for severity classification.
///
/// Matching is a case-sensitive substring test; high keywords are checked
/// before medium, and anything unmatched is low.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SeverityThresholds {
    /// Keywords marking an error as high severity
    pub high: Vec<String>,
    /// Keywords marking an error as medium severity
    pub medium: Vec<String>,
    /// Keywords historically associated with low severity; anything
    /// unmatched lands here regardless
    pub low: Vec<String>,
}

/// Penalty weights subtracted from the 100-point health score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScorePenalties {
    /// Points per error entry
    pub error_penalty: u32,
    /// Points per warning entry
    pub warning_penalty: u32,
    /// Points per failed network request
    pub network_error_penalty: u32,
    /// Points subtracted once when navigation failed or timed out
    pub navigation_timeout_penalty: u32,
}
