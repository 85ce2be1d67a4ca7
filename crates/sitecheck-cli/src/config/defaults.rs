//! Default values for every configuration section.

use super::{
    AnalysisSettings, BrowserSettings, MonitoringSettings, OutputSettings, PageSettings,
    ScorePenalties, SeverityThresholds, Viewport,
};
use sitecheck_browser::WaitUntil;
use std::path::PathBuf;

/// URL checked when none is given on the command line.
pub const DEFAULT_URL: &str = "https://example.com";

pub(crate) fn default_headless() -> bool {
    true
}

pub(crate) fn default_executable_path() -> Option<String> {
    std::env::var("CHROME_PATH").ok()
}

pub(crate) fn default_browser_args() -> Vec<String> {
    vec![
        "--no-sandbox".to_string(),
        "--disable-setuid-sandbox".to_string(),
        "--disable-gpu".to_string(),
        "--disable-dev-shm-usage".to_string(),
    ]
}

pub(crate) fn default_navigation_timeout_ms() -> u64 {
    30_000
}

pub(crate) fn default_wait_until() -> WaitUntil {
    WaitUntil::DomContentLoaded
}

pub(crate) fn default_monitoring_duration_ms() -> u64 {
    5_000
}

pub(crate) fn default_screenshot() -> bool {
    true
}

pub(crate) fn default_full_page_screenshot() -> bool {
    true
}

pub(crate) fn default_output_dir() -> PathBuf {
    PathBuf::from("./output")
}

pub(crate) fn default_report_file() -> String {
    "test-report.json".to_string()
}

pub(crate) fn default_screenshot_file() -> String {
    "screenshot.png".to_string()
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: default_headless(),
            executable_path: default_executable_path(),
            args: default_browser_args(),
        }
    }
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            timeout: default_navigation_timeout_ms(),
            wait_until: default_wait_until(),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl Default for MonitoringSettings {
    fn default() -> Self {
        Self {
            duration: default_monitoring_duration_ms(),
            screenshot: default_screenshot(),
            full_page_screenshot: default_full_page_screenshot(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            report_file: default_report_file(),
            screenshot_file: default_screenshot_file(),
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            severity_thresholds: SeverityThresholds::default(),
            health_score: ScorePenalties::default(),
        }
    }
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            high: vec![
                "Uncaught".to_string(),
                "TypeError".to_string(),
                "ReferenceError".to_string(),
                "SyntaxError".to_string(),
            ],
            medium: vec![
                "404".to_string(),
                "Network".to_string(),
                "Failed to load".to_string(),
            ],
            low: vec!["warning".to_string(), "deprecation".to_string()],
        }
    }
}

impl Default for ScorePenalties {
    fn default() -> Self {
        Self {
            error_penalty: 10,
            warning_penalty: 2,
            network_error_penalty: 5,
            navigation_timeout_penalty: 20,
        }
    }
}
