//! Run command implementation - the check pipeline.
//!
//! Strictly sequential: load config, launch the browser, create a
//! monitored page (listeners attached before navigation), navigate, hold
//! the monitoring window open, take a final metrics sample and screenshot,
//! then analyze, write the report, and print the summary.
//!
//! Navigation failures are data; everything else is fatal. The browser is
//! closed no matter how the run went.

use crate::analysis;
use crate::cli::RunArgs;
use crate::config::{CheckConfig, DEFAULT_URL};
use crate::error::{Result, ResultExt};
use crate::report::{self, RunRecord};
use crate::ui;
use chrono::{SecondsFormat, Utc};
use sitecheck_browser::{Browser, BrowserOptions, CollectedEvents, NavigationStatus};
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// What the page produced, gathered while the browser was still alive.
struct PageRun {
    navigation: NavigationStatus,
    events: CollectedEvents,
    screenshot: Option<Vec<u8>>,
}

/// Execute the run command.
///
/// Returns exit code 0 when no errors were collected and 2 otherwise;
/// pipeline failures propagate as errors (exit code 1 in main).
pub async fn execute(args: RunArgs) -> Result<ExitCode> {
    let config = CheckConfig::load(&args)?;
    config.validate()?;

    let url = args.url.clone().unwrap_or_else(|| DEFAULT_URL.to_string());
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let started = Instant::now();

    ui::info(&format!("Checking {url}"));

    let browser = Browser::launch(browser_options(&config)).await?;

    let outcome = check_page(&browser, &config, &url).await;

    // Close the browser regardless of how the check went.
    if let Err(err) = browser.close().await {
        warn!("failed to close browser cleanly: {err}");
    }

    let page_run = outcome?;

    let record = RunRecord {
        url,
        timestamp,
        duration_ms: started.elapsed().as_millis() as u64,
        navigation_time_ms: page_run.navigation.elapsed_ms,
        navigation_error: page_run.navigation.error,
        events: page_run.events,
    };

    let analysis = analysis::analyze(&record.events, record.navigation_error.as_ref(), &config.analysis);
    let error_count = analysis.total_errors;

    let report = report::build_report(record, analysis);
    let report_path = report::write_report(&report, &config.output.dir, &config.output.report_file)?;

    if let Some(bytes) = page_run.screenshot {
        let screenshot_path =
            report::write_screenshot(&bytes, &config.output.dir, &config.output.screenshot_file)
                .with_hint("Disable screenshots with --no-screenshot")?;
        debug!("screenshot written to {}", screenshot_path.display());
    }

    ui::print_run_summary(&report, &report_path);

    Ok(if error_count > 0 {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    })
}

/// Drives a single page through navigation, the monitoring window, the
/// final metrics sample, and the screenshot.
async fn check_page(browser: &Browser, config: &CheckConfig, url: &str) -> Result<PageRun> {
    let page = browser.new_page().await?;

    let navigation = page
        .navigate(url, config.page.wait_until, Duration::from_millis(config.page.timeout))
        .await;

    let window = Duration::from_millis(config.monitoring.duration);
    if window.is_zero() || ui::is_ci() {
        page.settle(window).await;
    } else {
        let spinner = ui::Spinner::new(&format!(
            "Monitoring page activity for {}...",
            ui::format_duration(window)
        ));
        page.settle(window).await;
        spinner.finish("Monitoring complete");
    }

    page.sample_metrics().await?;

    let screenshot = if config.monitoring.screenshot {
        Some(page.screenshot(config.monitoring.full_page_screenshot).await?)
    } else {
        None
    };

    let events = page.events().snapshot();

    Ok(PageRun {
        navigation,
        events,
        screenshot,
    })
}

/// Builds browser launch options from the configuration.
fn browser_options(config: &CheckConfig) -> BrowserOptions {
    let mut options = BrowserOptions::new()
        .with_window_size(config.page.viewport.width, config.page.viewport.height)
        .with_args(config.browser.args.clone());

    if !config.browser.headless {
        options = options.visible();
    }
    if let Some(path) = &config.browser.executable_path {
        options = options.with_chrome_path(path.clone());
    }

    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_options_follow_config() {
        let mut config = CheckConfig::default();
        config.page.viewport.width = 1280;
        config.page.viewport.height = 720;
        config.browser.headless = false;
        config.browser.executable_path = Some("/usr/bin/chromium".to_string());

        let options = browser_options(&config);
        assert_eq!(options.window_size, (1280, 720));
        assert!(!options.headless);
        assert_eq!(options.chrome_path.as_deref(), Some("/usr/bin/chromium"));
        assert_eq!(options.args, config.browser.args);
    }

    #[test]
    fn headless_config_stays_headless() {
        let options = browser_options(&CheckConfig::default());
        assert!(options.headless);
    }
}
