//! Monitored page: navigation, the observation window, and final metrics.
//!
//! [`MonitoredPage`] wraps a chromiumoxide page and attaches the event
//! collector before any navigation happens, so everything the load emits is
//! observed. Navigation failures are recorded as data rather than
//! propagated - a page that never loads still produces a report.

use crate::collector;
use crate::error::{BrowserError, Result};
use crate::events::{EventLog, EventSink, MetricsSnapshot, NavigationError};
use crate::wait::{WaitConfig, wait_for_result};
use chromiumoxide::cdp::browser_protocol::performance::{
    EnableParams as PerformanceEnableParams, GetMetricsParams,
};
use chromiumoxide::page::Page as ChromePage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Readiness condition navigation waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitUntil {
    /// The DOM has been parsed (`document.readyState` is at least
    /// `interactive`). Sub-resources may still be loading.
    DomContentLoaded,
    /// The load event fired (`document.readyState` is `complete`).
    Load,
}

impl WaitUntil {
    fn is_satisfied_by(self, ready_state: &str) -> bool {
        match self {
            WaitUntil::DomContentLoaded => matches!(ready_state, "interactive" | "complete"),
            WaitUntil::Load => ready_state == "complete",
        }
    }

    fn description(self) -> &'static str {
        match self {
            WaitUntil::DomContentLoaded => "DOM content parsed",
            WaitUntil::Load => "page load complete",
        }
    }
}

/// Outcome of a navigation attempt.
///
/// Elapsed time is measured regardless of success; a failure shows up as a
/// recorded [`NavigationError`], never as an `Err`.
#[derive(Debug, Clone)]
pub struct NavigationStatus {
    /// Wall-clock navigation time in milliseconds.
    pub elapsed_ms: u64,
    /// The recorded failure, if navigation did not reach readiness.
    pub error: Option<NavigationError>,
}

/// A browser page with event collection attached.
#[derive(Debug)]
pub struct MonitoredPage {
    inner: Arc<ChromePage>,
    events: EventLog,
    _collector_tasks: Vec<JoinHandle<()>>,
}

impl MonitoredPage {
    /// Wraps a raw page, enables the Performance domain, and attaches all
    /// event listeners. Called by [`crate::Browser::new_page`]; listeners
    /// are in place before the caller can navigate.
    pub(crate) async fn new(page: ChromePage) -> Result<Self> {
        let inner = Arc::new(page);
        let events = EventLog::new();

        // Performance.metrics events only flow once the domain is enabled;
        // the other domains are enabled by chromiumoxide during page init.
        inner.execute(PerformanceEnableParams::default()).await?;

        let sink: Arc<dyn EventSink> = Arc::new(events.clone());
        let collector_tasks = collector::attach(&inner, sink).await?;

        Ok(Self {
            inner,
            events,
            _collector_tasks: collector_tasks,
        })
    }

    /// Returns a handle to the accumulated events.
    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Navigates to `url` and waits for the configured readiness condition,
    /// all under `timeout`.
    ///
    /// Failures - including an elapsed deadline - are recorded in the
    /// returned status and do not abort the run. The `timeout` flag on the
    /// recorded error distinguishes deadlines from other failures.
    pub async fn navigate(&self, url: &str, wait_until: WaitUntil, timeout: Duration) -> NavigationStatus {
        debug!(url, ?wait_until, ?timeout, "starting navigation");
        let started = Instant::now();

        let outcome = tokio::time::timeout(timeout, self.goto_and_wait(url, wait_until, timeout)).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let error = match outcome {
            Ok(Ok(())) => None,
            Ok(Err(err)) => {
                warn!(url, %err, "navigation failed");
                Some(NavigationError {
                    timeout: err.is_timeout(),
                    message: err.to_string(),
                })
            }
            Err(_) => {
                warn!(url, "navigation deadline elapsed");
                Some(NavigationError {
                    message: format!("navigation to '{url}' timed out after {}ms", timeout.as_millis()),
                    timeout: true,
                })
            }
        };

        NavigationStatus { elapsed_ms, error }
    }

    async fn goto_and_wait(&self, url: &str, wait_until: WaitUntil, timeout: Duration) -> Result<()> {
        self.inner
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        self.wait_for_ready(wait_until, WaitConfig::with_timeout(timeout)).await
    }

    /// Polls `document.readyState` until it satisfies `wait_until`.
    ///
    /// Called by `navigate()`; exposed for callers that trigger navigation
    /// through page scripts.
    pub async fn wait_for_ready(&self, wait_until: WaitUntil, config: WaitConfig) -> Result<()> {
        wait_for_result(
            || {
                let page = self.inner.clone();
                async move {
                    let result = page
                        .evaluate("document.readyState")
                        .await
                        .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;

                    let ready = result
                        .value()
                        .and_then(|v| v.as_str())
                        .is_some_and(|state| wait_until.is_satisfied_by(state));

                    Ok(ready)
                }
            },
            config,
            wait_until.description(),
        )
        .await
    }

    /// Holds the page open for the monitoring window so timers, deferred
    /// scripts, and late network activity can still reach the collector.
    ///
    /// The window is wall-clock based: activity that fires after it closes
    /// is silently missed. That race is inherent to the approach and is
    /// accepted rather than worked around.
    pub async fn settle(&self, duration: Duration) {
        debug!(?duration, "monitoring window open");
        tokio::time::sleep(duration).await;
    }

    /// Captures a final `Performance.getMetrics` snapshot and records it
    /// through the sink (replacing any event-driven snapshot).
    pub async fn sample_metrics(&self) -> Result<MetricsSnapshot> {
        let response = self.inner.execute(GetMetricsParams::default()).await?;
        let snapshot = MetricsSnapshot::from_pairs(
            response
                .result
                .metrics
                .iter()
                .map(|metric| (metric.name.clone(), metric.value)),
        );
        self.events.record_metrics(snapshot.clone());
        Ok(snapshot)
    }

    /// Executes JavaScript in the page context and returns the result.
    ///
    /// # Errors
    ///
    /// Returns an error if execution fails or the result cannot be
    /// deserialized into `T`.
    pub async fn evaluate<T>(&self, script: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let result = self
            .inner
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;

        result
            .into_value()
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))
    }

    /// Returns the page title.
    pub async fn title(&self) -> Result<String> {
        self.evaluate("document.title").await
    }

    /// Takes a screenshot and returns PNG bytes.
    ///
    /// `full_page` captures the entire scrollable document instead of the
    /// viewport.
    pub async fn screenshot(&self, full_page: bool) -> Result<Vec<u8>> {
        let params = chromiumoxide::page::ScreenshotParams::builder()
            .full_page(full_page)
            .build();

        self.inner
            .screenshot(params)
            .await
            .map_err(BrowserError::ChromiumOxide)
    }

    /// Closes the page.
    ///
    /// The page is shared with the collector tasks via Arc; if they still
    /// hold references the explicit close is skipped and cleanup falls to
    /// the browser shutdown, which closes every page.
    pub async fn close(self) -> Result<()> {
        match Arc::try_unwrap(self.inner) {
            Ok(page) => {
                page.close().await.map_err(BrowserError::ChromiumOxide)?;
                Ok(())
            }
            Err(_arc) => {
                warn!("page close deferred: collector tasks still hold references");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    // Browser-backed tests live in tests/integration.rs; these cover the
    // readiness predicate only.

    use super::WaitUntil;

    #[test]
    fn domcontentloaded_accepts_interactive_and_complete() {
        assert!(WaitUntil::DomContentLoaded.is_satisfied_by("interactive"));
        assert!(WaitUntil::DomContentLoaded.is_satisfied_by("complete"));
        assert!(!WaitUntil::DomContentLoaded.is_satisfied_by("loading"));
    }

    #[test]
    fn load_requires_complete() {
        assert!(WaitUntil::Load.is_satisfied_by("complete"));
        assert!(!WaitUntil::Load.is_satisfied_by("interactive"));
        assert!(!WaitUntil::Load.is_satisfied_by("loading"));
    }

    #[test]
    fn wait_until_serializes_to_config_names() {
        assert_eq!(
            serde_json::to_string(&WaitUntil::DomContentLoaded).unwrap(),
            "\"domcontentloaded\""
        );
        assert_eq!(serde_json::to_string(&WaitUntil::Load).unwrap(), "\"load\"");
    }
}
