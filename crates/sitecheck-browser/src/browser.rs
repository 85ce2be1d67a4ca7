//! Browser lifecycle management and process control.
//!
//! This module provides [`Browser`], the entry point for a monitoring run.
//! It handles launching Chrome, driving the CDP handler, and creating
//! monitored pages.
//!
//! # Resource Safety
//!
//! The Chrome process is killed by chromiumoxide's Drop if the browser is
//! never closed explicitly, so a panicking run does not leak processes.
//! Explicit `close()` is still preferred for graceful shutdown.

use crate::error::{BrowserError, Result};
use crate::page::MonitoredPage;
use chromiumoxide::browser::{Browser as ChromeBrowser, BrowserConfig};
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Launch options for the monitoring browser.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// Run without a visible window (default: true).
    pub headless: bool,

    /// Browser window size (default: 1920x1080).
    pub window_size: (u32, u32),

    /// Additional Chrome arguments.
    pub args: Vec<String>,

    /// Chrome executable path. When unset, the `CHROME_PATH` environment
    /// variable is consulted, then chromiumoxide's auto-detection.
    pub chrome_path: Option<String>,
}

impl BrowserOptions {
    /// Creates options with the defaults for headless monitoring.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables visible mode to watch the run.
    #[must_use]
    pub fn visible(mut self) -> Self {
        self.headless = false;
        self
    }

    /// Sets a custom window size.
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Replaces the Chrome argument list.
    #[must_use]
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Sets an explicit Chrome executable path.
    #[must_use]
    pub fn with_chrome_path(mut self, path: impl Into<String>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    /// Converts to chromiumoxide `BrowserConfig`.
    #[allow(clippy::result_large_err)]
    fn to_browser_config(&self) -> Result<BrowserConfig> {
        let mut config = BrowserConfig::builder();

        if self.headless {
            config = config.arg("--headless");
        } else {
            // chromiumoxide defaults to headless; visible mode has to opt out.
            config = config.with_head();
        }

        config = config.arg(format!(
            "--window-size={},{}",
            self.window_size.0, self.window_size.1
        ));

        // A unique user data directory avoids ProcessSingleton conflicts
        // with an already-running Chrome or a parallel test run.
        let unique_id = uuid::Uuid::new_v4();
        let user_data_dir = std::env::temp_dir().join(format!("sitecheck-{unique_id}"));
        config = config.arg(format!("--user-data-dir={}", user_data_dir.display()));

        for arg in &self.args {
            config = config.arg(arg.clone());
        }

        let chrome_path = self
            .chrome_path
            .clone()
            .or_else(|| std::env::var("CHROME_PATH").ok());
        if let Some(path) = chrome_path {
            config = config.chrome_executable(path);
        }

        config.build().map_err(|e| BrowserError::LaunchFailed {
            reason: format!("invalid browser configuration: {e}"),
            source: None,
        })
    }
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: true,
            window_size: (1920, 1080),
            args: vec![
                // Sandbox flags are required where user namespaces are
                // unavailable (containers, CI). Only monitor content you
                // would open in a regular browser.
                "--no-sandbox".to_string(),
                "--disable-setuid-sandbox".to_string(),
                "--disable-gpu".to_string(),
                // Prevents /dev/shm exhaustion in containerized environments
                "--disable-dev-shm-usage".to_string(),
            ],
            chrome_path: None,
        }
    }
}

/// A managed browser instance.
///
/// # Example
///
/// ```ignore
/// let browser = Browser::launch(BrowserOptions::default()).await?;
/// let page = browser.new_page().await?;
/// let status = page.navigate("https://example.com", WaitUntil::DomContentLoaded, timeout).await;
/// // ...
/// browser.close().await?;
/// ```
///
/// # Resource Management
///
/// The browser should be closed explicitly with `close()`. Relying on Drop
/// works (chromiumoxide kills the process) but skips the graceful CDP
/// shutdown.
pub struct Browser {
    inner: Arc<Mutex<Option<ChromeBrowser>>>,
}

impl Browser {
    /// Launches a new browser instance with the given options.
    ///
    /// Spawns the Chrome process, establishes the CDP connection, and
    /// starts the handler task that drives event delivery.
    ///
    /// # Errors
    ///
    /// Returns `LaunchFailed` if Chrome is not installed, not executable,
    /// or fails to start.
    pub async fn launch(options: BrowserOptions) -> Result<Self> {
        debug!("launching browser with options: {:?}", options);

        let browser_config = options.to_browser_config()?;

        let (browser, mut handler) =
            ChromeBrowser::launch(browser_config)
                .await
                .map_err(|e| BrowserError::LaunchFailed {
                    reason: "failed to launch Chrome process".to_string(),
                    source: Some(Box::new(e)),
                })?;

        // Drive the handler so chromiumoxide processes CDP messages; the
        // loop ends when the connection closes.
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!("browser handler error: {}", e);
                }
            }
        });

        debug!("browser launched");

        Ok(Self {
            inner: Arc::new(Mutex::new(Some(browser))),
        })
    }

    /// Creates a new monitored page (tab) with all event listeners
    /// attached, ready to navigate.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyClosed` if the browser has been closed, or a
    /// connection error if the page cannot be created.
    pub async fn new_page(&self) -> Result<MonitoredPage> {
        let guard = self.inner.lock().await;
        let browser = guard.as_ref().ok_or(BrowserError::AlreadyClosed)?;

        let chrome_page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;
        drop(guard);

        MonitoredPage::new(chrome_page).await
    }

    /// Closes the browser and kills the Chrome process.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser fails to close gracefully.
    pub async fn close(&self) -> Result<()> {
        let mut guard = self.inner.lock().await;

        if let Some(mut browser) = guard.take() {
            debug!("closing browser");
            browser
                .close()
                .await
                .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;
        }

        Ok(())
    }

    /// Returns true if the browser has been closed.
    pub async fn is_closed(&self) -> bool {
        self.inner.lock().await.is_none()
    }
}

impl Drop for Browser {
    fn drop(&mut self) {
        // Drop cannot await close(); chromiumoxide's Browser::drop kills
        // the Chrome process if it is still alive.
        if let Ok(guard) = self.inner.try_lock() {
            if guard.is_some() {
                warn!("Browser dropped without explicit close(); Chrome process will be killed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_headless_with_sandbox_flags() {
        let options = BrowserOptions::default();
        assert!(options.headless);
        assert_eq!(options.window_size, (1920, 1080));
        assert!(options.args.iter().any(|a| a == "--no-sandbox"));
        assert!(options.args.iter().any(|a| a == "--disable-gpu"));
    }

    #[test]
    fn visible_disables_headless() {
        let options = BrowserOptions::default().visible();
        assert!(!options.headless);
    }

    #[test]
    fn builder_overrides_apply() {
        let options = BrowserOptions::default()
            .with_window_size(1280, 720)
            .with_args(vec!["--mute-audio".to_string()])
            .with_chrome_path("/usr/bin/chromium");

        assert_eq!(options.window_size, (1280, 720));
        assert_eq!(options.args, vec!["--mute-audio".to_string()]);
        assert_eq!(options.chrome_path.as_deref(), Some("/usr/bin/chromium"));
    }

    #[tokio::test]
    #[ignore] // Requires Chrome to be installed
    async fn browser_launch_and_close() {
        let browser = Browser::launch(BrowserOptions::default())
            .await
            .expect("failed to launch browser");

        assert!(!browser.is_closed().await);

        browser.close().await.expect("failed to close browser");
    }
}
