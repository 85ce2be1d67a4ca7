//! Integration tests for sitecheck-browser
//!
//! These tests require Chrome/Chromium to be installed and are marked
//! #[ignore] by default. Run with:
//! cargo test --package sitecheck-browser -- --ignored

use sitecheck_browser::{Browser, BrowserOptions, LogLevel, WaitUntil};
use std::time::Duration;

const NAV_TIMEOUT: Duration = Duration::from_secs(30);

/// A page that logs at several levels and throws an uncaught exception.
fn noisy_page() -> String {
    r#"
    <!DOCTYPE html>
    <html>
    <head>
        <title>Noisy Page</title>
    </head>
    <body>
        <h1>Noisy</h1>
        <script>
            console.log("page loaded");
            console.warn("something dubious");
            console.error("something broken");
            setTimeout(() => {
                console.log("deferred activity");
                undefinedFunction();
            }, 250);
        </script>
    </body>
    </html>
    "#
    .to_string()
}

fn data_url(html: &str) -> String {
    format!("data:text/html,{}", urlencoding::encode(html))
}

#[tokio::test]
#[ignore] // Requires Chrome to be installed
async fn navigate_and_read_title() {
    let browser = Browser::launch(BrowserOptions::default())
        .await
        .expect("failed to launch");

    let page = browser.new_page().await.expect("failed to create page");

    let status = page
        .navigate(&data_url(&noisy_page()), WaitUntil::DomContentLoaded, NAV_TIMEOUT)
        .await;
    assert!(status.error.is_none(), "navigation should succeed");
    assert!(status.elapsed_ms > 0);

    let title = page.title().await.expect("failed to get title");
    assert_eq!(title, "Noisy Page");

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn console_messages_reach_the_sink() {
    let browser = Browser::launch(BrowserOptions::default())
        .await
        .expect("failed to launch");

    let page = browser.new_page().await.expect("failed to create page");
    page.navigate(&data_url(&noisy_page()), WaitUntil::DomContentLoaded, NAV_TIMEOUT)
        .await;

    // The monitoring window picks up the deferred timer activity too.
    page.settle(Duration::from_millis(800)).await;

    let events = page.events().snapshot();

    assert!(
        events
            .logs
            .iter()
            .any(|log| log.level == LogLevel::Log && log.text.contains("page loaded")),
        "should capture the initial log"
    );
    assert!(
        events.logs.iter().any(|log| log.text.contains("deferred activity")),
        "should capture activity fired during the monitoring window"
    );
    assert_eq!(events.warnings.len(), 1);
    // console.error plus the uncaught exception from the timer
    assert!(events.errors.len() >= 2, "expected console error and pageerror");

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn uncaught_exception_records_pageerror_with_stack() {
    let html = r#"
    <!DOCTYPE html>
    <html><head><title>Thrower</title></head>
    <body><script>throw new TypeError("exploded on load");</script></body>
    </html>
    "#;

    let browser = Browser::launch(BrowserOptions::default())
        .await
        .expect("failed to launch");

    let page = browser.new_page().await.expect("failed to create page");
    page.navigate(&data_url(html), WaitUntil::DomContentLoaded, NAV_TIMEOUT)
        .await;
    page.settle(Duration::from_millis(300)).await;

    let events = page.events().snapshot();
    let page_error = events
        .errors
        .iter()
        .find_map(|entry| match entry {
            sitecheck_browser::ErrorEntry::Page(error) => Some(error),
            sitecheck_browser::ErrorEntry::Console(_) => None,
        })
        .expect("expected a pageerror entry");

    assert!(page_error.message.contains("TypeError"));
    assert!(!page_error.stack.is_empty(), "pageerror should carry a stack");

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn unreachable_host_records_navigation_error() {
    let browser = Browser::launch(BrowserOptions::default())
        .await
        .expect("failed to launch");

    let page = browser.new_page().await.expect("failed to create page");
    let status = page
        .navigate(
            "http://localhost:1/unreachable",
            WaitUntil::DomContentLoaded,
            Duration::from_secs(10),
        )
        .await;

    let error = status.error.expect("navigation should have failed");
    assert!(!error.message.is_empty());

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn final_metrics_snapshot_is_populated() {
    let browser = Browser::launch(BrowserOptions::default())
        .await
        .expect("failed to launch");

    let page = browser.new_page().await.expect("failed to create page");
    page.navigate(&data_url(&noisy_page()), WaitUntil::Load, NAV_TIMEOUT)
        .await;

    let snapshot = page.sample_metrics().await.expect("metrics call failed");
    assert!(!snapshot.is_empty(), "expected at least one metric");

    let events = page.events().snapshot();
    assert_eq!(events.metrics, snapshot, "sink should hold the final snapshot");

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn screenshot_produces_png_bytes() {
    let browser = Browser::launch(BrowserOptions::default())
        .await
        .expect("failed to launch");

    let page = browser.new_page().await.expect("failed to create page");
    page.navigate(&data_url(&noisy_page()), WaitUntil::Load, NAV_TIMEOUT)
        .await;

    let bytes = page.screenshot(true).await.expect("screenshot failed");
    assert!(!bytes.is_empty());
    // PNG magic number
    assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);

    browser.close().await.expect("failed to close");
}
