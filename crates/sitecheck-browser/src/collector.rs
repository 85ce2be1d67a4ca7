//! CDP event subscription and translation into domain events.
//!
//! Four event streams feed the sink: console messages, uncaught exceptions,
//! failed network requests, and performance metrics. Listeners are attached
//! before navigation starts so nothing emitted during the load is missed.
//!
//! Failed requests need correlation: `Network.loadingFailed` carries only a
//! request id, so `Network.requestWillBeSent` is tracked to recover the URL
//! and HTTP method of the failure.

use crate::error::Result;
use crate::events::{EventSink, LogEntry, LogLevel, MetricsSnapshot, NetworkError, PageError, SourceLocation};
use chromiumoxide::cdp::browser_protocol::network::{
    EventLoadingFailed, EventRequestWillBeSent, RequestId, ResourceType,
};
use chromiumoxide::cdp::browser_protocol::performance::EventMetrics;
use chromiumoxide::cdp::js_protocol::runtime::{
    ConsoleApiCalledType, EventConsoleApiCalled, EventExceptionThrown, StackTrace,
};
use chromiumoxide::page::Page as ChromePage;
use futures::StreamExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

/// Failure reason Chrome reports for requests the client itself cancelled.
/// These are not page defects and never reach the sink.
const ABORTED_ERROR_TEXT: &str = "net::ERR_ABORTED";

#[derive(Debug, Clone)]
struct PendingRequest {
    url: String,
    method: String,
}

/// Attaches all event listeners to the page and spawns one forwarding task
/// per stream. Returns the task handles; they end on their own when the
/// page's event streams close.
pub(crate) async fn attach(page: &Arc<ChromePage>, sink: Arc<dyn EventSink>) -> Result<Vec<JoinHandle<()>>> {
    let mut console_events = page.event_listener::<EventConsoleApiCalled>().await?;
    let mut exception_events = page.event_listener::<EventExceptionThrown>().await?;
    let mut request_events = page.event_listener::<EventRequestWillBeSent>().await?;
    let mut failure_events = page.event_listener::<EventLoadingFailed>().await?;
    let mut metrics_events = page.event_listener::<EventMetrics>().await?;

    let pending: Arc<Mutex<HashMap<RequestId, PendingRequest>>> = Arc::new(Mutex::new(HashMap::new()));
    let mut tasks = Vec::with_capacity(5);

    let console_sink = sink.clone();
    tasks.push(tokio::spawn(async move {
        while let Some(event) = console_events.next().await {
            console_sink.record_log(parse_console_event(&event));
        }
    }));

    let exception_sink = sink.clone();
    tasks.push(tokio::spawn(async move {
        while let Some(event) = exception_events.next().await {
            exception_sink.record_page_error(parse_exception_event(&event));
        }
    }));

    let request_pending = pending.clone();
    tasks.push(tokio::spawn(async move {
        while let Some(event) = request_events.next().await {
            if let Ok(mut map) = request_pending.lock() {
                map.insert(
                    event.request_id.clone(),
                    PendingRequest {
                        url: event.request.url.clone(),
                        method: event.request.method.clone(),
                    },
                );
            }
        }
    }));

    let failure_sink = sink.clone();
    tasks.push(tokio::spawn(async move {
        while let Some(event) = failure_events.next().await {
            if is_aborted(&event.error_text, event.canceled) {
                continue;
            }
            let request = pending
                .lock()
                .ok()
                .and_then(|map| map.get(&event.request_id).cloned());
            failure_sink.record_network_failure(NetworkError {
                url: request.as_ref().map(|r| r.url.clone()).unwrap_or_default(),
                error: event.error_text.clone(),
                method: request.map(|r| r.method).unwrap_or_default(),
                resource_type: resource_type_name(&event.r#type),
            });
        }
    }));

    tasks.push(tokio::spawn(async move {
        while let Some(event) = metrics_events.next().await {
            sink.record_metrics(MetricsSnapshot::from_pairs(
                event.metrics.iter().map(|metric| (metric.name.clone(), metric.value)),
            ));
        }
    }));

    Ok(tasks)
}

/// True when the failure was a client-side cancellation rather than a
/// genuine network problem.
fn is_aborted(error_text: &str, canceled: Option<bool>) -> bool {
    canceled.unwrap_or(false) || error_text == ABORTED_ERROR_TEXT
}

/// Lowercase resource type name in the style of the report schema
/// (document, image, xhr, ...).
fn resource_type_name(resource_type: &ResourceType) -> String {
    format!("{resource_type:?}").to_ascii_lowercase()
}

/// Parses a CDP `Runtime.consoleAPICalled` event into a [`LogEntry`].
///
/// Arguments are formatted and joined with spaces; the first stack frame,
/// when present, becomes the source location.
///
/// # Design Note
///
/// In chromiumoxide 0.7.0, `EventConsoleApiCalled` contains the event
/// fields directly as public members. The call type enum varies by CDP
/// snapshot, so we pattern match on the variants instead of depending on
/// conversion helpers.
fn parse_console_event(event: &EventConsoleApiCalled) -> LogEntry {
    let level = match event.r#type {
        ConsoleApiCalledType::Log => LogLevel::Log,
        ConsoleApiCalledType::Info => LogLevel::Info,
        ConsoleApiCalledType::Warning => LogLevel::Warning,
        ConsoleApiCalledType::Error => LogLevel::Error,
        ConsoleApiCalledType::Debug => LogLevel::Debug,
        _ => LogLevel::Other,
    };

    // Format arguments - each arg can be a primitive or object
    let text = event
        .args
        .iter()
        .map(|arg| {
            arg.value
                .as_ref()
                .and_then(|v| v.as_str())
                .unwrap_or("<object>")
                .to_string()
        })
        .collect::<Vec<_>>()
        .join(" ");

    let mut entry = LogEntry::new(level, text);

    if let Some(stack_trace) = &event.stack_trace {
        if let Some(frame) = stack_trace.call_frames.first() {
            entry = entry.with_location(SourceLocation {
                url: frame.url.clone(),
                line_number: frame.line_number,
                column_number: frame.column_number,
            });
        }
    }

    entry
}

/// Parses a CDP `Runtime.exceptionThrown` event into a [`PageError`].
///
/// The message is the first line of the exception object's description
/// (`TypeError: x is not a function`), falling back to the detail text
/// (`Uncaught`). The stack prefers the structured trace and falls back to
/// the full description, which embeds one for Error objects.
fn parse_exception_event(event: &EventExceptionThrown) -> PageError {
    let details = &event.exception_details;
    let description = details
        .exception
        .as_ref()
        .and_then(|exception| exception.description.as_deref());

    let message = description
        .map(|d| d.lines().next().unwrap_or(d).to_string())
        .unwrap_or_else(|| details.text.clone());

    let stack = details
        .stack_trace
        .as_ref()
        .map(format_stack_trace)
        .filter(|stack| !stack.is_empty())
        .or_else(|| description.map(str::to_string))
        .unwrap_or_else(|| message.clone());

    PageError::new(message, stack)
}

fn format_stack_trace(stack_trace: &StackTrace) -> String {
    stack_trace
        .call_frames
        .iter()
        .map(|frame| {
            let function = if frame.function_name.is_empty() {
                "<anonymous>"
            } else {
                frame.function_name.as_str()
            };
            format!(
                "    at {} ({}:{}:{})",
                function, frame.url, frame.line_number, frame.column_number
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
