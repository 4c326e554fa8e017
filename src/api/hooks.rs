//
//  artifactory-client
//  api/hooks.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Request observation hooks.
//!
//! The [`Client`](super::Client) reports every request it sends and every
//! response it receives to a [`RequestObserver`] supplied at construction. The
//! library never installs a subscriber or sets a log level itself; the default
//! [`TracingObserver`] only emits `tracing` events, and the application decides
//! where (and whether) they go.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use artifactory_client::api::{Client, NoopObserver};
//!
//! let client = Client::builder("https://repo.example.com/artifactory")
//!     .observer(Arc::new(NoopObserver))
//!     .build()?;
//! # Ok::<(), artifactory_client::api::ApiError>(())
//! ```

use std::fmt;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use url::Url;

/// A request about to be sent.
#[derive(Debug, Clone, Copy)]
pub struct RequestEvent<'a> {
    /// The HTTP method.
    pub method: &'a Method,
    /// The fully resolved URL.
    pub url: &'a Url,
    /// Length of the body, when it is held in memory.
    pub body_len: Option<usize>,
}

/// A response (or transport failure) for a previously reported request.
#[derive(Debug, Clone, Copy)]
pub struct ResponseEvent<'a> {
    /// The HTTP method of the request.
    pub method: &'a Method,
    /// The fully resolved URL of the request.
    pub url: &'a Url,
    /// The response status, or `None` when the request failed in transport.
    pub status: Option<StatusCode>,
    /// Time from send until response headers arrived (or the failure).
    pub elapsed: Duration,
}

/// Direction of a content transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDirection {
    /// Content deployed to the server.
    Upload,
    /// Content streamed from the server into a sink.
    Download,
}

/// A completed artifact upload or download.
#[derive(Debug, Clone, Copy)]
pub struct TransferEvent<'a> {
    /// Upload or download.
    pub direction: TransferDirection,
    /// URL of the transferred item.
    pub url: &'a Url,
    /// Number of content bytes moved.
    pub bytes: u64,
}

/// Receives request and response notifications from a client.
///
/// Implementations must be cheap and must not block: they run inline on the
/// task that performs the request.
pub trait RequestObserver: Send + Sync + fmt::Debug {
    /// Called right before a request is sent.
    fn on_request(&self, _event: &RequestEvent<'_>) {}

    /// Called when response headers arrived or the request failed.
    fn on_response(&self, _event: &ResponseEvent<'_>) {}

    /// Called after an artifact body was fully uploaded or downloaded.
    fn on_transfer(&self, _event: &TransferEvent<'_>) {}
}

/// Emits structured `tracing` events for each request.
///
/// Successful exchanges are logged at `DEBUG`, non-success statuses and
/// transport failures at `WARN`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RequestObserver for TracingObserver {
    fn on_request(&self, event: &RequestEvent<'_>) {
        tracing::debug!(
            method = %event.method,
            url = %event.url,
            body_len = event.body_len,
            "sending artifactory request"
        );
    }

    fn on_response(&self, event: &ResponseEvent<'_>) {
        let elapsed_ms = event.elapsed.as_millis() as u64;
        match event.status {
            Some(status) if status.is_success() => tracing::debug!(
                method = %event.method,
                url = %event.url,
                status = status.as_u16(),
                elapsed_ms,
                "artifactory request completed"
            ),
            Some(status) => tracing::warn!(
                method = %event.method,
                url = %event.url,
                status = status.as_u16(),
                elapsed_ms,
                "artifactory request failed"
            ),
            None => tracing::warn!(
                method = %event.method,
                url = %event.url,
                elapsed_ms,
                "artifactory request did not complete"
            ),
        }
    }

    fn on_transfer(&self, event: &TransferEvent<'_>) {
        let direction = match event.direction {
            TransferDirection::Upload => "upload",
            TransferDirection::Download => "download",
        };
        tracing::debug!(
            direction,
            url = %event.url,
            bytes = event.bytes,
            "artifactory transfer complete"
        );
    }
}

/// Discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RequestObserver for NoopObserver {}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Records every event as a `"METHOD url status"` line.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingObserver {
        pub(crate) lines: Mutex<Vec<String>>,
    }

    impl RequestObserver for RecordingObserver {
        fn on_request(&self, event: &RequestEvent<'_>) {
            self.lines
                .lock()
                .unwrap()
                .push(format!("-> {} {}", event.method, event.url));
        }

        fn on_response(&self, event: &ResponseEvent<'_>) {
            let status = event
                .status
                .map(|s| s.as_u16().to_string())
                .unwrap_or_else(|| "none".to_string());
            self.lines
                .lock()
                .unwrap()
                .push(format!("<- {} {} {}", event.method, event.url, status));
        }

        fn on_transfer(&self, event: &TransferEvent<'_>) {
            self.lines.lock().unwrap().push(format!(
                "== {:?} {} {}",
                event.direction, event.url, event.bytes
            ));
        }
    }

    /// In-memory writer for a `tracing_subscriber::fmt` subscriber.
    #[derive(Clone, Default)]
    pub(crate) struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }

        pub(crate) fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
            let writer = self.clone();
            tracing_subscriber::fmt()
                .with_env_filter("artifactory_client=trace")
                .with_ansi(false)
                .with_writer(move || writer.clone())
                .finish()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn ping_url() -> Url {
        Url::parse("http://localhost/artifactory/api/system/ping").unwrap()
    }

    #[test]
    fn test_tracing_observer_success_is_debug() {
        let logs = CapturedLogs::default();
        let url = ping_url();

        tracing::subscriber::with_default(logs.subscriber(), || {
            TracingObserver.on_request(&RequestEvent {
                method: &Method::GET,
                url: &url,
                body_len: Some(0),
            });
            TracingObserver.on_response(&ResponseEvent {
                method: &Method::GET,
                url: &url,
                status: Some(StatusCode::OK),
                elapsed: Duration::from_millis(3),
            });
        });

        let output = logs.contents();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2, "{}", output);
        assert!(lines[0].contains("DEBUG"));
        assert!(lines[0].contains("sending artifactory request"));
        assert!(lines[0].contains("method=GET"));
        assert!(lines[0].contains("body_len=0"));
        assert!(lines[1].contains("DEBUG"));
        assert!(lines[1].contains("status=200"));
        assert!(lines[1].contains("elapsed_ms=3"));
        assert!(lines[1].contains("url=http://localhost/artifactory/api/system/ping"));
    }

    #[test]
    fn test_tracing_observer_failures_are_warn() {
        let logs = CapturedLogs::default();
        let url = ping_url();

        tracing::subscriber::with_default(logs.subscriber(), || {
            TracingObserver.on_response(&ResponseEvent {
                method: &Method::POST,
                url: &url,
                status: Some(StatusCode::NOT_FOUND),
                elapsed: Duration::from_millis(7),
            });
            TracingObserver.on_response(&ResponseEvent {
                method: &Method::POST,
                url: &url,
                status: None,
                elapsed: Duration::from_millis(12),
            });
        });

        let output = logs.contents();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2, "{}", output);
        assert!(lines[0].contains("WARN"));
        assert!(lines[0].contains("artifactory request failed"));
        assert!(lines[0].contains("status=404"));
        assert!(lines[1].contains("WARN"));
        assert!(lines[1].contains("artifactory request did not complete"));
        assert!(lines[1].contains("elapsed_ms=12"));
        assert!(!lines[1].contains("status="));
    }

    #[test]
    fn test_tracing_observer_transfer() {
        let logs = CapturedLogs::default();
        let url = Url::parse("http://localhost/artifactory/libs/a.txt").unwrap();

        tracing::subscriber::with_default(logs.subscriber(), || {
            TracingObserver.on_transfer(&TransferEvent {
                direction: TransferDirection::Download,
                url: &url,
                bytes: 42,
            });
        });

        let output = logs.contents();
        assert!(output.contains("DEBUG"));
        assert!(output.contains("direction=") && output.contains("download"));
        assert!(output.contains("bytes=42"));
    }

    #[test]
    fn test_noop_observer_emits_nothing() {
        let logs = CapturedLogs::default();
        let url = ping_url();

        tracing::subscriber::with_default(logs.subscriber(), || {
            NoopObserver.on_request(&RequestEvent {
                method: &Method::GET,
                url: &url,
                body_len: None,
            });
            NoopObserver.on_response(&ResponseEvent {
                method: &Method::GET,
                url: &url,
                status: Some(StatusCode::INTERNAL_SERVER_ERROR),
                elapsed: Duration::from_millis(1),
            });
        });

        assert_eq!(logs.contents(), "");
    }
}
