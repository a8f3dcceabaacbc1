//! Request/response logging middleware.
//!
//! Every round trip runs inside an `http_request` span carrying the method
//! and URL. Nothing is logged unless the application installs a `tracing`
//! subscriber.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use bytes::Bytes;
use tower::{Layer, Service};
use tracing::{Instrument, Level, debug, info, span, warn};

use crate::{Error, Request, Response, Result};

/// Header names whose values are never written to logs.
const REDACTED_HEADERS: [&str; 3] = ["authorization", "cookie", "proxy-authorization"];

/// Verbosity of [`LoggingLayer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Request headers and response size are logged at debug level.
    Debug,
    /// One line per request and per outcome.
    #[default]
    Info,
}

/// Layer that adds request/response logging.
///
/// # Example
///
/// ```ignore
/// use jsonreq::HyperClient;
/// use jsonreq::middleware::LoggingLayer;
///
/// let client = HyperClient::builder()
///     .layer(LoggingLayer::debug())
///     .build();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

impl LoggingLayer {
    /// Logging at info level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Logging at debug level, including (redacted) request headers.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }

    /// The configured verbosity.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Service produced by [`LoggingLayer`].
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    level: LogLevel,
}

/// Header pairs safe to log.
fn loggable_headers(headers: &[(String, String)]) -> Vec<(&str, &str)> {
    headers
        .iter()
        .map(|(name, value)| {
            let redacted = REDACTED_HEADERS
                .iter()
                .any(|sensitive| name.eq_ignore_ascii_case(sensitive));
            (name.as_str(), if redacted { "<redacted>" } else { value.as_str() })
        })
        .collect()
}

impl<S> Service<Request> for Logging<S>
where
    S: Service<Request, Response = Response, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let span = span!(
            Level::INFO,
            "http_request",
            method = %request.method(),
            url = %request.url()
        );
        let level = self.level;

        if level == LogLevel::Debug {
            let _entered = span.enter();
            debug!(
                headers = ?loggable_headers(request.headers()),
                body_len = request.body().map_or(0, Bytes::len),
                "sending request"
            );
        } else {
            span.in_scope(|| info!("sending request"));
        }

        let mut inner = self.inner.clone();
        Box::pin(
            async move {
                let start = Instant::now();
                let result = inner.call(request).await;
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                match &result {
                    Ok(response) if response.is_success() => {
                        info!(status = response.status(), elapsed_ms, "request completed");
                    }
                    // Still a successful round trip; only the log level differs
                    Ok(response) => {
                        warn!(status = response.status(), elapsed_ms, "request completed");
                    }
                    Err(err) => {
                        warn!(error = %err, kind = %err.kind(), elapsed_ms, "request failed");
                    }
                }

                if level == LogLevel::Debug {
                    if let Ok(response) = &result {
                        debug!(body_len = response.body().len(), "response body read");
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}
