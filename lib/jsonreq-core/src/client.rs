//! HTTP transport trait.
//!
//! [`HttpClient`] is the seam between the request builder and the network.
//! The `jsonreq` crate ships a hyper-based implementation; tests and custom
//! transports implement it directly.

use std::future::Future;

use crate::{Request, Response, Result};

/// Core HTTP client trait.
///
/// Executes exactly one request and returns the fully buffered response.
/// Non-2xx statuses must be returned as `Ok` responses, not errors.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send;
}
