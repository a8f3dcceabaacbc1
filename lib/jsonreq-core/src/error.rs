//! Error types for jsonreq.

use std::sync::Arc;

use derive_more::{Display, Error, From};

// ============================================================================
// Error Kind
// ============================================================================

/// Broad category of an [`Error`].
///
/// Every error falls into exactly one category, matching the step of the
/// round trip that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// The request body could not be encoded to JSON.
    #[display("serialization")]
    Serialization,
    /// The method, URL or a header could not form a valid request.
    #[display("request construction")]
    RequestConstruction,
    /// The network round trip failed (DNS, connect, TLS, timeout).
    #[display("transport")]
    Transport,
    /// The response body could not be decoded into the destination.
    #[display("decoding")]
    Decoding,
}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for jsonreq operations.
///
/// Non-2xx HTTP statuses are never reported as errors: a response that
/// arrives is a successful round trip whatever its status.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from(skip)]
    JsonSerialization(Arc<serde_json::Error>),

    /// The HTTP method is not a valid token.
    #[display("invalid method: {_0:?}")]
    #[from(skip)]
    InvalidMethod(#[error(not(source))] String),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonSerialization(Arc::new(err))
    }
}

impl Error {
    /// Create an invalid method error.
    #[must_use]
    pub fn invalid_method(method: impl Into<String>) -> Self {
        Self::InvalidMethod(method.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// The category this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::JsonSerialization(_) => ErrorKind::Serialization,
            Self::InvalidMethod(_) | Self::InvalidUrl(_) | Self::InvalidRequest(_) => {
                ErrorKind::RequestConstruction
            }
            Self::Connection(_) | Self::Tls(_) | Self::Timeout => ErrorKind::Transport,
            Self::JsonDeserialization { .. } => ErrorKind::Decoding,
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if the request body could not be encoded.
    #[must_use]
    pub const fn is_serialization(&self) -> bool {
        matches!(self.kind(), ErrorKind::Serialization)
    }

    /// Returns `true` if the request could not be built.
    #[must_use]
    pub const fn is_request_construction(&self) -> bool {
        matches!(self.kind(), ErrorKind::RequestConstruction)
    }

    /// Returns `true` if the network round trip failed.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self.kind(), ErrorKind::Transport)
    }

    /// Returns `true` if the response could not be decoded.
    #[must_use]
    pub const fn is_decoding(&self) -> bool {
        matches!(self.kind(), ErrorKind::Decoding)
    }
}
