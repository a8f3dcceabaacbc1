//! Tower middleware layers for the jsonreq transport.
//!
//! Layers wrap the type-erased service inside [`HyperClient`](crate::HyperClient)
//! and see every wire-level [`Request`](crate::Request) the request builder
//! sends. Add them with [`HyperClientBuilder::layer`](crate::HyperClientBuilder::layer)
//! or the helper methods.
//!
//! # Available Layers
//!
//! - [`LoggingLayer`] - Logs requests/responses using `tracing`
//!
//! # Example
//!
//! ```ignore
//! use jsonreq::{Caller, HyperClient};
//!
//! let client = HyperClient::builder().with_logging().build();
//! let mut caller = Caller::with_client("https://jsonplaceholder.typicode.com/posts/1", client);
//! caller.delete(None, None)?;
//! ```

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for custom layers
pub use tower::Layer;
