//! Core types and traits for the jsonreq request builder.
//!
//! This crate provides the transport-agnostic building blocks:
//! - [`Error`], [`ErrorKind`] and [`Result`] - Error handling
//! - [`Method`] - HTTP method enum and token validation
//! - [`Request`] and [`RequestBuilder`] - Wire-level HTTP requests
//! - [`Response`] - Buffered HTTP response
//! - [`HttpClient`] - Transport trait
//! - [`Body`] and [`Destination`] - JSON request payloads and decode targets
//! - [`Headers`] - Header mapping configured on a request builder

use std::collections::HashMap;

mod body;
mod client;
mod error;
mod method;
pub mod prelude;
mod request;
mod response;

pub use body::{Body, Destination, JSON_CONTENT_TYPE, from_json};
pub use client::HttpClient;
pub use error::{Error, ErrorKind, Result};
pub use method::Method;
pub use request::{Request, RequestBuilder};
pub use response::Response;

/// Header mapping from name to value; keys are unique, last write wins.
pub type Headers = HashMap<String, String>;
