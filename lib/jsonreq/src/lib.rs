//! Fluent blocking HTTP client for JSON APIs.
//!
//! Build a [`Caller`] for a URL, attach headers and a JSON body, then run one
//! request per call. Responses are decoded into any `serde` deserializable
//! value passed as the destination.
//!
//! # Example
//!
//! ```ignore
//! use jsonreq::prelude::*;
//!
//! #[derive(Debug, Default, Deserialize)]
//! pub struct Post {
//!     #[serde(rename = "userId")]
//!     user_id: u32,
//!     id: u32,
//!     title: String,
//! }
//!
//! let mut posts: Vec<Post> = Vec::new();
//! url!("https://jsonplaceholder.typicode.com/posts")
//!     .add_header("UID", "1")
//!     .get(Some(&mut posts), None)?;
//! ```
//!
//! All operations block the calling thread. The requests themselves run on a
//! small background runtime, so they can be issued from plain threads as well
//! as from inside tokio tasks.

mod api;
mod caller;
mod client;
mod config;
mod connector;
pub mod middleware;
pub mod prelude;
mod runtime;

pub use api::{
    call, delete, delete_with_body, get, new_call, new_delete, new_delete_with_body, new_get,
    new_patch, new_post, new_put, patch, post, put,
};
pub use caller::{Caller, shared_client};
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, DEFAULT_USER_AGENT};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use jsonreq_core::{
    Body, Destination, Error, ErrorKind, Headers, HttpClient, JSON_CONTENT_TYPE, Method, Request,
    RequestBuilder, Response, Result, from_json,
};
