//! One-shot request functions.
//!
//! The plain functions build a [`Caller`] on the shared client and execute it
//! immediately. The `new_*` functions return the configured caller instead,
//! with the destination bound, for a later [`Caller::execute`].
//!
//! # Example
//!
//! ```ignore
//! #[derive(Debug, Default, Deserialize)]
//! struct Post {
//!     #[serde(rename = "userId")]
//!     user_id: u32,
//!     id: u32,
//!     title: String,
//!     body: String,
//! }
//!
//! let mut posts: Vec<Post> = Vec::new();
//! jsonreq::get("https://jsonplaceholder.typicode.com/posts", Some(&mut posts), None)?;
//!
//! let mut created = Post::default();
//! let mut caller = jsonreq::new_post(
//!     "https://jsonplaceholder.typicode.com/posts",
//!     &serde_json::json!({"title": "Hello"}),
//!     Some(&mut created),
//!     None,
//! );
//! caller.execute()?;
//! ```

use crate::{Body, Caller, Destination, Headers, Method, Result};

/// `GET url`, decoding the response into `dst`.
pub fn get(
    url: impl Into<String>,
    dst: Option<&mut dyn Destination>,
    headers: Option<Headers>,
) -> Result<()> {
    Caller::new(url).get(dst, headers)
}

/// `POST url` with `body` as JSON.
pub fn post<B: serde::Serialize + ?Sized>(
    url: impl Into<String>,
    body: &B,
    dst: Option<&mut dyn Destination>,
    headers: Option<Headers>,
) -> Result<()> {
    Caller::new(url).post(body, dst, headers)
}

/// `PUT url` with `body` as JSON.
pub fn put<B: serde::Serialize + ?Sized>(
    url: impl Into<String>,
    body: &B,
    dst: Option<&mut dyn Destination>,
    headers: Option<Headers>,
) -> Result<()> {
    Caller::new(url).put(body, dst, headers)
}

/// `PATCH url` with `body` as JSON.
pub fn patch<B: serde::Serialize + ?Sized>(
    url: impl Into<String>,
    body: &B,
    dst: Option<&mut dyn Destination>,
    headers: Option<Headers>,
) -> Result<()> {
    Caller::new(url).patch(body, dst, headers)
}

/// `DELETE url` without a body.
pub fn delete(
    url: impl Into<String>,
    dst: Option<&mut dyn Destination>,
    headers: Option<Headers>,
) -> Result<()> {
    Caller::new(url).delete(dst, headers)
}

/// `DELETE url` with `body` as JSON.
pub fn delete_with_body<B: serde::Serialize + ?Sized>(
    url: impl Into<String>,
    body: &B,
    dst: Option<&mut dyn Destination>,
    headers: Option<Headers>,
) -> Result<()> {
    Caller::new(url).set_body(body).delete(dst, headers)
}

/// Any method, with an optional pre-encoded body.
pub fn call(
    method: impl AsRef<str>,
    url: impl Into<String>,
    body: Option<Body>,
    dst: Option<&mut dyn Destination>,
    headers: Option<Headers>,
) -> Result<()> {
    Caller::new(url).call(method, body, dst, headers)
}

// ============================================================================
// Deferred constructors
// ============================================================================

/// A caller for `GET url`, executed later with [`Caller::execute`].
#[must_use]
pub fn new_get<'d>(
    url: impl Into<String>,
    dst: Option<&'d mut dyn Destination>,
    headers: Option<Headers>,
) -> Caller<'d> {
    new_call(Method::Get, url, None, dst, headers)
}

/// A caller for `POST url` with `body` as JSON.
#[must_use]
pub fn new_post<'d, B: serde::Serialize + ?Sized>(
    url: impl Into<String>,
    body: &B,
    dst: Option<&'d mut dyn Destination>,
    headers: Option<Headers>,
) -> Caller<'d> {
    new_call(Method::Post, url, Some(Body::json(body)), dst, headers)
}

/// A caller for `PUT url` with `body` as JSON.
#[must_use]
pub fn new_put<'d, B: serde::Serialize + ?Sized>(
    url: impl Into<String>,
    body: &B,
    dst: Option<&'d mut dyn Destination>,
    headers: Option<Headers>,
) -> Caller<'d> {
    new_call(Method::Put, url, Some(Body::json(body)), dst, headers)
}

/// A caller for `PATCH url` with `body` as JSON.
#[must_use]
pub fn new_patch<'d, B: serde::Serialize + ?Sized>(
    url: impl Into<String>,
    body: &B,
    dst: Option<&'d mut dyn Destination>,
    headers: Option<Headers>,
) -> Caller<'d> {
    new_call(Method::Patch, url, Some(Body::json(body)), dst, headers)
}

/// A caller for `DELETE url` without a body.
#[must_use]
pub fn new_delete<'d>(
    url: impl Into<String>,
    dst: Option<&'d mut dyn Destination>,
    headers: Option<Headers>,
) -> Caller<'d> {
    new_call(Method::Delete, url, None, dst, headers)
}

/// A caller for `DELETE url` with `body` as JSON.
#[must_use]
pub fn new_delete_with_body<'d, B: serde::Serialize + ?Sized>(
    url: impl Into<String>,
    body: &B,
    dst: Option<&'d mut dyn Destination>,
    headers: Option<Headers>,
) -> Caller<'d> {
    new_call(Method::Delete, url, Some(Body::json(body)), dst, headers)
}

/// A fully configured caller for any method; nothing is sent until
/// [`Caller::execute`].
#[must_use]
pub fn new_call<'d>(
    method: impl AsRef<str>,
    url: impl Into<String>,
    body: Option<Body>,
    dst: Option<&'d mut dyn Destination>,
    headers: Option<Headers>,
) -> Caller<'d> {
    let mut caller = Caller::new(url);
    caller.set_method(method).set_headers(headers);
    if let Some(body) = body {
        caller.set_encoded_body(body);
    }
    if let Some(dst) = dst {
        caller.set_destination(dst);
    }
    caller
}
