//! The fluent request builder.
//!
//! A [`Caller`] accumulates a URL, method, headers, JSON body and an optional
//! destination, then performs exactly one blocking round trip per execution.
//! Mutators take `&mut self` and return `&mut Self`, so a caller can be
//! configured in one chain or step by step:
//!
//! ```ignore
//! use jsonreq::{Caller, url};
//!
//! let mut post = Post::default();
//! url!("https://jsonplaceholder.typicode.com/posts/{}", 1)
//!     .add_header("UID", "1")
//!     .patch(&serde_json::json!({"title": "Hello"}), Some(&mut post), None)?;
//! ```
//!
//! Any response that arrives is a success, whatever its status code; APIs
//! that report errors in their JSON body are inspected through the
//! destination.

use std::sync::LazyLock;

use tracing::debug;

use crate::{
    Body, Destination, Error, Headers, HttpClient, HyperClient, JSON_CONTENT_TYPE, Method,
    Request, Response, Result, runtime,
};

static SHARED_CLIENT: LazyLock<HyperClient> = LazyLock::new(HyperClient::new);

/// The transport used by [`Caller::new`] and the free functions.
///
/// Created with default [`ClientConfig`](crate::ClientConfig) on first use;
/// clones share one connection pool.
#[must_use]
pub fn shared_client() -> HyperClient {
    SHARED_CLIENT.clone()
}

/// Build a [`Caller`] for a formatted URL.
///
/// The arguments are passed to [`format!`] once; the URL is not validated
/// until the request is executed.
///
/// # Example
///
/// ```
/// assert_eq!(jsonreq::url!("https://api.example.com/posts?page={}", 2).url(),
///            "https://api.example.com/posts?page=2");
/// ```
#[macro_export]
macro_rules! url {
    ($($arg:tt)*) => {
        $crate::Caller::new(::std::format!($($arg)*))
    };
}

/// Mutable request builder bound to one URL.
///
/// `'d` is the lifetime of a destination bound with
/// [`set_destination`](Self::set_destination) for deferred execution.
pub struct Caller<'d, C = HyperClient> {
    url: String,
    method: Option<String>,
    body: Option<Body>,
    headers: Option<Headers>,
    destination: Option<&'d mut dyn Destination>,
    client: C,
}

impl<C: std::fmt::Debug> std::fmt::Debug for Caller<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Caller")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("body", &self.body)
            .field("headers", &self.headers)
            .field("has_destination", &self.destination.is_some())
            .field("client", &self.client)
            .finish()
    }
}

impl Caller<'_, HyperClient> {
    /// Create a caller using the [shared client](shared_client).
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, shared_client())
    }
}

impl<'d, C> Caller<'d, C> {
    /// Create a caller using a specific transport.
    #[must_use]
    pub fn with_client(url: impl Into<String>, client: C) -> Self {
        Self {
            url: url.into(),
            method: None,
            body: None,
            headers: None,
            destination: None,
            client,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The target URL, exactly as formatted at construction.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The method stored for [`execute`](Self::execute), if any.
    #[must_use]
    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    /// The configured header mapping; `None` when no headers are set.
    #[must_use]
    pub fn headers(&self) -> Option<&Headers> {
        self.headers.as_ref()
    }

    /// The stored request body.
    #[must_use]
    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// Whether a destination is bound for [`execute`](Self::execute).
    #[must_use]
    pub fn has_destination(&self) -> bool {
        self.destination.is_some()
    }

    /// The transport.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Set a header, overwriting any previous value for `key`.
    pub fn add_header(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers
            .get_or_insert_with(Headers::new)
            .insert(key.into(), value.into());
        self
    }

    /// Remove a header; removing a missing header is a no-op.
    pub fn del_header(&mut self, key: &str) -> &mut Self {
        if let Some(headers) = &mut self.headers {
            headers.remove(key);
        }
        self
    }

    /// Replace the whole header mapping.
    ///
    /// `None` or an empty mapping clears the headers.
    pub fn set_headers(&mut self, headers: Option<Headers>) -> &mut Self {
        self.headers = headers.filter(|headers| !headers.is_empty());
        self
    }

    /// Encode `value` as the JSON request body.
    ///
    /// An encoding failure is reported when the request is executed.
    pub fn set_body<T: serde::Serialize + ?Sized>(&mut self, value: &T) -> &mut Self {
        self.set_encoded_body(Body::json(value))
    }

    /// Use an already built [`Body`], e.g. [`Body::from_bytes`].
    pub fn set_encoded_body(&mut self, body: Body) -> &mut Self {
        self.body = Some(body);
        self
    }

    /// Set the method used by [`execute`](Self::execute).
    pub fn set_method(&mut self, method: impl AsRef<str>) -> &mut Self {
        self.method = Some(method.as_ref().to_owned());
        self
    }

    /// Bind the destination [`execute`](Self::execute) decodes into.
    pub fn set_destination(&mut self, destination: &'d mut dyn Destination) -> &mut Self {
        self.destination = Some(destination);
        self
    }

    // ========================================================================
    // Wire Request
    // ========================================================================

    /// Build the wire request for `method` from the current state.
    ///
    /// `Content-Type: application/json` comes first; configured headers are
    /// appended after it, so a caller-supplied `Content-Type` is sent too.
    /// Header names and values are validated here, ahead of any middleware.
    fn build_request(&self, method: &str) -> Result<Request> {
        let payload = self.body.as_ref().map(Body::bytes).transpose()?;
        let method = Method::parse(method)?;
        let url = url::Url::parse(&self.url)?;

        let mut builder = Request::builder(method, url)
            .header(http::header::CONTENT_TYPE.as_str(), JSON_CONTENT_TYPE);

        for (name, value) in self.headers.iter().flatten() {
            check_header(name, value)?;
            builder = builder.header(name.clone(), value.clone());
        }

        if let Some(payload) = payload {
            builder = builder.body(payload);
        }

        Ok(builder.build())
    }
}

fn check_header(name: &str, value: &str) -> Result<()> {
    http::HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| Error::invalid_request(format!("invalid header name: {name:?}")))?;
    http::HeaderValue::from_str(value)
        .map_err(|_| Error::invalid_request(format!("invalid value for header {name:?}")))?;
    Ok(())
}

impl<'d, C: HttpClient> Caller<'d, C> {
    // ========================================================================
    // Execution
    // ========================================================================

    /// `GET` without a body argument; a body set with
    /// [`set_body`](Self::set_body) is still sent.
    pub fn get(&mut self, dst: Option<&mut dyn Destination>, headers: Option<Headers>) -> Result<()> {
        self.call(Method::Get, None, dst, headers)
    }

    /// `POST` with `body` as JSON.
    pub fn post<B: serde::Serialize + ?Sized>(
        &mut self,
        body: &B,
        dst: Option<&mut dyn Destination>,
        headers: Option<Headers>,
    ) -> Result<()> {
        self.call(Method::Post, Some(Body::json(body)), dst, headers)
    }

    /// `PUT` with `body` as JSON.
    pub fn put<B: serde::Serialize + ?Sized>(
        &mut self,
        body: &B,
        dst: Option<&mut dyn Destination>,
        headers: Option<Headers>,
    ) -> Result<()> {
        self.call(Method::Put, Some(Body::json(body)), dst, headers)
    }

    /// `PATCH` with `body` as JSON.
    pub fn patch<B: serde::Serialize + ?Sized>(
        &mut self,
        body: &B,
        dst: Option<&mut dyn Destination>,
        headers: Option<Headers>,
    ) -> Result<()> {
        self.call(Method::Patch, Some(Body::json(body)), dst, headers)
    }

    /// `DELETE` without a body argument; a body set with
    /// [`set_body`](Self::set_body) is still sent.
    pub fn delete(
        &mut self,
        dst: Option<&mut dyn Destination>,
        headers: Option<Headers>,
    ) -> Result<()> {
        self.call(Method::Delete, None, dst, headers)
    }

    /// Perform one round trip with `method`.
    ///
    /// A `Some` body replaces the stored body and a `Some` header mapping
    /// replaces the stored headers; both replacements persist in the caller.
    /// With a destination the response body is decoded into it, otherwise it
    /// is discarded. The response status is not inspected.
    ///
    /// # Errors
    ///
    /// Fails with a serialization, request construction, transport or
    /// decoding [`Error`](crate::Error), whichever step fails first. Only a
    /// decoding failure happens after the network call.
    pub fn call(
        &mut self,
        method: impl AsRef<str>,
        body: Option<Body>,
        dst: Option<&mut dyn Destination>,
        headers: Option<Headers>,
    ) -> Result<()> {
        if let Some(body) = body {
            self.body = Some(body);
        }
        if let Some(headers) = headers {
            self.set_headers(Some(headers));
        }

        let response = self.round_trip(method.as_ref())?;
        decode_into(dst, &response)
    }

    /// Perform one round trip from the stored state only.
    ///
    /// Uses the stored method (`GET` when unset), body, headers and bound
    /// destination.
    ///
    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub fn execute(&mut self) -> Result<()> {
        let method = self
            .method
            .clone()
            .unwrap_or_else(|| Method::Get.as_str().to_owned());

        let response = self.round_trip(&method)?;
        decode_into(self.destination.as_deref_mut(), &response)
    }

    /// Send the request and wait for the fully read response.
    fn round_trip(&self, method: &str) -> Result<Response> {
        let request = self.build_request(method)?;
        debug!(method = %request.method(), url = %request.url(), "sending request");

        let response = runtime::block_on(self.client.execute(request))??;
        debug!(status = response.status(), "response received");

        Ok(response)
    }
}

fn decode_into(dst: Option<&mut (dyn Destination + '_)>, response: &Response) -> Result<()> {
    match dst {
        Some(dst) => response.decode_into(dst),
        None => {
            debug!(body_len = response.body().len(), "no destination, response body discarded");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use assert2::{check, let_assert};
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Default, Clone, PartialEq, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Post {
        user_id: u32,
        id: u32,
        title: String,
    }

    /// Records every request and answers with a canned outcome.
    #[derive(Clone)]
    struct MockClient {
        sent: Arc<Mutex<Vec<Request>>>,
        status: u16,
        body: &'static str,
        fail_with_timeout: bool,
    }

    impl MockClient {
        fn replying(status: u16, body: &'static str) -> Self {
            Self {
                sent: Arc::default(),
                status,
                body,
                fail_with_timeout: false,
            }
        }

        fn timing_out() -> Self {
            Self {
                fail_with_timeout: true,
                ..Self::replying(200, "")
            }
        }

        fn sent(&self) -> Vec<Request> {
            self.sent.lock().expect("lock").clone()
        }
    }

    impl HttpClient for MockClient {
        async fn execute(&self, request: Request) -> Result<Response> {
            self.sent.lock().expect("lock").push(request);
            if self.fail_with_timeout {
                return Err(Error::Timeout);
            }
            Ok(Response::new(self.status, self.body))
        }
    }

    fn headers(pairs: &[(&str, &str)]) -> Headers {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    const POST_JSON: &str = r#"{"userId":1,"id":101,"title":"Hello"}"#;

    #[test]
    fn url_macro_formats_once() {
        let caller = crate::url!("a={}", 1);
        check!(caller.url() == "a=1");

        let caller = crate::url!("{}%d", "literal");
        check!(caller.url() == "literal%d");
    }

    #[test]
    fn header_management() {
        let mut caller = Caller::with_client("http://localhost", MockClient::replying(200, ""));
        caller.add_header("a", "1").add_header("b", "2").del_header("b");

        let_assert!(Some(current) = caller.headers());
        check!(current.get("a").map(String::as_str) == Some("1"));
        check!(current.get("b").is_none());

        caller.add_header("a", "overwritten");
        let current = caller.headers().and_then(|h| h.get("a"));
        check!(current.map(String::as_str) == Some("overwritten"));

        caller.set_headers(None);
        check!(caller.headers().is_none());
        // Deleting from an absent mapping is a no-op
        caller.del_header("a");
        check!(caller.headers().is_none());
    }

    #[test]
    fn set_headers_with_empty_mapping_clears() {
        let mut caller = Caller::with_client("http://localhost", MockClient::replying(200, ""));
        caller.add_header("a", "1").set_headers(Some(Headers::new()));
        check!(caller.headers().is_none());
    }

    #[test]
    fn get_decodes_json_array() {
        let client = MockClient::replying(200, r#"[{"userId":1,"id":1,"title":"first"}]"#);
        let mut posts: Vec<Post> = Vec::new();

        let mut caller = Caller::with_client("http://localhost/posts", client.clone());
        let_assert!(Ok(()) = caller.get(Some(&mut posts), None));

        check!(posts.len() == 1);
        check!(posts[0].title == "first");

        let sent = client.sent();
        check!(sent.len() == 1);
        check!(*sent[0].method() == http::Method::GET);
        check!(sent[0].body().is_none());
        check!(sent[0].header("Content-Type") == Some("application/json"));
    }

    #[test]
    fn post_sends_json_body_and_headers() {
        let client = MockClient::replying(201, POST_JSON);
        let mut post = Post::default();

        let mut caller = Caller::with_client("http://localhost/posts", client.clone());
        let_assert!(
            Ok(()) = caller.post(
                &serde_json::json!({"title": "Hello"}),
                Some(&mut post),
                Some(headers(&[("UID", "1")])),
            )
        );

        check!(post.title == "Hello");
        check!(post.id == 101);

        let sent = client.sent();
        let_assert!(Some(body) = sent[0].body());
        check!(body.as_ref() == br#"{"title":"Hello"}"#);
        check!(sent[0].header("UID") == Some("1"));
        // Overrides persist in the caller
        check!(caller.headers() == Some(&headers(&[("UID", "1")])));
        check!(caller.body().is_some());
    }

    #[test]
    fn content_type_is_forced_first_and_caller_value_appended() {
        let client = MockClient::replying(200, "");
        let mut caller = Caller::with_client("http://localhost", client.clone());
        caller.add_header("Content-Type", "text/plain");

        let_assert!(Ok(()) = caller.get(None, None));

        let sent = client.sent();
        let_assert!(Some(request) = sent.first());
        check!(
            request.headers()
                == [
                    ("Content-Type".to_string(), "application/json".to_string()),
                    ("Content-Type".to_string(), "text/plain".to_string()),
                ]
        );
    }

    #[test]
    fn per_call_headers_replace_stored_mapping() {
        let client = MockClient::replying(200, "");
        let mut caller = Caller::with_client("http://localhost", client.clone());
        caller.add_header("X-Old", "1");

        let_assert!(Ok(()) = caller.get(None, Some(headers(&[("X-New", "2")]))));

        let sent = client.sent();
        check!(sent[0].header("X-Old").is_none());
        check!(sent[0].header("X-New") == Some("2"));
        check!(caller.headers() == Some(&headers(&[("X-New", "2")])));
    }

    #[test]
    fn delete_sends_preset_body() {
        let client = MockClient::replying(200, "{}");
        let mut caller = Caller::with_client("http://localhost/posts/1", client.clone());
        caller.set_body(&serde_json::json!({"title": "Hello"}));

        let mut ret: HashMap<String, String> = HashMap::new();
        let_assert!(Ok(()) = caller.delete(Some(&mut ret), None));

        let sent = client.sent();
        check!(*sent[0].method() == http::Method::DELETE);
        check!(sent[0].body().map(|b| b.to_vec()) == Some(br#"{"title":"Hello"}"#.to_vec()));
        check!(ret.is_empty());
    }

    #[test]
    fn body_argument_overrides_preset_body() {
        let client = MockClient::replying(200, "");
        let mut caller = Caller::with_client("http://localhost", client.clone());
        caller.set_body(&"preset");

        let_assert!(Ok(()) = caller.put(&"override", None, None));

        let sent = client.sent();
        check!(sent[0].body().map(|b| b.to_vec()) == Some(br#""override""#.to_vec()));
    }

    #[test]
    fn non_success_status_is_not_an_error() {
        let client = MockClient::replying(404, r#"{"userId":0,"id":0,"title":"missing"}"#);
        let mut post = Post::default();

        let mut caller = Caller::with_client("http://localhost/posts/999", client);
        let_assert!(Ok(()) = caller.get(Some(&mut post), None));
        check!(post.title == "missing");
    }

    #[test]
    fn missing_destination_skips_decoding() {
        let client = MockClient::replying(500, "<html>definitely not json</html>");
        let mut caller = Caller::with_client("http://localhost", client);
        let_assert!(Ok(()) = caller.call("GET", None, None, None));
    }

    #[test]
    fn decode_failure_leaves_destination_untouched() {
        let client = MockClient::replying(200, r#"{"userId":"one"}"#);
        let mut post = Post {
            title: "before".to_string(),
            ..Post::default()
        };

        let mut caller = Caller::with_client("http://localhost", client);
        let_assert!(Err(err) = caller.get(Some(&mut post), None));

        check!(err.is_decoding());
        let_assert!(Error::JsonDeserialization { path, .. } = err);
        check!(path == "userId");
        check!(post.title == "before");
    }

    #[test]
    fn blank_method_fails_before_network() {
        let client = MockClient::replying(200, POST_JSON);
        let mut post = Post::default();

        let mut caller = Caller::with_client(
            "https://54d483ff-bb2b-a4f7-26e4-6b8b11c09ed1.com/api/abc",
            client.clone(),
        );
        let_assert!(Err(err) = caller.call(" ", None, Some(&mut post), None));

        check!(err.is_request_construction());
        check!(post == Post::default());
        check!(client.sent().is_empty());
    }

    #[test]
    fn malformed_url_fails_before_network() {
        let client = MockClient::replying(200, "");
        let mut caller = Caller::with_client("not a url", client.clone());

        let_assert!(Err(Error::InvalidUrl(_)) = caller.get(None, None));
        check!(client.sent().is_empty());
    }

    #[test]
    fn invalid_headers_never_reach_the_transport() {
        let client = MockClient::replying(200, "");
        let mut caller = Caller::with_client("http://localhost", client.clone());

        caller.add_header("bad header", "1");
        let_assert!(Err(err) = caller.get(None, None));
        check!(err.is_request_construction());
        check!(err.to_string().contains("bad header"));

        caller.set_headers(None).add_header("X-Trace", "line\nbreak");
        let_assert!(Err(err) = caller.get(None, None));
        check!(err.is_request_construction());

        check!(client.sent().is_empty());
    }

    #[test]
    fn serialization_failure_fails_before_network() {
        let client = MockClient::replying(200, "");
        let mut unencodable = HashMap::new();
        unencodable.insert((1, 2), "tuple keys");

        let mut caller = Caller::with_client("http://localhost", client.clone());
        let_assert!(Err(err) = caller.post(&unencodable, None, None));

        check!(err.is_serialization());
        check!(client.sent().is_empty());
        // The failing body stays in place, so a retry fails the same way
        check!(caller.get(None, None).is_err_and(|e| e.is_serialization()));
    }

    #[test]
    fn transport_errors_propagate() {
        let client = MockClient::timing_out();
        let mut caller = Caller::with_client("http://localhost", client.clone());

        let_assert!(Err(err) = caller.get(None, None));
        check!(err.is_timeout());
        check!(client.sent().len() == 1);
    }

    #[test]
    fn execute_replays_stored_state() {
        let client = MockClient::replying(200, POST_JSON);
        let mut post = Post::default();

        {
            let mut caller = Caller::with_client("http://localhost/posts", client.clone());
            caller
                .set_method(Method::Post)
                .set_body(&serde_json::json!({"title": "Hello"}))
                .add_header("UID", "1")
                .set_destination(&mut post);
            check!(caller.has_destination());

            let_assert!(Ok(()) = caller.execute());
            // Re-invoking is allowed and sends the same request again
            let_assert!(Ok(()) = caller.execute());
        }

        check!(post.title == "Hello");

        let sent = client.sent();
        check!(sent.len() == 2);
        check!(*sent[1].method() == http::Method::POST);
        check!(sent[1].header("UID") == Some("1"));
    }

    #[test]
    fn execute_defaults_to_get() {
        let client = MockClient::replying(200, "ignored");
        let mut caller = Caller::with_client("http://localhost", client.clone());

        check!(caller.method().is_none());
        let_assert!(Ok(()) = caller.execute());
        check!(*client.sent()[0].method() == http::Method::GET);
    }

    #[test]
    fn custom_method_tokens_are_sent_verbatim() {
        let client = MockClient::replying(200, "");
        let mut caller = Caller::with_client("http://localhost", client.clone());

        let_assert!(Ok(()) = caller.call("PURGE", None, None, None));
        check!(client.sent()[0].method().as_str() == "PURGE");
    }
}
