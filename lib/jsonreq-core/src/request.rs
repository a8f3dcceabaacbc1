//! Wire-level HTTP requests handed to an [`HttpClient`](crate::HttpClient).
//!
//! Use [`Request::builder`] to assemble the method, URL, headers and body.
//! Headers are kept in insertion order and appended, so the same name may
//! appear more than once.
//!
//! # Example
//!
//! ```
//! use jsonreq_core::Request;
//!
//! let url = "https://api.example.com".parse().expect("valid URL");
//! let request = Request::builder(http::Method::GET, url)
//!     .header("Accept", "application/json")
//!     .build();
//! assert_eq!(request.header("accept"), Some("application/json"));
//! ```

use bytes::Bytes;

/// An HTTP request with method, URL, headers, and optional body.
#[derive(Debug, Clone)]
pub struct Request {
    method: http::Method,
    url: url::Url,
    headers: Vec<(String, String)>,
    body: Option<Bytes>,
}

impl Request {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: http::Method, url: url::Url) -> RequestBuilder {
        RequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> &http::Method {
        &self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Request headers, in the order they were added.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (http::Method, url::Url, Vec<(String, String)>, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: http::Method,
    url: url::Url,
    headers: Vec<(String, String)>,
    body: Option<Bytes>,
}

impl RequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Appends a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Appends multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    fn url(raw: &str) -> url::Url {
        url::Url::parse(raw).expect("valid URL")
    }

    #[test]
    fn request_builder_basic() {
        let request = Request::builder(http::Method::GET, url("https://api.example.com/posts"))
            .header("Accept", "application/json")
            .build();

        check!(request.method() == &http::Method::GET);
        check!(request.url().as_str() == "https://api.example.com/posts");
        check!(request.header("Accept") == Some("application/json"));
        check!(request.body().is_none());
    }

    #[test]
    fn request_builder_with_body() {
        let body = Bytes::from(r#"{"title":"Hello"}"#);
        let request = Request::builder(http::Method::POST, url("https://api.example.com/posts"))
            .body(body.clone())
            .build();

        check!(request.method() == &http::Method::POST);
        check!(request.body() == Some(&body));
    }

    #[test]
    fn headers_are_appended_not_replaced() {
        let request = Request::builder(http::Method::GET, url("https://api.example.com"))
            .header("Content-Type", "application/json")
            .headers([("content-type".to_string(), "text/plain".to_string())])
            .build();

        let values: Vec<_> = request
            .headers()
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .map(|(_, value)| value.as_str())
            .collect();
        check!(values == vec!["application/json", "text/plain"]);
        check!(request.header("CONTENT-TYPE") == Some("application/json"));
        check!(request.headers().len() == 2);
    }

    #[test]
    fn into_parts_keeps_everything() {
        let request = Request::builder(http::Method::DELETE, url("https://api.example.com/posts/1"))
            .header("UID", "1")
            .body(Bytes::from_static(b"{}"))
            .build();

        let (method, url, headers, body) = request.into_parts();
        check!(method == http::Method::DELETE);
        check!(url.path() == "/posts/1");
        check!(headers == vec![("UID".to_string(), "1".to_string())]);
        check!(body == Some(Bytes::from_static(b"{}")));
    }
}
