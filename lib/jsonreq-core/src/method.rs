//! HTTP method types.

use derive_more::Display;

use crate::{Error, Result};

/// HTTP request method.
///
/// Any API taking a method accepts `impl AsRef<str>`, so custom verbs can be
/// passed as plain strings; this enum covers the common ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Method {
    /// GET method - retrieve a resource.
    #[display("GET")]
    Get,
    /// POST method - create a resource.
    #[display("POST")]
    Post,
    /// PUT method - replace a resource.
    #[display("PUT")]
    Put,
    /// DELETE method - remove a resource.
    #[display("DELETE")]
    Delete,
    /// PATCH method - partially update a resource.
    #[display("PATCH")]
    Patch,
}

impl Method {
    /// The method token as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        }
    }

    /// Parse a method token, accepting extension methods.
    ///
    /// Tokens are case-sensitive and must be non-empty RFC 9110 tokens, so
    /// `" "` or `""` are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMethod`] if `method` is not a valid token.
    ///
    /// # Example
    ///
    /// ```
    /// use jsonreq_core::Method;
    ///
    /// assert_eq!(Method::parse("PURGE").expect("token").as_str(), "PURGE");
    /// assert!(Method::parse(" ").is_err());
    /// ```
    pub fn parse(method: &str) -> Result<http::Method> {
        http::Method::from_bytes(method.as_bytes()).map_err(|_| Error::invalid_method(method))
    }
}

impl AsRef<str> for Method {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
