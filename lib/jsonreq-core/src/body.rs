//! JSON encoding of request bodies and decoding of responses.

use std::sync::Arc;

use bytes::Bytes;

use crate::{Error, Result};

/// MIME type sent as `Content-Type` on every request.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` to provide detailed error messages that include
/// the exact path to the field that failed to deserialize.
///
/// # Errors
///
/// Returns an error if JSON deserialization fails, with the error message
/// including the path to the problematic field (e.g., "user.address.city").
///
/// # Example
///
/// ```
/// use jsonreq_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Post { title: String }
///
/// let bytes = br#"{"title":"Hello"}"#;
/// let post: Post = from_json(bytes).expect("deserialize");
/// assert_eq!(post, Post { title: "Hello".to_string() });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| Error::json_deserialization(e.path().to_string(), e.inner().to_string()))
}

// ============================================================================
// Request Body
// ============================================================================

/// A request payload, encoded as JSON when it is set.
///
/// Encoding failures are kept inside the body and reported when the request
/// is executed, before any network activity.
#[derive(Debug, Clone)]
pub struct Body {
    encoded: std::result::Result<Bytes, Arc<serde_json::Error>>,
}

impl Body {
    /// Encode `value` as JSON.
    ///
    /// # Example
    ///
    /// ```
    /// use jsonreq_core::Body;
    ///
    /// let body = Body::json(&serde_json::json!({"title": "Hello"}));
    /// assert_eq!(body.bytes().expect("encoded").as_ref(), br#"{"title":"Hello"}"#);
    /// ```
    pub fn json<T: serde::Serialize + ?Sized>(value: &T) -> Self {
        Self {
            encoded: serde_json::to_vec(value).map(Bytes::from).map_err(Arc::new),
        }
    }

    /// Use pre-serialized bytes verbatim.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self {
            encoded: Ok(bytes.into()),
        }
    }

    /// The encoded payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::JsonSerialization`] if the value could not be encoded.
    pub fn bytes(&self) -> Result<Bytes> {
        self.encoded
            .clone()
            .map_err(Error::JsonSerialization)
    }
}

// ============================================================================
// Response Destination
// ============================================================================

/// A location a JSON response body is decoded into.
///
/// Implemented for every owned deserializable type, so any `&mut T` where
/// `T: DeserializeOwned` can be passed where a `&mut dyn Destination` is
/// expected. The value is replaced only when decoding succeeds.
pub trait Destination {
    /// Decode `body` and store the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::JsonDeserialization`] if the body is not valid JSON
    /// or does not match the destination's shape.
    fn decode_from(&mut self, body: &[u8]) -> Result<()>;
}

impl<T: serde::de::DeserializeOwned> Destination for T {
    fn decode_from(&mut self, body: &[u8]) -> Result<()> {
        *self = from_json(body)?;
        Ok(())
    }
}
