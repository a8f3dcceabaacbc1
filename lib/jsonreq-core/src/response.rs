//! Buffered HTTP responses.
//!
//! The transport reads the whole body and releases the connection before a
//! [`Response`] is handed over, so decoding never touches the network.

use bytes::Bytes;

use crate::{Destination, Result};

/// Status code and fully read body of one round trip.
///
/// Response headers are not kept: nothing downstream of the transport reads
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    body: Bytes,
}

impl Response {
    /// A response with `status` and `body`.
    #[must_use]
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Status is 2xx. Informational only; other statuses are not errors.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, 200..=299)
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Decode the body as JSON into `dst`, whatever the status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::JsonDeserialization`](crate::Error::JsonDeserialization)
    /// if the body does not fit `dst`; `dst` is then left unchanged.
    pub fn decode_into(&self, dst: &mut (dyn Destination + '_)) -> Result<()> {
        dst.decode_from(&self.body)
    }
}
