//! Prelude module for convenient imports.
//!
//! ```ignore
//! use jsonreq::prelude::*;
//! ```

pub use crate::{
    Body, Caller, ClientConfig, Destination, Error, ErrorKind, Headers, HttpClient, HyperClient,
    Method, Result, call, delete, delete_with_body, get, new_call, new_get, new_post, patch, post,
    put, url,
};
pub use serde::{Deserialize, Serialize};
