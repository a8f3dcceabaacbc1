//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use jsonreq_core::prelude::*;
//! ```

pub use crate::{
    Body, Destination, Error, ErrorKind, Headers, HttpClient, Method, Request, Response, Result,
    from_json,
};
