//! HTTP/1.x request head parsing.
//!
//! Turns the bytes read from a connection into an [`HttpRequest`], the
//! descriptor the router matches on.

mod error;
mod method;
mod request;
mod version;

// Re-export public items
pub use error::Error;
pub use method::Method;
pub use request::{parse_request, HttpRequest};
pub use version::HttpVersion;
