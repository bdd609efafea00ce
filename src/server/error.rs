//! Error types for the HTTP server.

use thiserror::Error;

use crate::parser::Error as ParserError;
use crate::router::RouteError;

/// Errors that can occur while serving requests.
///
/// Routing outcomes are not errors: a request that matches nothing is answered
/// with a 404 response.
#[derive(Debug, Error)]
pub enum Error {
    /// Error parsing an HTTP request.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParserError),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A route could not be registered.
    #[error("Route error: {0}")]
    RouteError(#[from] RouteError),

    /// Failure reported by a handler.
    #[error("Internal server error: {0}")]
    InternalError(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
