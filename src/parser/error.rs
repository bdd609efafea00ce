//! Error types for the request parser.

use thiserror::Error;

/// Errors that can occur while parsing a request head.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The method is not one a route can be registered for.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// The request target is missing.
    #[error("Invalid HTTP path")]
    InvalidPath,

    /// The request line does not have exactly three parts.
    #[error("Malformed request line: {0}")]
    MalformedRequestLine(String),

    #[error("Invalid HTTP version: {0}")]
    InvalidVersion(String),

    #[error("Required header is missing: {0}")]
    MissingHeader(String),

    /// A header line without a colon.
    #[error("Invalid header format: {0}")]
    InvalidHeaderFormat(String),

    #[error("Empty request")]
    EmptyRequest,
}
