//! HTTP server serving a [`Routes`] table.
//!
//! This module adapts the router to tokio: it reads and parses a request from
//! each connection, dispatches it through the router, and writes the response,
//! a redirect, or a 404 back.

mod config;
mod error;
mod handler;
mod http_server;
mod response;

// Re-export public items
pub use config::ServerConfig;
pub use error::Error;
pub use handler::{handler, HandlerFn, HandlerFuture, Routes};
pub use http_server::{redirect_status, HttpServer};
pub use response::{HttpResponse, StatusCode};
