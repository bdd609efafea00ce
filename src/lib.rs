//! A tree-based HTTP request router.
//!
//! Routes are stored in one segment trie per HTTP method. A path segment
//! starting with `:` captures the request segment at that position under the
//! given name; every other segment matches literally, and literal matches win
//! over parameters. Requests that only differ from a route by a trailing slash
//! are redirected to it.
//!
//! # Features
//!
//! - Registration per method: GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS, TRACE
//! - Named path parameters handed to the handler with the request
//! - Trailing-slash redirects (301 for GET/HEAD, 307 otherwise), can be disabled
//! - Optional lock elision for routers that are fully built before serving
//! - A printable dump of the route tree
//! - A small tokio HTTP/1.1 server to serve the routes
//!
//! # Examples
//!
//! ## Matching
//!
//! ```
//! use microroute::{Match, Method, Router};
//!
//! let mut router = Router::new();
//! router.get("/users/:id", "show user").unwrap();
//! router.get("/users/me", "show me").unwrap();
//! router.get("/docs/", "docs").unwrap();
//!
//! match router.lookup(Method::GET, "/users/42") {
//!     Match::Found { handler, params } => {
//!         assert_eq!(handler, "show user");
//!         assert_eq!(params.get("id"), Some("42"));
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//! assert!(matches!(router.lookup(Method::GET, "/users/me"), Match::Found { handler: "show me", .. }));
//! assert_eq!(router.lookup(Method::GET, "/docs"), Match::Redirect("/docs/".to_string()));
//! assert_eq!(router.lookup(Method::POST, "/docs/"), Match::NotFound);
//! ```
//!
//! ## Error handling
//!
//! ```
//! use microroute::{RouteError, Router};
//!
//! let mut router = Router::new();
//! assert!(matches!(router.get("users", 1), Err(RouteError::InvalidPath(_))));
//!
//! router.get("/users/:id", 1).unwrap();
//! assert!(matches!(router.get("/users/:name/posts", 2), Err(RouteError::ParamConflict { .. })));
//! ```
//!
//! ## Serving
//!
//! ```no_run
//! use microroute::{handler, HttpResponse, HttpServer, Routes, ServerConfig, StatusCode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), microroute::ServerError> {
//!     let mut routes = Routes::new();
//!     routes.get("/hello/:name", handler(|_req, params| async move {
//!         let name = params.get("name").unwrap_or("world").to_string();
//!         Ok(HttpResponse::new(StatusCode::Ok).with_body_string(format!("Hello, {name}!")))
//!     }))?;
//!
//!     HttpServer::new(ServerConfig::default(), routes).start().await
//! }
//! ```
//!
//! See `demos/router_server.rs` for a complete server.

// Export the route trie
pub mod tree;

// Export the router
pub mod router;

// Export the parser module
pub mod parser;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use parser::{parse_request, Error as ParserError, HttpRequest, HttpVersion, Method};
pub use router::{Match, PathParams, RouteEntry, RouteError, Router, RouterConfig};
pub use server::{
    handler, Error as ServerError, HandlerFn, HttpResponse, HttpServer, Routes, ServerConfig, StatusCode,
};
