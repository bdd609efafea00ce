//! Tree-based request routing.
//!
//! A [`Router`] keeps one segment trie per HTTP method. Lookups walk the trie
//! one path segment at a time, preferring literal segments over the single
//! named parameter of each node, and resolve paths that only differ from a
//! route by a trailing slash into a redirect.

mod config;
mod mux;
mod error;
mod params;
mod tests;

// Re-export public items
pub use config::RouterConfig;
pub use mux::{Match, RouteEntry, Router};
pub use error::RouteError;
pub use params::PathParams;
