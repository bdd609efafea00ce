//! Error types for route registration.

use thiserror::Error;

/// Errors that can occur while registering a route.
///
/// Registration is not transactional: a failed call may have created the
/// method root or literal nodes on the way to the failure, but never removes or
/// rebinds anything that was registered before.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The path does not begin with a slash.
    #[error("Path does not begin with a leading slash: {0:?}")]
    InvalidPath(String),

    /// A second, differently named parameter at a position that already has one.
    #[error("Path param ':{param}' of '{path}' already defined as ':{existing}'")]
    ParamConflict {
        /// The path being registered.
        path: String,
        /// The rejected parameter name.
        param: String,
        /// The name already bound at that position.
        existing: String,
    },

    /// Shared-reference registration on a router built without locking.
    #[error("Routes cannot be added concurrently when concurrent_add is disabled")]
    ConcurrentAddDisabled,
}
