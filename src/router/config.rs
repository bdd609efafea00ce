//! Router configuration.

/// Router configuration, read on every lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterConfig {
    /// Redirect requests that only differ from a route by a trailing slash.
    ///
    /// With `/foo` defined, `/foo/` redirects to `/foo`; with `/foo/` defined,
    /// `/foo` redirects to `/foo/`. When both exist no redirection happens.
    pub redirect_trailing_slash: bool,
    /// Keep the route trees behind a lock so routes can be added while serving.
    ///
    /// When disabled no lock is taken on lookups, and routes can only be added
    /// through `&mut Router`, before the router is shared.
    pub concurrent_add: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            redirect_trailing_slash: true,
            concurrent_add: true,
        }
    }
}
