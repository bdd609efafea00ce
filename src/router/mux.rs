//! Route registration and request matching.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use log::{debug, info, trace};
use serde::Serialize;

use crate::parser::Method;
use crate::router::config::RouterConfig;
use crate::router::error::RouteError;
use crate::router::params::PathParams;
use crate::tree::{segments, Node, SEPARATOR};

type Trees<H> = HashMap<Method, Node<H>>;

/// Storage for the per-method trees, with or without a lock.
enum Forest<H> {
    Locked(RwLock<Trees<H>>),
    Unlocked(Trees<H>),
}

impl<H> Forest<H> {
    fn get_mut(&mut self) -> &mut Trees<H> {
        match self {
            Forest::Locked(lock) => lock.get_mut().unwrap_or_else(PoisonError::into_inner),
            Forest::Unlocked(trees) => trees,
        }
    }
}

/// The outcome of matching a request against the registered routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Match<H> {
    /// A route matched; `params` holds the captured path segments.
    Found { handler: H, params: PathParams },
    /// The path only differs from a route by a trailing slash.
    Redirect(String),
    /// Nothing matched.
    NotFound,
}

/// A registered route, as listed by [`Router::routes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub method: Method,
    pub path: String,
}

/// A tree-based request router holding one route trie per HTTP method.
///
/// Routes are added with the per-method methods (`get`, `post`, ...) while the
/// router is still exclusively owned. When [`RouterConfig::concurrent_add`] is
/// enabled, [`Router::add_route`] can also add routes through a shared
/// reference while requests are being matched.
pub struct Router<H> {
    config: RouterConfig,
    forest: Forest<H>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::with_config(RouterConfig::default())
    }
}

impl<H> Router<H> {
    /// Create a router with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a router with the given configuration.
    pub fn with_config(config: RouterConfig) -> Self {
        let forest = if config.concurrent_add {
            Forest::Locked(RwLock::new(HashMap::new()))
        } else {
            Forest::Unlocked(HashMap::new())
        };
        Self { config, forest }
    }

    /// The router configuration.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Enable or disable trailing-slash redirects.
    pub fn set_redirect_trailing_slash(&mut self, enabled: bool) {
        self.config.redirect_trailing_slash = enabled;
    }

    /// Register a route.
    ///
    /// A `None` handler still shapes the tree (and so affects trailing-slash
    /// redirects) but matching it directly yields [`Match::NotFound`].
    /// Registering the same method and path again replaces the handler.
    pub fn register(&mut self, method: Method, path: &str, handler: Option<H>) -> Result<(), RouteError> {
        insert(self.forest.get_mut(), method, path, handler)
    }

    /// Register a route through a shared reference, taking the write lock.
    ///
    /// Fails with [`RouteError::ConcurrentAddDisabled`] when the router was built
    /// with `concurrent_add` disabled.
    pub fn add_route(&self, method: Method, path: &str, handler: Option<H>) -> Result<(), RouteError> {
        match &self.forest {
            Forest::Locked(lock) => {
                let mut trees = lock.write().unwrap_or_else(PoisonError::into_inner);
                insert(&mut *trees, method, path, handler)
            }
            Forest::Unlocked(_) => Err(RouteError::ConcurrentAddDisabled),
        }
    }

    /// Configure a GET route.
    pub fn get(&mut self, path: &str, handler: H) -> Result<(), RouteError> {
        self.register(Method::GET, path, Some(handler))
    }

    /// Configure a POST route.
    pub fn post(&mut self, path: &str, handler: H) -> Result<(), RouteError> {
        self.register(Method::POST, path, Some(handler))
    }

    /// Configure a PUT route.
    pub fn put(&mut self, path: &str, handler: H) -> Result<(), RouteError> {
        self.register(Method::PUT, path, Some(handler))
    }

    /// Configure a PATCH route.
    pub fn patch(&mut self, path: &str, handler: H) -> Result<(), RouteError> {
        self.register(Method::PATCH, path, Some(handler))
    }

    /// Configure a DELETE route.
    pub fn delete(&mut self, path: &str, handler: H) -> Result<(), RouteError> {
        self.register(Method::DELETE, path, Some(handler))
    }

    /// Configure a HEAD route.
    pub fn head(&mut self, path: &str, handler: H) -> Result<(), RouteError> {
        self.register(Method::HEAD, path, Some(handler))
    }

    /// Configure an OPTIONS route.
    pub fn options(&mut self, path: &str, handler: H) -> Result<(), RouteError> {
        self.register(Method::OPTIONS, path, Some(handler))
    }

    /// Configure a TRACE route.
    pub fn trace(&mut self, path: &str, handler: H) -> Result<(), RouteError> {
        self.register(Method::TRACE, path, Some(handler))
    }

    fn read<R>(&self, f: impl FnOnce(&Trees<H>) -> R) -> R {
        match &self.forest {
            Forest::Locked(lock) => {
                let trees = lock.read().unwrap_or_else(PoisonError::into_inner);
                f(&*trees)
            }
            Forest::Unlocked(trees) => f(trees),
        }
    }

    /// Find the handler for `method` and `path`.
    ///
    /// `path` is the request path without its query string. Requests for a
    /// method with no routes never fall back to another method.
    pub fn lookup(&self, method: Method, path: &str) -> Match<H>
    where
        H: Clone,
    {
        let redirect = self.config.redirect_trailing_slash;
        let outcome = self.read(|trees| match trees.get(&method) {
            Some(root) => resolve(root, path, redirect),
            None => Match::NotFound,
        });
        trace!("{method} {path} resolved to {kind}", kind = outcome_kind(&outcome));
        outcome
    }

    /// Render the route hierarchy, one line per node.
    ///
    /// Lines of nodes with a handler start with `* `. Method roots are listed
    /// first, followed by their children indented two spaces per level.
    pub fn dump_routes(&self) -> String {
        self.read(|trees| {
            let mut methods: Vec<&Method> = trees.keys().collect();
            methods.sort();
            let mut out = String::new();
            for method in methods {
                trees[method].dump(&method.to_string(), 0, &mut out);
            }
            out
        })
    }

    /// Log the route hierarchy at info level.
    pub fn print_routes(&self) {
        info!("Registered routes:\n{}", self.dump_routes());
    }

    /// List every route that has a handler, sorted by method then path.
    pub fn routes(&self) -> Vec<RouteEntry> {
        self.read(|trees| {
            let mut entries = Vec::new();
            for (method, root) in trees {
                let mut paths = Vec::new();
                root.collect_routes("", &mut paths);
                entries.extend(paths.into_iter().map(|path| RouteEntry { method: *method, path }));
            }
            entries.sort_by(|a, b| a.method.cmp(&b.method).then_with(|| a.path.cmp(&b.path)));
            entries
        })
    }
}

fn insert<H>(trees: &mut Trees<H>, method: Method, path: &str, handler: Option<H>) -> Result<(), RouteError> {
    let rest = path
        .strip_prefix(SEPARATOR)
        .ok_or_else(|| RouteError::InvalidPath(path.to_string()))?;
    let has_handler = handler.is_some();
    trees.entry(method).or_default().insert(rest, path, handler)?;
    debug!("Registered {method} {path} (handler: {has_handler})");
    Ok(())
}

/// Walk the tree of one method.
///
/// Literal children win over the parameter child, which never captures an
/// empty segment. A dead end fails the request unless it happens on a trailing
/// empty segment, which is handled like a route without a handler.
fn resolve<H: Clone>(root: &Node<H>, path: &str, redirect: bool) -> Match<H> {
    let Some(rest) = path.strip_prefix(SEPARATOR) else {
        return Match::NotFound;
    };

    let mut params = PathParams::new();
    let mut current = root;
    let mut previous = root;
    let mut completed = true;
    let mut parts = segments(rest).peekable();
    while let Some(segment) = parts.next() {
        previous = current;
        if let Some(child) = current.child(segment) {
            current = child;
        } else if let Some(param) = current.param().filter(|_| !segment.is_empty()) {
            params.insert(&param.name, segment);
            current = param.node.as_ref();
        } else if segment.is_empty() && parts.peek().is_none() {
            completed = false;
            break;
        } else {
            return Match::NotFound;
        }
    }

    if completed {
        if let Some(handler) = current.handler() {
            return Match::Found {
                handler: handler.clone(),
                params,
            };
        }
    }
    if !redirect {
        return Match::NotFound;
    }

    if let Some(stripped) = path.strip_suffix(SEPARATOR) {
        if previous.handler().is_some() {
            return Match::Redirect(stripped.to_string());
        }
    } else if current.child("").and_then(Node::handler).is_some() {
        return Match::Redirect(format!("{path}{SEPARATOR}"));
    }
    Match::NotFound
}

fn outcome_kind<H>(outcome: &Match<H>) -> &'static str {
    match outcome {
        Match::Found { .. } => "a handler",
        Match::Redirect(_) => "a redirect",
        Match::NotFound => "not found",
    }
}
