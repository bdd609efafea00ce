//! Trie vertices.

use std::collections::HashMap;
use std::fmt::Write;

use log::warn;

use crate::router::RouteError;
use crate::tree::{param_name, segments, PARAM_SIGIL, SEPARATOR};

/// The single parameter child of a [`Node`].
#[derive(Debug, Clone)]
pub struct ParamChild<H> {
    /// The name bound to the captured segment. Fixed once created.
    pub name: String,
    /// The subtree reached through the parameter.
    pub node: Box<Node<H>>,
}

/// A vertex of the route trie.
#[derive(Debug, Clone)]
pub struct Node<H> {
    children: HashMap<String, Node<H>>,
    param: Option<ParamChild<H>>,
    handler: Option<H>,
}

impl<H> Default for Node<H> {
    fn default() -> Self {
        Self {
            children: HashMap::new(),
            param: None,
            handler: None,
        }
    }
}

impl<H> Node<H> {
    /// Create an empty node.
    pub fn new() -> Self {
        Self::default()
    }

    /// The handler bound to this exact node, if a route ends here.
    pub fn handler(&self) -> Option<&H> {
        self.handler.as_ref()
    }

    /// The literal child keyed by `segment`.
    pub fn child(&self, segment: &str) -> Option<&Node<H>> {
        self.children.get(segment)
    }

    /// The parameter child, if one has been registered.
    pub fn param(&self) -> Option<&ParamChild<H>> {
        self.param.as_ref()
    }

    /// Whether the node has neither children nor a handler.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.param.is_none() && self.handler.is_none()
    }

    /// Insert the route `route`, whose leading separator has already been
    /// stripped into `rest`, and bind `handler` to its final node.
    ///
    /// Nodes created before a parameter conflict is detected are kept; a failed
    /// insert leaves a possibly larger but still consistent tree.
    pub fn insert(&mut self, rest: &str, route: &str, handler: Option<H>) -> Result<(), RouteError> {
        let mut current = self;
        for segment in segments(rest) {
            current = match param_name(segment) {
                Some(name) => {
                    let param = current.param.get_or_insert_with(|| ParamChild {
                        name: name.to_string(),
                        node: Box::new(Node::new()),
                    });
                    if param.name != name {
                        warn!(
                            "Parameter {segment} of {route} conflicts with existing {PARAM_SIGIL}{existing}",
                            existing = param.name
                        );
                        return Err(RouteError::ParamConflict {
                            path: route.to_string(),
                            param: name.to_string(),
                            existing: param.name.clone(),
                        });
                    }
                    &mut *param.node
                }
                None => current.children.entry(segment.to_string()).or_default(),
            };
        }
        current.handler = handler;
        Ok(())
    }

    /// Append this node and its descendants to `out`, one line per node.
    ///
    /// Handler-bearing nodes are prefixed with `* `, others with two spaces,
    /// followed by two spaces of indentation per level.
    pub fn dump(&self, label: &str, depth: usize, out: &mut String) {
        let marker = if self.handler.is_some() { "* " } else { "  " };
        let _ = writeln!(out, "{marker}{indent}{label}", indent = "  ".repeat(depth));

        let mut keys: Vec<&String> = self.children.keys().collect();
        keys.sort();
        for key in keys {
            self.children[key].dump(&format!("{SEPARATOR}{key}"), depth + 1, out);
        }
        if let Some(param) = &self.param {
            param
                .node
                .dump(&format!("{SEPARATOR}{PARAM_SIGIL}{}", param.name), depth + 1, out);
        }
    }

    /// Collect the full path of every handler-bearing node below this one.
    ///
    /// `prefix` is the path of this node; the method root uses an empty prefix.
    pub fn collect_routes(&self, prefix: &str, out: &mut Vec<String>) {
        for (key, child) in &self.children {
            let path = format!("{prefix}{SEPARATOR}{key}");
            if child.handler.is_some() {
                out.push(path.clone());
            }
            child.collect_routes(&path, out);
        }
        if let Some(param) = &self.param {
            let path = format!("{prefix}{SEPARATOR}{PARAM_SIGIL}{}", param.name);
            if param.node.handler.is_some() {
                out.push(path.clone());
            }
            param.node.collect_routes(&path, out);
        }
    }
}
