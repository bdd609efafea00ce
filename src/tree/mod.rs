//! Segment trie used to store the routes of one HTTP method.
//!
//! Each node maps literal path segments to child nodes and may carry a single
//! named-parameter child, taken when no literal child matches. A trailing slash
//! is stored as a literal child keyed by the empty string.

mod node;

pub use node::{Node, ParamChild};

/// The character separating path segments.
pub const SEPARATOR: char = '/';

/// The leading character marking a segment as a named parameter.
pub const PARAM_SIGIL: char = ':';

/// Split a path into its segments.
///
/// This is a plain partition on [`SEPARATOR`]: empty segments are kept, so `""`
/// yields `[""]` and `"/"` yields `["", ""]`.
pub fn segments(path: &str) -> std::str::Split<'_, char> {
    path.split(SEPARATOR)
}

/// Return the parameter name of a segment like `:id`, if it is one.
pub fn param_name(segment: &str) -> Option<&str> {
    segment
        .strip_prefix(PARAM_SIGIL)
        .filter(|name| !name.is_empty())
}
