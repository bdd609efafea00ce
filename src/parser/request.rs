//! Request descriptor and request head parsing.

use std::collections::HashMap;
use std::str::FromStr;

use crate::parser::error::Error;
use crate::parser::method::Method;
use crate::parser::version::HttpVersion;

const HEAD_END: &[u8] = b"\r\n\r\n";

/// An inbound HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// The HTTP method
    pub method: Method,
    /// The request path, without the query string
    pub path: String,
    /// The raw query string following `?`, if any
    pub query: Option<String>,
    /// The HTTP version
    pub version: HttpVersion,
    /// The HTTP headers, keyed as received
    pub headers: HashMap<String, String>,
    /// Whatever followed the header block in the buffer that was parsed
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Create a request for `target`, splitting off its query string.
    pub fn new(method: Method, target: &str, version: HttpVersion, headers: HashMap<String, String>) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path.to_string(), Some(query.to_string())),
            None => (target.to_string(), None),
        };

        Self {
            method,
            path,
            query,
            version,
            headers,
            body: Vec::new(),
        }
    }

    /// Shorthand for an HTTP/1.1 request without headers, mostly for tests.
    pub fn get(target: &str) -> Self {
        Self::new(Method::GET, target, HttpVersion::Http11, HashMap::new())
    }

    /// Set the request body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Get a header value, ignoring ASCII case in the name.
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Check if a header exists.
    pub fn has_header(&self, name: &str) -> bool {
        self.get_header(name).is_some()
    }

    /// The request target as sent: path plus query string.
    pub fn target(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{query}", self.path),
            None => self.path.clone(),
        }
    }
}

/// Parse a request head, plus any body bytes that arrived with it.
///
/// The head must be valid UTF-8. Everything after the first empty line is
/// taken verbatim as the body.
pub fn parse_request(input: &[u8]) -> Result<HttpRequest, Error> {
    if input.is_empty() {
        return Err(Error::EmptyRequest);
    }

    let (head, body) = match input.windows(HEAD_END.len()).position(|w| w == HEAD_END) {
        Some(end) => (&input[..end], &input[end + HEAD_END.len()..]),
        None => (input, &[][..]),
    };
    let head = std::str::from_utf8(head).map_err(|_| Error::MalformedRequestLine("Invalid UTF-8".to_string()))?;

    let mut lines = head.lines();
    let request_line = lines.next().ok_or(Error::EmptyRequest)?;

    let parts: Vec<&str> = request_line.split_whitespace().collect();
    let &[method, target, version] = parts.as_slice() else {
        return Err(Error::MalformedRequestLine(request_line.to_string()));
    };

    let method = Method::from_str(method)?;
    if target.is_empty() {
        return Err(Error::InvalidPath);
    }
    let version = HttpVersion::from_str(version)?;

    let mut headers = HashMap::new();
    for line in lines.take_while(|line| !line.is_empty()) {
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| Error::InvalidHeaderFormat(line.to_string()))?;
        headers.insert(name.trim().to_string(), value.trim().to_string());
    }

    if version.requires_host() && !headers.keys().any(|k| k.eq_ignore_ascii_case("Host")) {
        return Err(Error::MissingHeader("Host".to_string()));
    }

    Ok(HttpRequest::new(method, target, version, headers).with_body(body))
}
