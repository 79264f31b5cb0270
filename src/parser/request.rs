//! HTTP request parsing and representation.

use std::collections::HashMap;
use std::str::FromStr;
use serde::de::DeserializeOwned;

use crate::parser::error::Error;
use crate::parser::form::parse_form;
use crate::parser::method::Method;

/// Largest request head accepted before the blank-line terminator must appear.
pub const MAX_HEAD_SIZE: usize = 64 * 1024;

const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Represents an HTTP request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request target, with `/` rewritten to `/index.html`
    pub path: String,
    /// The HTTP headers, keyed exactly as received
    pub headers: HashMap<String, String>,
    /// The media type from `Content-Type`, without parameters; empty if absent
    pub content_type: String,
    /// The raw `Cookie` header value; empty if absent
    pub cookie: String,
    /// The session identifier, filled in by the session resolver
    pub session_id: String,
    /// The request body
    pub body: Vec<u8>,
    /// Query parameters parsed from the path
    pub query_params: HashMap<String, String>,
}

impl HttpRequest {
    /// Create a new HTTP request with an empty body.
    ///
    /// `content_type` and `cookie` are derived from `headers`.
    pub fn new(method: Method, path: impl Into<String>, headers: HashMap<String, String>) -> Self {
        let path = path.into();
        let query_params: HashMap<String, String> = path
            .split_once('?')
            .map(|(_, query)| query
                .split('&')
                .filter(|s| !s.is_empty())
                .map(|pair| {
                    if let Some((k, v)) = pair.split_once('=') {
                        (k.to_string(), v.to_string())
                    } else {
                        (pair.to_string(), String::new())
                    }
                })
                .collect())
            .unwrap_or_default();

        let content_type = headers
            .get("Content-Type")
            .map(|value| media_type(value).to_string())
            .unwrap_or_default();
        let cookie = headers.get("Cookie").cloned().unwrap_or_default();

        Self {
            method,
            path,
            headers,
            content_type,
            cookie,
            session_id: String::new(),
            body: Vec::new(),
            query_params,
        }
    }

    /// Create a new HTTP request with a body.
    pub fn with_body(method: Method, path: impl Into<String>, headers: HashMap<String, String>, body: impl Into<Vec<u8>>) -> Self {
        let mut request = Self::new(method, path, headers);
        request.body = body.into();
        request
    }

    /// Get a header value by its exact name.
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers.get(name)
    }

    /// Check if a header exists.
    pub fn has_header(&self, name: &str) -> bool {
        self.get_header(name).is_some()
    }

    /// The path used for routing and static lookup: the target without its query string.
    pub fn route_path(&self) -> &str {
        match self.path.split_once('?') {
            Some((path, _)) => path,
            None => &self.path,
        }
    }

    /// The body decoded as UTF-8, with invalid sequences replaced.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse the request body as JSON.
    ///
    /// # Returns
    ///
    /// The parsed JSON value, or an error if the body is not valid JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let json = serde_json::from_slice(&self.body)?;
        Ok(json)
    }

    /// Decode the body as `application/x-www-form-urlencoded` pairs.
    pub fn form(&self) -> HashMap<String, String> {
        parse_form(&self.body_text())
    }

    /// Check if the request declares a JSON body.
    pub fn is_json(&self) -> bool {
        self.content_type == "application/json"
    }

    /// Get a query parameter value.
    pub fn get_query_param(&self, name: &str) -> Option<&String> {
        self.query_params.get(name)
    }
}

/// The media type of a `Content-Type` value, stripped of parameters.
fn media_type(value: &str) -> &str {
    value.split(';').next().unwrap_or_default().trim()
}

/// Find the offset of the blank line that ends the request head.
///
/// The returned index points at the start of the `\r\n\r\n` sequence.
pub fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEAD_TERMINATOR.len())
        .position(|window| window == HEAD_TERMINATOR)
}

/// Split a header line into name and value.
///
/// A header is recognized only when its name is followed by `:` and at least
/// one space; other lines yield `None`.
fn split_header(line: &str) -> Option<(&str, &str)> {
    let (name, value) = line.split_once(':')?;
    if name.is_empty() || !value.starts_with(' ') {
        return None;
    }
    Some((name, value.trim()))
}

/// Read the declared `Content-Length` out of a request head.
///
/// Returns `Ok(None)` when the header is absent.
pub fn parse_content_length(head: &[u8]) -> Result<Option<usize>, Error> {
    let head = std::str::from_utf8(head).map_err(|_| Error::InvalidEncoding)?;
    let mut declared = None;
    for line in head.lines().skip(1) {
        if let Some(("Content-Length", value)) = split_header(line) {
            declared = Some(value);
        }
    }

    declared
        .map(|value| value.parse::<usize>().map_err(|_| Error::InvalidContentLength(value.to_string())))
        .transpose()
}

/// Parse an HTTP request from a byte slice.
///
/// The slice holds the head, the blank line, and the body. When the head
/// declares a `Content-Length`, exactly that many bytes after the blank line
/// form the body; otherwise the body is the remainder of the slice.
///
/// # Returns
///
/// The parsed HTTP request, or an error if the request is invalid
pub fn parse_request(input: &[u8]) -> Result<HttpRequest, Error> {
    if input.is_empty() {
        return Err(Error::EmptyRequest);
    }

    let (head, rest) = match find_head_end(input) {
        Some(end) => (&input[..end], &input[end + HEAD_TERMINATOR.len()..]),
        None => (input, &[][..]),
    };

    let head_str = std::str::from_utf8(head).map_err(|_| Error::InvalidEncoding)?;
    let mut lines = head_str.lines();

    // Parse the request line
    let request_line = match lines.next() {
        Some(line) if !line.trim().is_empty() => line,
        _ => return Err(Error::EmptyRequest),
    };

    // Method and path are required; the version token is optional and ignored
    let parts: Vec<&str> = request_line.split_whitespace().collect();
    if parts.len() < 2 {
        return Err(Error::MalformedRequestLine(request_line.to_string()));
    }

    let method = Method::from_str(parts[0])?;

    let path = match parts[1] {
        "/" => "/index.html",
        path if path.starts_with('/') => path,
        _ => return Err(Error::MalformedRequestLine(request_line.to_string())),
    };

    // Parse the headers; lines without a `: ` separator carry nothing we consult
    let mut headers = HashMap::new();
    for line in lines {
        if line.is_empty() {
            break;
        }

        if let Some((name, value)) = split_header(line) {
            headers.insert(name.to_string(), value.to_string());
        }
    }

    let body = match parse_content_length(head)? {
        Some(expected) if rest.len() < expected => {
            return Err(Error::IncompleteBody { expected, received: rest.len() });
        }
        Some(expected) => rest[..expected].to_vec(),
        None => rest.to_vec(),
    };

    Ok(HttpRequest::with_body(method, path, headers, body))
}
