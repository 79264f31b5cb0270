//! Route definitions and path-pattern matching.

use crate::parser::{HttpRequest, Method};
use crate::server::{Error, HttpResponse};
use crate::store::AppState;

/// Type alias for a handler function.
///
/// Handlers run synchronously inside the connection's worker and may read or
/// mutate the shared stores through `AppState`.
pub type HandlerFn = fn(&HttpRequest, &RouteMatch<'_>, &AppState) -> Result<HttpResponse, Error>;

/// A path pattern: either a literal path or a prefix followed by one `{param}` segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    Exact(String),
    Param { prefix: String, name: String },
}

impl PathPattern {
    /// Parse a pattern such as `/get-data` or `/users/{id}`.
    pub fn parse(pattern: &str) -> Self {
        if let Some((prefix, rest)) = pattern.split_once('{') {
            if let Some(name) = rest.strip_suffix('}') {
                return PathPattern::Param {
                    prefix: prefix.to_string(),
                    name: name.to_string(),
                };
            }
        }
        PathPattern::Exact(pattern.to_string())
    }

    /// Match `path`, capturing the parameter segment if the pattern has one.
    ///
    /// The captured segment runs from the end of the prefix to the next `/`
    /// and may be empty; validating it is the handler's job.
    pub fn matches<'a>(&self, path: &'a str) -> Option<RouteMatch<'a>> {
        match self {
            PathPattern::Exact(exact) => (exact == path).then_some(RouteMatch { param: None }),
            PathPattern::Param { prefix, .. } => {
                let rest = path.strip_prefix(prefix.as_str())?;
                let segment = rest.split('/').next().unwrap_or_default();
                Some(RouteMatch { param: Some(segment) })
            }
        }
    }
}

impl std::fmt::Display for PathPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathPattern::Exact(path) => write!(f, "{path}"),
            PathPattern::Param { prefix, name } => write!(f, "{prefix}{{{name}}}"),
        }
    }
}

/// What a successful pattern match captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    /// The `{param}` segment, for parameterised patterns.
    pub param: Option<&'a str>,
}

/// Represents a route in the HTTP server.
pub struct Route {
    /// The method to match.
    pub method: Method,
    /// The path pattern to match.
    pub pattern: PathPattern,
    /// The handler function.
    pub handler: HandlerFn,
}

impl Route {
    pub fn new(method: Method, pattern: &str, handler: HandlerFn) -> Self {
        Self {
            method,
            pattern: PathPattern::parse(pattern),
            handler,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_pattern() {
        let pattern = PathPattern::parse("/get-data");
        assert_eq!(pattern, PathPattern::Exact("/get-data".to_string()));
        assert_eq!(pattern.matches("/get-data"), Some(RouteMatch { param: None }));
        assert_eq!(pattern.matches("/get-data/x"), None);
    }

    #[test]
    fn test_param_pattern() {
        let pattern = PathPattern::parse("/users/{id}");
        assert_eq!(pattern.to_string(), "/users/{id}");
        assert_eq!(pattern.matches("/users/42").unwrap().param, Some("42"));
        assert_eq!(pattern.matches("/users/42/extra").unwrap().param, Some("42"));
        assert_eq!(pattern.matches("/users/").unwrap().param, Some(""));
        assert_eq!(pattern.matches("/users"), None);
    }
}
