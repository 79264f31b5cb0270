//! Session identifier resolution.

use log::debug;
use uuid::Uuid;

use crate::parser::{session_id_from_cookie, HttpRequest};

/// The `Set-Cookie` line that hands a session id to the client.
pub fn session_cookie(id: &str) -> String {
    format!("Set-Cookie: sessionId={id}; Path=/; HttpOnly")
}

/// Resolve the session id for `request` from its `Cookie` header.
///
/// A non-empty `sessionId` cookie is used verbatim. Otherwise a fresh v4 UUID
/// is generated. Returns `true` when the id is new and the client still needs
/// a `Set-Cookie`. Nothing is written to the session store here.
pub fn resolve_session(request: &mut HttpRequest) -> bool {
    match session_id_from_cookie(&request.cookie) {
        Some(id) if !id.is_empty() => {
            request.session_id = id;
            false
        }
        _ => {
            request.session_id = Uuid::new_v4().to_string();
            debug!("Created new session id {id}", id = request.session_id);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::parser::Method;

    fn request_with_cookie(cookie: Option<&str>) -> HttpRequest {
        let mut headers = HashMap::new();
        if let Some(cookie) = cookie {
            headers.insert("Cookie".to_string(), cookie.to_string());
        }
        HttpRequest::new(Method::GET, "/get-data", headers)
    }

    #[test]
    fn test_existing_cookie_is_used_verbatim() {
        let mut request = request_with_cookie(Some("a=1; sessionId=not-a-uuid; b=2"));
        assert!(!resolve_session(&mut request));
        assert_eq!(request.session_id, "not-a-uuid");
    }

    #[test]
    fn test_missing_cookie_generates_uuid() {
        let mut request = request_with_cookie(None);
        assert!(resolve_session(&mut request));
        assert!(Uuid::parse_str(&request.session_id).is_ok());

        let mut other = request_with_cookie(Some("theme=dark"));
        assert!(resolve_session(&mut other));
        assert_ne!(request.session_id, other.session_id);
    }

    #[test]
    fn test_empty_session_cookie_generates_uuid() {
        let mut request = request_with_cookie(Some("sessionId=; theme=dark"));
        assert!(resolve_session(&mut request));
        assert!(!request.session_id.is_empty());
    }

    #[test]
    fn test_session_cookie_line() {
        assert_eq!(session_cookie("abc"), "Set-Cookie: sessionId=abc; Path=/; HttpOnly");
    }
}
