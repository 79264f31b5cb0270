//! Request handlers, one per route family.

use std::collections::HashMap;
use std::path::Path;

use log::{debug, info};

use crate::parser::HttpRequest;
use crate::server::handler::RouteMatch;
use crate::server::mime::content_type_for;
use crate::server::session::session_cookie;
use crate::server::{Error, HttpResponse, StatusCode};
use crate::store::{AppState, SessionLookup, UserId, MESSAGE_KEY};

/// Fixed demo cookie attached to every static file response.
pub const STATIC_FILE_COOKIE: &str = "Set-Cookie: userId=12345; Path=/; HttpOnly";

const INVALID_USER_ID: &str = "Invalid user ID format";

/// Serve the file at `file` with a content type taken from its extension.
pub async fn serve_static(file: &Path) -> Result<HttpResponse, Error> {
    let bytes = tokio::fs::read(file)
        .await
        .map_err(|e| Error::InternalError(format!("reading {}: {e}", file.display())))?;

    Ok(HttpResponse::new(StatusCode::Ok)
        .with_content_type(content_type_for(file))
        .with_body_bytes(bytes)
        .with_header_line(STATIC_FILE_COOKIE))
}

/// `GET /users/{id}`
pub fn get_user(_request: &HttpRequest, matched: &RouteMatch<'_>, state: &AppState) -> Result<HttpResponse, Error> {
    let Some(id) = user_id(matched) else {
        return Ok(HttpResponse::text(INVALID_USER_ID));
    };

    Ok(HttpResponse::text(match state.users.get(id) {
        Some(name) => format!("User {id} is {name}"),
        None => format!("User with userId:{id} does not exist"),
    }))
}

/// `GET /get-data`
pub fn get_session_data(request: &HttpRequest, _matched: &RouteMatch<'_>, state: &AppState) -> Result<HttpResponse, Error> {
    if request.session_id.is_empty() {
        return Ok(HttpResponse::text("No valid session found."));
    }

    Ok(HttpResponse::text(match state.sessions.get(&request.session_id, MESSAGE_KEY) {
        SessionLookup::NoSession => "No valid session found.".to_string(),
        SessionLookup::MissingKey => "No session data found.".to_string(),
        SessionLookup::Value(message) => message,
    }))
}

/// `POST /store-data`
pub fn store_session_data(request: &HttpRequest, _matched: &RouteMatch<'_>, state: &AppState) -> Result<HttpResponse, Error> {
    if !request.is_json() {
        return Err(Error::UnsupportedContentType(request.content_type.clone()));
    }

    let sanitized = escape_html(&request.body_text());
    state.sessions.insert(&request.session_id, MESSAGE_KEY, sanitized);
    debug!("Stored message for session {id}", id = request.session_id);

    Ok(HttpResponse::text("Data stored in session.")
        .with_header_line(session_cookie(&request.session_id)))
}

/// `POST /submit`
///
/// The body is always decoded as a urlencoded form, whatever the declared type.
pub fn submit_form(request: &HttpRequest, _matched: &RouteMatch<'_>, _state: &AppState) -> Result<HttpResponse, Error> {
    let form = request.form();
    let field = |name: &str| escape_html(form.get(name).map_or("Unknown", String::as_str));

    Ok(HttpResponse::html(format!(
        "<html><body><h1>Form Submitted!</h1><p>Username: {username}</p><p>Email: {email}</p></body></html>",
        username = field("username"),
        email = field("email"),
    )))
}

/// `POST /users`
pub fn create_user(request: &HttpRequest, _matched: &RouteMatch<'_>, state: &AppState) -> Result<HttpResponse, Error> {
    let mut fields: HashMap<String, String> = match request.content_type.as_str() {
        "application/json" => request
            .json()
            .map_err(|_| Error::InvalidPayload("Invalid JSON format".to_string()))?,
        "application/x-www-form-urlencoded" => request.form(),
        "text/plain" => HashMap::from([("name".to_string(), request.body_text())]),
        other => return Err(Error::UnsupportedContentType(other.to_string())),
    };

    let name = fields
        .remove("name")
        .ok_or_else(|| Error::InvalidPayload("Invalid user data".to_string()))?;

    let id = state.users.create(name.clone());
    info!("Created user {id}");
    Ok(HttpResponse::text(format!("User {id} created with name {name}")))
}

/// `PUT /users/{id}`: the raw body becomes the user's name.
pub fn replace_user(request: &HttpRequest, matched: &RouteMatch<'_>, state: &AppState) -> Result<HttpResponse, Error> {
    let Some(id) = user_id(matched) else {
        return Ok(HttpResponse::text(INVALID_USER_ID));
    };

    let name = request.body_text();
    let message = if state.users.upsert(id, name.clone()) {
        format!("User {id} updated to {name}")
    } else {
        format!("User {id} created with name {name}")
    };
    Ok(HttpResponse::text(message))
}

/// `PATCH /users/{id}`: only existing users are touched.
pub fn update_user(request: &HttpRequest, matched: &RouteMatch<'_>, state: &AppState) -> Result<HttpResponse, Error> {
    let Some(id) = user_id(matched) else {
        return Ok(HttpResponse::text(INVALID_USER_ID));
    };

    let name = request.body_text();
    let message = if state.users.update(id, name.clone()) {
        format!("User {id} partially updated to {name}")
    } else {
        format!("User {id} was not found")
    };
    Ok(HttpResponse::text(message))
}

/// `DELETE /users/{id}`
pub fn delete_user(_request: &HttpRequest, matched: &RouteMatch<'_>, state: &AppState) -> Result<HttpResponse, Error> {
    let Some(id) = user_id(matched) else {
        return Ok(HttpResponse::text(INVALID_USER_ID));
    };

    let message = if state.users.remove(id) {
        format!("User {id} deleted")
    } else {
        format!("User {id} not found.")
    };
    Ok(HttpResponse::text(message))
}

fn user_id(matched: &RouteMatch<'_>) -> Option<UserId> {
    matched.param?.parse().ok()
}

/// Encode the HTML-significant characters `& < > " '`.
///
/// Characters from U+00A0 to U+00FF become decimal entities, so `é` is `&#233;`.
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '\u{a0}'..='\u{ff}' => escaped.push_str(&format!("&#{};", u32::from(c))),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html(r#"a & "b" 'c'"#), "a &amp; &quot;b&quot; &#39;c&#39;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_escape_html_latin1_entities() {
        assert_eq!(escape_html("café"), "caf&#233;");
        assert_eq!(escape_html("\u{a0}\u{ff}"), "&#160;&#255;");
        assert_eq!(escape_html("Zoë & 日本"), "Zo&#235; &amp; 日本");
    }

    #[test]
    fn test_user_id_parsing() {
        assert_eq!(user_id(&RouteMatch { param: Some("12") }), Some(12));
        assert_eq!(user_id(&RouteMatch { param: Some("-3") }), Some(-3));
        assert_eq!(user_id(&RouteMatch { param: Some("abc") }), None);
        assert_eq!(user_id(&RouteMatch { param: Some("") }), None);
        assert_eq!(user_id(&RouteMatch { param: None }), None);
    }
}
