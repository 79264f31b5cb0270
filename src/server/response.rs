//! HTTP response types and serialization.

use std::fmt;

/// The status codes this server answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok = 200,
    BadRequest = 400,
    NotFound = 404,
    UnsupportedMediaType = 415,
    InternalServerError = 500,
}

impl StatusCode {
    /// The numeric code.
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Get the reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        reason_phrase(self.as_u16())
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

/// Reason phrase for a numeric status; codes outside the table read `Unknown`.
pub fn reason_phrase(code: u16) -> &'static str {
    match code {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        415 => "Unsupported Media Type",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// Represents an HTTP response.
///
/// `Content-Length` is not stored; [`HttpResponse::to_bytes`] derives it from
/// the body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// The HTTP status code
    pub status: StatusCode,
    /// The media type, sent with `; charset=UTF-8` appended
    pub content_type: String,
    /// Raw header lines sent verbatim, in order (without CRLF)
    pub extra_headers: Vec<String>,
    /// The response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a new plain-text HTTP response with the given status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: "text/plain".to_string(),
            extra_headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// A `200 OK` plain-text response.
    pub fn text(body: impl Into<String>) -> Self {
        Self::new(StatusCode::Ok).with_body_string(body)
    }

    /// A `200 OK` HTML response.
    pub fn html(body: impl Into<String>) -> Self {
        Self::new(StatusCode::Ok)
            .with_content_type("text/html")
            .with_body_string(body)
    }

    /// Set the response body with a string.
    pub fn with_body_string(mut self, body: impl Into<String>) -> Self {
        self.body = body.into().into_bytes();
        self
    }

    /// Set the response body with bytes.
    pub fn with_body_bytes(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Append a raw header line, e.g. `Set-Cookie: a=b`.
    pub fn with_header_line(mut self, line: impl Into<String>) -> Self {
        self.extra_headers.push(line.into());
        self
    }

    /// Set the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Check whether an extra header line starts with `prefix`.
    pub fn has_header_line(&self, prefix: &str) -> bool {
        self.extra_headers.iter().any(|line| line.starts_with(prefix))
    }

    /// Convert the response to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut head = format!(
            "HTTP/1.1 {status}\r\nContent-Type: {content_type}; charset=UTF-8\r\nContent-Length: {length}\r\n",
            status = self.status,
            content_type = self.content_type,
            length = self.body.len(),
        );

        for line in &self.extra_headers {
            head.push_str(line);
            head.push_str("\r\n");
        }

        head.push_str("Connection: close\r\n\r\n");

        let mut bytes = head.into_bytes();
        bytes.extend_from_slice(&self.body);
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_reason_phrase() {
        assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
        assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
        assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
        assert_eq!(StatusCode::UnsupportedMediaType.reason_phrase(), "Unsupported Media Type");
        assert_eq!(StatusCode::InternalServerError.reason_phrase(), "Internal Server Error");
        assert_eq!(reason_phrase(418), "Unknown");
    }

    #[test]
    fn test_serialization_layout() {
        let response = HttpResponse::text("hi")
            .with_header_line("Set-Cookie: userId=12345; Path=/; HttpOnly");
        let bytes = response.to_bytes();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "HTTP/1.1 200 OK\r\n\
             Content-Type: text/plain; charset=UTF-8\r\n\
             Content-Length: 2\r\n\
             Set-Cookie: userId=12345; Path=/; HttpOnly\r\n\
             Connection: close\r\n\
             \r\n\
             hi"
        );
    }

    #[test]
    fn test_content_length_counts_bytes() {
        let response = HttpResponse::text("héllo ✓");
        let text = String::from_utf8(response.to_bytes()).unwrap();
        assert!(text.contains("Content-Length: 10\r\n"));
    }

    #[test]
    fn test_has_header_line() {
        let response = HttpResponse::new(StatusCode::NotFound).with_header_line("Set-Cookie: sessionId=x");
        assert!(response.has_header_line("Set-Cookie: sessionId="));
        assert!(!response.has_header_line("Set-Cookie: userId="));
    }
}
