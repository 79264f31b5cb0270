//! Error types for the HTTP server.

use thiserror::Error;

use crate::parser::Error as ParserError;
use crate::server::response::{HttpResponse, StatusCode};

/// Errors that can occur while serving a connection.
#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be parsed.
    #[error("Malformed request: {0}")]
    MalformedRequest(#[from] ParserError),

    /// The route requires a content type the request did not declare.
    #[error("Unsupported Content-Type: {0}")]
    UnsupportedContentType(String),

    /// The body could not be decoded or lacks a required field.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// No static file or route matched.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A static file existed but could not be read.
    #[error("Internal server error: {0}")]
    InternalError(String),

    /// I/O error on the connection.
    #[error("Socket fault: {0}")]
    Socket(#[from] std::io::Error),

    /// The peer did not send or accept data in time.
    #[error("Connection timed out")]
    Timeout,
}

impl Error {
    /// The status this error is answered with.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::MalformedRequest(_) | Error::InvalidPayload(_) => StatusCode::BadRequest,
            Error::UnsupportedContentType(_) => StatusCode::UnsupportedMediaType,
            Error::NotFound(_) => StatusCode::NotFound,
            Error::InternalError(_) | Error::Socket(_) | Error::Timeout => StatusCode::InternalServerError,
        }
    }

    /// Render the error as a response for the client.
    pub fn into_response(self) -> HttpResponse {
        match self {
            Error::NotFound(_) => HttpResponse::new(StatusCode::NotFound)
                .with_content_type("text/html")
                .with_body_string("<html><body><h1>404 - File Not Found</h1></body></html>"),
            Error::UnsupportedContentType(_) => HttpResponse::new(StatusCode::UnsupportedMediaType)
                .with_body_string("Unsupported Content-Type"),
            Error::InvalidPayload(message) => HttpResponse::new(StatusCode::BadRequest)
                .with_body_string(message),
            other => HttpResponse::new(other.status()).with_body_string(other.to_string()),
        }
    }
}
