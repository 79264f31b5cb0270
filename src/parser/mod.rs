//! HTTP parser module.
//!
//! This module turns the raw bytes read from a socket into an [`HttpRequest`]:
//! request line, headers, and a body framed by `Content-Length`.

mod request;
mod method;
mod form;
mod error;

// Re-export public items
pub use request::{HttpRequest, MAX_HEAD_SIZE};
pub use method::Method;
pub use form::{parse_form, percent_decode, session_id_from_cookie};
pub use error::Error;

// Re-export the framing functions
pub use request::{find_head_end, parse_content_length, parse_request};
