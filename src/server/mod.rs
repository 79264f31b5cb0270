//! HTTP server implementation for minihttpd.
//!
//! Each accepted connection runs on its own task through a fixed pipeline:
//! read and parse one request, resolve the session, dispatch to a static file
//! or a named route, write the response, close.

mod response;
mod config;
mod error;
mod handler;
mod handlers;
mod mime;
mod router;
mod session;
mod http_server;

// Re-export public items
pub use response::{reason_phrase, HttpResponse, StatusCode};
pub use config::{ServerConfig, DEFAULT_PORT, DEFAULT_STATIC_ROOT};
pub use error::Error;
pub use handler::{HandlerFn, PathPattern, Route, RouteMatch};
pub use handlers::{escape_html, STATIC_FILE_COOKIE};
pub use mime::{content_type_for, extension_for, DEFAULT_CONTENT_TYPE};
pub use router::Router;
pub use session::{resolve_session, session_cookie};
pub use http_server::HttpServer;
