//! A minimal HTTP/1.1 server with cookie sessions and an in-memory user store.
//!
//! The server reads raw bytes off each socket, parses them itself, resolves a
//! session id from the `Cookie` header, routes by method and path, and writes
//! a `Connection: close` response.
//!
//! # Features
//!
//! - Request parsing with `Content-Length` body framing
//! - Session ids carried in a `sessionId` cookie, generated on first contact
//! - Static files served from a root directory, shadowing named routes
//! - Session read/write, form echo, and user CRUD routes
//! - Mutex-guarded session and user stores shared by every connection task
//!
//! # Examples
//!
//! ## Parsing a request
//!
//! ```
//! use minihttpd::{parse_request, Method};
//!
//! let raw = b"POST /users HTTP/1.1\r\nContent-Type: text/plain\r\nContent-Length: 5\r\n\r\nCarol";
//! let request = parse_request(raw).unwrap();
//!
//! assert_eq!(request.method, Method::POST);
//! assert_eq!(request.content_type, "text/plain");
//! assert_eq!(request.body, b"Carol");
//! ```
//!
//! ## Serving a request without a socket
//!
//! ```
//! use minihttpd::{parse_request, AppState, HttpServer, Router};
//!
//! # tokio_test_block(async {
//! let router = Router::with_default_routes("wwwroot");
//! let state = AppState::new();
//!
//! let request = parse_request(b"GET /users/1 HTTP/1.1\r\n\r\n").unwrap();
//! let response = HttpServer::respond(request, &router, &state).await;
//!
//! assert_eq!(response.body, b"User 1 is Alice");
//! // A first request without a cookie gets a session id
//! assert!(response.has_header_line("Set-Cookie: sessionId="));
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
//! # }
//! ```
//!
//! ## Running the server
//!
//! ```no_run
//! use minihttpd::{HttpServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), minihttpd::ServerError> {
//!     let server = HttpServer::new(ServerConfig::loopback(8080, "wwwroot"));
//!     server.start().await
//! }
//! ```

// Export the parser module
pub mod parser;

// Export the shared stores
pub mod store;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use parser::{Error as ParserError, HttpRequest, Method, parse_request};
pub use store::{AppState, SessionStore, UserStore};
pub use server::{Error as ServerError, HttpResponse, HttpServer, Router, ServerConfig, StatusCode};
