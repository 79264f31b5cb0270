//! HTTP server implementation.

use std::sync::Arc;
use std::net::SocketAddr;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tokio::time::{self, Duration};
use tokio::signal;
use log::{debug, info, warn, error};

use crate::parser::{find_head_end, parse_content_length, parse_request, Error as ParserError, HttpRequest, MAX_HEAD_SIZE};
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::response::{HttpResponse, StatusCode};
use crate::server::router::Router;
use crate::server::session::{resolve_session, session_cookie};
use crate::store::AppState;

const HEAD_TERMINATOR_LEN: usize = 4;

/// An HTTP server.
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
    /// The route table.
    pub router: Arc<Router>,
    /// The shared stores.
    pub state: Arc<AppState>,
}

impl HttpServer {
    /// Create a new HTTP server with the default routes and fresh stores.
    pub fn new(config: ServerConfig) -> Self {
        let router = Router::with_default_routes(config.static_root.clone());
        Self::with_router(config, router, Arc::new(AppState::new()))
    }

    /// Create a server around an existing router and state.
    pub fn with_router(config: ServerConfig, router: Router, state: Arc<AppState>) -> Self {
        Self {
            config,
            router: Arc::new(router),
            state,
        }
    }

    /// Log the static root and registered endpoints.
    fn display_server_info(&self) {
        info!("Serving static files from {root}", root = self.router.static_root().display());
        if !self.router.static_root().is_dir() {
            warn!("Static root {root} does not exist; only named routes will match", root = self.router.static_root().display());
        }

        info!("Registered endpoints:");
        for route in self.router.routes() {
            info!("  {method} {pattern}", method = route.method, pattern = route.pattern);
        }
    }

    /// Set up the TCP listener.
    async fn setup_listener(&self) -> Result<TcpListener, Error> {
        let listener = TcpListener::bind(&self.config.addr).await?;
        info!("Server listening on http://{addr}", addr = listener.local_addr()?);
        Ok(listener)
    }

    /// Set up a Ctrl+C handler for graceful shutdown.
    fn setup_ctrl_c_handler(shutdown_tx: mpsc::Sender<()>, tasks: &mut JoinSet<()>) {
        tasks.spawn(async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl+C, initiating graceful shutdown");
                    let _ = shutdown_tx.send(()).await;
                }
                Err(e) => {
                    error!("Error setting up Ctrl+C handler: {e}");
                }
            }
        });
    }

    /// Hand a new connection to its own worker task.
    async fn handle_new_connection(&self, mut socket: TcpStream, addr: SocketAddr, semaphore: &Arc<Semaphore>, tasks: &mut JoinSet<()>) {
        // Try to acquire a permit from the semaphore
        let permit = match semaphore.clone().try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Connection limit reached, rejecting connection from {addr}");
                let config = self.config.clone();
                tasks.spawn(async move {
                    if let Err(e) = Self::reject_connection(&mut socket, &config).await {
                        error!("Abandoning rejected connection from {addr}: {e}");
                    }
                });
                return;
            }
        };

        debug!("Accepted connection from {addr}");
        let router = self.router.clone();
        let state = self.state.clone();
        let config = self.config.clone();

        tasks.spawn(async move {
            // The permit is dropped when the task completes, releasing the semaphore slot
            let _permit = permit;

            if let Err(e) = Self::handle_connection(&mut socket, &router, &state, &config).await {
                match e {
                    Error::Socket(_) | Error::Timeout => error!("Abandoning connection from {addr}: {e}"),
                    _ => warn!("Rejected request from {addr}: {e}"),
                }
            }
        });
    }

    /// Log an accept failure and back off briefly. The loop keeps running.
    async fn handle_accept_error(e: std::io::Error) {
        error!("Error accepting connection: {e}");
        time::sleep(Duration::from_millis(100)).await;
    }

    /// Perform graceful shutdown.
    async fn perform_shutdown(tasks: &mut JoinSet<()>) {
        info!("Waiting for {len} active connections to complete...", len = tasks.len());
        let shutdown_timeout = Duration::from_secs(30);
        let _ = time::timeout(shutdown_timeout, async {
            while let Some(res) = tasks.join_next().await {
                if let Err(e) = res {
                    error!("Task failed during shutdown: {e}");
                }
            }
        }).await;

        info!("Server shutdown complete");
    }

    /// Bind the configured address and serve until Ctrl+C.
    pub async fn start(&self) -> Result<(), Error> {
        self.display_server_info();
        let listener = self.setup_listener().await?;
        self.serve(listener).await
    }

    /// Serve connections from an already bound listener until Ctrl+C.
    pub async fn serve(&self, listener: TcpListener) -> Result<(), Error> {
        // Create a semaphore to limit concurrent connections
        let semaphore = Arc::new(Semaphore::new(self.config.max_connections));

        // Create a channel for shutdown signaling
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        // Use JoinSet to keep track of all spawned tasks
        let mut tasks = JoinSet::new();

        Self::setup_ctrl_c_handler(shutdown_tx, &mut tasks);

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("Shutting down server...");
                    break;
                }

                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((socket, addr)) => {
                            self.handle_new_connection(socket, addr, &semaphore, &mut tasks).await;
                        }
                        Err(e) => Self::handle_accept_error(e).await,
                    }
                }
            }

            // Reap finished workers so the set does not grow without bound
            while tasks.try_join_next().is_some() {}
        }

        Self::perform_shutdown(&mut tasks).await;

        Ok(())
    }

    /// Handle a single connection: read one request, answer it, close.
    ///
    /// Client errors are answered with a response and then returned. Socket
    /// faults and timeouts are returned without a response.
    pub async fn handle_connection(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        router: &Router,
        state: &AppState,
        config: &ServerConfig,
    ) -> Result<(), Error> {
        let outcome = match Self::read_request(&mut *socket, config).await {
            Ok(raw) if raw.is_empty() => return Ok(()), // Connection closed
            Ok(raw) => parse_request(&raw).map_err(Error::from),
            Err(e @ (Error::Socket(_) | Error::Timeout)) => return Err(e),
            Err(e) => Err(e),
        };

        let (response, result) = match outcome {
            Ok(request) => (Self::respond(request, router, state).await, Ok(())),
            Err(e) => {
                let response = HttpResponse::new(e.status()).with_body_string(format!("Error parsing request: {e}"));
                (response, Err(e))
            }
        };

        Self::write_response(&mut *socket, &response, config.io_timeout).await?;
        result
    }

    /// Answer a connection over the limit with a `500`.
    ///
    /// The request is consumed first; closing a socket with unread input
    /// resets it and the client would lose the reply.
    pub async fn reject_connection(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        config: &ServerConfig,
    ) -> Result<(), Error> {
        match Self::read_request(&mut *socket, config).await {
            Err(e @ (Error::Socket(_) | Error::Timeout)) => return Err(e),
            Ok(raw) if raw.is_empty() => return Ok(()),
            _ => {}
        }

        let response = HttpResponse::new(StatusCode::InternalServerError)
            .with_body_string("Server is at capacity, please try again later");
        Self::write_response(&mut *socket, &response, config.io_timeout).await
    }

    /// Run the request pipeline: session resolution, dispatch, session cookie.
    pub async fn respond(mut request: HttpRequest, router: &Router, state: &AppState) -> HttpResponse {
        let new_session = resolve_session(&mut request);
        let mut response = router.dispatch(&request, state).await;

        if new_session && !response.has_header_line("Set-Cookie: sessionId=") {
            response = response.with_header_line(session_cookie(&request.session_id));
        }

        info!("{method} {path} -> {status}", method = request.method, path = request.path, status = response.status);
        response
    }

    /// Read one request: the head up to the blank line, then `Content-Length` body bytes.
    ///
    /// Without `Content-Length` the body is whatever arrived with the head.
    /// Returns an empty buffer if the peer closed before sending anything.
    pub async fn read_request(socket: &mut (impl AsyncRead + Unpin), config: &ServerConfig) -> Result<Vec<u8>, Error> {
        let mut buf = Vec::with_capacity(config.read_buffer_size);
        let mut chunk = vec![0; config.read_buffer_size.max(1)];
        let mut expected_total: Option<usize> = None;

        loop {
            if expected_total.is_some_and(|total| buf.len() >= total) {
                break;
            }

            let n = time::timeout(config.io_timeout, socket.read(&mut chunk))
                .await
                .map_err(|_| Error::Timeout)??;
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            if expected_total.is_some() {
                continue;
            }

            match find_head_end(&buf) {
                Some(end) => match parse_content_length(&buf[..end])? {
                    Some(length) if length > config.max_body_size => {
                        return Err(Error::InvalidPayload(format!(
                            "Request body of {length} bytes exceeds the {max} byte limit",
                            max = config.max_body_size
                        )));
                    }
                    Some(length) => expected_total = Some(end + HEAD_TERMINATOR_LEN + length),
                    None => break,
                },
                None if buf.len() > MAX_HEAD_SIZE => {
                    return Err(ParserError::HeadTooLarge(MAX_HEAD_SIZE).into());
                }
                None => {}
            }
        }

        Ok(buf)
    }

    async fn write_response(socket: &mut (impl AsyncWrite + Unpin), response: &HttpResponse, io_timeout: Duration) -> Result<(), Error> {
        time::timeout(io_timeout, async {
            socket.write_all(&response.to_bytes()).await?;
            socket.flush().await?;
            socket.shutdown().await
        })
        .await
        .map_err(|_| Error::Timeout)??;
        Ok(())
    }
}
