//! Server configuration.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// The port used when none is given.
pub const DEFAULT_PORT: u16 = 8080;

/// The static root used when none is given.
pub const DEFAULT_STATIC_ROOT: &str = "wwwroot";

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The address to bind to.
    pub addr: SocketAddr,
    /// Directory GET requests are served from when a matching file exists.
    pub static_root: PathBuf,
    /// The maximum number of concurrent connections.
    pub max_connections: usize,
    /// The read buffer size.
    pub read_buffer_size: usize,
    /// Largest request body accepted, in bytes.
    pub max_body_size: usize,
    /// Bound on each socket read and write.
    pub io_timeout: Duration,
}

impl ServerConfig {
    /// Loopback on `port`, serving files from `static_root`.
    pub fn loopback(port: u16, static_root: impl Into<PathBuf>) -> Self {
        Self {
            addr: SocketAddr::from((Ipv4Addr::LOCALHOST, port)),
            static_root: static_root.into(),
            ..Self::default()
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            static_root: PathBuf::from(DEFAULT_STATIC_ROOT),
            max_connections: 1024,
            read_buffer_size: 4096,
            max_body_size: 1024 * 1024,
            io_timeout: Duration::from_secs(30),
        }
    }
}
