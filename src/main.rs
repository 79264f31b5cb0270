//! Command-line entry point: serve on the loopback address.

use std::path::PathBuf;

use clap::Parser;
use log::error;

use minihttpd::server::{DEFAULT_PORT, DEFAULT_STATIC_ROOT};
use minihttpd::{HttpServer, ServerConfig};

/// A minimal HTTP/1.1 server with cookie sessions and an in-memory user store.
#[derive(Debug, Parser)]
#[command(name = "minihttpd", version, about)]
struct Args {
    /// Port to listen on (the server always binds 127.0.0.1)
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Directory to serve static files from
    #[arg(short, long, default_value = DEFAULT_STATIC_ROOT)]
    root: PathBuf,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let server = HttpServer::new(ServerConfig::loopback(args.port, args.root));

    if let Err(e) = server.start().await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}
