//! WebRTC Signalling Relay
//!
//! Holds offers and answers in memory, keyed by room id, so two browser
//! peers can complete a session-description handshake over plain HTTP.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ─────────────▶ http::server ──▶ middleware (trace, request id, cors,
//!                                        timeout)
//!                                          │
//!                                          ▼
//!                                    routing::RouteTable
//!                                          │ Action
//!                                          ▼
//!     Client Response               http::handlers ──▶ store::RoomStore
//!     ◀───────────── http::response ◀──────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use signal_relay::config::{load_config, validate_config, ConfigError, RelayConfig};
use signal_relay::lifecycle::Shutdown;
use signal_relay::observability::{logging, metrics};
use signal_relay::{HttpServer, RoomStore};

#[derive(Parser)]
#[command(name = "signal-relay")]
#[command(version, about = "In-memory WebRTC offer/answer signalling relay", long_about = None)]
struct Args {
    /// TOML configuration file; every setting has a default.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind (overrides the config file).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides the config file).
    #[arg(short, long)]
    port: Option<u16>,
}

fn resolve_config(args: &Args) -> Result<RelayConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };

    if let Some(host) = &args.host {
        config.listener.host = host.clone();
    }
    if let Some(port) = args.port {
        config.listener.port = port;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    logging::init(&config.observability);

    tracing::info!("signal-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        host = %config.listener.host,
        port = config.listener.port,
        prefix = %config.signalling.prefix,
        allow_offer_delete = config.signalling.allow_offer_delete,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener =
        TcpListener::bind((config.listener.host.as_str(), config.listener.port)).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config, RoomStore::new());
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
