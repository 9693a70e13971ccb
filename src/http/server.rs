//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all signalling handler
//! - Wire up middleware (tracing, request ID, CORS, timeout)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request, middleware, routing::any, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::handlers::signal_handler;
use crate::http::middleware::cors_middleware;
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::lifecycle::ShutdownSignal;
use crate::routing::RouteTable;
use crate::store::RoomStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: RoomStore,
    pub routes: Arc<RouteTable>,
    /// Upper bound on a PUT body, enforced while reading it.
    pub max_body_bytes: usize,
}

/// HTTP server for the signalling relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server serving `store` with the given configuration.
    pub fn new(config: RelayConfig, store: RoomStore) -> Self {
        let state = AppState {
            store,
            routes: Arc::new(RouteTable::from_config(&config.signalling)),
            max_body_bytes: config.signalling.max_body_bytes,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        let layers = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        request_id = %request_id(request),
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                }),
            )
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(middleware::from_fn(cors_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )));

        Router::new()
            .route("/{*path}", any(signal_handler))
            .route("/", any(signal_handler))
            .with_state(state)
            .layer(layers)
    }

    /// The assembled router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            prefix = %self.config.signalling.prefix,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.wait().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}
