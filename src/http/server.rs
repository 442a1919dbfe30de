//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the proxy route and static assets
//! - Wire up middleware (request tracing)
//! - Build the shared outbound client once
//! - Serve connections until shutdown is signalled

use axum::{http::header::InvalidHeaderName, routing::get, Router};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::RelayConfig;
use crate::http::static_files;
use crate::lifecycle::shutdown;
use crate::proxy::{build_client, proxy_handler, HeaderPolicy, ProxyState, TargetExtractor};

/// Errors raised while assembling the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The outbound client could not be initialized (e.g. TLS backend).
    #[error("failed to build outbound client: {0}")]
    Client(#[from] reqwest::Error),

    /// Configured target header is not a valid header name.
    #[error("invalid target header name: {0}")]
    HeaderName(#[from] InvalidHeaderName),
}

/// HTTP server for the feed relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, ServerError> {
        let state = ProxyState {
            client: build_client(&config.proxy, &config.timeouts)?,
            extractor: TargetExtractor::from_config(&config.proxy)?,
            policy: HeaderPolicy {
                strip_hop_by_hop: config.proxy.strip_hop_by_hop,
            },
        };

        tracing::debug!(
            path = %config.proxy.path,
            target_source = ?config.proxy.target_source,
            strip_hop_by_hop = config.proxy.strip_hop_by_hop,
            "Proxy route configured"
        );

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RelayConfig, state: ProxyState) -> Router {
        Router::new()
            .route(&config.proxy.path, get(proxy_handler))
            .with_state(state)
            .merge(static_files::router(&config.static_files))
            .layer(TraceLayer::new_for_http())
    }

    /// A handle onto the assembled router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            static_root = %self.config.static_files.root,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}
