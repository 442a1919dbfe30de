//! Feed relay.
//!
//! ```text
//!     Browser ──▶ GET /proxy?u=<feed> ──▶ relay ──▶ GET <feed> ──▶ Origin
//!     Browser ◀── status/headers/body ◀── relay ◀── response   ◀── Origin
//!
//!     Browser ──▶ GET /, /feed/{id}, ... ──▶ static assets / index document
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use feed_relay::config::{read_config, validate_config, ConfigError, RelayConfig, TargetSource};
use feed_relay::http::HttpServer;
use feed_relay::lifecycle::{signals, Shutdown};
use feed_relay::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "feed-relay")]
#[command(about = "Static feed reader host with a byte-transparent fetch relay", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, e.g. 0.0.0.0:5000.
    #[arg(short, long)]
    bind: Option<String>,

    /// Directory holding the front-end assets.
    #[arg(long)]
    static_dir: Option<String>,

    /// Where the proxy endpoint reads its target URL from.
    #[arg(long, value_enum)]
    target_source: Option<TargetSource>,
}

impl Cli {
    fn load(&self) -> Result<RelayConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => RelayConfig::default(),
        };

        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
        if let Some(dir) = &self.static_dir {
            config.static_files.root = dir.clone();
        }
        if let Some(source) = self.target_source {
            config.proxy.target_source = source;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.load()?;

    logging::init(&config.observability);

    tracing::info!("feed-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        static_root = %config.static_files.root,
        proxy_path = %config.proxy.path,
        target_source = ?config.proxy.target_source,
        upstream_timeout_secs = ?config.timeouts.upstream_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    tokio::spawn(signals::forward_to(shutdown));

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
