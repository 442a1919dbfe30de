//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the feed relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Static asset serving.
    pub static_files: StaticFilesConfig,

    /// Proxy endpoint settings.
    pub proxy: ProxyRouteConfig,

    /// Outbound timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:5000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
        }
    }
}

/// Static asset configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory served for every path not claimed by another route.
    pub root: String,

    /// Index document, relative to `root`.
    pub index: String,

    /// Client-side routes that always receive the index document.
    /// Patterns use axum syntax, e.g. `/feed/{id}`.
    pub app_routes: Vec<String>,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: "./static".to_string(),
            index: "index.html".to_string(),
            app_routes: vec![
                "/feed-list".to_string(),
                "/add-feed".to_string(),
                "/feed/{id}".to_string(),
                "/article/{id}".to_string(),
            ],
        }
    }
}

/// Where the proxy endpoint reads its target URL from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TargetSource {
    /// Query parameter, e.g. `/proxy?u=<url>`.
    Query,
    /// Request header, e.g. `Rss-Url: <url>`.
    Header,
}

/// Proxy endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyRouteConfig {
    /// Route path of the proxy endpoint.
    pub path: String,

    /// Target extraction strategy.
    pub target_source: TargetSource,

    /// Query parameter name used by [`TargetSource::Query`].
    pub query_param: String,

    /// Header name used by [`TargetSource::Header`].
    pub header_name: String,

    /// Drop hop-by-hop headers in both directions.
    pub strip_hop_by_hop: bool,

    /// Honor HTTP_PROXY / HTTPS_PROXY / NO_PROXY for outbound requests.
    pub use_system_proxy: bool,
}

impl Default for ProxyRouteConfig {
    fn default() -> Self {
        Self {
            path: "/proxy".to_string(),
            target_source: TargetSource::Query,
            query_param: "u".to_string(),
            header_name: "Rss-Url".to_string(),
            strip_hop_by_hop: false,
            use_system_proxy: true,
        }
    }
}

/// Outbound timeouts. Unset means the client never gives up on its own.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: Option<u64>,

    /// Total outbound timeout (headers and body) in seconds.
    pub upstream_secs: Option<u64>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
