//! Shared outbound HTTP client.
//!
//! One client is built at startup and cloned into every handler; clones
//! share the same connection pool.

use std::time::Duration;

use crate::config::{ProxyRouteConfig, TimeoutConfig};

/// Build the outbound client.
///
/// No transparent decompression is enabled, so encoded bodies are relayed
/// as received. Redirects follow the client's default policy.
pub fn build_client(
    proxy: &ProxyRouteConfig,
    timeouts: &TimeoutConfig,
) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder();

    if let Some(secs) = timeouts.connect_secs {
        builder = builder.connect_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = timeouts.upstream_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if !proxy.use_system_proxy {
        builder = builder.no_proxy();
    }

    builder.build()
}
