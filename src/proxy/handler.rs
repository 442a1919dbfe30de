//! The proxy handler.
//!
//! Each invocation is a linear pipeline:
//! ```text
//! extract target → validate → build GET → execute → relay status/headers/body
//! ```
//! Any failure before the relay step short-circuits to a plain-text error
//! response. Once headers are relayed the body is streamed as it arrives;
//! a mid-stream failure aborts the client connection.

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Uri},
    response::{IntoResponse, Response},
};
use tracing::Instrument;
use url::Url;
use uuid::Uuid;

use crate::observability::metrics;
use crate::proxy::error::ProxyError;
use crate::proxy::headers::HeaderPolicy;
use crate::proxy::target::TargetExtractor;

/// State shared by every proxy invocation.
#[derive(Clone)]
pub struct ProxyState {
    /// Outbound client; clones share one connection pool.
    pub client: reqwest::Client,
    pub extractor: TargetExtractor,
    pub policy: HeaderPolicy,
}

/// Axum handler for the proxy route.
pub async fn proxy_handler(
    State(state): State<ProxyState>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("relay", %request_id);

    match relay(&state, &uri, &headers).instrument(span).await {
        Ok(response) => response,
        Err(err) => {
            metrics::record_rejected(err.kind(), err.status());
            err.into_response()
        }
    }
}

async fn relay(state: &ProxyState, uri: &Uri, headers: &HeaderMap) -> Result<Response, ProxyError> {
    let target = state.extractor.target(uri, headers).inspect_err(|err| {
        tracing::warn!(kind = err.kind(), error = %err, "Rejected proxy target");
    })?;

    tracing::debug!(url = %target, "Proxying request");

    let request = build_outbound(&state.client, target, headers, state.policy)?;
    let target = request.url().clone();

    let started = Instant::now();
    let upstream = state.client.execute(request).await.map_err(|err| {
        tracing::error!(url = %target, error = %err, "Upstream error");
        ProxyError::Upstream(err)
    })?;
    metrics::record_relayed(upstream.status(), started);

    tracing::info!(
        url = %target,
        status = upstream.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Relaying upstream response"
    );

    Ok(relay_response(upstream, state.policy))
}

/// Build the outbound GET for `target`, carrying the inbound headers.
pub fn build_outbound(
    client: &reqwest::Client,
    target: Url,
    inbound: &HeaderMap,
    policy: HeaderPolicy,
) -> Result<reqwest::Request, ProxyError> {
    client
        .get(target)
        .headers(policy.outbound(inbound))
        .build()
        .map_err(|err| {
            tracing::warn!(error = %err, "Failed to build outbound request");
            ProxyError::RequestConstruction(err)
        })
}

/// Turn the upstream response into the client response without buffering.
///
/// Dropping the returned body (client gone) drops the upstream response and
/// releases its connection.
pub fn relay_response(upstream: reqwest::Response, policy: HeaderPolicy) -> Response {
    let status = upstream.status();
    let mut headers = HeaderMap::with_capacity(upstream.headers().len());
    policy.copy(upstream.headers(), &mut headers);

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
