//! Header copying between inbound, outbound and relayed messages.
//!
//! # Design Decisions
//! - Headers are an ordered multimap; values are appended, never inserted,
//!   so repeated headers survive in order
//! - `Host` is never forwarded; the client derives it from the target
//! - Hop-by-hop stripping is opt-in (see [`HeaderPolicy`])

use axum::http::header::{self, HeaderName};
use axum::http::HeaderMap;

/// Headers scoped to a single connection (RFC 9110 §7.6.1).
static HOP_BY_HOP: [HeaderName; 9] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    HeaderName::from_static("proxy-connection"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Which headers survive a copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderPolicy {
    pub strip_hop_by_hop: bool,
}

impl HeaderPolicy {
    /// Append every permitted header of `src` onto `dst`.
    pub fn copy(&self, src: &HeaderMap, dst: &mut HeaderMap) {
        let connection_scoped = if self.strip_hop_by_hop {
            connection_tokens(src)
        } else {
            Vec::new()
        };

        for (name, value) in src {
            if self.strip_hop_by_hop
                && (HOP_BY_HOP.contains(name) || connection_scoped.contains(name))
            {
                continue;
            }
            dst.append(name.clone(), value.clone());
        }
    }

    /// Headers for the outbound request built from the inbound ones.
    pub fn outbound(&self, inbound: &HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(inbound.len());
        self.copy(inbound, &mut headers);
        headers.remove(header::HOST);
        headers
    }
}

/// Header names listed in `Connection` values.
fn connection_tokens(headers: &HeaderMap) -> Vec<HeaderName> {
    headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|token| HeaderName::from_bytes(token.trim().as_bytes()).ok())
        .collect()
}
