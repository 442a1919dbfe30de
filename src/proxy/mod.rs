//! Proxy subsystem.
//!
//! # Data Flow
//! ```text
//! GET /proxy (u=<url> | Rss-Url: <url>)
//!     → target.rs (extract + validate target URL)
//!     → headers.rs (copy inbound headers onto the outbound request)
//!     → client.rs (shared reqwest client, one attempt)
//!     → handler.rs (relay status, headers, streamed body)
//! ```
//!
//! # Design Decisions
//! - Byte-transparent: no decompression, no feed parsing, no caching
//! - No retries; a transport failure becomes a 500 with the error text
//! - No host allow-list: any absolute URL is fetched. Deployments exposed
//!   beyond localhost should front this with their own filtering.

pub mod client;
pub mod error;
pub mod handler;
pub mod headers;
pub mod target;

pub use client::build_client;
pub use error::ProxyError;
pub use handler::{proxy_handler, ProxyState};
pub use headers::HeaderPolicy;
pub use target::TargetExtractor;
