//! Feed relay library.
//!
//! Serves a static feed-reader front-end and relays `GET /proxy` requests
//! to a caller-supplied URL, copying status, headers and body through.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
