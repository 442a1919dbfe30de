//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tracing layer)
//!     → GET {proxy.path}  → proxy::handler (relay)
//!     → GET {app route}   → static_files.rs (index document)
//!     → anything else     → static_files.rs (asset directory)
//!     → Send to client
//! ```

pub mod server;
pub mod static_files;

pub use server::{HttpServer, ServerError};
