//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP layer + proxy handler produce:
//!     → logging.rs (structured log events, one `relay` span per request)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
