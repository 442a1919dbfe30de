//! Proxy error taxonomy and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Body sent when no target URL was supplied.
pub const MISSING_TARGET_BODY: &str = "bad URL";

/// Errors that terminate a single proxy invocation.
///
/// Every variant is rendered as a plain-text response; none is retried.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Target parameter/header absent or empty.
    #[error("bad URL")]
    MissingTarget,

    /// Target present but not an absolute URL.
    #[error("{0}")]
    InvalidTarget(#[from] url::ParseError),

    /// Outbound request could not be assembled (e.g. target without a host).
    #[error("{0}")]
    RequestConstruction(reqwest::Error),

    /// Transport failure talking to the target origin.
    #[error("{0}")]
    Upstream(reqwest::Error),
}

impl ProxyError {
    /// Status code surfaced to the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingTarget | ProxyError::InvalidTarget(_) => StatusCode::BAD_REQUEST,
            ProxyError::RequestConstruction(_) | ProxyError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::MissingTarget => "missing_target",
            ProxyError::InvalidTarget(_) => "invalid_target",
            ProxyError::RequestConstruction(_) => "request_construction",
            ProxyError::Upstream(_) => "upstream",
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
