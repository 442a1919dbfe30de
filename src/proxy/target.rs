//! Target URL extraction and validation.
//!
//! The relay supports two mutually exclusive ways of naming the target:
//! a query parameter (`/proxy?u=<url>`) or a request header
//! (`Rss-Url: <url>`). One [`TargetExtractor`] is chosen at startup.

use axum::http::header::InvalidHeaderName;
use axum::http::{HeaderMap, HeaderName, Uri};
use url::Url;

use crate::config::{ProxyRouteConfig, TargetSource};
use crate::proxy::error::ProxyError;

/// Strategy for locating the target URL on an inbound request.
#[derive(Debug, Clone)]
pub enum TargetExtractor {
    /// First value of a query parameter.
    Query { param: String },
    /// First value of a request header.
    Header { name: HeaderName },
}

impl TargetExtractor {
    /// Build the extractor selected by the configuration.
    pub fn from_config(config: &ProxyRouteConfig) -> Result<Self, InvalidHeaderName> {
        Ok(match config.target_source {
            TargetSource::Query => Self::Query {
                param: config.query_param.clone(),
            },
            TargetSource::Header => Self::Header {
                name: HeaderName::from_bytes(config.header_name.as_bytes())?,
            },
        })
    }

    /// Return the raw target, or `None` when absent or empty.
    pub fn extract(&self, uri: &Uri, headers: &HeaderMap) -> Option<String> {
        let raw = match self {
            Self::Query { param } => uri.query().and_then(|query| {
                url::form_urlencoded::parse(query.as_bytes())
                    .find(|(key, _)| key == param.as_str())
                    .map(|(_, value)| value.into_owned())
            }),
            Self::Header { name } => headers
                .get(name)
                .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned()),
        };
        raw.filter(|target| !target.is_empty())
    }

    /// Extract and validate in one step.
    pub fn target(&self, uri: &Uri, headers: &HeaderMap) -> Result<Url, ProxyError> {
        let raw = self.extract(uri, headers).ok_or(ProxyError::MissingTarget)?;
        parse_target(&raw)
    }
}

/// Parse a raw target as an absolute URL.
///
/// No scheme allow-list and no private-address filtering are applied here.
pub fn parse_target(raw: &str) -> Result<Url, ProxyError> {
    Ok(Url::parse(raw)?)
}
