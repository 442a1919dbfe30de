//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, route paths and header names
//! - Validate value ranges (timeouts > 0)
//! - Detect the proxy route colliding with an app route
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderName;

use crate::config::schema::RelayConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Check a configuration, collecting every error.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.static_files.index.is_empty() {
        errors.push(ValidationError::new("static_files.index", "must not be empty"));
    }

    let proxy = &config.proxy;
    if !proxy.path.starts_with('/') {
        errors.push(ValidationError::new("proxy.path", "must start with '/'"));
    }
    for (i, route) in config.static_files.app_routes.iter().enumerate() {
        if config.static_files.app_routes[..i].contains(route) {
            errors.push(ValidationError::new(
                "static_files.app_routes",
                format!("'{}' is listed twice", route),
            ));
        }
        if !route.starts_with('/') {
            errors.push(ValidationError::new(
                "static_files.app_routes",
                format!("'{}' must start with '/'", route),
            ));
        }
        if *route == proxy.path {
            errors.push(ValidationError::new(
                "static_files.app_routes",
                format!("'{}' collides with proxy.path", route),
            ));
        }
    }
    if proxy.query_param.is_empty() {
        errors.push(ValidationError::new("proxy.query_param", "must not be empty"));
    }
    if HeaderName::from_bytes(proxy.header_name.as_bytes()).is_err() {
        errors.push(ValidationError::new(
            "proxy.header_name",
            format!("'{}' is not a valid header name", proxy.header_name),
        ));
    }

    if config.timeouts.connect_secs == Some(0) {
        errors.push(ValidationError::new("timeouts.connect_secs", "must be greater than 0"));
    }
    if config.timeouts.upstream_secs == Some(0) {
        errors.push(ValidationError::new("timeouts.upstream_secs", "must be greater than 0"));
    }

    let observability = &config.observability;
    if !LOG_LEVELS.contains(&observability.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", observability.log_level),
        ));
    }
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
