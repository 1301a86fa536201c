//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate URLs and bind addresses parse
//! - Validate value ranges (timeouts > 0, page sizes > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: AtlasConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::AtlasConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field}: invalid URL '{value}'")]
    InvalidUrl { field: &'static str, value: String },

    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

/// Check `config`, collecting every problem found.
pub fn validate_config(config: &AtlasConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.content.api_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        _ => errors.push(ValidationError::InvalidUrl {
            field: "content.api_url",
            value: config.content.api_url.clone(),
        }),
    }

    if config.content.timeout_secs == 0 {
        errors.push(ValidationError::Zero { field: "content.timeout_secs" });
    }
    if config.content.category_page_size == 0 {
        errors.push(ValidationError::Zero { field: "content.category_page_size" });
    }
    if config.content.shop_page_size == 0 {
        errors.push(ValidationError::Zero { field: "content.shop_page_size" });
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero { field: "server.request_timeout_secs" });
    }

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "server.bind_address",
            value: config.server.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AtlasConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AtlasConfig::default();
        config.content.api_url = "ftp://example.com".into();
        config.content.timeout_secs = 0;
        config.server.bind_address = "not-an-address".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::Zero { field: "content.timeout_secs" }));
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = AtlasConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
