//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the site
//! runtime. All types derive Serde traits for deserialization from TOML.

use serde::{Deserialize, Serialize};

use crate::content::FallbackPolicy;
use crate::navigation::NavigationMode;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AtlasConfig {
    /// Client router settings.
    pub navigation: NavigationConfig,

    /// Headless content API and fallback catalog.
    pub content: ContentConfig,

    /// Preview server settings.
    pub server: ServerConfig,

    /// Logging and metrics.
    pub observability: ObservabilityConfig,
}

/// Client router configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct NavigationConfig {
    /// `history` (clean URLs) or `hash`. Read once at startup.
    pub mode: NavigationMode,
}

/// Content API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Site URL; the Content API lives under `/ghost/api/content/`.
    /// Relative image URLs are made absolute against it.
    pub api_url: String,

    /// Content API key (public, read-only).
    pub api_key: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// When to serve the local catalog instead of the API.
    pub fallback: FallbackPolicy,

    /// Optional JSON file replacing the built-in fallback catalog.
    pub fallback_catalog: Option<String>,

    /// Posts per page on category pages.
    pub category_page_size: u32,

    /// Product cards shown on the shop page.
    pub shop_page_size: usize,

    /// Shortest trimmed query that triggers a search.
    pub search_min_chars: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            api_url: "https://slaymua.com".to_string(),
            api_key: String::new(),
            timeout_secs: 10,
            fallback: FallbackPolicy::OnFailure,
            fallback_catalog: None,
            category_page_size: 12,
            shop_page_size: 12,
            search_min_chars: 3,
        }
    }
}

/// Preview server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:3000").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive.
    pub log_level: String,

    /// Include module targets in log lines.
    pub log_targets: bool,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_targets: false,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AtlasConfig::default();
        assert_eq!(config.navigation.mode, NavigationMode::History);
        assert_eq!(config.content.category_page_size, 12);
        assert_eq!(config.content.fallback, FallbackPolicy::OnFailure);
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_toml() {
        let config: AtlasConfig = toml::from_str(
            r#"
            [navigation]
            mode = "hash"

            [content]
            fallback = "always"
            "#,
        )
        .unwrap();
        assert_eq!(config.navigation.mode, NavigationMode::Hash);
        assert_eq!(config.content.fallback, FallbackPolicy::Always);
        assert_eq!(config.content.timeout_secs, 10);
        assert_eq!(config.server.bind_address, "127.0.0.1:3000");
    }
}
