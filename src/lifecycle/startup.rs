//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the content service from configuration
//! - Compile the site's route table
//! - Hand both to the page loader
//!
//! # Design Decisions
//! - Fail fast on route errors; they are programming mistakes
//! - Subsystems initialize in order, not concurrently

use std::sync::Arc;

use crate::config::AtlasConfig;
use crate::content::ContentService;
use crate::navigation::{NavigationMode, NavigationSource};
use crate::routing::{RouteError, RouteTable};
use crate::views::{site_routes, PageLoader, Session, SessionError, ViewId};

/// Everything a front end needs to serve the site.
#[derive(Debug, Clone)]
pub struct Site {
    pub mode: NavigationMode,
    pub content: Arc<ContentService>,
    pub routes: Arc<RouteTable<ViewId>>,
    pub loader: PageLoader,
}

impl Site {
    pub fn bootstrap(config: &AtlasConfig) -> Result<Self, RouteError> {
        let content = Arc::new(ContentService::from_config(&config.content));
        let routes = Arc::new(site_routes()?);
        let loader = PageLoader::new(
            Arc::clone(&content),
            config.content.category_page_size,
            config.content.shop_page_size,
        );

        tracing::info!(
            mode = %config.navigation.mode,
            api_url = %config.content.api_url,
            fallback = ?content.policy(),
            routes = routes.len(),
            "Site initialized"
        );

        Ok(Self {
            mode: config.navigation.mode,
            content,
            routes,
            loader,
        })
    }

    /// Start a browsing session on `source`.
    pub fn session(&self, source: Arc<dyn NavigationSource>) -> Result<Session, SessionError> {
        Session::start(source, self.mode, self.routes.as_ref().clone(), self.loader.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FallbackPolicy;

    #[test]
    fn test_bootstrap_offline() {
        let mut config = AtlasConfig::default();
        config.content.fallback = FallbackPolicy::Always;
        let site = Site::bootstrap(&config).unwrap();
        assert_eq!(site.routes.len(), 9);
        assert_eq!(site.content.policy(), FallbackPolicy::Always);
    }
}
