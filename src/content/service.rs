//! Content service with fallback substitution.
//!
//! # Responsibilities
//! - Serve every content query the views make
//! - Substitute the fallback catalog on network failure or non-2xx
//! - Normalize posts and tags regardless of where they came from
//! - Tag every result with its origin
//!
//! # Design Decisions
//! - Never returns an error: "API down" looks like "API returned the catalog"
//! - The fallback policy is explicit so tests can pin the data source
//! - Raw failures are logged and counted, not surfaced

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ContentConfig;
use crate::content::client::{ContentResult, GhostClient};
use crate::content::fallback::FallbackCatalog;
use crate::content::types::{PaginatedPosts, Post, Tag};
use crate::observability::metrics;

const DEFAULT_SEARCH_MIN_CHARS: usize = 3;

/// When the fallback catalog is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Query the API; serve the catalog when it fails.
    #[default]
    OnFailure,
    /// Never touch the network; always serve the catalog.
    Always,
    /// API only; failures yield empty results tagged `Unavailable`.
    Never,
}

/// Where a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Remote,
    Fallback,
    Unavailable,
}

impl Origin {
    pub fn as_str(self) -> &'static str {
        match self {
            Origin::Remote => "remote",
            Origin::Fallback => "fallback",
            Origin::Unavailable => "unavailable",
        }
    }
}

/// A query result and its origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fetched<T> {
    pub data: T,
    pub origin: Origin,
}

impl<T> Fetched<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        Fetched {
            data: f(self.data),
            origin: self.origin,
        }
    }
}

/// Content queries for the views.
#[derive(Debug, Clone)]
pub struct ContentService {
    client: Option<GhostClient>,
    catalog: FallbackCatalog,
    site_url: String,
    policy: FallbackPolicy,
    search_min_chars: usize,
}

impl ContentService {
    /// Build from configuration. A client that cannot be constructed (bad
    /// URL, TLS backend failure) degrades to catalog-only operation.
    pub fn from_config(config: &ContentConfig) -> Self {
        let catalog = match config.fallback_catalog.as_deref() {
            Some(path) => FallbackCatalog::from_file(Path::new(path)).unwrap_or_else(|e| {
                tracing::warn!(path = %path, error = %e, "Cannot read fallback catalog, using built-in data");
                FallbackCatalog::builtin()
            }),
            None => FallbackCatalog::builtin(),
        };

        let client = if config.fallback == FallbackPolicy::Always {
            None
        } else {
            GhostClient::new(
                &config.api_url,
                config.api_key.clone(),
                Duration::from_secs(config.timeout_secs),
            )
            .map_err(|e| tracing::warn!(error = %e, "Content API client unavailable"))
            .ok()
        };

        Self::new(client, catalog, &config.api_url, config.fallback)
            .with_search_min_chars(config.search_min_chars)
    }

    pub fn new(
        client: Option<GhostClient>,
        catalog: FallbackCatalog,
        site_url: &str,
        policy: FallbackPolicy,
    ) -> Self {
        Self {
            client,
            catalog,
            site_url: site_url.to_string(),
            policy,
            search_min_chars: DEFAULT_SEARCH_MIN_CHARS,
        }
    }

    /// Shortest trimmed query that reaches the API or catalog.
    pub fn with_search_min_chars(mut self, min: usize) -> Self {
        self.search_min_chars = min;
        self
    }

    /// Catalog-only service.
    pub fn offline(catalog: FallbackCatalog, site_url: &str) -> Self {
        Self::new(None, catalog, site_url, FallbackPolicy::Always)
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// Journal feed (no shop entries).
    pub async fn list_posts(&self) -> Fetched<Vec<Post>> {
        let remote = self.remote().map(|c| c.posts());
        self.resolve("list_posts", remote, |c| c.posts())
            .await
            .map(|posts| self.normalize_posts(posts))
    }

    pub async fn get_post_by_slug(&self, slug: &str) -> Fetched<Option<Post>> {
        let remote = self.remote().map(|c| c.post_by_slug(slug));
        self.resolve("get_post_by_slug", remote, |c| c.post_by_slug(slug))
            .await
            .map(|post| post.map(|p| p.normalize(&self.site_url)))
    }

    /// Shop entries (posts tagged `product`).
    pub async fn list_products(&self) -> Fetched<Vec<Post>> {
        let remote = self.remote().map(|c| c.products());
        self.resolve("list_products", remote, |c| c.products())
            .await
            .map(|posts| self.normalize_posts(posts))
    }

    pub async fn list_tags(&self) -> Fetched<Vec<Tag>> {
        let remote = self.remote().map(|c| c.tags());
        self.resolve("list_tags", remote, |c| c.tags())
            .await
            .map(|tags| tags.into_iter().map(|t| t.normalize(&self.site_url)).collect())
    }

    pub async fn get_tag_by_slug(&self, slug: &str) -> Fetched<Option<Tag>> {
        let remote = self.remote().map(|c| c.tag_by_slug(slug));
        self.resolve("get_tag_by_slug", remote, |c| c.tag_by_slug(slug))
            .await
            .map(|tag| tag.map(|t| t.normalize(&self.site_url)))
    }

    /// One page of posts carrying tag `slug`.
    pub async fn list_posts_by_tag(&self, slug: &str, page: u32, page_size: u32) -> Fetched<PaginatedPosts> {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let remote = self.remote().map(|c| c.posts_by_tag(slug, page, page_size));
        let mut fetched = self
            .resolve("list_posts_by_tag", remote, |c| c.posts_by_tag(slug, page, page_size))
            .await;
        if fetched.origin == Origin::Unavailable {
            fetched.data = PaginatedPosts::empty(page_size);
        }
        fetched.map(|mut result| {
            result.posts = self.normalize_posts(result.posts);
            result
        })
    }

    /// Posts whose title contains `query`. Queries shorter than the
    /// configured minimum return nothing without a request.
    pub async fn search_posts(&self, query: &str) -> Fetched<Vec<Post>> {
        let query = query.trim();
        if query.chars().count() < self.search_min_chars {
            return Fetched {
                data: Vec::new(),
                origin: self.idle_origin(),
            };
        }

        let remote = self.remote().map(|c| c.search(query));
        self.resolve("search_posts", remote, |c| c.search(query))
            .await
            .map(|posts| self.normalize_posts(posts))
    }

    /// The origin a query would report without performing it.
    fn idle_origin(&self) -> Origin {
        match (self.remote(), self.policy) {
            (Some(_), _) => Origin::Remote,
            (None, FallbackPolicy::Never) => Origin::Unavailable,
            (None, _) => Origin::Fallback,
        }
    }

    fn remote(&self) -> Option<&GhostClient> {
        match self.policy {
            FallbackPolicy::Always => None,
            FallbackPolicy::OnFailure | FallbackPolicy::Never => self.client.as_ref(),
        }
    }

    async fn resolve<T, Fut, F>(&self, operation: &'static str, remote: Option<Fut>, fallback: F) -> Fetched<T>
    where
        T: Default,
        Fut: Future<Output = ContentResult<T>>,
        F: FnOnce(&FallbackCatalog) -> T,
    {
        let fetched = match remote {
            Some(request) => match request.await {
                Ok(data) => Fetched {
                    data,
                    origin: Origin::Remote,
                },
                Err(e) => self.on_failure(operation, &e, fallback),
            },
            None if self.policy == FallbackPolicy::Never => {
                tracing::warn!(operation, "No content API client configured");
                Fetched {
                    data: T::default(),
                    origin: Origin::Unavailable,
                }
            }
            None => Fetched {
                data: fallback(&self.catalog),
                origin: Origin::Fallback,
            },
        };

        metrics::record_content_fetch(operation, fetched.origin.as_str());
        fetched
    }

    fn on_failure<T, F>(&self, operation: &'static str, error: &dyn std::error::Error, fallback: F) -> Fetched<T>
    where
        T: Default,
        F: FnOnce(&FallbackCatalog) -> T,
    {
        if self.policy == FallbackPolicy::Never {
            tracing::warn!(operation, error = %error, "Content API failed, fallback disabled");
            return Fetched {
                data: T::default(),
                origin: Origin::Unavailable,
            };
        }

        tracing::warn!(operation, error = %error, "Content API failed, serving fallback catalog");
        Fetched {
            data: fallback(&self.catalog),
            origin: Origin::Fallback,
        }
    }

    fn normalize_posts(&self, posts: Vec<Post>) -> Vec<Post> {
        posts.into_iter().map(|p| p.normalize(&self.site_url)).collect()
    }
}
