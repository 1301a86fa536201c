//! Ghost Content API client.
//!
//! # Responsibilities
//! - Build Content API endpoints with the key and filters each view needs
//! - Decode list envelopes (`{"posts": [...]}`, `{"tags": [...]}`)
//! - Report transport failures and non-2xx statuses as `ContentError`
//!
//! Fallback substitution is not done here; see `service.rs`.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::content::types::{Meta, PaginatedPosts, Pagination, Post, Tag, PRODUCT_TAG};

/// Journal feed size.
const FEED_LIMIT: &str = "20";
/// Search result cap.
const SEARCH_LIMIT: &str = "5";

/// Errors raised by the raw client.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("content API returned status {0}")]
    Status(u16),

    #[error("invalid content API URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type for raw Content API calls.
pub type ContentResult<T> = Result<T, ContentError>;

#[derive(Debug, Deserialize)]
struct PostsEnvelope {
    #[serde(default)]
    posts: Vec<Post>,
    meta: Option<Meta>,
}

#[derive(Debug, Deserialize)]
struct TagsEnvelope {
    #[serde(default)]
    tags: Vec<Tag>,
}

/// HTTP client for one Ghost site.
#[derive(Clone)]
pub struct GhostClient {
    http: reqwest::Client,
    api_root: Url,
    key: String,
}

impl GhostClient {
    /// Create a client for the site at `site_url`.
    pub fn new(site_url: &str, key: impl Into<String>, timeout: Duration) -> ContentResult<Self> {
        let mut site = Url::parse(site_url)?;
        if !site.path().ends_with('/') {
            let path = format!("{}/", site.path());
            site.set_path(&path);
        }
        let api_root = site.join("ghost/api/content/")?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            api_root,
            key: key.into(),
        })
    }

    /// Journal feed, excluding shop entries.
    pub async fn posts(&self) -> ContentResult<Vec<Post>> {
        let filter = format!("tag:-{}", PRODUCT_TAG);
        let url = self.endpoint(
            "posts/",
            &[
                ("include", "tags,authors"),
                ("limit", FEED_LIMIT),
                ("formats", "html"),
                ("filter", filter.as_str()),
            ],
        )?;
        Ok(self.get::<PostsEnvelope>(url).await?.posts)
    }

    /// Single post by slug. A 2xx response with no posts is `None`.
    pub async fn post_by_slug(&self, slug: &str) -> ContentResult<Option<Post>> {
        let Some(url) = self.slug_endpoint("posts", slug, &[("include", "tags,authors"), ("formats", "html")])?
        else {
            return Ok(None);
        };
        Ok(self.get::<PostsEnvelope>(url).await?.posts.into_iter().next())
    }

    /// Shop entries (posts tagged `product`).
    pub async fn products(&self) -> ContentResult<Vec<Post>> {
        let filter = format!("tag:{}", PRODUCT_TAG);
        let url = self.endpoint(
            "posts/",
            &[("filter", filter.as_str()), ("include", "tags"), ("limit", "all")],
        )?;
        Ok(self.get::<PostsEnvelope>(url).await?.posts)
    }

    /// All tags, most used first.
    pub async fn tags(&self) -> ContentResult<Vec<Tag>> {
        let url = self.endpoint(
            "tags/",
            &[
                ("limit", "all"),
                ("include", "count.posts"),
                ("order", "count.posts desc"),
            ],
        )?;
        Ok(self.get::<TagsEnvelope>(url).await?.tags)
    }

    /// Single tag by slug. A 2xx response with no tags is `None`.
    pub async fn tag_by_slug(&self, slug: &str) -> ContentResult<Option<Tag>> {
        let Some(url) = self.slug_endpoint("tags", slug, &[])? else {
            return Ok(None);
        };
        Ok(self.get::<TagsEnvelope>(url).await?.tags.into_iter().next())
    }

    /// One page of posts carrying tag `slug`.
    pub async fn posts_by_tag(&self, slug: &str, page: u32, limit: u32) -> ContentResult<PaginatedPosts> {
        let filter = format!("tag:{}", slug);
        let (page_param, limit_param) = (page.to_string(), limit.to_string());
        let url = self.endpoint(
            "posts/",
            &[
                ("filter", filter.as_str()),
                ("include", "tags,authors"),
                ("limit", limit_param.as_str()),
                ("page", page_param.as_str()),
                ("formats", "html"),
            ],
        )?;
        let envelope = self.get::<PostsEnvelope>(url).await?;
        let total = envelope.posts.len() as u32;

        Ok(PaginatedPosts {
            meta: envelope.meta.unwrap_or_else(|| Meta {
                pagination: Pagination::compute(page, limit, total),
            }),
            posts: envelope.posts,
        })
    }

    /// Posts whose title contains `query`.
    pub async fn search(&self, query: &str) -> ContentResult<Vec<Post>> {
        let filter = format!("title:~'{}'", query.replace('\'', "\\'"));
        let url = self.endpoint(
            "posts/",
            &[
                ("filter", filter.as_str()),
                ("limit", SEARCH_LIMIT),
                ("fields", "id,title,slug,feature_image,published_at,excerpt"),
            ],
        )?;
        Ok(self.get::<PostsEnvelope>(url).await?.posts)
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> ContentResult<Url> {
        let mut url = self.api_root.join(path)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("key", &self.key);
            for (name, value) in params {
                query.append_pair(name, value);
            }
        }
        Ok(url)
    }

    /// `{collection}/slug/{slug}/`, with `slug` encoded as one path segment.
    /// `None` for dot segments, which no resource can be named by.
    fn slug_endpoint(&self, collection: &str, slug: &str, params: &[(&str, &str)]) -> ContentResult<Option<Url>> {
        if slug.is_empty() || matches!(slug, "." | "..") {
            tracing::debug!(collection, slug, "Slug cannot name a resource");
            return Ok(None);
        }
        let mut url = self.endpoint(&format!("{}/slug/", collection), params)?;
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(slug).push("");
        }
        Ok(Some(url))
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: Url) -> ContentResult<T> {
        tracing::debug!(path = %url.path(), "Content API request");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::Status(status.as_u16()));
        }
        Ok(response.json::<T>().await?)
    }
}

impl std::fmt::Debug for GhostClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GhostClient")
            .field("api_root", &self.api_root.as_str())
            .finish()
    }
}
