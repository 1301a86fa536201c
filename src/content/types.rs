//! Content API types.
//!
//! Mirrors the JSON returned by the Ghost Content API. Unknown fields are
//! ignored; optional fields default so partial responses still decode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tag slug marking shop entries.
pub const PRODUCT_TAG: &str = "product";

/// Cover used when a post has no feature image.
pub const DEFAULT_COVER: &str = "https://images.unsplash.com/photo-1618221195710-dd6b41faaea6?q=80&w=2000&auto=format&fit=crop";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagCount {
    #[serde(default)]
    pub posts: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<TagCount>,
}

impl Tag {
    /// Internal tags (`#name`) are never shown in navigation.
    pub fn is_internal(&self) -> bool {
        self.name.starts_with('#')
    }

    pub(crate) fn normalize(mut self, site_url: &str) -> Self {
        self.feature_image = self
            .feature_image
            .as_deref()
            .and_then(|url| normalize_url(site_url, url));
        self
    }
}

/// An affiliate item attached to a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub image: String,
    pub price: String,
    pub currency: String,
    /// Affiliate link.
    pub link: String,
    pub retailer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub uuid: String,
    pub title: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_image: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_visibility")]
    pub visibility: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_author: Option<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_tag: Option<Tag>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub products: Vec<Product>,
}

fn default_visibility() -> String {
    "public".to_string()
}

impl Post {
    pub fn has_tag(&self, slug: &str) -> bool {
        self.tags.iter().any(|t| t.slug == slug)
    }

    /// Shop entries are posts tagged `product`.
    pub fn is_product(&self) -> bool {
        self.has_tag(PRODUCT_TAG)
    }

    /// Make image URLs absolute, fill the cover and publish date, and drop
    /// affiliate items (they are never sourced from the API).
    pub(crate) fn normalize(mut self, site_url: &str) -> Self {
        self.feature_image = Some(
            self.feature_image
                .as_deref()
                .and_then(|url| normalize_url(site_url, url))
                .unwrap_or_else(|| DEFAULT_COVER.to_string()),
        );
        if let Some(author) = self.primary_author.as_mut() {
            author.profile_image = author
                .profile_image
                .as_deref()
                .and_then(|url| normalize_url(site_url, url));
        }
        if self.published_at.is_none() {
            self.published_at = Some(Utc::now());
        }
        self.products.clear();
        self
    }
}

/// Pagination block of a list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub pages: u32,
    pub total: u32,
    pub next: Option<u32>,
    pub prev: Option<u32>,
}

impl Pagination {
    /// Pagination for `total` items shown `limit` per page, at `page`.
    /// A page past the last one is kept as requested and holds nothing.
    pub fn compute(page: u32, limit: u32, total: u32) -> Self {
        let limit = limit.max(1);
        let pages = total.div_ceil(limit).max(1);
        let page = page.max(1);
        Self {
            page,
            limit,
            pages,
            total,
            next: (page < pages).then_some(page + 1),
            prev: (page > 1).then_some(page - 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub pagination: Pagination,
}

/// One page of posts with its pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedPosts {
    pub posts: Vec<Post>,
    pub meta: Meta,
}

impl PaginatedPosts {
    /// An empty first page.
    pub fn empty(limit: u32) -> Self {
        Self {
            posts: Vec::new(),
            meta: Meta {
                pagination: Pagination::compute(1, limit, 0),
            },
        }
    }
}

impl Default for PaginatedPosts {
    fn default() -> Self {
        Self::empty(1)
    }
}

/// Make `url` absolute against `site_url`.
///
/// Absolute URLs pass through, protocol-relative ones get `https:`,
/// anything else is appended to the site URL. Empty input yields `None`.
pub fn normalize_url(site_url: &str, url: &str) -> Option<String> {
    if url.is_empty() {
        None
    } else if url.starts_with("http") {
        Some(url.to_string())
    } else if url.starts_with("//") {
        Some(format!("https:{}", url))
    } else {
        Some(format!("{}{}", site_url.trim_end_matches('/'), url))
    }
}
