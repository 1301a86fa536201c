//! Content layer.
//!
//! # Data Flow
//! ```text
//! view ──► ContentService ──► GhostClient ──► Content API
//!               │                  │
//!               │  error / non-2xx │
//!               ▼◄─────────────────┘
//!         FallbackCatalog
//!               │
//!               ▼
//!      normalize ──► Fetched { data, origin }
//! ```
//!
//! # Responsibilities
//! - Query the headless Ghost Content API
//! - Degrade to the local catalog without surfacing errors
//! - Shop-page helpers (product metadata, category filter)

pub mod client;
pub mod fallback;
pub mod service;
pub mod shop;
pub mod types;

pub use client::{ContentError, ContentResult, GhostClient};
pub use fallback::FallbackCatalog;
pub use service::{ContentService, FallbackPolicy, Fetched, Origin};
pub use shop::{featured_product, filter_by_category, visible_tags, ProductMeta, SHOP_CATEGORIES};
pub use types::{
    normalize_url, Author, Meta, PaginatedPosts, Pagination, Post, Product, Tag, TagCount, DEFAULT_COVER, PRODUCT_TAG,
};
