//! Local fallback catalog.
//!
//! # Responsibilities
//! - Hold the fixed dataset served when the Content API is unavailable
//! - Answer every Content API query from that dataset
//!
//! # Design Decisions
//! - Built-in data ships with the binary; a JSON file may replace it
//! - Queries mirror the API's filters (product exclusion, tag filter,
//!   title search) so views cannot tell the two apart

use std::fs;
use std::path::Path;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::content::types::{Author, Meta, PaginatedPosts, Pagination, Post, Tag, PRODUCT_TAG};

/// Dataset served in place of the Content API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackCatalog {
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl FallbackCatalog {
    /// Read a catalog from a JSON file (`{"posts": [...], "tags": [...]}`).
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let raw = fs::read_to_string(path)?;
        let catalog: FallbackCatalog = serde_json::from_str(&raw)?;
        tracing::info!(
            path = %path.display(),
            posts = catalog.posts.len(),
            tags = catalog.tags.len(),
            "Loaded fallback catalog"
        );
        Ok(catalog)
    }

    /// Journal posts (everything not tagged `product`).
    pub fn posts(&self) -> Vec<Post> {
        self.posts.iter().filter(|p| !p.is_product()).cloned().collect()
    }

    pub fn post_by_slug(&self, slug: &str) -> Option<Post> {
        self.posts.iter().find(|p| p.slug == slug).cloned()
    }

    /// Shop entries (posts tagged `product`).
    pub fn products(&self) -> Vec<Post> {
        self.posts.iter().filter(|p| p.is_product()).cloned().collect()
    }

    pub fn tags(&self) -> Vec<Tag> {
        self.tags.clone()
    }

    pub fn tag_by_slug(&self, slug: &str) -> Option<Tag> {
        self.tags.iter().find(|t| t.slug == slug).cloned()
    }

    /// Posts carrying `slug`, paginated.
    pub fn posts_by_tag(&self, slug: &str, page: u32, limit: u32) -> PaginatedPosts {
        let matching: Vec<&Post> = self.posts.iter().filter(|p| p.has_tag(slug)).collect();
        let pagination = Pagination::compute(page, limit, matching.len() as u32);
        let start = (pagination.page as usize - 1).saturating_mul(pagination.limit as usize);

        PaginatedPosts {
            posts: matching
                .into_iter()
                .skip(start)
                .take(pagination.limit as usize)
                .cloned()
                .collect(),
            meta: Meta { pagination },
        }
    }

    /// Case-insensitive title search across all entries.
    pub fn search(&self, query: &str) -> Vec<Post> {
        let needle = query.to_lowercase();
        self.posts
            .iter()
            .filter(|p| p.title.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// The catalog bundled with the site.
    pub fn builtin() -> Self {
        let tags = vec![
            tag("1", "Minimalism", "minimalism", "The pursuit of simplicity and clarity."),
            tag("2", "Design Theory", "design-theory", "Understanding the why behind the what."),
            tag("3", "Materials", "materials", "Exploring stone, wood, and textiles."),
            tag("4", "Lighting", "lighting", "Illuminating spaces with intention."),
            tag("5", "Small Spaces", "small-spaces", "Maximizing life in minimal square footage."),
            tag("6", "Architecture", "architecture", "Structural design and spatial theory."),
            tag("f", "Furniture", "furniture", "Statement pieces."),
            tag("d", "Decor", "decor", "Finishing touches."),
            tag("t", "Textiles", "textiles", "Soft goods."),
        ];
        let find = |slug: &str| {
            tags.iter()
                .find(|t| t.slug == slug)
                .cloned()
                .map(|mut t| {
                    t.description = None;
                    t
                })
                .unwrap_or_else(|| tag(slug, slug, slug, ""))
        };
        let product = tag("shop", PRODUCT_TAG, PRODUCT_TAG, "");

        let mut posts = vec![
            Post {
                html: Some("<p>Content...</p>".to_string()),
                reading_time: Some(5),
                ..entry(
                    "1",
                    "Japandi: The Art of Imperfect Minimalism",
                    "japandi-art-of-imperfect-minimalism",
                    "photo-1556228453-efd6c1ff04f6?q=80&w=2000",
                    true,
                    10_000,
                    "Exploring the fusion of Scandinavian functionality and Japanese rustic minimalism in modern homes.",
                    vec![find("minimalism")],
                )
            },
            entry(
                "2",
                "Material Focus: The Renaissance of Travertine",
                "renaissance-of-travertine",
                "photo-1600210492486-724fe5c67fb0?q=80&w=2000",
                false,
                20_000,
                "Why the design world is trading high-gloss marble for the earthy, porous textures of limestone.",
                vec![find("materials")],
            ),
            entry(
                "3",
                "The Parisian Apartment: Mastering Small Spaces",
                "parisian-apartment-guide",
                "photo-1600607686527-6fb886090705?q=80&w=2000",
                true,
                40_000,
                "Lessons in verticality, mixing eras, and the art of curated clutter from the French capital.",
                vec![find("small-spaces")],
            ),
        ];

        // Shop entries: excerpt convention is "Price | Retailer | Brand".
        let products = [
            ("p1", "Akari 1A Table Lamp", "product-akari-1a", "photo-1513506003011-38f044aff2dd", false, "$210 | Design Within Reach | Vitra", "lighting"),
            ("p2", "Travertine Coffee Table", "product-travertine-table", "photo-1615529182904-14819c35db37", true, "$1,450 | Finnish Design Shop | GUBI", "furniture"),
            ("p3", "Pacha Lounge Chair", "product-pacha-chair", "photo-1567538096630-e0c55bd6374c", true, "$2,800 | 2Modern | GUBI", "furniture"),
            ("p4", "Stoneware Vase No. 04", "product-stoneware-vase", "photo-1578500494198-246f612d3b3d", false, "$85 | Nordic Nest | Menu Space", "decor"),
            ("p5", "Linen Duvet Set", "product-linen-duvet", "photo-1616486338812-3dadae4b4ace", false, "$329 | Parachute Home | Parachute", "textiles"),
            ("p6", "Walnut Dining Chair", "product-walnut-chair", "photo-1592078615290-033ee584e267", false, "$895 | Herman Miller | Eames", "furniture"),
            ("p7", "Anglepoise Desk Lamp", "product-anglepoise", "photo-1534349762948-3a47050e3903", false, "$190 | Amazon | Anglepoise", "lighting"),
            ("p8", "Abstract Wall Art", "product-wall-art", "photo-1580130601254-05fa235e1e54", false, "$120 | The Poster Club | Studio 5", "decor"),
        ];
        for (id, title, slug, image, featured, excerpt, category) in products {
            posts.push(entry(
                id,
                title,
                slug,
                &format!("{}?q=80&w=800", image),
                featured,
                0,
                excerpt,
                vec![product.clone(), find(category)],
            ));
        }

        Self { posts, tags }
    }
}

impl Default for FallbackCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn tag(id: &str, name: &str, slug: &str, description: &str) -> Tag {
    Tag {
        id: id.to_string(),
        name: name.to_string(),
        slug: slug.to_string(),
        description: (!description.is_empty()).then(|| description.to_string()),
        feature_image: None,
        count: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn entry(
    id: &str,
    title: &str,
    slug: &str,
    image: &str,
    featured: bool,
    age_secs: i64,
    excerpt: &str,
    tags: Vec<Tag>,
) -> Post {
    let now = Utc::now();
    // The first non-product tag is the primary one.
    let primary_tag = tags.iter().find(|t| t.slug != PRODUCT_TAG).cloned();
    Post {
        id: id.to_string(),
        uuid: format!("uuid-{}", id),
        title: title.to_string(),
        slug: slug.to_string(),
        html: None,
        feature_image: Some(format!(
            "https://images.unsplash.com/{}&auto=format&fit=crop",
            image
        )),
        featured,
        visibility: "public".to_string(),
        created_at: Some(now),
        updated_at: Some(now),
        published_at: Some(now - Duration::seconds(age_secs)),
        custom_excerpt: Some(excerpt.to_string()),
        excerpt: None,
        canonical_url: None,
        reading_time: None,
        primary_author: Some(Author {
            id: "1".to_string(),
            name: "The Decor Atlas".to_string(),
            slug: "the-decor-atlas".to_string(),
            profile_image: None,
            bio: None,
        }),
        primary_tag,
        authors: Vec::new(),
        tags,
        products: Vec::new(),
    }
}
