//! Shop helpers: product metadata, category filter, menu tags.

use serde::Serialize;

use crate::content::types::{Post, Tag};

/// Category pills on the shop page. Names must match tag names.
pub const SHOP_CATEGORIES: [&str; 6] = ["All", "Furniture", "Lighting", "Decor", "Textiles", "Kitchen"];

/// Category that disables filtering.
pub const ALL_CATEGORY: &str = "All";

/// Display metadata packed into a product's excerpt as `Price | Retailer | Brand`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductMeta {
    pub price: String,
    pub retailer: String,
    pub brand: String,
}

impl ProductMeta {
    pub fn parse(excerpt: Option<&str>) -> Self {
        let Some(excerpt) = excerpt.filter(|e| !e.is_empty()) else {
            return Self {
                price: "See Price".to_string(),
                retailer: "Retailer".to_string(),
                brand: "Brand".to_string(),
            };
        };

        let parts: Vec<&str> = excerpt.split('|').map(str::trim).collect();
        let part = |index: usize, default: &str| match parts.get(index) {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => default.to_string(),
        };

        Self {
            price: part(0, "See Price"),
            retailer: part(1, "Retailer"),
            brand: part(2, "Design"),
        }
    }

    pub fn of(post: &Post) -> Self {
        Self::parse(post.custom_excerpt.as_deref())
    }
}

/// Products in `category`, matched on the primary tag or any tag name.
/// `All` (or no category) returns everything.
pub fn filter_by_category<'a>(products: &'a [Post], category: Option<&str>) -> Vec<&'a Post> {
    match category {
        None | Some(ALL_CATEGORY) => products.iter().collect(),
        Some(category) => products
            .iter()
            .filter(|p| {
                p.primary_tag.as_ref().is_some_and(|t| t.name == category)
                    || p.tags.iter().any(|t| t.name == category)
            })
            .collect(),
    }
}

/// First featured product, else the first product.
pub fn featured_product(products: &[Post]) -> Option<&Post> {
    products.iter().find(|p| p.featured).or_else(|| products.first())
}

/// Tags shown in navigation (internal `#` tags removed).
pub fn visible_tags(tags: Vec<Tag>) -> Vec<Tag> {
    tags.into_iter().filter(|t| !t.is_internal()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FallbackCatalog;

    #[test]
    fn test_parse_full_meta() {
        let meta = ProductMeta::parse(Some("$210 | Design Within Reach | Vitra"));
        assert_eq!(meta.price, "$210");
        assert_eq!(meta.retailer, "Design Within Reach");
        assert_eq!(meta.brand, "Vitra");
    }

    #[test]
    fn test_parse_defaults() {
        let none = ProductMeta::parse(None);
        assert_eq!(none.brand, "Brand");

        let partial = ProductMeta::parse(Some("$85 |  "));
        assert_eq!(partial.price, "$85");
        assert_eq!(partial.retailer, "Retailer");
        assert_eq!(partial.brand, "Design");
    }

    #[test]
    fn test_filter_by_category() {
        let products = FallbackCatalog::builtin().products();
        assert_eq!(filter_by_category(&products, None).len(), 8);
        assert_eq!(filter_by_category(&products, Some("All")).len(), 8);
        assert_eq!(filter_by_category(&products, Some("Furniture")).len(), 3);
        assert!(filter_by_category(&products, Some("Kitchen")).is_empty());
    }

    #[test]
    fn test_featured_product() {
        let products = FallbackCatalog::builtin().products();
        assert_eq!(featured_product(&products).unwrap().slug, "product-travertine-table");

        let mut plain = products.clone();
        plain.iter_mut().for_each(|p| p.featured = false);
        assert_eq!(featured_product(&plain).unwrap().slug, "product-akari-1a");
        assert!(featured_product(&[]).is_none());
    }

    #[test]
    fn test_visible_tags_hides_internal() {
        let mut tags = FallbackCatalog::builtin().tags();
        tags[0].name = "#internal".to_string();
        assert_eq!(visible_tags(tags).len(), 8);
    }
}
