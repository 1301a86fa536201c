//! Page assembly.
//!
//! Turns a route match plus location into the data a view renders. Each
//! view issues its own content queries; results are combined here the way
//! the site lays them out.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::content::{
    featured_product, filter_by_category, ContentService, Origin, PaginatedPosts, Post, ProductMeta, Tag,
    SHOP_CATEGORIES,
};
use crate::navigation::Location;
use crate::observability::metrics;
use crate::routing::RouteMatch;
use crate::views::registry::ViewId;

const RECENT_COUNT: usize = 3;
const TRENDING_COUNT: usize = 5;
const RELATED_COUNT: usize = 4;

/// Home page: newest post as hero, the next few as "recent", the rest archived.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomePage {
    pub latest: Option<Post>,
    pub recent: Vec<Post>,
    pub archive: Vec<Post>,
    pub origin: Origin,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostPage {
    pub slug: String,
    /// `None` when no post has this slug.
    pub post: Option<Post>,
    pub trending: Vec<Post>,
    pub related: Vec<Post>,
    pub origin: Origin,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPage {
    pub slug: String,
    pub tag: Option<Tag>,
    pub page: PaginatedPosts,
    pub origin: Origin,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub product: Post,
    pub meta: ProductMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopPage {
    pub featured: Option<ProductCard>,
    pub categories: Vec<&'static str>,
    pub active_category: String,
    /// Cards shown, capped at the shop page size.
    pub products: Vec<ProductCard>,
    /// Products in the active category before the cap.
    pub total: usize,
    pub origin: Origin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaticPage {
    pub id: ViewId,
    pub title: &'static str,
    pub description: &'static str,
}

/// A fully loaded page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Page {
    Home(HomePage),
    Post(PostPage),
    Category(CategoryPage),
    Shop(ShopPage),
    Static(StaticPage),
    NotFound { path: String },
}

impl Page {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Page::NotFound { .. })
    }

    /// Metric label for this page.
    pub fn label(&self) -> &'static str {
        match self {
            Page::Home(_) => "home",
            Page::Post(_) => "post",
            Page::Category(_) => "category",
            Page::Shop(_) => "shop",
            Page::Static(page) => page.id.as_str(),
            Page::NotFound { .. } => "not_found",
        }
    }
}

/// Loads pages from the content service.
#[derive(Debug, Clone)]
pub struct PageLoader {
    content: Arc<ContentService>,
    category_page_size: u32,
    shop_page_size: usize,
}

impl PageLoader {
    pub fn new(content: Arc<ContentService>, category_page_size: u32, shop_page_size: usize) -> Self {
        Self {
            content,
            category_page_size,
            shop_page_size,
        }
    }

    pub fn content(&self) -> &Arc<ContentService> {
        &self.content
    }

    /// Load the page for a resolved route.
    pub async fn load(&self, matched: &RouteMatch<ViewId>, location: &Location) -> Page {
        let start = Instant::now();
        let page = match matched {
            RouteMatch::NotFound { path } => Page::NotFound { path: path.clone() },
            RouteMatch::Matched { view, params, .. } => {
                let slug = params.get("slug").unwrap_or_default();
                match view {
                    ViewId::Home => Page::Home(self.home().await),
                    ViewId::Post => Page::Post(self.post(slug).await),
                    ViewId::Category => {
                        let page = location
                            .query_param("page")
                            .and_then(|p| p.parse::<u32>().ok())
                            .unwrap_or(1);
                        Page::Category(self.category(slug, page).await)
                    }
                    ViewId::Shop => {
                        let category = location.query_param("category");
                        Page::Shop(self.shop(category.as_deref()).await)
                    }
                    other => match other.static_copy() {
                        Some((title, description)) => Page::Static(StaticPage {
                            id: *other,
                            title,
                            description,
                        }),
                        None => Page::NotFound {
                            path: location.path.clone(),
                        },
                    },
                }
            }
        };

        metrics::record_page_load(page.label(), start);
        tracing::debug!(
            path = %location.path,
            view = page.label(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Page loaded"
        );
        page
    }

    pub async fn home(&self) -> HomePage {
        let fetched = self.content.list_posts().await;
        let mut posts = fetched.data.into_iter();
        let latest = posts.next();
        let recent: Vec<Post> = posts.by_ref().take(RECENT_COUNT).collect();

        HomePage {
            latest,
            recent,
            archive: posts.collect(),
            origin: fetched.origin,
        }
    }

    pub async fn post(&self, slug: &str) -> PostPage {
        let fetched = self.content.get_post_by_slug(slug).await;
        let all = self.content.list_posts().await.data;

        let others: Vec<&Post> = all.iter().filter(|p| p.slug != slug).collect();
        let trending = others.iter().take(TRENDING_COUNT).map(|p| (*p).clone()).collect();
        let related = related_posts(fetched.data.as_ref(), &others);

        PostPage {
            slug: slug.to_string(),
            post: fetched.data,
            trending,
            related,
            origin: fetched.origin,
        }
    }

    pub async fn category(&self, slug: &str, page: u32) -> CategoryPage {
        let tag = self.content.get_tag_by_slug(slug).await;
        let posts = self
            .content
            .list_posts_by_tag(slug, page, self.category_page_size)
            .await;

        CategoryPage {
            slug: slug.to_string(),
            tag: tag.data,
            page: posts.data,
            origin: posts.origin,
        }
    }

    pub async fn shop(&self, category: Option<&str>) -> ShopPage {
        let fetched = self.content.list_products().await;
        let products = fetched.data;
        let active = category
            .filter(|c| SHOP_CATEGORIES.contains(c))
            .unwrap_or(SHOP_CATEGORIES[0]);

        let filtered = filter_by_category(&products, Some(active));
        let total = filtered.len();

        ShopPage {
            featured: featured_product(&products).map(card),
            categories: SHOP_CATEGORIES.to_vec(),
            active_category: active.to_string(),
            products: filtered.into_iter().take(self.shop_page_size).map(card).collect(),
            total,
            origin: fetched.origin,
        }
    }
}

fn card(product: &Post) -> ProductCard {
    ProductCard {
        meta: ProductMeta::of(product),
        product: product.clone(),
    }
}

/// Posts sharing the primary tag of `post`, topped up with the remaining
/// posts in feed order.
fn related_posts(post: Option<&Post>, others: &[&Post]) -> Vec<Post> {
    let primary = post.and_then(|p| p.primary_tag.as_ref()).map(|t| t.id.as_str());
    let shares_primary = |p: &Post| primary.is_some_and(|id| p.tags.iter().any(|t| t.id == id));

    others
        .iter()
        .filter(|p| shares_primary(p))
        .chain(others.iter().filter(|p| !shares_primary(p)))
        .take(RELATED_COUNT)
        .map(|p| (*p).clone())
        .collect()
}
