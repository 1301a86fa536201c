//! Site views.
//!
//! # Data Flow
//! ```text
//! LocationObserver ──► Session::mount ──► RouteTable::resolve
//!                           │
//!                           ▼
//!                 PageState::Loading ──► PageLoader::load (spawned)
//!                                              │
//!                          newer mount? ──yes──► discard
//!                                │ no
//!                                ▼
//!                       PageState::Ready(page)
//! ```
//!
//! # Responsibilities
//! - Register the site's views in match order
//! - Assemble per-view page data from the content service
//! - Drive mounts from location changes and drop stale results

pub mod loader;
pub mod registry;
pub mod session;

pub use loader::{CategoryPage, HomePage, Page, PageLoader, PostPage, ProductCard, ShopPage, StaticPage};
pub use registry::{site_routes, ViewId};
pub use session::{PageState, Session, SessionError};
