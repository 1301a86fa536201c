//! Client-side routing and content layer for The Decor Atlas.

pub mod config;
pub mod content;
pub mod http;
pub mod lifecycle;
pub mod navigation;
pub mod observability;
pub mod routing;
pub mod views;

pub use config::schema::AtlasConfig;
pub use content::ContentService;
pub use http::PreviewServer;
pub use lifecycle::{Shutdown, Site};
pub use routing::{RouteMatch, RouteTable};
pub use views::{Page, Session, ViewId};
