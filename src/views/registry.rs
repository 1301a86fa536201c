//! The site's view registry.

use std::fmt;

use serde::Serialize;

use crate::routing::{RouteError, RouteTable};

/// Every page view of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewId {
    Home,
    About,
    Shop,
    Contact,
    Privacy,
    Terms,
    Accessibility,
    Category,
    Post,
}

impl ViewId {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewId::Home => "home",
            ViewId::About => "about",
            ViewId::Shop => "shop",
            ViewId::Contact => "contact",
            ViewId::Privacy => "privacy",
            ViewId::Terms => "terms",
            ViewId::Accessibility => "accessibility",
            ViewId::Category => "category",
            ViewId::Post => "post",
        }
    }

    /// Title and description of content-free views.
    pub fn static_copy(self) -> Option<(&'static str, &'static str)> {
        match self {
            ViewId::About => Some((
                "About Us",
                "We curate the finest home decor and furniture to help you build a sanctuary.",
            )),
            ViewId::Contact => Some((
                "Contact Us",
                "Get in touch with The Decor Atlas team for partnerships, press inquiries, or general questions.",
            )),
            ViewId::Privacy => Some(("Privacy Policy", "")),
            ViewId::Terms => Some(("Terms of Service", "")),
            ViewId::Accessibility => Some(("Accessibility Statement", "")),
            ViewId::Home | ViewId::Shop | ViewId::Category | ViewId::Post => None,
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Route table for the site, in registration order.
pub fn site_routes() -> Result<RouteTable<ViewId>, RouteError> {
    Ok(RouteTable::builder()
        .route("/", ViewId::Home)?
        .route("/about", ViewId::About)?
        .route("/shop", ViewId::Shop)?
        .route("/contact", ViewId::Contact)?
        .route("/privacy", ViewId::Privacy)?
        .route("/terms", ViewId::Terms)?
        .route("/accessibility", ViewId::Accessibility)?
        .route("/tag/:slug", ViewId::Category)?
        .route("/:slug", ViewId::Post)?
        .build())
}
