//! Route lookup.
//!
//! # Responsibilities
//! - Store compiled routes in registration order
//! - Resolve a path or location to the first matching view
//! - Return an explicit NotFound for unmatched paths
//!
//! # Design Decisions
//! - Immutable after construction (shareable without locks)
//! - O(n) scan; route tables are small and ordered by hand
//! - Claimed namespaces are computed once, from the whole table

use serde::Serialize;

use crate::navigation::Location;
use crate::observability::metrics;
use crate::routing::matcher::{Params, RouteError, RoutePattern};

/// A registered route.
#[derive(Debug, Clone)]
pub struct Route<V> {
    pattern: RoutePattern,
    view: V,
}

/// Result of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteMatch<V> {
    Matched {
        view: V,
        pattern: RoutePattern,
        params: Params,
    },
    NotFound {
        path: String,
    },
}

impl<V> RouteMatch<V> {
    /// Matched view, if any.
    pub fn view(&self) -> Option<&V> {
        match self {
            RouteMatch::Matched { view, .. } => Some(view),
            RouteMatch::NotFound { .. } => None,
        }
    }

    /// Captured parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        match self {
            RouteMatch::Matched { params, .. } => params.get(name),
            RouteMatch::NotFound { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RouteMatch::NotFound { .. })
    }
}

/// Collects routes in registration order.
#[derive(Debug)]
pub struct RouteTableBuilder<V> {
    routes: Vec<Route<V>>,
}

impl<V> RouteTableBuilder<V> {
    /// Register `pattern` → `view`. Order of calls is match order.
    pub fn route(mut self, pattern: &str, view: V) -> Result<Self, RouteError> {
        let pattern = RoutePattern::parse(pattern)?;
        if self.routes.iter().any(|r| r.pattern == pattern) {
            return Err(RouteError::Duplicate(pattern.to_string()));
        }
        self.routes.push(Route { pattern, view });
        Ok(self)
    }

    /// Freeze the table.
    pub fn build(self) -> RouteTable<V> {
        let mut claimed: Vec<String> = Vec::new();
        for route in &self.routes {
            if let Some(ns) = route.pattern.namespace() {
                if !claimed.iter().any(|c| c == ns) {
                    claimed.push(ns.to_string());
                }
            }
        }

        tracing::debug!(
            routes = self.routes.len(),
            claimed = ?claimed,
            "Route table compiled"
        );

        RouteTable {
            routes: self.routes,
            claimed,
        }
    }
}

/// Ordered, immutable route table.
#[derive(Debug, Clone)]
pub struct RouteTable<V> {
    routes: Vec<Route<V>>,
    claimed: Vec<String>,
}

impl<V: Clone> RouteTable<V> {
    pub fn builder() -> RouteTableBuilder<V> {
        RouteTableBuilder { routes: Vec::new() }
    }

    /// Resolve `path` to the first matching route, capturing its parameter.
    pub fn resolve(&self, path: &str) -> RouteMatch<V> {
        for route in &self.routes {
            if let Some(params) = route.pattern.capture(path, &self.claimed) {
                tracing::trace!(path = %path, pattern = %route.pattern, "Route matched");
                metrics::record_route_resolution(true);
                return RouteMatch::Matched {
                    view: route.view.clone(),
                    pattern: route.pattern.clone(),
                    params,
                };
            }
        }

        tracing::debug!(path = %path, "No route matched");
        metrics::record_route_resolution(false);
        RouteMatch::NotFound {
            path: path.to_string(),
        }
    }

    /// Resolve the path of `location`.
    pub fn resolve_location(&self, location: &Location) -> RouteMatch<V> {
        self.resolve(&location.path)
    }

    /// Namespaces the catch-all will never capture.
    pub fn claimed_namespaces(&self) -> &[String] {
        &self.claimed
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
