//! Preview server setup.
//!
//! # Responsibilities
//! - Create the Axum Router with the health and page handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Resolve request paths through the site router and return page JSON
//! - Stop accepting on shutdown and drain in-flight requests

use std::time::Duration;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::lifecycle::{Shutdown, Site};
use crate::navigation::{Location, NavigationMode, RawLocation};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub site: Site,
}

/// HTTP server rendering site pages as JSON.
pub struct PreviewServer {
    router: Router,
}

impl PreviewServer {
    pub fn new(site: Site, config: &ServerConfig) -> Self {
        let router = Self::build_router(config, AppState { site });
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/healthz", get(health_handler))
            .route("/", get(page_handler))
            .route("/{*path}", get(page_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The configured router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Preview server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.signalled())
            .await?;

        tracing::info!("Preview server stopped");
        Ok(())
    }
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Resolve the request path as a site location and return the loaded page.
async fn page_handler(State(state): State<AppState>, uri: Uri) -> Response {
    let href = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    // The server always sees real paths, whatever mode links are built in.
    let location = Location::derive(Some(&RawLocation::parse(href)), NavigationMode::History);

    let matched = state.site.routes.resolve_location(&location);
    let page = state.site.loader.load(&matched, &location).await;

    let status = if page.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    metrics::record_preview_request(status.as_u16());
    tracing::debug!(path = %location.path, view = page.label(), status = status.as_u16(), "Page served");

    (status, Json(page)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::config::AtlasConfig;
    use crate::content::FallbackPolicy;

    fn server() -> PreviewServer {
        let mut config = AtlasConfig::default();
        config.content.fallback = FallbackPolicy::Always;
        PreviewServer::new(Site::bootstrap(&config).unwrap(), &config.server)
    }

    async fn get_json(path: &str) -> (StatusCode, serde_json::Value, bool) {
        let response = server()
            .router()
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let has_request_id = response.headers().contains_key("x-request-id");
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap(), has_request_id)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body, has_request_id) = get_json("/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert!(has_request_id);
    }

    #[tokio::test]
    async fn test_category_page() {
        let (status, body, _) = get_json("/tag/lighting?page=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["view"], "category");
        assert_eq!(body["slug"], "lighting");
        assert_eq!(body["origin"], "fallback");
    }

    #[tokio::test]
    async fn test_not_found_status() {
        let (status, body, _) = get_json("/unknown/deeply/nested").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["view"], "not_found");
        assert_eq!(body["path"], "/unknown/deeply/nested");
    }

    #[tokio::test]
    async fn test_home_page() {
        let (status, body, _) = get_json("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["view"], "home");
        assert_eq!(body["latest"]["slug"], "japandi-art-of-imperfect-minimalism");
    }
}
