//! Content service behaviour against a live (mock) Content API.

use std::time::Duration;

use decor_atlas::content::{ContentService, FallbackCatalog, FallbackPolicy, GhostClient, Origin, DEFAULT_COVER};

mod common;

fn service(addr: std::net::SocketAddr, policy: FallbackPolicy) -> ContentService {
    let site = format!("http://{}", addr);
    let client = GhostClient::new(&site, "test-key", Duration::from_secs(2)).unwrap();
    ContentService::new(Some(client), FallbackCatalog::builtin(), &site, policy)
}

#[tokio::test]
async fn test_server_error_yields_fallback_tags() {
    let (addr, log) = common::start_mock_backend(500, "{}").await;
    let tags = service(addr, FallbackPolicy::OnFailure).list_tags().await;

    assert_eq!(tags.origin, Origin::Fallback);
    assert_eq!(tags.data, FallbackCatalog::builtin().tags());

    let requests = log.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with("/ghost/api/content/tags/?key=test-key"));
}

#[tokio::test]
async fn test_remote_tags_are_normalized() {
    let body = r##"{"tags":[
        {"id":"a","name":"Lighting","slug":"lighting","feature_image":"/content/images/lamp.jpg"},
        {"id":"b","name":"#internal","slug":"hash-internal","feature_image":"//cdn.example.com/x.jpg"}
    ]}"##;
    let (addr, _) = common::start_mock_backend(200, body).await;
    let tags = service(addr, FallbackPolicy::OnFailure).list_tags().await;

    assert_eq!(tags.origin, Origin::Remote);
    assert_eq!(tags.data.len(), 2);
    assert_eq!(
        tags.data[0].feature_image.as_deref(),
        Some(format!("http://{}/content/images/lamp.jpg", addr).as_str())
    );
    assert_eq!(tags.data[1].feature_image.as_deref(), Some("https://cdn.example.com/x.jpg"));
}

#[tokio::test]
async fn test_remote_posts_get_default_cover() {
    let body = r#"{"posts":[{"id":"9","title":"Quiet Rooms","slug":"quiet-rooms"}]}"#;
    let (addr, log) = common::start_mock_backend(200, body).await;
    let posts = service(addr, FallbackPolicy::OnFailure).list_posts().await;

    assert_eq!(posts.origin, Origin::Remote);
    assert_eq!(posts.data[0].feature_image.as_deref(), Some(DEFAULT_COVER));
    assert!(posts.data[0].published_at.is_some());

    let requests = log.lock().unwrap();
    assert!(requests[0].contains("filter=tag%3A-product"));
    assert!(requests[0].contains("limit=20"));
}

#[tokio::test]
async fn test_missing_slug_is_none_not_fallback() {
    let (addr, _) = common::start_mock_backend(200, r#"{"posts":[]}"#).await;
    let post = service(addr, FallbackPolicy::OnFailure)
        .get_post_by_slug("japandi-art-of-imperfect-minimalism")
        .await;

    assert_eq!(post.origin, Origin::Remote);
    assert!(post.data.is_none());
}

#[tokio::test]
async fn test_not_found_status_falls_back() {
    let (addr, _) = common::start_mock_backend(404, r#"{"errors":[]}"#).await;
    let post = service(addr, FallbackPolicy::OnFailure)
        .get_post_by_slug("renaissance-of-travertine")
        .await;

    assert_eq!(post.origin, Origin::Fallback);
    assert_eq!(post.data.unwrap().id, "2");
}

#[tokio::test]
async fn test_unreachable_api_falls_back() {
    // Bind and drop to get a port nothing listens on.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let products = service(addr, FallbackPolicy::OnFailure).list_products().await;

    assert_eq!(products.origin, Origin::Fallback);
    assert_eq!(products.data.len(), 8);
}

#[tokio::test]
async fn test_malformed_body_falls_back() {
    let (addr, _) = common::start_mock_backend(200, "not json").await;
    let posts = service(addr, FallbackPolicy::OnFailure).search_posts("travertine").await;

    assert_eq!(posts.origin, Origin::Fallback);
    assert_eq!(posts.data.len(), 2);
}

#[tokio::test]
async fn test_never_policy_surfaces_unavailable() {
    let (addr, _) = common::start_mock_backend(503, "{}").await;
    let tags = service(addr, FallbackPolicy::Never).list_tags().await;

    assert_eq!(tags.origin, Origin::Unavailable);
    assert!(tags.data.is_empty());
}

#[tokio::test]
async fn test_always_policy_never_calls_api() {
    let (addr, log) = common::start_mock_backend(200, r#"{"posts":[]}"#).await;
    let posts = service(addr, FallbackPolicy::Always).list_posts().await;

    assert_eq!(posts.origin, Origin::Fallback);
    assert_eq!(posts.data.len(), 3);
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_short_search_makes_no_request() {
    let (addr, log) = common::start_mock_backend(200, r#"{"posts":[]}"#).await;
    let results = service(addr, FallbackPolicy::OnFailure).search_posts(" ab ").await;

    assert!(results.data.is_empty());
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_posts_by_tag_uses_remote_pagination() {
    let body = r#"{
        "posts":[{"id":"1","title":"Glow","slug":"glow","tags":[{"id":"4","name":"Lighting","slug":"lighting"}]}],
        "meta":{"pagination":{"page":2,"limit":12,"pages":3,"total":25,"next":3,"prev":1}}
    }"#;
    let (addr, log) = common::start_mock_backend(200, body).await;
    let page = service(addr, FallbackPolicy::OnFailure)
        .list_posts_by_tag("lighting", 2, 12)
        .await;

    assert_eq!(page.origin, Origin::Remote);
    assert_eq!(page.data.meta.pagination.total, 25);
    assert_eq!(page.data.posts[0].slug, "glow");

    let requests = log.lock().unwrap();
    assert!(requests[0].contains("filter=tag%3Alighting"));
    assert!(requests[0].contains("page=2"));
}

#[tokio::test]
async fn test_dot_segment_slug_never_reaches_another_endpoint() {
    let body = r#"{"posts":[{"id":"1","title":"Newest","slug":"newest"}]}"#;
    let (addr, log) = common::start_mock_backend(200, body).await;
    let content = service(addr, FallbackPolicy::OnFailure);

    let post = content.get_post_by_slug("..").await;
    assert!(post.data.is_none());
    assert!(log.lock().unwrap().is_empty());

    content.get_tag_by_slug("../../settings/").await;
    let requests = log.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert!(
        requests[0].starts_with("/ghost/api/content/tags/slug/..%2F..%2Fsettings%2F/?key=test-key"),
        "target {}",
        requests[0]
    );
}
