//! End-to-end navigation: history source, observer, router, session.

use std::sync::Arc;
use std::time::Duration;

use decor_atlas::config::AtlasConfig;
use decor_atlas::content::{ContentService, FallbackCatalog, FallbackPolicy, GhostClient, Origin};
use decor_atlas::lifecycle::Site;
use decor_atlas::navigation::{
    Activation, LinkActivator, LocationObserver, MemoryHistory, Modifiers, NavigationMode, NavigationSource,
};
use decor_atlas::views::{site_routes, Page, PageLoader, PageState, Session, ViewId};

mod common;

fn offline_site(mode: NavigationMode) -> Site {
    let mut config = AtlasConfig::default();
    config.navigation.mode = mode;
    config.content.fallback = FallbackPolicy::Always;
    Site::bootstrap(&config).unwrap()
}

#[test]
fn test_hash_location_resolves_category() {
    let history = Arc::new(MemoryHistory::new("/#/tag/lighting"));
    let observer = LocationObserver::attach(history, NavigationMode::Hash);
    let routes = site_routes().unwrap();

    let location = observer.current_location();
    assert_eq!(location.path, "/tag/lighting");

    let matched = routes.resolve_location(&location);
    assert_eq!(matched.view(), Some(&ViewId::Category));
    assert_eq!(matched.param("slug"), Some("lighting"));
}

#[test]
fn test_meta_click_leaves_source_untouched() {
    let history = Arc::new(MemoryHistory::new("/"));
    let observer = LocationObserver::attach(history.clone(), NavigationMode::History);
    let links = LinkActivator::new(observer);

    let modifiers = Modifiers {
        meta: true,
        ..Modifiers::NONE
    };
    assert_eq!(links.activate("/about", modifiers), Activation::Deferred);
    assert_eq!(history.href(), "/");
    assert_eq!(history.len(), 1);
}

#[test]
fn test_sandboxed_history_falls_back_to_reload() {
    let history = Arc::new(MemoryHistory::new("/"));
    history.set_sandboxed(true);
    let observer = LocationObserver::attach(history.clone(), NavigationMode::History);
    let links = LinkActivator::new(observer);

    let activation = links.activate("/shop", Modifiers::NONE);
    assert_eq!(activation, Activation::Reloaded { href: "/shop".to_string() });
    assert_eq!(history.document_loads(), 2);
    assert_eq!(history.href(), "/shop");
}

#[tokio::test]
async fn test_browse_history_mode_without_reload() {
    let site = offline_site(NavigationMode::History);
    let history = Arc::new(MemoryHistory::new("/"));
    let session = site.session(history.clone()).unwrap();
    assert!(matches!(*session.ready().await.unwrap(), Page::Home(_)));

    for (target, expected) in [
        ("/tag/lighting", "category"),
        ("/product-akari-1a", "post"),
        ("/shop?category=Decor", "shop"),
        ("/privacy", "privacy"),
        ("/unknown/deeply/nested", "not_found"),
    ] {
        history.scroll_to(300);
        assert!(matches!(session.navigate(target), Activation::Navigated(_)));
        assert_eq!(history.scroll_y(), 0);
        assert_eq!(session.ready().await.unwrap().label(), expected, "target {}", target);
    }

    assert_eq!(history.document_loads(), 1);
    assert_eq!(history.len(), 6);

    assert!(history.back());
    assert_eq!(session.location().path, "/privacy");
    assert_eq!(session.ready().await.unwrap().label(), "privacy");
}

#[tokio::test]
async fn test_browse_hash_mode() {
    let site = offline_site(NavigationMode::Hash);
    let history = Arc::new(MemoryHistory::new("/"));
    let session = site.session(history.clone()).unwrap();
    session.ready().await.unwrap();

    assert_eq!(session.links().href("/tag/decor"), "#/tag/decor");
    session.navigate("/tag/decor?page=1");
    assert_eq!(history.href(), "/#/tag/decor?page=1");

    let page = session.ready().await.unwrap();
    let Page::Category(category) = page.as_ref() else {
        panic!("expected category page, got {:?}", page);
    };
    assert_eq!(category.slug, "decor");
    assert_eq!(category.page.posts.len(), 2);

    // Same fragment again: no hashchange, no remount.
    let before = session.watch();
    session.navigate("/tag/decor?page=1");
    assert!(!before.has_changed().unwrap());
}

#[tokio::test]
async fn test_slow_content_is_discarded_when_overtaken() {
    let (addr, _) = common::start_programmable_backend(|target: String| async move {
        if target.contains("posts/slug/slow-post") {
            tokio::time::sleep(Duration::from_millis(300)).await;
        }
        (200, r#"{"posts":[],"tags":[]}"#.to_string())
    })
    .await;

    let site_url = format!("http://{}", addr);
    let client = GhostClient::new(&site_url, "k", Duration::from_secs(5)).unwrap();
    let content = ContentService::new(
        Some(client),
        FallbackCatalog::builtin(),
        &site_url,
        FallbackPolicy::OnFailure,
    );
    let loader = PageLoader::new(Arc::new(content), 12, 12);
    let history = Arc::new(MemoryHistory::new("/"));
    let session = Session::start(history.clone(), NavigationMode::History, site_routes().unwrap(), loader).unwrap();
    session.ready().await.unwrap();

    session.navigate("/slow-post");
    session.navigate("/about");
    let page = session.ready().await.unwrap();
    assert_eq!(page.label(), "about");

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(session.discarded(), 1);
    match session.state() {
        PageState::Ready(page) => assert_eq!(page.label(), "about"),
        PageState::Loading { path } => panic!("still loading {}", path),
    }
}

#[tokio::test]
async fn test_remote_home_page_origin() {
    let body = r#"{"posts":[
        {"id":"a","title":"One","slug":"one"},
        {"id":"b","title":"Two","slug":"two"},
        {"id":"c","title":"Three","slug":"three"},
        {"id":"d","title":"Four","slug":"four"},
        {"id":"e","title":"Five","slug":"five"}
    ]}"#;
    let (addr, _) = common::start_mock_backend(200, body).await;
    let site_url = format!("http://{}", addr);
    let client = GhostClient::new(&site_url, "k", Duration::from_secs(2)).unwrap();
    let content = ContentService::new(Some(client), FallbackCatalog::builtin(), &site_url, FallbackPolicy::OnFailure);
    let loader = PageLoader::new(Arc::new(content), 12, 12);

    let home = loader.home().await;
    assert_eq!(home.origin, Origin::Remote);
    assert_eq!(home.latest.unwrap().slug, "one");
    assert_eq!(home.recent.len(), 3);
    assert_eq!(home.archive.len(), 1);
    assert_eq!(home.archive[0].slug, "five");
}

#[test]
fn test_detached_source_yields_empty_location() {
    let source: Arc<dyn NavigationSource> = Arc::new(decor_atlas::navigation::Detached);
    let observer = LocationObserver::attach(source, NavigationMode::Hash);
    let location = observer.current_location();
    assert!(location.path.is_empty());
    assert!(site_routes().unwrap().resolve_location(&location).is_not_found());
}
