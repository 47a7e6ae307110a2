//! End-to-end tests: the explore page against a live mock API.
//!
//! Each test binds the API router on an ephemeral localhost port and
//! drives the page through the real HTTP client.

#![allow(clippy::unwrap_used)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use explorer_api::build_router;
use explorer_api::state::AppState;
use explorer_client::page::FETCH_FAILED_NOTICE;
use explorer_client::{CatalogClient, ExplorePage};
use explorer_store::{AppContext, FileStorage, MemoryStorage};
use explorer_types::{ExperienceId, ExperienceSource, RatingThreshold};
use tokio::net::TcpListener;

const FIXTURE: &str = r#"{
    "internalExperiences": [
        { "id": 1, "title": "Spa", "description": "Relax" },
        { "id": 2, "title": "Gym", "description": "Workout" }
    ],
    "externalExperiences": [
        { "id": 101, "name": "Local Cafe", "distance": "0.3 miles", "rating": 4.5 },
        { "id": 102, "name": "Ocean Bistro", "distance": "1.2 miles", "rating": 4.2 }
    ]
}"#;

async fn spawn_api() -> SocketAddr {
    let state = Arc::new(AppState::from_json(FIXTURE, Duration::ZERO).unwrap());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });
    addr
}

async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

fn names(cards: &[explorer_client::Card]) -> Vec<&str> {
    cards.iter().map(|c| c.name.as_str()).collect()
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_fetch_catalog_from_live_api() {
    let addr = spawn_api().await;
    let client = CatalogClient::new(format!("http://{addr}"));

    let catalog = client.fetch_catalog().await.unwrap();
    assert_eq!(catalog.internal_experiences.len(), 2);
    assert_eq!(catalog.external_experiences.len(), 2);
    assert_eq!(
        catalog.find(ExperienceSource::External, ExperienceId(102)).unwrap().any_name(),
        "Ocean Bistro"
    );
}

#[tokio::test]
async fn test_page_load_then_filter() {
    let addr = spawn_api().await;
    let client = CatalogClient::new(format!("http://{addr}"));
    let mut page = ExplorePage::new(AppContext::provision(&MemoryStorage::new(), "/explore"));

    page.load(&client).await;
    assert!(!page.is_loading());
    assert!(page.notice().is_none());

    page.set_rating_option("4.5").unwrap();
    let cards = page.cards().unwrap();
    assert_eq!(names(&cards.internal), vec!["Spa", "Gym"]);
    assert_eq!(names(&cards.external), vec!["Local Cafe"]);

    page.set_search("gym");
    let cards = page.cards().unwrap();
    assert_eq!(names(&cards.internal), vec!["Gym"]);
    assert!(cards.external.is_empty());
}

#[tokio::test]
async fn test_unreachable_api_shows_notice_and_empty_lists() {
    let addr = closed_port().await;
    let client = CatalogClient::new(format!("http://{addr}"));
    let mut page = ExplorePage::new(AppContext::provision(&MemoryStorage::new(), "/explore"));

    page.load(&client).await;

    assert!(!page.is_loading());
    assert_eq!(page.notice(), Some(FETCH_FAILED_NOTICE));
    let cards = page.cards().unwrap();
    assert!(cards.internal.is_empty());
    assert!(cards.external.is_empty());
}

#[tokio::test]
async fn test_unknown_route_is_a_fetch_failure() {
    let addr = spawn_api().await;
    let client = CatalogClient::new(format!("http://{addr}/missing"));
    let mut page = ExplorePage::new(AppContext::provision(&MemoryStorage::new(), "/explore"));

    page.load(&client).await;

    assert_eq!(page.notice(), Some(FETCH_FAILED_NOTICE));
    assert!(page.catalog().is_empty());
}

#[tokio::test]
async fn test_preferences_survive_restart_on_disk() {
    let addr = spawn_api().await;
    let client = CatalogClient::new(format!("http://{addr}"));
    let dir = tempfile::tempdir().unwrap();

    {
        let storage = FileStorage::open(dir.path()).unwrap();
        let mut page = ExplorePage::new(AppContext::provision(&storage, "/explore"));
        page.load(&client).await;
        page.toggle_favorite(ExperienceId(1001)).unwrap();
        page.toggle_favorite(ExperienceId(1002)).unwrap();
        page.set_rating_option("4").unwrap();
    }

    let storage = FileStorage::open(dir.path()).unwrap();
    let page = ExplorePage::new(AppContext::provision(&storage, "/explore"));
    let store = page.context().experiences().unwrap();
    assert!(store.is_favorite(ExperienceId(1001)));
    assert!(store.is_favorite(ExperienceId(1002)));
    assert_eq!(store.favorites().len(), 2);
    assert_eq!(store.rating_filter(), Some(RatingThreshold::Four));
    assert!(store.selected_experience().is_none());
}
