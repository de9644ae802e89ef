//! End-to-end tests for the list and detail controllers
//!
//! These tests wire the real API client (builder, retrying transport,
//! decoder) to the controllers and script only the HTTP layer:
//! - Two-page accumulation followed by a no-op
//! - Rate-limited search that recovers after backoff
//! - Favorites round trip through the desktop memory store

use bridge_desktop::MemoryFavoritesStore;
use bridge_traits::{error::BridgeError, FavoritesStore, HttpClient, HttpRequest, HttpResponse};
use core_api::RickAndMortyClient;
use core_async::sync::Mutex as AsyncMutex;
use core_catalog::{
    CharacterDetailController, CharacterListController, FavoritesController, ListConfig,
    LoadState, RelatedConfig,
};
use std::sync::Arc;

// ============================================================================
// Mock Implementations
// ============================================================================

/// Routes requests by URL and records them
struct RoutedHttpClient {
    routes: Vec<(&'static str, Vec<u16>, String)>,
    requests: AsyncMutex<Vec<String>>,
}

impl RoutedHttpClient {
    /// `statuses` are served in order for matching URLs, then the last repeats
    fn new(routes: Vec<(&'static str, Vec<u16>, String)>) -> Self {
        Self {
            routes,
            requests: AsyncMutex::new(Vec::new()),
        }
    }

    async fn requests(&self) -> Vec<String> {
        self.requests.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl HttpClient for RoutedHttpClient {
    async fn execute(&self, request: HttpRequest) -> bridge_traits::error::Result<HttpResponse> {
        let mut requests = self.requests.lock().await;
        let seen = requests.iter().filter(|url| **url == request.url).count();
        requests.push(request.url.clone());

        let (_, statuses, body) = self
            .routes
            .iter()
            .find(|(suffix, _, _)| request.url.ends_with(suffix))
            .ok_or_else(|| BridgeError::Network(format!("no route for {}", request.url)))?;
        let status = statuses
            .get(seen)
            .or(statuses.last())
            .copied()
            .unwrap_or(200);
        Ok(HttpResponse::new(status, body.clone()))
    }
}

fn character_json(id: u32, name: &str, location: &str) -> String {
    format!(
        r#"{{"id":{id},"name":"{name}","status":"Alive","species":"Human","type":"","gender":"Female",
        "origin":{{"name":"Earth","url":""}},"location":{{"name":"{location}","url":""}},
        "image":"https://rickandmortyapi.com/api/character/avatar/{id}.jpeg",
        "episode":["https://rickandmortyapi.com/api/episode/1"],
        "url":"https://rickandmortyapi.com/api/character/{id}","created":"2017-11-04T18:48:46.250Z"}}"#
    )
}

fn page_json(characters: &[String], next: Option<&str>) -> String {
    let next = next
        .map(|n| format!("\"{n}\""))
        .unwrap_or_else(|| "null".to_string());
    format!(
        r#"{{"info":{{"count":{},"pages":2,"next":{next},"prev":null}},"results":[{}]}}"#,
        characters.len(),
        characters.join(",")
    )
}

fn list_controller(http: Arc<RoutedHttpClient>) -> CharacterListController {
    let api = RickAndMortyClient::new(http).unwrap();
    CharacterListController::new(Arc::new(api), ListConfig::default())
}

fn ids(state: &LoadState) -> Vec<u32> {
    state.items().iter().map(|c| c.id).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_two_pages_accumulate_then_stop() {
    let http = Arc::new(RoutedHttpClient::new(vec![
        (
            "character?page=1",
            vec![200],
            page_json(
                &[
                    character_json(1, "Rick Sanchez", "Earth"),
                    character_json(2, "Morty Smith", "Earth"),
                ],
                Some("https://rickandmortyapi.com/api/character?page=2"),
            ),
        ),
        (
            "character?page=2",
            vec![200],
            page_json(&[character_json(3, "Summer Smith", "Earth")], None),
        ),
    ]));
    let list = list_controller(http.clone());

    list.load_next_page_if_available().await;
    list.load_next_page_if_available().await;
    list.load_next_page_if_available().await;

    let snapshot = list.snapshot();
    assert_eq!(ids(&snapshot.load_state), vec![1, 2, 3]);
    assert!(snapshot.last_page_info.unwrap().next.is_none());
    assert_eq!(http.requests().await.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_rate_limited_search_recovers() {
    let http = Arc::new(RoutedHttpClient::new(vec![(
        "character?page=1&name=summer",
        vec![429, 429, 200],
        page_json(&[character_json(3, "Summer Smith", "Earth")], None),
    )]));
    let list = list_controller(http.clone());

    list.search_characters("summer").await.await.unwrap();

    let snapshot = list.snapshot();
    assert_eq!(ids(&snapshot.load_state), vec![3]);
    assert_eq!(snapshot.current_query.as_deref(), Some("summer"));
    assert_eq!(http.requests().await.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_persistent_rate_limit_fails_list() {
    let http = Arc::new(RoutedHttpClient::new(vec![(
        "character?page=1",
        vec![429],
        String::new(),
    )]));
    let list = list_controller(http.clone());

    list.load_first_page().await;

    assert_eq!(
        list.snapshot().load_state,
        LoadState::Failed("Bad status code: 429".to_string())
    );
    assert_eq!(http.requests().await.len(), 3);
}

#[tokio::test]
async fn test_favorite_round_trip() {
    let http = Arc::new(RoutedHttpClient::new(vec![(
        "character?page=1",
        vec![200],
        page_json(
            &[
                character_json(1, "Rick Sanchez", "Citadel of Ricks"),
                character_json(2, "Morty Smith", "Citadel of Ricks"),
            ],
            None,
        ),
    )]));
    let api = Arc::new(RickAndMortyClient::new(http).unwrap());
    let store: Arc<dyn FavoritesStore> = Arc::new(MemoryFavoritesStore::new());

    let list = CharacterListController::new(api.clone(), ListConfig::default());
    list.load_first_page().await;
    let rick = list.snapshot().load_state.items()[0].clone();

    let detail =
        CharacterDetailController::new(rick, api, store.clone(), RelatedConfig::default()).await;
    assert!(!detail.is_favorite());
    assert!(detail.toggle_favorite().await.unwrap());
    detail.load_related().await;
    assert_eq!(detail.snapshot().related_by_location.len(), 1);

    let favorites = FavoritesController::new(store.clone());
    favorites.load().await;
    assert_eq!(favorites.snapshot().items[0].name, "Rick Sanchez");

    favorites.remove(1).await.unwrap();
    assert!(!store.is_favorite(1).await.unwrap());
}
