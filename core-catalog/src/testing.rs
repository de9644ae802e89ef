//! In-memory `CharacterApi` for controller tests

use std::sync::Mutex;

use async_trait::async_trait;
use core_api::{
    ApiError, Character, CharacterApi, CharacterQuery, CharactersPage, Episode, Gender, Location,
    LocationRef, Page, PageInfo, Status,
};
use core_async::sync::CancellationToken;
use core_async::time::{sleep, sleep_or_cancel, Duration};

pub(crate) type Handler =
    Box<dyn Fn(&CharacterQuery) -> (Duration, Result<CharactersPage, ApiError>) + Send + Sync>;

/// Answers `list_characters` from a handler after a per-response delay.
///
/// With `ignore_cancel` the fake keeps sleeping after its token fires, so a
/// stale response still arrives and has to be discarded by the caller.
pub(crate) struct FakeApi {
    handler: Handler,
    ignore_cancel: bool,
    calls: Mutex<Vec<CharacterQuery>>,
}

impl FakeApi {
    pub(crate) fn new(
        handler: impl Fn(&CharacterQuery) -> (Duration, Result<CharactersPage, ApiError>)
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            ignore_cancel: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn ignoring_cancel(mut self) -> Self {
        self.ignore_cancel = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<CharacterQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CharacterApi for FakeApi {
    async fn list_characters(
        &self,
        query: &CharacterQuery,
        cancel: &CancellationToken,
    ) -> Result<CharactersPage, ApiError> {
        self.calls.lock().unwrap().push(query.clone());
        let (delay, result) = (self.handler)(query);
        if self.ignore_cancel {
            sleep(delay).await;
        } else if !sleep_or_cancel(delay, cancel).await {
            return Err(ApiError::Cancelled);
        }
        result
    }

    async fn get_character(&self, id: u32, _: &CancellationToken) -> Result<Character, ApiError> {
        Ok(character(id, &format!("Character {id}")))
    }

    async fn get_location(&self, _: u32, _: &CancellationToken) -> Result<Location, ApiError> {
        Err(ApiError::Transport("not scripted".to_string()))
    }

    async fn get_episode(&self, _: u32, _: &CancellationToken) -> Result<Episode, ApiError> {
        Err(ApiError::Transport("not scripted".to_string()))
    }
}

pub(crate) fn character(id: u32, name: &str) -> Character {
    Character {
        id,
        name: name.to_string(),
        status: Status::Alive,
        species: "Human".to_string(),
        kind: String::new(),
        gender: Gender::Male,
        origin: LocationRef {
            name: "Earth (C-137)".to_string(),
            url: String::new(),
        },
        location: LocationRef {
            name: "Earth (C-137)".to_string(),
            url: String::new(),
        },
        image_url: String::new(),
        episode_urls: vec!["https://rickandmortyapi.com/api/episode/1".to_string()],
        url: format!("https://rickandmortyapi.com/api/character/{id}"),
        created_at: String::new(),
    }
}

pub(crate) fn page(ids: &[u32], next_page: Option<u32>) -> CharactersPage {
    Page {
        info: PageInfo {
            count: ids.len() as u32,
            total_pages: next_page.unwrap_or(1),
            next: next_page
                .map(|n| format!("https://rickandmortyapi.com/api/character?page={n}")),
            prev: None,
        },
        results: ids
            .iter()
            .map(|id| character(*id, &format!("Character {id}")))
            .collect(),
    }
}

pub(crate) fn ids(characters: &[Character]) -> Vec<u32> {
    characters.iter().map(|c| c.id).collect()
}
