//! # Character List Controller
//!
//! Owns the paginated, filterable, searchable character list.
//!
//! ## Operations
//!
//! - `load_first_page`: page 1 with the active filter, dropped while another load runs
//! - `load_next_page_if_available`: appends the page named by the last `next` cursor
//! - `search_characters`: debounced search that supersedes everything in flight
//! - `update_filter` / `reset_filters`: supersede, swap the filter, reload page 1
//!
//! ## Supersession
//!
//! Every operation that starts a fetch takes a fresh epoch and a child
//! [`CancellationToken`] under the state lock. Starting a search or changing
//! the filter cancels the previous token and bumps the epoch, so results are
//! applied only when their token is live and their epoch is still current.
//! A superseded fetch is cancelled on the wire and, should its response
//! still arrive, discarded.
//!
//! Dropping the last controller handle cancels the root token and with it
//! every outstanding request and debounce.

use std::sync::Arc;

use core_api::{ApiError, CharacterApi, CharacterQuery, CharactersPage};
use core_async::sync::{watch, CancellationToken, DropGuard, Mutex};
use core_async::task::JoinHandle;
use core_async::time::{sleep_or_cancel, Duration};
use tracing::{debug, info, instrument, warn};

use crate::cursor::extract_page_number;
use crate::filter::CharacterFilter;
use crate::state::{ListSnapshot, LoadState};

/// Default delay between the last keystroke and the search request
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(150);

#[derive(Debug, Clone)]
pub struct ListConfig {
    pub search_debounce: Duration,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
        }
    }
}

/// How a fetched page lands in the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Apply {
    Replace,
    Append,
}

/// Ticket for one fetch
struct Fetch {
    epoch: u64,
    token: CancellationToken,
    query: CharacterQuery,
    apply: Apply,
}

struct Inner {
    snapshot: ListSnapshot,
    epoch: u64,
    inflight: Option<CancellationToken>,
}

struct Shared {
    api: Arc<dyn CharacterApi>,
    config: ListConfig,
    root: CancellationToken,
    inner: Mutex<Inner>,
    state_tx: watch::Sender<ListSnapshot>,
}

/// Handle to the character list. Clones share the same state.
#[derive(Clone)]
pub struct CharacterListController {
    shared: Arc<Shared>,
    _guard: Arc<DropGuard>,
}

impl CharacterListController {
    pub fn new(api: Arc<dyn CharacterApi>, config: ListConfig) -> Self {
        let root = CancellationToken::new();
        let (state_tx, _) = watch::channel(ListSnapshot::default());
        let shared = Arc::new(Shared {
            api,
            config,
            root: root.clone(),
            inner: Mutex::new(Inner {
                snapshot: ListSnapshot::default(),
                epoch: 0,
                inflight: None,
            }),
            state_tx,
        });

        Self {
            shared,
            _guard: Arc::new(root.drop_guard()),
        }
    }

    /// Current state
    pub fn snapshot(&self) -> ListSnapshot {
        self.shared.state_tx.borrow().clone()
    }

    /// Receiver that sees every published state change
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot> {
        self.shared.state_tx.subscribe()
    }

    /// Fetch page 1 with the active filter, replacing the list.
    ///
    /// No-op while any load or search is in flight. Clears the search query.
    #[instrument(skip(self))]
    pub async fn load_first_page(&self) {
        let fetch = {
            let mut inner = self.shared.inner.lock().await;
            if inner.snapshot.is_loading {
                debug!("Load already in flight, ignoring first page request");
                return;
            }
            self.shared.begin_first_page(&mut inner, None)
        };
        self.shared.run(fetch).await;
    }

    /// Fetch and append the page named by the last `next` cursor.
    ///
    /// No-op while loading or when the cursor has no page number. Before
    /// anything was ever loaded this behaves as [`Self::load_first_page`].
    #[instrument(skip(self))]
    pub async fn load_next_page_if_available(&self) {
        let fetch = {
            let mut inner = self.shared.inner.lock().await;
            if inner.snapshot.is_loading {
                debug!("Load already in flight, ignoring next page request");
                return;
            }

            let never_loaded = inner.snapshot.last_page_info.is_none()
                && inner.snapshot.load_state == LoadState::Idle;
            let next_page = inner
                .snapshot
                .last_page_info
                .as_ref()
                .and_then(|info| extract_page_number(info.next.as_deref()));

            match next_page {
                Some(page) => self.shared.begin_next_page(&mut inner, page),
                None if never_loaded => self.shared.begin_first_page(&mut inner, None),
                None => {
                    debug!("No next page");
                    return;
                }
            }
        };
        self.shared.run(fetch).await;
    }

    /// Search by name after the debounce interval.
    ///
    /// Cancels whatever is in flight. Leading and trailing whitespace is
    /// ignored and an empty text clears the search. The returned handle
    /// completes once this search was applied or superseded.
    #[instrument(skip(self))]
    pub async fn search_characters(&self, text: &str) -> JoinHandle<()> {
        let query = Some(text.trim())
            .filter(|q| !q.is_empty())
            .map(str::to_string);

        let fetch = {
            let mut inner = self.shared.inner.lock().await;
            self.shared.supersede(&mut inner);
            self.shared.begin_first_page(&mut inner, query)
        };

        let shared = Arc::clone(&self.shared);
        let debounce = self.shared.config.search_debounce;
        core_async::spawn(async move {
            if !sleep_or_cancel(debounce, &fetch.token).await {
                debug!(epoch = fetch.epoch, "Search superseded during debounce");
                return;
            }
            shared.run(fetch).await;
        })
    }

    /// Replace the filter and reload page 1, superseding anything in flight
    #[instrument(skip(self))]
    pub async fn update_filter(&self, filter: CharacterFilter) {
        let fetch = {
            let mut inner = self.shared.inner.lock().await;
            self.shared.supersede(&mut inner);
            inner.snapshot.active_filter = filter;
            self.shared.begin_first_page(&mut inner, None)
        };
        info!(
            status = ?filter.status,
            gender = ?filter.gender,
            "Filter updated"
        );
        self.shared.run(fetch).await;
    }

    /// Clear the filter and reload page 1
    pub async fn reset_filters(&self) {
        self.update_filter(CharacterFilter::default()).await;
    }
}

impl Shared {
    fn publish(&self, inner: &Inner) {
        self.state_tx.send_replace(inner.snapshot.clone());
    }

    /// Cancel the in-flight fetch and invalidate its epoch
    fn supersede(&self, inner: &mut Inner) {
        if let Some(token) = inner.inflight.take() {
            debug!(epoch = inner.epoch, "Cancelling superseded fetch");
            token.cancel();
        }
        inner.epoch += 1;
        inner.snapshot.is_loading = false;
    }

    fn register(&self, inner: &mut Inner) -> (u64, CancellationToken) {
        inner.epoch += 1;
        let token = self.root.child_token();
        inner.inflight = Some(token.clone());
        inner.snapshot.is_loading = true;
        (inner.epoch, token)
    }

    fn begin_first_page(&self, inner: &mut Inner, name: Option<String>) -> Fetch {
        let (epoch, token) = self.register(inner);
        let filter = inner.snapshot.active_filter;

        inner.snapshot.load_state = LoadState::Loading;
        inner.snapshot.current_query = name.clone();
        inner.snapshot.last_page_info = None;
        self.publish(inner);

        Fetch {
            epoch,
            token,
            query: CharacterQuery::page(1)
                .with_name(name)
                .with_status(filter.status)
                .with_gender(filter.gender),
            apply: Apply::Replace,
        }
    }

    fn begin_next_page(&self, inner: &mut Inner, page: u32) -> Fetch {
        let (epoch, token) = self.register(inner);
        let filter = inner.snapshot.active_filter;
        self.publish(inner);

        Fetch {
            epoch,
            token,
            query: CharacterQuery::page(page)
                .with_name(inner.snapshot.current_query.clone())
                .with_status(filter.status)
                .with_gender(filter.gender),
            apply: Apply::Append,
        }
    }

    async fn run(&self, fetch: Fetch) {
        debug!(epoch = fetch.epoch, query = ?fetch.query, "Fetching characters");
        let result = self.api.list_characters(&fetch.query, &fetch.token).await;
        self.apply(fetch, result).await;
    }

    async fn apply(&self, fetch: Fetch, result: Result<CharactersPage, ApiError>) {
        let mut inner = self.inner.lock().await;
        if fetch.token.is_cancelled() || inner.epoch != fetch.epoch {
            debug!(
                epoch = fetch.epoch,
                current = inner.epoch,
                "Discarding stale response"
            );
            return;
        }

        inner.inflight = None;
        inner.snapshot.is_loading = false;

        match result {
            Ok(page) => {
                debug!(
                    page = ?fetch.query.page,
                    results = page.results.len(),
                    "Applying page"
                );
                let mut items = match (fetch.apply, std::mem::take(&mut inner.snapshot.load_state)) {
                    (Apply::Append, LoadState::Loaded(existing)) => existing,
                    _ => Vec::new(),
                };
                items.extend(page.results);
                inner.snapshot.load_state = LoadState::Loaded(items);
                inner.snapshot.last_page_info = Some(page.info);
            }
            Err(error) if error.is_cancelled() => {
                debug!(epoch = fetch.epoch, "Fetch cancelled");
                inner.snapshot.load_state = match std::mem::take(&mut inner.snapshot.load_state) {
                    LoadState::Loading => LoadState::Idle,
                    other => other,
                };
            }
            Err(error) => {
                warn!(error = %error, page = ?fetch.query.page, "Failed to load characters");
                inner.snapshot.load_state = LoadState::Failed(error.to_string());
                inner.snapshot.last_page_info = None;
            }
        }

        self.publish(&inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ids, page, FakeApi};
    use core_api::{Gender, Status};
    use core_async::time::sleep;

    fn controller(api: Arc<FakeApi>) -> CharacterListController {
        CharacterListController::new(api, ListConfig::default())
    }

    fn fast(result: CharactersPage) -> (Duration, Result<CharactersPage, ApiError>) {
        (Duration::from_millis(10), Ok(result))
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_page_loads_and_records_cursor() {
        let api = Arc::new(FakeApi::new(|_| fast(page(&[1, 2], Some(2)))));
        let list = controller(api.clone());

        list.load_first_page().await;

        let snapshot = list.snapshot();
        assert_eq!(ids(snapshot.load_state.items()), vec![1, 2]);
        assert!(!snapshot.is_loading);
        assert_eq!(
            extract_page_number(snapshot.last_page_info.unwrap().next.as_deref()),
            Some(2)
        );
        assert_eq!(api.calls(), vec![CharacterQuery::page(1)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_page_is_idempotent_while_loading() {
        let api = Arc::new(FakeApi::new(|_| {
            (Duration::from_millis(100), Ok(page(&[1], None)))
        }));
        let list = controller(api.clone());

        let first = list.clone();
        let handle = tokio::spawn(async move { first.load_first_page().await });
        tokio::task::yield_now().await;
        assert!(list.snapshot().is_loading);

        list.load_first_page().await;
        handle.await.unwrap();

        assert_eq!(api.calls().len(), 1);
        assert_eq!(ids(list.snapshot().load_state.items()), vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_page_appends() {
        let api = Arc::new(FakeApi::new(|query| match query.page {
            Some(1) => fast(page(&[1, 2], Some(2))),
            _ => fast(page(&[3, 4], None)),
        }));
        let list = controller(api.clone());

        list.load_first_page().await;
        list.load_next_page_if_available().await;

        assert_eq!(ids(list.snapshot().load_state.items()), vec![1, 2, 3, 4]);
        assert_eq!(api.calls()[1], CharacterQuery::page(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_pages_end_to_end_then_noop() {
        let api = Arc::new(FakeApi::new(|query| match query.page {
            Some(1) => fast(page(&[1, 2], Some(2))),
            Some(2) => fast(page(&[3], None)),
            other => panic!("unexpected page {other:?}"),
        }));
        let list = controller(api.clone());

        list.load_next_page_if_available().await;
        list.load_next_page_if_available().await;
        assert_eq!(ids(list.snapshot().load_state.items()), vec![1, 2, 3]);

        list.load_next_page_if_available().await;
        assert_eq!(api.calls().len(), 2);
        assert_eq!(ids(list.snapshot().load_state.items()), vec![1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_page_failure_discards_items() {
        let api = Arc::new(FakeApi::new(|query| match query.page {
            Some(1) => fast(page(&[1, 2], Some(2))),
            _ => (
                Duration::from_millis(10),
                Err(ApiError::BadStatus {
                    status: 500,
                    body: String::new(),
                }),
            ),
        }));
        let list = controller(api.clone());

        list.load_first_page().await;
        list.load_next_page_if_available().await;

        let snapshot = list.snapshot();
        assert_eq!(
            snapshot.load_state,
            LoadState::Failed("Bad status code: 500".to_string())
        );
        assert!(snapshot.last_page_info.is_none());

        list.load_next_page_if_available().await;
        assert_eq!(api.calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_page_keeps_query_and_filter() {
        let api = Arc::new(FakeApi::new(|query| match query.page {
            Some(1) => fast(page(&[1], Some(2))),
            _ => fast(page(&[2], None)),
        }));
        let list = controller(api.clone());

        list.update_filter(CharacterFilter::new(Some(Status::Alive), None))
            .await;
        list.search_characters("  rick ").await.await.unwrap();
        list.load_next_page_if_available().await;

        let calls = api.calls();
        assert_eq!(
            calls.last().unwrap(),
            &CharacterQuery::page(2)
                .with_name(Some("rick".to_string()))
                .with_status(Some(Status::Alive))
        );
        assert_eq!(ids(list.snapshot().load_state.items()), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latest_search_wins_when_older_is_slower() {
        let api = Arc::new(FakeApi::new(|query| match query.name.as_deref() {
            Some("ri") => (Duration::from_millis(500), Ok(page(&[10], None))),
            _ => (Duration::from_millis(20), Ok(page(&[1], None))),
        }));
        let list = controller(api.clone());

        let older = list.search_characters("ri").await;
        sleep(Duration::from_millis(200)).await;
        let newer = list.search_characters("rick").await;

        older.await.unwrap();
        newer.await.unwrap();

        let snapshot = list.snapshot();
        assert_eq!(ids(snapshot.load_state.items()), vec![1]);
        assert_eq!(snapshot.current_query.as_deref(), Some("rick"));
        assert!(!snapshot.is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latest_search_wins_when_stale_response_arrives_last() {
        let api = Arc::new(
            FakeApi::new(|query| match query.name.as_deref() {
                Some("ri") => (Duration::from_millis(500), Ok(page(&[10], None))),
                _ => (Duration::from_millis(20), Ok(page(&[1], None))),
            })
            .ignoring_cancel(),
        );
        let list = controller(api.clone());

        let older = list.search_characters("ri").await;
        sleep(Duration::from_millis(200)).await;
        let newer = list.search_characters("rick").await;

        newer.await.unwrap();
        older.await.unwrap();

        assert_eq!(api.calls().len(), 2);
        assert_eq!(ids(list.snapshot().load_state.items()), vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_typing_sends_one_request() {
        let api = Arc::new(FakeApi::new(|_| fast(page(&[1], None))));
        let list = controller(api.clone());

        let mut handles = Vec::new();
        for text in ["r", "ri", "ric", "rick"] {
            handles.push(list.search_characters(text).await);
            sleep(Duration::from_millis(40)).await;
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name.as_deref(), Some("rick"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_search_clears_query() {
        let api = Arc::new(FakeApi::new(|_| fast(page(&[1], None))));
        let list = controller(api.clone());

        list.search_characters("   ").await.await.unwrap();

        assert_eq!(api.calls(), vec![CharacterQuery::page(1)]);
        assert_eq!(list.snapshot().current_query, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_enters_loading_before_debounce() {
        let api = Arc::new(FakeApi::new(|_| fast(page(&[1], None))));
        let list = controller(api.clone());

        let handle = list.search_characters("morty").await;
        let snapshot = list.snapshot();
        assert_eq!(snapshot.load_state, LoadState::Loading);
        assert!(snapshot.is_loading);
        assert!(api.calls().is_empty());

        handle.await.unwrap();
        assert_eq!(list.snapshot().current_query.as_deref(), Some("morty"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_failure_is_reported() {
        let api = Arc::new(FakeApi::new(|_| {
            (
                Duration::from_millis(10),
                Err(ApiError::Transport("offline".to_string())),
            )
        }));
        let list = controller(api.clone());

        list.search_characters("rick").await.await.unwrap();

        assert_eq!(
            list.snapshot().load_state,
            LoadState::Failed("Network error: offline".to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_filter_resets_pagination_and_query() {
        let api = Arc::new(FakeApi::new(|query| match query.page {
            Some(1) => fast(page(&[1, 2], Some(2))),
            _ => fast(page(&[3, 4], Some(3))),
        }));
        let list = controller(api.clone());
        let mut rx = list.subscribe();

        list.search_characters("rick").await.await.unwrap();
        list.load_next_page_if_available().await;
        assert_eq!(ids(list.snapshot().load_state.items()), vec![1, 2, 3, 4]);
        rx.borrow_and_update();

        let filter = CharacterFilter::new(None, Some(Gender::Female));
        let updating = list.clone();
        let handle = tokio::spawn(async move { updating.update_filter(filter).await });

        rx.changed().await.unwrap();
        {
            let during = rx.borrow_and_update();
            assert_eq!(during.load_state, LoadState::Loading);
            assert_eq!(during.current_query, None);
            assert!(during.last_page_info.is_none());
        }
        handle.await.unwrap();

        let snapshot = list.snapshot();
        assert_eq!(ids(snapshot.load_state.items()), vec![1, 2]);
        assert_eq!(snapshot.active_filter, filter);
        assert_eq!(
            api.calls().last().unwrap(),
            &CharacterQuery::page(1).with_gender(Some(Gender::Female))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_filter_supersedes_pending_search() {
        let api = Arc::new(FakeApi::new(|query| match query.name.as_deref() {
            Some(_) => (Duration::from_millis(300), Ok(page(&[99], None))),
            None => fast(page(&[1], None)),
        }));
        let list = controller(api.clone());

        let search = list.search_characters("rick").await;
        sleep(Duration::from_millis(200)).await;
        list.update_filter(CharacterFilter::new(Some(Status::Dead), None))
            .await;
        search.await.unwrap();

        let snapshot = list.snapshot();
        assert_eq!(ids(snapshot.load_state.items()), vec![1]);
        assert_eq!(snapshot.current_query, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_filters_after_failure() {
        let api = Arc::new(FakeApi::new(|query| match query.status {
            Some(_) => (
                Duration::from_millis(10),
                Err(ApiError::BadStatus {
                    status: 404,
                    body: r#"{"error":"There is nothing here"}"#.to_string(),
                }),
            ),
            None => fast(page(&[1, 2, 3], None)),
        }));
        let list = controller(api.clone());

        list.update_filter(CharacterFilter::new(Some(Status::Unknown), None))
            .await;
        assert!(list.snapshot().load_state.is_failed());

        list.reset_filters().await;
        let snapshot = list.snapshot();
        assert_eq!(ids(snapshot.load_state.items()), vec![1, 2, 3]);
        assert!(!snapshot.active_filter.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_controller_cancels_search() {
        let api = Arc::new(FakeApi::new(|_| {
            (Duration::from_secs(10), Ok(page(&[1], None)))
        }));
        let list = controller(api.clone());
        let rx = list.subscribe();

        let handle = list.search_characters("rick").await;
        sleep(Duration::from_millis(200)).await;
        drop(list);

        handle.await.unwrap();
        assert_eq!(api.calls().len(), 1);
        assert_eq!(rx.borrow().load_state, LoadState::Loading);
    }
}
