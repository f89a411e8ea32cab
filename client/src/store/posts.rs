use std::sync::Arc;

use posts_shared::{Article, ArticlePayload};
use tokio::sync::watch;

use super::{FavoriteToggle, MutationHooks, StateCell};
use crate::{config::ClientConfig, error::ApiError, pagination, services::ArticleApi};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostsState {
    pub page: u32,
    pub page_size: u32,
    /// Total article count from the last successful list response.
    pub total: u64,
    pub loading: bool,
    pub error: Option<String>,
    pub articles: Vec<Article>,
    pub current: Option<Article>,
}

impl Default for PostsState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: crate::config::DEFAULT_PAGE_SIZE,
            total: 0,
            loading: false,
            error: None,
            articles: Vec::new(),
            current: None,
        }
    }
}

impl PostsState {
    pub fn max_page(&self) -> u32 {
        pagination::max_page(self.total, self.page_size)
    }
}

/// Article list, the article being viewed, and every mutation on them.
///
/// Concurrent calls are allowed. Overlapping writes to the same field are
/// resolved by whichever call commits last; in-flight requests are never
/// cancelled.
pub struct PostsStore {
    state: StateCell<PostsState>,
    api: Arc<dyn ArticleApi>,
    config: ClientConfig,
}

impl PostsStore {
    pub fn new(api: Arc<dyn ArticleApi>, config: &ClientConfig) -> Self {
        Self {
            state: StateCell::new(PostsState {
                page_size: config.page_size,
                ..PostsState::default()
            }),
            api,
            config: config.clone(),
        }
    }

    pub fn snapshot(&self) -> PostsState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<PostsState> {
        self.state.subscribe()
    }

    pub fn articles(&self) -> Vec<Article> {
        self.state.read(|s| s.articles.clone())
    }

    pub fn current(&self) -> Option<Article> {
        self.state.read(|s| s.current.clone())
    }

    pub fn page(&self) -> u32 {
        self.state.read(|s| s.page)
    }

    pub fn page_size(&self) -> u32 {
        self.state.read(|s| s.page_size)
    }

    pub fn total(&self) -> u64 {
        self.state.read(|s| s.total)
    }

    pub fn max_page(&self) -> u32 {
        self.state.read(PostsState::max_page)
    }

    pub fn loading(&self) -> bool {
        self.state.read(|s| s.loading)
    }

    pub fn error(&self) -> Option<String> {
        self.state.read(|s| s.error.clone())
    }

    /// Load one page of articles. `None` keeps the current page or page
    /// size. The requested page and size are recorded before the request
    /// is sent, so they stay put even if it fails.
    pub async fn load_page(&self, page: Option<u32>, page_size: Option<u32>) -> Result<(), ApiError> {
        let (current_page, current_size) = self.state.read(|s| (s.page, s.page_size));
        let page = page.unwrap_or(current_page).max(1);
        let page_size = match self.config.validate_page_size(page_size.unwrap_or(current_size)) {
            Ok(page_size) => page_size,
            Err(err) => {
                self.state.patch(|s| s.error = Some(err.message()));
                return Err(err);
            },
        };

        self.state.patch(|s| {
            s.page = page;
            s.page_size = page_size;
            s.loading = true;
            s.error = None;
        });

        match self.api.list(page, page_size).await {
            Ok(response) => {
                tracing::debug!(page, page_size, total = response.articles_count, "articles page loaded");
                self.state.patch(|s| {
                    s.articles = response.articles;
                    s.total = response.articles_count;
                    s.loading = false;
                });
                Ok(())
            },
            Err(err) => {
                tracing::warn!(page, page_size, "failed to load articles: {err}");
                self.fail(&err);
                Err(err)
            },
        }
    }

    /// Reload the page currently shown.
    pub async fn reload(&self) -> Result<(), ApiError> {
        self.load_page(None, None).await
    }

    /// Move one page forward. Does nothing on the last page.
    pub async fn next_page(&self) -> Result<(), ApiError> {
        let (page, max_page) = self.state.read(|s| (s.page, s.max_page()));
        if page >= max_page {
            return Ok(());
        }
        self.load_page(Some(pagination::clamp_page(page + 1, max_page)), None)
            .await
    }

    pub async fn prev_page(&self) -> Result<(), ApiError> {
        let (page, max_page) = self.state.read(|s| (s.page, s.max_page()));
        if page <= 1 {
            return Ok(());
        }
        self.load_page(Some(pagination::clamp_page(page - 1, max_page)), None)
            .await
    }

    pub async fn load_one(&self, slug: &str) -> Result<Article, ApiError> {
        self.begin();
        match self.api.get(slug).await {
            Ok(article) => {
                self.state.patch(|s| {
                    s.current = Some(article.clone());
                    s.loading = false;
                });
                Ok(article)
            },
            Err(err) => {
                tracing::warn!(slug, "failed to load article: {err}");
                self.fail(&err);
                Err(err)
            },
        }
    }

    /// Create an article, make it `current`, then reload page 1 so it shows
    /// up in the list.
    pub async fn create_one(&self, payload: &ArticlePayload, mut hooks: MutationHooks) -> Result<Article, ApiError> {
        self.begin();
        match self.api.create(payload).await {
            Ok(article) => {
                tracing::info!(slug = %article.slug, "article created");
                self.state.patch(|s| {
                    s.current = Some(article.clone());
                    s.loading = false;
                });
                hooks.done(&article.slug);
                let page_size = self.page_size();
                // 刷新失败已经记录在 state.error 中
                let _ = self.load_page(Some(1), Some(page_size)).await;
                Ok(article)
            },
            Err(err) => {
                tracing::warn!("failed to create article: {err}");
                self.fail(&err);
                hooks.failed(&err);
                Err(err)
            },
        }
    }

    /// Update an article and swap the server's copy into the list at the
    /// same position.
    pub async fn update_one(
        &self,
        slug: &str,
        patch: &ArticlePayload,
        mut hooks: MutationHooks,
    ) -> Result<Article, ApiError> {
        self.begin();
        match self.api.update(slug, patch).await {
            Ok(article) => {
                tracing::info!(slug, "article updated");
                self.state.patch(|s| {
                    for entry in s.articles.iter_mut().filter(|entry| entry.slug == slug) {
                        *entry = article.clone();
                    }
                    s.current = Some(article.clone());
                    s.loading = false;
                });
                hooks.done(&article.slug);
                Ok(article)
            },
            Err(err) => {
                tracing::warn!(slug, "failed to update article: {err}");
                self.fail(&err);
                hooks.failed(&err);
                Err(err)
            },
        }
    }

    /// Delete an article. With `refresh` the current page is reloaded
    /// afterwards to backfill the gap.
    pub async fn delete_one(&self, slug: &str, refresh: bool) -> Result<(), ApiError> {
        self.begin();
        if let Err(err) = self.api.delete(slug).await {
            tracing::warn!(slug, "failed to delete article: {err}");
            self.fail(&err);
            return Err(err);
        }

        tracing::info!(slug, "article deleted");
        self.state.patch(|s| {
            s.articles.retain(|article| article.slug != slug);
            s.total = s.total.saturating_sub(1);
            if s.current.as_ref().is_some_and(|article| article.slug == slug) {
                s.current = None;
            }
            s.loading = false;
        });

        if refresh {
            // 刷新失败已经记录在 state.error 中
            let _ = self.reload().await;
        }
        Ok(())
    }

    /// Flip the favorite flag of `slug` locally, then confirm it with the
    /// server. On failure every local copy is put back the way it was.
    ///
    /// Returns `Ok(None)` without contacting the server when no local copy
    /// of the article exists.
    pub async fn toggle_favorite(&self, slug: &str) -> Result<Option<Article>, ApiError> {
        let mut toggle = None;
        self.state.patch(|s| {
            toggle = FavoriteToggle::begin(s, slug);
            if toggle.is_some() {
                s.error = None;
            }
        });
        let Some(mut toggle) = toggle else {
            tracing::debug!(slug, "favorite toggle skipped, article not loaded");
            return Ok(None);
        };

        let result = if toggle.wants_favorite() {
            self.api.favorite(slug).await
        } else {
            self.api.unfavorite(slug).await
        };

        match result {
            Ok(article) => {
                self.state.patch(|s| toggle.confirm(s, &article));
                Ok(Some(article))
            },
            Err(err) => {
                tracing::warn!(slug, "favorite toggle rolled back: {err}");
                self.state.patch(|s| {
                    toggle.roll_back(s);
                    s.error = Some(err.message());
                });
                Err(err)
            },
        }
    }

    fn begin(&self) {
        self.state.patch(|s| {
            s.loading = true;
            s.error = None;
        });
    }

    fn fail(&self, err: &ApiError) {
        self.state.patch(|s| {
            s.loading = false;
            s.error = Some(err.message());
        });
    }
}

impl std::fmt::Debug for PostsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostsStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{
        collections::VecDeque,
        sync::{Arc, Mutex},
    };

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use posts_shared::{Article, ArticlePayload, ArticlesResponse, Author};
    use tokio::sync::oneshot;

    use super::*;
    use crate::store::MutationHooks;

    pub(crate) fn article(slug: &str, favorited: bool, favorites_count: u32) -> Article {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid date");
        Article {
            slug: slug.to_string(),
            title: format!("Title {slug}"),
            description: "Desc".to_string(),
            body: "Body".to_string(),
            tag_list: vec![],
            created_at: at,
            updated_at: at,
            favorited,
            favorites_count,
            author: Author {
                username: "mo".to_string(),
                image: None,
                following: false,
            },
        }
    }

    fn boom() -> ApiError {
        ApiError::Network("boom".to_string())
    }

    type Queue<T> = Mutex<VecDeque<Result<T, ApiError>>>;

    #[derive(Default)]
    struct StubArticles {
        list: Queue<ArticlesResponse>,
        get: Queue<Article>,
        create: Queue<Article>,
        update: Queue<Article>,
        delete: Queue<()>,
        favorite: Queue<Article>,
        list_gate: Mutex<Option<oneshot::Receiver<Result<ArticlesResponse, ApiError>>>>,
        favorite_gate: Mutex<Option<oneshot::Receiver<Result<Article, ApiError>>>>,
        calls: Mutex<Vec<String>>,
    }

    impl StubArticles {
        fn push<T>(queue: &Queue<T>, reply: Result<T, ApiError>) {
            queue.lock().expect("lock").push_back(reply);
        }

        fn pop<T>(&self, queue: &Queue<T>, call: String) -> Result<T, ApiError> {
            self.calls.lock().expect("lock").push(call);
            queue
                .lock()
                .expect("lock")
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Network("no stub reply".to_string())))
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("lock").clone()
        }
    }

    #[async_trait]
    impl ArticleApi for StubArticles {
        async fn list(&self, page: u32, page_size: u32) -> Result<ArticlesResponse, ApiError> {
            let gate = self.list_gate.lock().expect("lock").take();
            if let Some(gate) = gate {
                self.calls.lock().expect("lock").push(format!("list {page} {page_size}"));
                return gate.await.unwrap_or_else(|_| Err(boom()));
            }
            self.pop(&self.list, format!("list {page} {page_size}"))
        }

        async fn get(&self, slug: &str) -> Result<Article, ApiError> {
            self.pop(&self.get, format!("get {slug}"))
        }

        async fn create(&self, _payload: &ArticlePayload) -> Result<Article, ApiError> {
            self.pop(&self.create, "create".to_string())
        }

        async fn update(&self, slug: &str, _payload: &ArticlePayload) -> Result<Article, ApiError> {
            self.pop(&self.update, format!("update {slug}"))
        }

        async fn delete(&self, slug: &str) -> Result<(), ApiError> {
            self.pop(&self.delete, format!("delete {slug}"))
        }

        async fn favorite(&self, slug: &str) -> Result<Article, ApiError> {
            let gate = self.favorite_gate.lock().expect("lock").take();
            if let Some(gate) = gate {
                self.calls.lock().expect("lock").push(format!("favorite {slug}"));
                return gate.await.unwrap_or_else(|_| Err(boom()));
            }
            self.pop(&self.favorite, format!("favorite {slug}"))
        }

        async fn unfavorite(&self, slug: &str) -> Result<Article, ApiError> {
            self.pop(&self.favorite, format!("unfavorite {slug}"))
        }
    }

    fn store_with(api: Arc<StubArticles>) -> PostsStore {
        PostsStore::new(api, &ClientConfig::default())
    }

    fn page_of(articles: Vec<Article>, count: u64) -> ArticlesResponse {
        ArticlesResponse {
            articles,
            articles_count: count,
        }
    }

    #[tokio::test]
    async fn load_page_takes_articles_and_total_from_server() {
        let api = Arc::new(StubArticles::default());
        StubArticles::push(&api.list, Ok(page_of(vec![article("b", false, 0), article("a", false, 0)], 42)));
        let store = store_with(api.clone());

        store.load_page(Some(2), Some(20)).await.expect("page loads");

        assert_eq!(api.calls(), vec!["list 2 20".to_string()]);
        assert_eq!(store.total(), 42);
        assert_eq!(
            store.articles().iter().map(|a| a.slug.as_str()).collect::<Vec<_>>(),
            vec!["b", "a"]
        );
        assert_eq!((store.page(), store.page_size()), (2, 20));
        assert_eq!(store.max_page(), 3);
        assert!(!store.loading());
        assert_eq!(store.error(), None);
    }

    #[tokio::test]
    async fn failed_load_page_keeps_previous_articles() {
        let api = Arc::new(StubArticles::default());
        StubArticles::push(&api.list, Ok(page_of(vec![article("a", false, 0)], 1)));
        StubArticles::push(&api.list, Err(boom()));
        let store = store_with(api.clone());

        store.load_page(None, None).await.expect("first page loads");
        let err = store.load_page(Some(3), None).await.expect_err("second load fails");

        assert_eq!(err.message(), "Network error: boom");
        assert_eq!(store.articles(), vec![article("a", false, 0)]);
        assert_eq!(store.total(), 1);
        assert_eq!(store.page(), 3);
        assert!(!store.loading());
        assert_eq!(store.error().as_deref(), Some("Network error: boom"));
    }

    #[tokio::test]
    async fn load_page_marks_request_before_it_resolves() {
        let api = Arc::new(StubArticles::default());
        let (tx, rx) = oneshot::channel();
        *api.list_gate.lock().expect("lock") = Some(rx);
        let store = store_with(api.clone());
        store.load_page(None, Some(7)).await.expect_err("7 is not allowed");
        assert!(store.error().is_some());

        let load = store.load_page(Some(3), Some(20));
        tokio::pin!(load);
        assert!(futures::poll!(&mut load).is_pending());

        assert!(store.loading());
        assert_eq!((store.page(), store.page_size()), (3, 20));
        assert_eq!(store.error(), None);
        assert_eq!(api.calls(), vec!["list 3 20".to_string()]);

        tx.send(Ok(page_of(vec![article("a", false, 0)], 60)))
            .expect("load still waiting");
        load.await.expect("page loads");

        assert!(!store.loading());
        assert_eq!(store.total(), 60);
        assert_eq!(store.articles(), vec![article("a", false, 0)]);
    }

    #[tokio::test]
    async fn disallowed_page_size_is_rejected_without_a_request() {
        let api = Arc::new(StubArticles::default());
        let store = store_with(api.clone());

        let err = store.load_page(Some(1), Some(7)).await.expect_err("7 is not allowed");

        assert!(matches!(err, ApiError::Config(_)));
        assert!(api.calls().is_empty());
        assert_eq!(store.page_size(), 10);
        assert!(store.error().is_some());
    }

    #[tokio::test]
    async fn next_and_prev_page_stay_in_bounds() {
        let api = Arc::new(StubArticles::default());
        StubArticles::push(&api.list, Ok(page_of(vec![], 15)));
        StubArticles::push(&api.list, Ok(page_of(vec![], 15)));
        let store = store_with(api.clone());

        store.prev_page().await.expect("no-op on first page");
        store.reload().await.expect("page 1");
        store.next_page().await.expect("page 2");
        store.next_page().await.expect("no-op on last page");

        assert_eq!(api.calls(), vec!["list 1 10".to_string(), "list 2 10".to_string()]);
        assert_eq!(store.page(), 2);
    }

    #[tokio::test]
    async fn load_one_twice_yields_same_current() {
        let api = Arc::new(StubArticles::default());
        StubArticles::push(&api.get, Ok(article("hello", false, 1)));
        StubArticles::push(&api.get, Ok(article("hello", false, 1)));
        let store = store_with(api);

        store.load_one("hello").await.expect("first load");
        assert_eq!(store.current(), Some(article("hello", false, 1)));
        assert!(!store.loading());

        store.load_one("hello").await.expect("second load");
        assert_eq!(store.current(), Some(article("hello", false, 1)));
        assert!(!store.loading());
    }

    #[tokio::test]
    async fn failed_load_one_leaves_current_untouched() {
        let api = Arc::new(StubArticles::default());
        StubArticles::push(&api.get, Ok(article("hello", false, 1)));
        StubArticles::push(&api.get, Err(boom()));
        let store = store_with(api);

        store.load_one("hello").await.expect("first load");
        store.load_one("other").await.expect_err("second load fails");

        assert_eq!(store.current().map(|a| a.slug), Some("hello".to_string()));
        assert!(store.error().is_some());
    }

    #[tokio::test]
    async fn create_sets_current_calls_back_and_reloads_first_page() {
        let api = Arc::new(StubArticles::default());
        StubArticles::push(&api.create, Ok(article("fresh", false, 0)));
        StubArticles::push(&api.list, Ok(page_of(vec![article("fresh", false, 0)], 1)));
        let store = store_with(api.clone());
        let done = Arc::new(Mutex::new(None));
        let sink = done.clone();

        let created = store
            .create_one(
                &ArticlePayload::new("t", "d", "b"),
                MutationHooks::new().on_done(move |slug| *sink.lock().expect("lock") = Some(slug)),
            )
            .await
            .expect("create succeeds");

        assert_eq!(created.slug, "fresh");
        assert_eq!(done.lock().expect("lock").as_deref(), Some("fresh"));
        assert_eq!(store.current().map(|a| a.slug), Some("fresh".to_string()));
        assert_eq!(api.calls(), vec!["create".to_string(), "list 1 10".to_string()]);
        assert_eq!(store.total(), 1);
    }

    #[tokio::test]
    async fn create_failure_reports_raw_error_to_hook() {
        let api = Arc::new(StubArticles::default());
        StubArticles::push(&api.create, Err(ApiError::Status {
            status: 422,
            body: serde_json::json!({ "errors": { "title": ["can't be blank"] } }),
        }));
        let store = store_with(api.clone());
        let seen = Arc::new(Mutex::new(None));
        let sink = seen.clone();

        store
            .create_one(
                &ArticlePayload::default(),
                MutationHooks::new().on_error(move |err| *sink.lock().expect("lock") = Some(err)),
            )
            .await
            .expect_err("create fails");

        let err = seen.lock().expect("lock").take().expect("hook called");
        assert_eq!(err.server_errors().for_field("title").as_deref(), Some("can't be blank"));
        assert_eq!(store.error().as_deref(), Some("title: can't be blank"));
        assert_eq!(store.current(), None);
        assert_eq!(api.calls(), vec!["create".to_string()]);
    }

    #[tokio::test]
    async fn update_replaces_entry_in_place() {
        let api = Arc::new(StubArticles::default());
        StubArticles::push(&api.list, Ok(page_of(vec![article("a1", false, 0), article("a2", false, 0)], 2)));
        let mut updated = article("a2", false, 0);
        updated.title = "Changed".to_string();
        StubArticles::push(&api.update, Ok(updated.clone()));
        let store = store_with(api);

        store.reload().await.expect("list");
        store
            .update_one("a2", &ArticlePayload {
                title: Some("Changed".to_string()),
                ..ArticlePayload::default()
            }, MutationHooks::new())
            .await
            .expect("update");

        assert_eq!(store.articles(), vec![article("a1", false, 0), updated.clone()]);
        assert_eq!(store.current(), Some(updated));
    }

    #[tokio::test]
    async fn failed_update_changes_nothing_but_error() {
        let api = Arc::new(StubArticles::default());
        StubArticles::push(&api.list, Ok(page_of(vec![article("a1", false, 0)], 1)));
        StubArticles::push(&api.update, Err(boom()));
        let store = store_with(api);

        store.reload().await.expect("list");
        let before = store.snapshot();
        store
            .update_one("a1", &ArticlePayload::default(), MutationHooks::new())
            .await
            .expect_err("update fails");

        let after = store.snapshot();
        assert_eq!(after.articles, before.articles);
        assert_eq!(after.current, before.current);
        assert_eq!(after.error.as_deref(), Some("Network error: boom"));
    }

    #[tokio::test]
    async fn delete_without_refresh_drops_entry_and_current() {
        let api = Arc::new(StubArticles::default());
        StubArticles::push(&api.list, Ok(page_of(vec![article("a1", false, 0), article("a2", false, 0)], 2)));
        StubArticles::push(&api.get, Ok(article("a2", false, 0)));
        StubArticles::push(&api.delete, Ok(()));
        let store = store_with(api.clone());

        store.reload().await.expect("list");
        store.load_one("a2").await.expect("current");
        store.delete_one("a2", false).await.expect("delete");

        assert_eq!(store.articles(), vec![article("a1", false, 0)]);
        assert_eq!(store.total(), 1);
        assert_eq!(store.current(), None);
        assert_eq!(api.calls().last().map(String::as_str), Some("delete a2"));
    }

    #[tokio::test]
    async fn delete_keeps_unrelated_current_and_refreshes() {
        let api = Arc::new(StubArticles::default());
        StubArticles::push(&api.get, Ok(article("a1", false, 0)));
        StubArticles::push(&api.delete, Ok(()));
        StubArticles::push(&api.list, Ok(page_of(vec![article("a1", false, 0)], 1)));
        let store = store_with(api.clone());

        store.load_one("a1").await.expect("current");
        store.delete_one("a2", true).await.expect("delete");

        assert_eq!(store.current().map(|a| a.slug), Some("a1".to_string()));
        assert_eq!(store.total(), 1);
        assert_eq!(api.calls(), vec!["get a1".to_string(), "delete a2".to_string(), "list 1 10".to_string()]);
    }

    #[tokio::test]
    async fn failed_delete_leaves_list_and_current_alone() {
        let api = Arc::new(StubArticles::default());
        StubArticles::push(&api.list, Ok(page_of(vec![article("a1", false, 0), article("a2", false, 0)], 2)));
        StubArticles::push(&api.get, Ok(article("a1", false, 0)));
        StubArticles::push(&api.delete, Err(boom()));
        let store = store_with(api.clone());
        store.reload().await.expect("list");
        store.load_one("a1").await.expect("current");
        let before = store.snapshot();

        store.delete_one("a1", true).await.expect_err("delete fails");

        let after = store.snapshot();
        assert_eq!(after.articles, before.articles);
        assert_eq!(after.total, 2);
        assert_eq!(after.current, Some(article("a1", false, 0)));
        assert!(!after.loading);
        assert_eq!(after.error.as_deref(), Some("Network error: boom"));
        assert_eq!(api.calls().last().map(String::as_str), Some("delete a1"));
    }

    #[tokio::test]
    async fn favorite_is_optimistic_and_rolls_back_on_failure() {
        let api = Arc::new(StubArticles::default());
        StubArticles::push(&api.list, Ok(page_of(vec![article("a1", false, 2)], 1)));
        let (tx, rx) = oneshot::channel();
        *api.favorite_gate.lock().expect("lock") = Some(rx);
        let store = store_with(api.clone());
        store.reload().await.expect("list");

        let toggle = store.toggle_favorite("a1");
        tokio::pin!(toggle);
        assert!(futures::poll!(&mut toggle).is_pending());

        let pending = store.articles()[0].clone();
        assert!(pending.favorited);
        assert_eq!(pending.favorites_count, 3);

        tx.send(Err(boom())).expect("toggle still waiting");
        toggle.await.expect_err("server rejected");

        let settled = store.articles()[0].clone();
        assert!(!settled.favorited);
        assert_eq!(settled.favorites_count, 2);
        assert_eq!(store.error().as_deref(), Some("Network error: boom"));
    }

    #[tokio::test]
    async fn favorite_reconciles_with_server_count() {
        let api = Arc::new(StubArticles::default());
        StubArticles::push(&api.get, Ok(article("a1", true, 7)));
        StubArticles::push(&api.favorite, Ok(article("a1", false, 4)));
        let store = store_with(api.clone());
        store.load_one("a1").await.expect("current");

        let result = store.toggle_favorite("a1").await.expect("toggle");

        assert_eq!(result, Some(article("a1", false, 4)));
        assert_eq!(store.current(), Some(article("a1", false, 4)));
        assert_eq!(api.calls().last().map(String::as_str), Some("unfavorite a1"));
    }

    #[tokio::test]
    async fn favorite_of_unknown_article_is_skipped() {
        let api = Arc::new(StubArticles::default());
        let store = store_with(api.clone());

        assert_eq!(store.toggle_favorite("ghost").await.expect("no-op"), None);
        assert!(api.calls().is_empty());
    }
}
