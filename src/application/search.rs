//! Search view state
//!
//! `results` starts as `None` (nothing searched yet) and becomes `Some` the
//! first time a search finishes. A failed search presents an empty result
//! list instead of an error surface.

use std::sync::Arc;

use tracing::warn;

use super::commands;
use super::store::Store;
use crate::domain::MangaView;
use crate::infrastructure::{MangaBackend, UserConfig};

pub struct SearchStore {
    backend: Arc<dyn MangaBackend>,
    config: UserConfig,
    results: Store<Option<Vec<MangaView>>>,
    loading: Store<bool>,
}

impl SearchStore {
    pub fn new(backend: Arc<dyn MangaBackend>, config: UserConfig) -> Self {
        Self {
            backend,
            config,
            results: Store::new(None),
            loading: Store::new(false),
        }
    }

    /// Result rows of the last finished search; `None` before the first one.
    pub fn results(&self) -> &Store<Option<Vec<MangaView>>> {
        &self.results
    }

    pub fn loading(&self) -> &Store<bool> {
        &self.loading
    }

    /// Run a title search, capped at the configured row limit, and publish
    /// the outcome.
    ///
    /// An empty query leaves the current results untouched.
    pub async fn search(&self, query: &str) {
        if query.is_empty() {
            return;
        }

        self.loading.set(true);

        let limit = self.config.search_limit;
        let rows = match commands::search(self.backend.as_ref(), query, limit).await {
            Ok(rows) => rows,
            Err(err) => {
                warn!("presenting empty search results: {err}");
                Vec::new()
            }
        };

        self.results.set(Some(rows));
        self.loading.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChapterFeed, ChapterQuery, DownloadRequest, Manga};
    use crate::infrastructure::{BackendError, defaults};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubBackend {
        titles: Vec<String>,
        fail_search: bool,
        queries: Mutex<Vec<(String, u32)>>,
    }

    impl StubBackend {
        fn with_titles(titles: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                titles: titles.iter().map(|t| (*t).to_owned()).collect(),
                fail_search: false,
                queries: Mutex::new(Vec::new()),
            })
        }

        fn many(count: u32) -> Arc<Self> {
            Arc::new(Self {
                titles: (1..=count).map(|i| format!("Series {i}")).collect(),
                fail_search: false,
                queries: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                titles: Vec::new(),
                fail_search: true,
                queries: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl MangaBackend for StubBackend {
        async fn search(&self, query: &str, limit: u32) -> Result<Vec<MangaView>, BackendError> {
            self.queries.lock().unwrap().push((query.to_owned(), limit));
            if self.fail_search {
                return Err(BackendError::Api {
                    status: 500,
                    message: "catalog down".to_owned(),
                });
            }
            Ok(self
                .titles
                .iter()
                .take(limit as usize)
                .enumerate()
                .map(|(i, title)| MangaView {
                    id: format!("m{i}"),
                    title: title.clone(),
                    status: "ongoing".to_owned(),
                    cover_url: None,
                    lang_codes: vec!["en".to_owned()],
                })
                .collect())
        }

        async fn manga(&self, _id: &str) -> Result<Manga, BackendError> {
            Err(BackendError::Internal("not scripted".to_owned()))
        }

        async fn chapters(&self, _query: &ChapterQuery) -> Result<ChapterFeed, BackendError> {
            Err(BackendError::Internal("not scripted".to_owned()))
        }

        async fn download(&self, _request: &DownloadRequest) -> Result<(), BackendError> {
            Err(BackendError::Internal("not scripted".to_owned()))
        }
    }

    fn store_over(backend: Arc<StubBackend>) -> SearchStore {
        SearchStore::new(backend, UserConfig::default())
    }

    #[tokio::test]
    async fn results_start_unset() {
        let store = store_over(StubBackend::with_titles(&[]));

        assert_eq!(store.results().get(), None);
        assert!(!store.loading().get());
    }

    #[tokio::test]
    async fn search_publishes_the_result_rows() {
        let store = store_over(StubBackend::with_titles(&["Solo", "Duo"]));

        store.search("solo").await;

        let rows = store.results().get().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "Solo");
        assert!(!store.loading().get());
    }

    #[tokio::test]
    async fn search_forwards_the_configured_row_limit() {
        let backend = StubBackend::many(50);
        let store = store_over(backend.clone());

        store.search("series").await;

        let rows = store.results().get().unwrap();
        assert_eq!(rows.len(), defaults::SEARCH_LIMIT as usize);
        assert_eq!(
            backend.queries.lock().unwrap()[0],
            ("series".to_owned(), defaults::SEARCH_LIMIT)
        );
    }

    #[tokio::test]
    async fn empty_query_is_a_no_op() {
        let backend = StubBackend::with_titles(&["Solo"]);
        let store = store_over(backend.clone());

        store.search("").await;

        assert_eq!(store.results().get(), None);
        assert!(backend.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_search_degrades_to_empty_results() {
        let store = store_over(StubBackend::failing());

        store.search("solo").await;

        assert_eq!(store.results().get(), Some(Vec::new()));
        assert!(!store.loading().get());
    }

    #[tokio::test]
    async fn loading_toggles_around_the_search() {
        let store = store_over(StubBackend::with_titles(&["Solo"]));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _keep = store.loading().subscribe(move |v| sink.lock().unwrap().push(*v));

        store.search("solo").await;

        assert_eq!(*seen.lock().unwrap(), vec![false, true, false]);
    }
}
