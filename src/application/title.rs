//! Title view state
//!
//! One store per concern the view binds to: the manga detail payload, the
//! current chapter feed page, the pager with its derived navigation window,
//! and the chapters picked for download. Backend failures degrade to an
//! empty view; nothing here surfaces an error state.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::commands;
use super::store::{Derived, Store};
use crate::domain::{Chapter, ChapterQuery, DownloadRequest, Manga, PageWindow, Pager};
use crate::infrastructure::{MangaBackend, UserConfig};

pub struct TitleStore {
    backend: Arc<dyn MangaBackend>,
    config: UserConfig,
    selected: Store<Option<String>>,
    manga: Store<Option<Manga>>,
    chapters: Store<Vec<Chapter>>,
    loading: Store<bool>,
    pager: Store<Option<Pager>>,
    window: Derived<Option<PageWindow>>,
    picked: Store<Vec<String>>,
    query: Store<Option<ChapterQuery>>,
}

impl TitleStore {
    pub fn new(backend: Arc<dyn MangaBackend>, config: UserConfig) -> Self {
        let pager: Store<Option<Pager>> = Store::new(None);
        let window = Derived::new(&pager, |p: &Option<Pager>| p.as_ref().map(Pager::window));

        Self {
            backend,
            config,
            selected: Store::new(None),
            manga: Store::new(None),
            chapters: Store::new(Vec::new()),
            loading: Store::new(false),
            pager,
            window,
            picked: Store::new(Vec::new()),
            query: Store::new(None),
        }
    }

    /// Id of the title this view is showing.
    pub fn selected(&self) -> &Store<Option<String>> {
        &self.selected
    }

    pub fn manga(&self) -> &Store<Option<Manga>> {
        &self.manga
    }

    /// Rows of the currently loaded feed page.
    pub fn chapters(&self) -> &Store<Vec<Chapter>> {
        &self.chapters
    }

    pub fn loading(&self) -> &Store<bool> {
        &self.loading
    }

    pub fn pager(&self) -> &Store<Option<Pager>> {
        &self.pager
    }

    /// Navigation strip contents for the current feed position.
    pub fn page_window(&self) -> &Derived<Option<PageWindow>> {
        &self.window
    }

    /// Chapter ids picked for download, in pick order.
    pub fn picked(&self) -> &Store<Vec<String>> {
        &self.picked
    }

    /// Show a title: fetch its detail payload and the first feed page.
    pub async fn open(&self, id: &str) {
        self.selected.set(Some(id.to_owned()));
        self.manga.set(None);
        self.chapters.set(Vec::new());
        self.pager.set(None);
        self.picked.set(Vec::new());
        self.query.set(None);

        self.loading.set(true);

        match commands::manga(self.backend.as_ref(), id).await {
            Ok(manga) => {
                let lang = manga
                    .view
                    .feed_lang(&self.config.default_lang)
                    .unwrap_or(self.config.default_lang.as_str())
                    .to_owned();
                self.manga.set(Some(manga));

                let query = ChapterQuery::first_page(id, lang, self.config.chapter_page_size);
                self.fetch_feed(query).await;
            }
            Err(err) => warn!("leaving title view empty: {err}"),
        }

        self.loading.set(false);
    }

    /// Jump the chapter feed to a page from the navigation strip.
    ///
    /// Does nothing until a feed page has loaded.
    pub async fn load_page(&self, page: u32) {
        let Some(pager) = self.pager.get() else {
            return;
        };
        let Some(query) = self.query.get() else {
            return;
        };

        let page = page.clamp(1, pager.page_count().max(1));

        self.loading.set(true);
        self.fetch_feed(query.at_offset(pager.offset_for(page))).await;
        self.loading.set(false);
    }

    async fn fetch_feed(&self, query: ChapterQuery) {
        match commands::chapters(self.backend.as_ref(), &query).await {
            Ok(feed) => {
                self.pager.set(Some(feed.pager()));
                self.chapters.set(feed.chapters);
                self.query.set(Some(query));
            }
            Err(err) => {
                warn!("presenting an empty chapter list: {err}");
                self.chapters.set(Vec::new());
                self.pager.set(None);
                self.query.set(None);
            }
        }
    }

    /// Add a chapter to the download pick, or remove it when already picked.
    pub fn toggle_chapter(&self, id: &str) {
        self.picked.update(|picked| {
            if let Some(pos) = picked.iter().position(|p| p == id) {
                picked.remove(pos);
            } else {
                picked.push(id.to_owned());
            }
        });
    }

    pub fn is_picked(&self, id: &str) -> bool {
        self.picked.get().iter().any(|p| p == id)
    }

    pub fn clear_picked(&self) {
        self.picked.set(Vec::new());
    }

    /// Hand the picked chapters to the backend download queue.
    ///
    /// The pick survives a failed request so the user can retry.
    pub async fn download_picked(&self) {
        let chapter_ids = self.picked.get();
        if chapter_ids.is_empty() {
            debug!("no chapters picked, skipping download");
            return;
        }

        let request = DownloadRequest { chapter_ids };
        match commands::download(self.backend.as_ref(), &request).await {
            Ok(()) => {
                info!("queued {} chapters for download", request.chapter_ids.len());
                self.picked.set(Vec::new());
            }
            Err(err) => warn!("keeping the pick, download was not accepted: {err}"),
        }
    }
}
