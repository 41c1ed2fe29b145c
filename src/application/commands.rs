//! Typed wrappers around the backend commands
//!
//! One function per command. Each wrapper logs the request and the returned
//! payload at debug level and failures at error level with the command name,
//! then hands the result up unchanged. Falling back to something renderable
//! is the calling store's decision, not this layer's.

use serde::Serialize;
use tracing::{debug, error};

use crate::domain::{ChapterFeed, ChapterQuery, DownloadRequest, Manga, MangaView};
use crate::infrastructure::{BackendError, MangaBackend};

/// Backend failure tagged with the command that hit it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to invoke command `{command}`: {source}")]
pub struct CommandError {
    pub command: &'static str,
    #[source]
    pub source: BackendError,
}

fn fail(command: &'static str, source: BackendError) -> CommandError {
    error!("failed to invoke command `{command}`: {source}");
    CommandError { command, source }
}

fn debug_payload<T: Serialize>(label: &str, payload: &T) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    match serde_json::to_string_pretty(payload) {
        Ok(json) => debug!("received {label}: {json}"),
        Err(e) => debug!("received unprintable {label}: {e}"),
    }
}

/// Full-text title search.
pub async fn search(
    backend: &dyn MangaBackend,
    query: &str,
    limit: u32,
) -> Result<Vec<MangaView>, CommandError> {
    debug!("searching for '{query}' (limit {limit})");

    let results = backend
        .search(query, limit)
        .await
        .map_err(|source| fail("search", source))?;

    debug_payload("search results", &results);
    Ok(results)
}

/// Detail payload for one title.
pub async fn manga(backend: &dyn MangaBackend, id: &str) -> Result<Manga, CommandError> {
    debug!("fetching manga '{id}'");

    let manga = backend
        .manga(id)
        .await
        .map_err(|source| fail("manga", source))?;

    debug_payload("manga", &manga);
    Ok(manga)
}

/// One page of a title's chapter feed.
pub async fn chapters(
    backend: &dyn MangaBackend,
    query: &ChapterQuery,
) -> Result<ChapterFeed, CommandError> {
    debug!(
        "fetching chapters of '{}' (lang {}, limit {}, offset {})",
        query.manga_id, query.lang, query.limit, query.offset
    );

    let feed = backend
        .chapters(query)
        .await
        .map_err(|source| fail("chapters", source))?;

    debug_payload("chapter feed", &feed);
    Ok(feed)
}

/// Queue chapters for download.
pub async fn download(
    backend: &dyn MangaBackend,
    request: &DownloadRequest,
) -> Result<(), CommandError> {
    debug!("requesting download of {} chapters", request.chapter_ids.len());

    backend
        .download(request)
        .await
        .map_err(|source| fail("download", source))?;

    debug!("download request accepted");
    Ok(())
}
