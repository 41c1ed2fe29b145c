//! Backend bridge - the async boundary between the stores and the host
//!
//! The desktop shell exposes search, title lookup, chapter feeds and
//! downloads as host commands. Everything above that boundary talks to
//! this trait instead, so tests can swap in a scripted backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::domain::{ChapterFeed, ChapterQuery, DownloadRequest, Manga, MangaView};

/// Failure reported by a backend command.
///
/// The shape is serializable because the host side returns it across the
/// bridge as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "detail", rename_all = "camelCase")]
#[ts(export)]
pub enum BackendError {
    /// Search was invoked with a blank query.
    #[error("search query must not be empty")]
    EmptyQuery,
    /// The upstream catalog answered with a non-success status.
    #[error("catalog responded {status}: {message}")]
    Api { status: u16, message: String },
    /// Anything that died before reaching the catalog.
    #[error("{0}")]
    Internal(String),
}

/// Host commands the manga views are built on.
///
/// Implementations must be safe to share behind an `Arc` because every
/// store holds the same backend handle.
#[async_trait]
pub trait MangaBackend: Send + Sync {
    /// Full-text title search returning at most `limit` rows. Rejects blank
    /// queries with [`BackendError::EmptyQuery`].
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<MangaView>, BackendError>;

    /// Detail payload for one title.
    async fn manga(&self, id: &str) -> Result<Manga, BackendError>;

    /// One page of a title's chapter feed.
    async fn chapters(&self, query: &ChapterQuery) -> Result<ChapterFeed, BackendError>;

    /// Queue the given chapters for download.
    async fn download(&self, request: &DownloadRequest) -> Result<(), BackendError>;
}
