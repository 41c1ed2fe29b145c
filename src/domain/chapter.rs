//! Chapter feed types crossing the backend bridge.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::pagination::Pager;

/// Scanlation group credited on a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ScanGroup {
    pub id: String,
    pub name: String,
}

/// One downloadable chapter row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Chapter {
    pub id: String,
    /// Chapter number as the source lists it ("10", "10.5", "Oneshot").
    pub chapter: String,
    pub volume: Option<String>,
    pub title: Option<String>,
    pub scan_group: Option<ScanGroup>,
    /// Page image count.
    pub pages: u32,
}

/// One page of a title's chapter feed plus its pagination envelope.
///
/// `limit` and `offset` echo the request; `total` counts every chapter
/// the feed holds, not just the returned slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChapterFeed {
    pub chapters: Vec<Chapter>,
    pub limit: u32,
    pub offset: u32,
    pub total: u32,
}

impl ChapterFeed {
    /// Pager for the navigation strip under the chapter list.
    pub fn pager(&self) -> Pager {
        Pager::new(self.total, self.limit, self.offset)
    }
}

/// Parameters for one chapter feed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChapterQuery {
    pub manga_id: String,
    /// Translation language filter, e.g. "en".
    pub lang: String,
    pub limit: u32,
    pub offset: u32,
}

impl ChapterQuery {
    /// Query for the first feed page of a title.
    pub fn first_page(manga_id: impl Into<String>, lang: impl Into<String>, limit: u32) -> Self {
        Self {
            manga_id: manga_id.into(),
            lang: lang.into(),
            limit,
            offset: 0,
        }
    }

    /// Same query pointed at another offset.
    pub fn at_offset(&self, offset: u32) -> Self {
        Self { offset, ..self.clone() }
    }
}

/// Chapter ids queued for download, in the order the user picked them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DownloadRequest {
    pub chapter_ids: Vec<String>,
}
