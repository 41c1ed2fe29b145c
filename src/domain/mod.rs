//! Domain module - Core types shared by the stores and the backend bridge
//!
//! Holds the manga and chapter wire types plus the pagination math the
//! chapter feed navigation is built on.

pub mod chapter;
pub mod manga;
pub mod pagination;

// Re-export commonly used items
pub use chapter::{Chapter, ChapterFeed, ChapterQuery, DownloadRequest, ScanGroup};
pub use manga::{Manga, MangaView};
pub use pagination::{PageWindow, Pager, page_list, page_window};
