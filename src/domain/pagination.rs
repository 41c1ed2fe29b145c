//! Pagination domain logic centralization.
//!
//! Responsibility:
//! - page window (current group) computation for the chapter list controls
//! - jump-to-first / jump-to-last targets shown next to an ellipsis
//! - [`Pager`]: mapping backend feed metadata (total/limit/offset) to pages

use serde::Serialize;
use ts_rs::TS;

/// Largest page count that is still rendered as a full `1..=n` strip.
pub const MAX_FULL_PAGES: u32 = 10;

/// Pages listed on each side of the current page once shrinking kicks in.
pub const GROUP_OFFSET: u32 = 2;

/// Page numbers to render around the current page, plus the jump targets
/// for the boundary controls.
///
/// A jump target is `None` when the window already touches that boundary;
/// otherwise it is always page `1` or the final page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PageWindow {
    pub leading_jump: Option<u32>,
    pub window: Vec<u32>,
    pub trailing_jump: Option<u32>,
}

/// Full `[1..=page_count]` strip; empty when there are no pages.
pub fn page_list(page_count: u32) -> Vec<u32> {
    (1..=page_count).collect()
}

/// Contiguous run of page numbers to list around `current_page`.
///
/// Rules:
/// - `page_count <= MAX_FULL_PAGES`: every page is listed, no shrinking.
/// - otherwise the run is `current ± GROUP_OFFSET`, clamped to `[1, page_count]`.
/// - snap-to-boundary: a run that would hide exactly one page behind an
///   ellipsis absorbs it instead; an ellipsis must hide at least two pages.
///
/// Callers keep `1 <= current_page <= page_count` (for `page_count > 0`);
/// out-of-range input yields an unspecified but non-panicking window.
pub fn current_group(current_page: u32, page_count: u32) -> Vec<u32> {
    if page_count <= MAX_FULL_PAGES {
        return page_list(page_count);
    }

    let mut start = current_page.saturating_sub(GROUP_OFFSET).max(1);
    let mut end = current_page.saturating_add(GROUP_OFFSET).min(page_count);

    if start - 1 == 1 {
        start = 1;
    }

    if end.saturating_add(1) == page_count {
        end = page_count;
    }

    (start..=end).collect()
}

/// Window plus boundary jump targets for the navigation strip.
pub fn page_window(current_page: u32, page_count: u32) -> PageWindow {
    let window = current_group(current_page, page_count);

    let leading_jump = match window.first() {
        Some(&first) if first != 1 => Some(1),
        _ => None,
    };
    let trailing_jump = match window.last() {
        Some(&last) if last != page_count => Some(page_count),
        _ => None,
    };

    PageWindow {
        leading_jump,
        window,
        trailing_jump,
    }
}

/// Position inside a paginated backend feed.
///
/// Built from the `total` / `limit` / `offset` envelope the backend returns
/// with every chapter feed page; converts between item offsets (what the
/// backend speaks) and 1-based page numbers (what the navigation strip
/// renders).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Pager {
    total: u32,
    limit: u32,
    offset: u32,
}

impl Pager {
    pub fn new(total: u32, limit: u32, offset: u32) -> Self {
        Self {
            total,
            limit,
            offset,
        }
    }

    /// Number of pages in the feed. A zero `limit` never comes out of a
    /// well-formed feed envelope; treat it as an empty feed rather than
    /// dividing by zero.
    pub fn page_count(&self) -> u32 {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(self.limit)
    }

    /// 1-based page number the current offset falls on.
    pub fn current_page(&self) -> u32 {
        if self.limit == 0 {
            return 1;
        }
        self.offset / self.limit + 1
    }

    /// Item offset to request for a 1-based page number.
    pub fn offset_for(&self, page: u32) -> u32 {
        page.saturating_sub(1) * self.limit
    }

    /// Navigation window for the current position.
    pub fn window(&self) -> PageWindow {
        page_window(self.current_page(), self.page_count())
    }
}
