//! Pagination state
//!
//! Tracks the 1-indexed current page. The page always stays within
//! `1..=max(total_pages, 1)`.

use std::fmt;

/// Current page and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    current_page: usize,
    rows_per_page: usize,
}

impl PaginationState {
    /// Start on page 1; a zero page size is bumped to 1
    pub fn new(rows_per_page: usize) -> Self {
        Self {
            current_page: 1,
            rows_per_page: rows_per_page.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Back to page 1 (new file load)
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Jump to `page`, clamped into range
    pub fn go_to(&mut self, page: usize, total_pages: usize) -> usize {
        self.current_page = page.clamp(1, total_pages.max(1));
        self.current_page
    }

    pub fn next(&mut self, total_pages: usize) -> usize {
        self.go_to(self.current_page + 1, total_pages)
    }

    pub fn previous(&mut self, total_pages: usize) -> usize {
        self.go_to(self.current_page.saturating_sub(1), total_pages)
    }
}

/// One entry of the page-number strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(usize),
    Gap,
}

impl fmt::Display for PageMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(n) => write!(f, "{}", n),
            Self::Gap => f.write_str("..."),
        }
    }
}

/// Page numbers to show: first, last and `current ± 1`, with gaps marked
pub fn page_window(current_page: usize, total_pages: usize) -> Vec<PageMarker> {
    let mut markers = Vec::new();
    let mut last_shown = 0;

    for page in 1..=total_pages {
        let visible = page == 1
            || page == total_pages
            || (page + 1 >= current_page && page <= current_page + 1);
        if !visible {
            continue;
        }
        if last_shown != 0 && page > last_shown + 1 {
            markers.push(PageMarker::Gap);
        }
        markers.push(PageMarker::Page(page));
        last_shown = page;
    }

    markers
}
