//! Pagination for the full post list.
//!
//! Pages are 1-indexed. Controls are buttons carrying `data-action` so the
//! page can report them as `prev_page`/`next_page` events.

use std::ops::Range;

use maud::{html, Markup, Render};

/// Page arithmetic plus the previous/next controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub current_page: usize,
    /// Total number of pages, at least 1
    pub total_pages: usize,
    /// Items per page
    pub page_size: usize,
    /// Number of items being paginated
    pub total_items: usize,
}

impl Pagination {
    /// Paginate `total_items` at `page_size` per page, clamping `page` into range.
    #[must_use]
    pub fn new(total_items: usize, page_size: usize, page: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_items.div_ceil(page_size).max(1);
        Self {
            current_page: page.clamp(1, total_pages),
            total_pages,
            page_size,
            total_items,
        }
    }

    /// Item indices shown on the current page.
    #[must_use]
    pub fn item_range(&self) -> Range<usize> {
        let start = (self.current_page - 1) * self.page_size;
        start..(start + self.page_size).min(self.total_items)
    }

    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

impl Render for Pagination {
    fn render(&self) -> Markup {
        html! {
            nav class="pagination" {
                button type="button" class="page-prev" data-action="prev_page" disabled[!self.has_prev()] {
                    "\u{00ab} Previous"
                }
                span class="page-info" {
                    "Page " (self.current_page) " of " (self.total_pages)
                }
                button type="button" class="page-next" data-action="next_page" disabled[!self.has_next()] {
                    "Next \u{00bb}"
                }
            }
        }
    }
}
