//! # Pagination
//!
//! Display math for the product list. Nothing here is stored; it is
//! recomputed from the list state on every render.
//!
//! ```text
//! start = (page - 1) * P + 1
//! end   = min(page * P, items + (page - 1) * P)
//! total = total_pages * P        (approximation, see below)
//! ```
//!
//! The API reports only a page count, so `total_items` overstates the real
//! count whenever the last page is partially filled.

// =============================================================================
// Page Window
// =============================================================================

/// Visible item range of the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: u64,
    pub end: u64,
    pub total_items: u64,
}

impl PageWindow {
    /// Derives the window for `page` (1-based) holding `item_count` items.
    pub fn derive(page: u32, page_size: u32, item_count: usize, total_pages: u32) -> Self {
        let page = u64::from(page.max(1));
        let size = u64::from(page_size);
        let offset = (page - 1) * size;

        PageWindow {
            start: offset + 1,
            end: (page * size).min(item_count as u64 + offset),
            total_items: u64::from(total_pages) * size,
        }
    }

    /// "Showing 11-14 of 20 results"
    pub fn summary(&self) -> String {
        format!(
            "Showing {}-{} of {} results",
            self.start, self.end, self.total_items
        )
    }
}

// =============================================================================
// Page Navigation
// =============================================================================

/// Whether the pager is shown at all.
pub fn is_visible(total_pages: u32) -> bool {
    total_pages > 1
}

/// Buttons of the pager, `1..=total_pages`.
pub fn page_numbers(total_pages: u32) -> Vec<u32> {
    (1..=total_pages).collect()
}

/// Target of the "Previous" button.
pub fn previous_page(current: u32) -> u32 {
    current.saturating_sub(1).max(1)
}

/// Target of the "Next" button.
pub fn next_page(current: u32, total_pages: u32) -> u32 {
    current.saturating_add(1).min(total_pages.max(1))
}

// =============================================================================
// Unit Tests
// =============================================================================
