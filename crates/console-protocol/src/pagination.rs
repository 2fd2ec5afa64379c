//! Page arithmetic for client-side pagination

use serde::Serialize;
use std::ops::Range;

/// One page of a list of `total_items` rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    /// Current page (1-based, always within `1..=max(total_pages, 1)`)
    pub page: usize,

    /// Rows per page (at least 1)
    pub per_page: usize,

    /// Number of rows being paginated
    pub total_items: usize,
}

impl PageWindow {
    /// Create a window, clamping the requested page into range
    #[must_use]
    pub fn new(page: usize, per_page: usize, total_items: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total_items.div_ceil(per_page);
        Self {
            page: clamp_page(page, total_pages),
            per_page,
            total_items,
        }
    }

    /// Number of pages, 0 when there is nothing to show
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.per_page)
    }

    /// Index of the first row on this page
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    /// Row indices covered by this page, empty past the end
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        let start = self.offset().min(self.total_items);
        let end = start.saturating_add(self.per_page).min(self.total_items);
        start..end
    }

    /// Whether a next page exists
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Whether a previous page exists
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Next page number, if any
    #[must_use]
    pub const fn next_page(&self) -> Option<usize> {
        if self.has_next() {
            Some(self.page + 1)
        } else {
            None
        }
    }

    /// Previous page number, if any
    #[must_use]
    pub const fn prev_page(&self) -> Option<usize> {
        if self.has_prev() {
            Some(self.page - 1)
        } else {
            None
        }
    }
}

/// Clamp a requested page into `[1, total_pages]`
///
/// Zero pages is treated as a single empty page, so the result is never 0.
#[must_use]
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_window_meta() {
        let window = PageWindow::new(2, 10, 95);

        assert_eq!(window.page, 2);
        assert_eq!(window.total_pages(), 10); // ceil(95/10)
        assert_eq!(window.offset(), 10);
        assert_eq!(window.range(), 10..20);
        assert!(window.has_next());
        assert!(window.has_prev());
        assert_eq!(window.next_page(), Some(3));
        assert_eq!(window.prev_page(), Some(1));
    }

    #[test]
    fn test_last_page_is_partial() {
        let window = PageWindow::new(10, 10, 95);
        assert_eq!(window.range(), 90..95);
        assert!(!window.has_next());
        assert_eq!(window.next_page(), None);
    }

    #[test]
    fn test_empty_list_is_one_empty_page() {
        let window = PageWindow::new(7, 5, 0);
        assert_eq!(window.page, 1);
        assert_eq!(window.total_pages(), 0);
        assert!(window.range().is_empty());
        assert!(!window.has_prev());
        assert!(!window.has_next());
    }

    #[rstest]
    #[case(0, 4, 1)]
    #[case(1, 4, 1)]
    #[case(3, 4, 3)]
    #[case(9, 4, 4)]
    #[case(usize::MAX, 4, 4)]
    #[case(5, 0, 1)]
    fn test_clamp_page(#[case] page: usize, #[case] total: usize, #[case] expected: usize) {
        assert_eq!(clamp_page(page, total), expected);
    }

    #[test]
    fn test_zero_page_size_is_treated_as_one() {
        let window = PageWindow::new(1, 0, 3);
        assert_eq!(window.per_page, 1);
        assert_eq!(window.total_pages(), 3);
    }

    proptest! {
        #[test]
        fn prop_range_fits_page(
            page in 0usize..1000,
            per_page in 0usize..50,
            total in 0usize..2000,
        ) {
            let window = PageWindow::new(page, per_page, total);
            let range = window.range();
            prop_assert!(range.len() <= window.per_page);
            prop_assert!(range.end <= total);
            prop_assert!(window.page >= 1);
            prop_assert!(window.page <= window.total_pages().max(1));
        }
    }
}
