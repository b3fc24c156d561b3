//! Page navigation over the filtered user list.
//!
//! [`Pager`] is a read-only snapshot of `(page, page_count)`. Its methods only
//! ever return in-range targets, so the handler can pass them straight to
//! `QueryStore::set_page`.

/// Navigation snapshot for the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_count: usize,
}

impl Pager {
    #[must_use]
    pub const fn new(page: usize, page_count: usize) -> Self {
        Self { page, page_count }
    }

    /// Whether the pager is shown at all.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.page_count > 1
    }

    /// Target of the "previous" control; `None` on the first page.
    #[must_use]
    pub const fn previous(&self) -> Option<usize> {
        if self.page > 1 && self.page <= self.page_count {
            Some(self.page - 1)
        } else if self.page > self.page_count && self.page_count > 0 {
            Some(self.page_count)
        } else {
            None
        }
    }

    /// Target of the "next" control; `None` on or past the last page.
    #[must_use]
    pub const fn next(&self) -> Option<usize> {
        if self.page < self.page_count {
            Some(self.page + 1)
        } else {
            None
        }
    }

    /// Target of a direct page button.
    #[must_use]
    pub const fn select(&self, n: usize) -> Option<usize> {
        if n >= 1 && n <= self.page_count {
            Some(n)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.page_count
    }
}
