//! Pagination types for listings rendered into fixed-size pages.
//!
//! Out-of-range page requests clamp rather than fail: page 0 becomes page 1
//! and anything past the last page becomes the last page.

use serde::{Deserialize, Serialize};

/// Default page size.
const DEFAULT_PAGE_SIZE: usize = 10;
/// Maximum page size.
const MAX_PAGE_SIZE: usize = 25;

/// Request parameters for paginated listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based). Clamped when resolved against a total.
    #[serde(default = "default_page")]
    pub page: usize,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl PageRequest {
    /// Create a new page request. The page number is kept as given and only
    /// clamped once the total is known.
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Total number of pages for `total_items`; never less than 1.
    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size).max(1)
    }

    /// The requested page clamped into `1..=total_pages`.
    pub fn clamped_page(&self, total_items: usize) -> usize {
        self.page.clamp(1, self.total_pages(total_items))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Current page number (1-based), after clamping.
    pub page: usize,
    /// Number of items per page.
    pub page_size: usize,
    /// Total number of items across all pages.
    pub total_items: usize,
    /// Total number of pages.
    pub total_pages: usize,
    /// Whether there is a next page.
    pub has_next: bool,
    /// Whether there is a previous page.
    pub has_previous: bool,
}

impl<T> PageResponse<T> {
    /// Slice `all` into the page described by `request`, clamping the page.
    pub fn paginate(all: Vec<T>, request: PageRequest) -> Self {
        let total_items = all.len();
        let total_pages = request.total_pages(total_items);
        let page = request.clamped_page(total_items);
        let start = (page - 1) * request.page_size;

        let items: Vec<T> = all
            .into_iter()
            .skip(start)
            .take(request.page_size)
            .collect();

        Self {
            items,
            page,
            page_size: request.page_size,
            total_items,
            total_pages,
            has_next: page < total_pages,
            has_previous: page > 1,
        }
    }

    /// 0-based index of the first item on this page within the full listing.
    pub fn first_index(&self) -> usize {
        (self.page - 1) * self.page_size
    }
}

fn default_page() -> usize {
    1
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}
