//! Pagination state for list views.
//!
//! Invariants: `page >= 1`, and `page_size` is always one of the configured
//! sizes.

use crate::api::{Page, PageQuery};
use crate::error::ApiError;

pub const DEFAULT_PAGE_SIZES: [u32; 4] = [10, 20, 30, 40];

#[derive(Debug, Clone, PartialEq)]
pub struct TableState<T> {
    loading: bool,
    rows: Vec<T>,
    page: u32,
    page_size: u32,
    item_count: u64,
    page_sizes: Vec<u32>,
}

impl<T> Default for TableState<T> {
    fn default() -> Self {
        Self::with_page_sizes(DEFAULT_PAGE_SIZES.to_vec())
    }
}

impl<T> TableState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start on page 1 with the first size of `page_sizes` (10 if empty).
    pub fn with_page_sizes(mut page_sizes: Vec<u32>) -> Self {
        page_sizes.retain(|&s| s > 0);
        if page_sizes.is_empty() {
            page_sizes.push(DEFAULT_PAGE_SIZES[0]);
        }
        Self {
            loading: false,
            rows: Vec::new(),
            page: 1,
            page_size: page_sizes[0],
            item_count: 0,
            page_sizes,
        }
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    pub fn page_sizes(&self) -> &[u32] {
        &self.page_sizes
    }

    pub fn page_count(&self) -> u64 {
        self.item_count.div_ceil(u64::from(self.page_size)).max(1)
    }

    pub fn query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }

    /// Page 0 is clamped to 1.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Switch page size and go back to the first page. Sizes outside the
    /// configured set are ignored.
    pub fn set_page_size(&mut self, page_size: u32) {
        if !self.page_sizes.contains(&page_size) {
            return;
        }
        self.page_size = page_size;
        self.page = 1;
    }

    /// Reset to the first page, then run the caller's search.
    pub fn search<R>(&mut self, search: impl FnOnce(&mut Self) -> R) -> R {
        self.page = 1;
        search(self)
    }

    /// Run `fetch` for the current page with the loading flag raised, and
    /// store its rows and total on success. On failure the previous rows
    /// stay and the error is returned.
    pub fn load(&mut self, fetch: impl FnOnce(PageQuery) -> Result<Page<T>, ApiError>) -> Result<(), ApiError> {
        self.loading = true;
        let result = fetch(self.query());
        self.loading = false;
        let page = result?;
        self.rows = page.list;
        self.item_count = page.total;
        Ok(())
    }
}
