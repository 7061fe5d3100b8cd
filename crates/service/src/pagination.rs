//! Pagination utilities for service layer
//!
//! Offset slicing over an already-sorted list, with protobuf-style inputs
//! where zero or negative means "use the default".

/// Page size used when the caller sends a non-positive value.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: i64,
    /// items per page
    pub page_size: i64,
}

impl Pagination {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self { page, page_size }
    }

    /// Replace non-positive values with page 1 / `DEFAULT_PAGE_SIZE`.
    pub fn normalize(self) -> Self {
        let page = if self.page > 0 { self.page } else { 1 };
        let page_size = if self.page_size > 0 { self.page_size } else { DEFAULT_PAGE_SIZE };
        Self { page, page_size }
    }

    /// The window of `items` this page covers; empty past the end.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let p = self.normalize();
        let start = (p.page as u64 - 1).saturating_mul(p.page_size as u64);
        let start = usize::try_from(start).unwrap_or(usize::MAX).min(items.len());
        let end = start.saturating_add(p.page_size as usize).min(items.len());
        &items[start..end]
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, page_size: DEFAULT_PAGE_SIZE } }
}
