//! Page-number pagination.

/// A 1-based page request parsed from an untrusted query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
}

impl PageRequest {
    /// Rows per page on the news list.
    pub const DEFAULT_PAGE_SIZE: u32 = 5;

    /// Create a request for `page`, clamped to at least 1.
    #[must_use]
    pub const fn new(page: u32) -> Self {
        Self {
            page: if page == 0 { 1 } else { page },
        }
    }

    /// Parse a `page` query value.
    ///
    /// Missing or unparseable input falls back to page 1, and zero or negative
    /// numbers are clamped to page 1.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let page = raw
            .and_then(|s| s.trim().parse::<i64>().ok())
            .map_or(1, |n| u32::try_from(n.max(1)).unwrap_or(u32::MAX));
        Self::new(page)
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Zero-based row offset for `page_size` rows per page.
    #[must_use]
    pub fn offset(&self, page_size: u32) -> i64 {
        (i64::from(self.page) - 1) * i64::from(page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Pagination metadata for a rendered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: u32,
    pub page_size: u32,
    pub total_count: i64,
    pub total_pages: i64,
}

impl Pagination {
    /// Compute pagination for `total_count` rows.
    #[must_use]
    pub fn new(request: PageRequest, page_size: u32, total_count: i64) -> Self {
        Self {
            current_page: request.page(),
            page_size,
            total_count,
            total_pages: total_pages(total_count, page_size),
        }
    }

    /// Previous page number, if any.
    #[must_use]
    pub const fn previous(&self) -> Option<u32> {
        if self.current_page > 1 {
            Some(self.current_page - 1)
        } else {
            None
        }
    }

    /// Next page number, if any.
    #[must_use]
    pub fn next(&self) -> Option<u32> {
        (i64::from(self.current_page) < self.total_pages).then(|| self.current_page + 1)
    }
}

/// `ceil(total_count / page_size)`, zero for an empty result.
#[must_use]
pub fn total_pages(total_count: i64, page_size: u32) -> i64 {
    if total_count <= 0 || page_size == 0 {
        return 0;
    }
    let size = i64::from(page_size);
    (total_count + size - 1) / size
}
