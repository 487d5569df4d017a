use serde::{Deserialize, Serialize};

const MAX_PER_PAGE: u64 = 100;

/// `?page=&per_page=` query parameters.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct PageParams {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl PageParams {
    /// 1-based page number; zero and missing both mean the first page.
    #[must_use]
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    #[must_use]
    pub fn per_page(&self, default: u64) -> u64 {
        self.per_page.unwrap_or(default).clamp(1, MAX_PER_PAGE)
    }
}

/// One page of results plus the counts needed to render pager controls.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(data: Vec<T>, page: u64, per_page: u64, total: u64) -> Self {
        Self {
            data,
            page,
            per_page,
            total,
            total_pages: total.div_ceil(per_page.max(1)).max(1),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}
