//! Page/limit pagination used by listing endpoints.

use serde::{Deserialize, Serialize};

/// Default page size when the client does not send one.
pub const DEFAULT_LIMIT: u32 = 20;

/// Largest page size a client may request.
pub const MAX_LIMIT: u32 = 100;

/// Raw pagination query parameters (`?page=2&limit=20`).
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageParams {
    /// 1-based page number, never below 1.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Page size clamped to `1..=MAX_LIMIT`.
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Row offset for SQL `OFFSET`.
    pub fn offset(&self) -> i64 {
        i64::from(self.page() - 1) * i64::from(self.limit())
    }
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub total_pages: u32,
}

impl PageMeta {
    pub fn new(params: &PageParams, total: i64) -> Self {
        let limit = params.limit();
        let total_pages = if total <= 0 {
            0
        } else {
            ((total + i64::from(limit) - 1) / i64::from(limit)) as u32
        };
        Self {
            page: params.page(),
            limit,
            total,
            total_pages,
        }
    }
}

/// A page of items with its metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, params: &PageParams, total: i64) -> Self {
        Self {
            data,
            pagination: PageMeta::new(params, total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PageParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), DEFAULT_LIMIT);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_offset() {
        let params = PageParams {
            page: Some(3),
            limit: Some(25),
        };
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn test_clamping() {
        let params = PageParams {
            page: Some(0),
            limit: Some(10_000),
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), MAX_LIMIT);

        let params = PageParams {
            page: None,
            limit: Some(0),
        };
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn test_page_meta_total_pages() {
        let params = PageParams {
            page: Some(1),
            limit: Some(20),
        };
        assert_eq!(PageMeta::new(&params, 0).total_pages, 0);
        assert_eq!(PageMeta::new(&params, 20).total_pages, 1);
        assert_eq!(PageMeta::new(&params, 21).total_pages, 2);
    }

    #[test]
    fn test_paginated_serialization() {
        let page = Paginated::new(vec!["a", "b"], &PageParams::default(), 2);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
        assert_eq!(json["pagination"]["total"], 2);
        assert_eq!(json["pagination"]["total_pages"], 1);
    }
}
