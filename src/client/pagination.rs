//! Pagination and query helpers for API requests
//!
//! ReportPortal pages are 1-indexed and use `page.page`, `page.size` and
//! `page.sort` query parameters.

use serde::{Deserialize, Serialize};

use crate::filter::LaunchFilters;

/// Default number of launches per page
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Page size used when listing suites and test items
pub const ITEM_PAGE_SIZE: usize = 100;

/// Launches are listed newest first
pub const LAUNCH_SORT: &str = "startTime,DESC";

/// Pagination parameters for API requests.
///
/// # Example
/// ```ignore
/// let params = PaginationParams::new().page_size(20).page(2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-indexed)
    pub page: usize,
    /// Number of items per page
    pub page_size: usize,
    /// `page.sort` value, `field,ORDER`
    pub sort: String,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            sort: LAUNCH_SORT.to_string(),
        }
    }
}

impl PaginationParams {
    /// Create new pagination params with defaults (page 1, newest first).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size (items per page), at least 1.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self
    }

    /// Set the page number, at least 1.
    pub fn page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Convert to `page.*` query parameters.
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        vec![
            ("page.page".to_string(), self.page.to_string()),
            ("page.size".to_string(), self.page_size.to_string()),
            ("page.sort".to_string(), self.sort.clone()),
        ]
    }
}

/// Everything that shapes a launch listing request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchQuery {
    pub pagination: PaginationParams,
    pub filters: LaunchFilters,
}

impl LaunchQuery {
    pub fn new(pagination: PaginationParams, filters: LaunchFilters) -> Self {
        Self {
            pagination,
            filters,
        }
    }

    /// Full query string parameters: pagination first, then filters.
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = self.pagination.to_query_params();
        params.extend(self.filters.to_query_params());
        params
    }
}
