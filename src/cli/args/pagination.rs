//! Pagination argument types

use clap::Args;

use crate::client::PaginationParams;
use crate::client::pagination::DEFAULT_PAGE_SIZE;

/// Launch listing page selection
#[derive(Args, Debug, Clone)]
pub struct PaginationArgs {
    /// Page number (1-based)
    #[arg(long, short = 'p', default_value_t = 1)]
    pub page: usize,

    /// Launches per page
    #[arg(long, short = 'l', default_value_t = DEFAULT_PAGE_SIZE)]
    pub limit: usize,
}

impl Default for PaginationArgs {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationArgs {
    /// Convert CLI args to API pagination params (newest launches first)
    pub fn to_params(&self) -> PaginationParams {
        PaginationParams::new().page(self.page).page_size(self.limit)
    }
}
