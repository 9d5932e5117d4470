//! CLI argument groups
//!
//! Each group is flattened into [`crate::cli::Cli`] with `#[command(flatten)]`.

mod cache;
mod common;
mod filters;
mod pagination;

pub use cache::CacheArgs;
pub use common::OutputFormat;
pub use filters::FilterArgs;
pub use pagination::PaginationArgs;
