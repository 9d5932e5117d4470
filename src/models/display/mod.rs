//! Display model implementations for table and JSON output
//!
//! Display models transform API response types into CLI-friendly formats
//! with appropriate column names and serialization.

mod common;
mod launch;
mod summary;
mod test_case;

pub use common::{format_duration_ms, format_timestamp};
pub use launch::LaunchDisplay;
pub use summary::{FailureTotals, StatusCounts};
pub use test_case::TestCaseDisplay;
