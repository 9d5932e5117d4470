//! Display models for CLI output
//!
//! Converts API records into column-oriented rows and aggregate counts for
//! the table, summary, CSV and detailed renderers.

pub mod display;

pub use display::{FailureTotals, LaunchDisplay, StatusCounts, TestCaseDisplay};
