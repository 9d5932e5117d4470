//! ReportPortal API client

use async_trait::async_trait;

use crate::error::{ApiError, Result};
use crate::observe::Observer;

pub mod failed;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;
pub mod reportportal;

pub use failed::fetch_failed_test_cases;
#[cfg(test)]
pub use mock::MockReportPortalClient;
pub use models::{Launch, Suite, TestCase, TestItem};
pub use pagination::{LaunchQuery, PaginationParams};
pub use reportportal::ReportPortalClient;

/// Outcome of a single listing call.
///
/// Fatal problems (authentication) are returned as `Err` by the API methods;
/// everything else lands here so callers can keep going.
#[derive(Debug)]
pub enum Fetched<T> {
    /// The server returned records
    Items(Vec<T>),
    /// The server answered successfully with no records
    Empty,
    /// The request failed; the failure has already been reported
    Failed(ApiError),
}

impl<T> Fetched<T> {
    /// Wrap a successful listing
    pub fn from_items(items: Vec<T>) -> Self {
        if items.is_empty() {
            Fetched::Empty
        } else {
            Fetched::Items(items)
        }
    }

    /// Records, degrading failures to an empty list
    pub fn into_items(self) -> Vec<T> {
        match self {
            Fetched::Items(items) => items,
            Fetched::Empty | Fetched::Failed(_) => Vec::new(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Fetched::Failed(_))
    }

    /// Transform the records, keeping the outcome kind
    pub fn map_items<U, F>(self, f: F) -> Fetched<U>
    where
        F: FnOnce(Vec<T>) -> Vec<U>,
    {
        match self {
            Fetched::Items(items) => Fetched::from_items(f(items)),
            Fetched::Empty => Fetched::Empty,
            Fetched::Failed(err) => Fetched::Failed(err),
        }
    }
}

/// ReportPortal API operations.
///
/// Every fetch authenticates implicitly when needed. If that fails the method
/// returns the authentication error without issuing the listing request.
#[async_trait]
pub trait ReportPortalApi: Send + Sync {
    /// Server base URL (no trailing slash), used to build UI links
    fn base_url(&self) -> &str;

    /// Observer receiving progress and failure notifications
    fn observer(&self) -> &dyn Observer;

    /// Obtain a bearer token (pre-supplied or via password grant)
    async fn authenticate(&self) -> Result<()>;

    /// List launches of a project (one page, filtered)
    async fn fetch_launches(&self, project: &str, query: &LaunchQuery) -> Result<Fetched<Launch>>;

    /// List suites of a launch
    async fn fetch_suites(&self, project: &str, launch_id: &str) -> Result<Fetched<Suite>>;

    /// List FAILED test items under a suite, optionally filtered by name
    async fn fetch_tests(
        &self,
        project: &str,
        launch_id: &str,
        suite_id: &str,
        name_filter: Option<&str>,
    ) -> Result<Fetched<TestItem>>;
}
