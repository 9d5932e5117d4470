//! ReportPortal API data models
//!
//! Snapshot types returned by the API plus the annotated records produced by
//! the failed-test collection.

mod item;
mod launch;
pub(crate) mod serde_helpers;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use item::{Suite, TestCase, TestItem, filter_by_name};
pub use launch::Launch;

/// Status of a launch or test item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    Passed,
    Failed,
    Skipped,
    Stopped,
    Interrupted,
    InProgress,
    Cancelled,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Passed => "PASSED",
            ItemStatus::Failed => "FAILED",
            ItemStatus::Skipped => "SKIPPED",
            ItemStatus::Stopped => "STOPPED",
            ItemStatus::Interrupted => "INTERRUPTED",
            ItemStatus::InProgress => "IN_PROGRESS",
            ItemStatus::Cancelled => "CANCELLED",
            ItemStatus::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paged listing envelope: `{content: [...], page: {...}}`
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,

    #[serde(default)]
    pub page: Option<PageMeta>,
}

/// Paging metadata returned alongside listings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default)]
    pub number: Option<u64>,
    #[serde(default)]
    pub total_elements: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u64>,
}

/// UI link to a launch
pub fn launch_ui_url(base_url: &str, project: &str, launch_id: &str) -> String {
    format!("{}/ui/#{}/launches/all/{}", base_url, project, launch_id)
}

/// UI link to a test item's log view
pub fn test_ui_url(
    base_url: &str,
    project: &str,
    launch_id: &str,
    suite_id: &str,
    test_id: &str,
) -> String {
    format!(
        "{}/{}/{}/log",
        launch_ui_url(base_url, project, launch_id),
        suite_id,
        test_id
    )
}
