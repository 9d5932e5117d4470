//! Test item models: suites, raw test items and annotated failed test cases

use serde::{Deserialize, Serialize};

use super::ItemStatus;
use super::serde_helpers;

/// Grouping node within a launch's item tree
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suite {
    /// Suite item ID
    #[serde(deserialize_with = "serde_helpers::id")]
    pub id: String,

    /// Suite name
    #[serde(default)]
    pub name: String,

    /// Parent launch ID
    #[serde(default, deserialize_with = "serde_helpers::opt_id")]
    pub launch_id: Option<String>,
}

/// Leaf execution record as returned by the item endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestItem {
    #[serde(deserialize_with = "serde_helpers::id")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub status: ItemStatus,

    /// Parent item (suite) ID
    #[serde(default, deserialize_with = "serde_helpers::opt_id")]
    pub parent: Option<String>,

    #[serde(default, deserialize_with = "serde_helpers::opt_id")]
    pub launch_id: Option<String>,

    #[serde(default, deserialize_with = "serde_helpers::opt_millis")]
    pub start_time: Option<i64>,

    #[serde(default, deserialize_with = "serde_helpers::opt_millis")]
    pub end_time: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Failed test annotated with its launch, suite and UI link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub id: String,
    pub name: String,
    pub status: ItemStatus,
    pub suite_id: String,
    pub suite_name: String,
    pub launch_id: String,
    pub launch_name: String,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub end_time: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
}

/// Case-insensitive substring filter on item names
pub fn filter_by_name(items: Vec<TestItem>, needle: Option<&str>) -> Vec<TestItem> {
    let Some(needle) = needle.map(str::trim).filter(|n| !n.is_empty()) else {
        return items;
    };
    let needle = needle.to_lowercase();
    items
        .into_iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .collect()
}
