//! Launch models

use serde::{Deserialize, Serialize};

use super::ItemStatus;
use super::serde_helpers;

/// One top-level test run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Launch {
    /// Launch ID
    #[serde(deserialize_with = "serde_helpers::id")]
    pub id: String,

    /// Launch name
    #[serde(default)]
    pub name: String,

    /// Sequence number within launches of the same name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,

    /// Launch status
    #[serde(default)]
    pub status: ItemStatus,

    /// Start time (epoch milliseconds)
    #[serde(default, deserialize_with = "serde_helpers::opt_millis")]
    pub start_time: Option<i64>,

    /// End time (epoch milliseconds)
    #[serde(default, deserialize_with = "serde_helpers::opt_millis")]
    pub end_time: Option<i64>,

    /// Legacy tag list
    #[serde(default)]
    pub tags: Vec<String>,

    /// Key/value attributes
    #[serde(default)]
    pub attributes: Vec<LaunchAttribute>,

    /// Execution statistics
    #[serde(default)]
    pub statistics: Statistics,
}

impl Launch {
    /// Number of failed executions
    pub fn failed_count(&self) -> u64 {
        self.statistics.executions.failed
    }

    /// Attributes rendered as `key:value` (or bare value)
    pub fn attribute_labels(&self) -> Vec<String> {
        self.attributes.iter().map(LaunchAttribute::label).collect()
    }
}

/// Launch attribute; keyless attributes act as plain labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchAttribute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default)]
    pub value: String,
}

impl LaunchAttribute {
    pub fn label(&self) -> String {
        match self.key {
            Some(ref key) => format!("{}:{}", key, self.value),
            None => self.value.clone(),
        }
    }
}

/// Launch statistics block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(default)]
    pub executions: Executions,
}

/// Execution counters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Executions {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub passed: u64,
    #[serde(default)]
    pub failed: u64,
    #[serde(default)]
    pub skipped: u64,
}
