//! Launch filter construction
//!
//! Translates user-level filter intents into ReportPortal's `filter.*` query
//! parameter dialect. Every recognised filter has a dedicated field on
//! [`LaunchFilters`]; parameters are always emitted in the same order.
//!
//! | Field | Parameter |
//! |---|---|
//! | `status` (failed) | `filter.gte.statistics$executions$failed=1` |
//! | `status` (passed) | `filter.eq.statistics$executions$failed=0` |
//! | `status` (stopped, interrupted, in_progress) | `filter.eq.status=<STATUS>` |
//! | `name_contains` | `filter.cnt.name` |
//! | `name_excludes` | `filter.!cnt.name` |
//! | `tags` | `filter.has.tags` (comma-joined) |
//! | `start_from` | `filter.gt.startTime` (epoch ms) |
//! | `start_to` | `filter.lt.startTime` (epoch ms) |
//! | `attributes` | `filter.has.compositeAttribute` (`key:value`, comma-joined) |

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::FilterError;

pub const PARAM_FAILED_GTE: &str = "filter.gte.statistics$executions$failed";
pub const PARAM_FAILED_EQ: &str = "filter.eq.statistics$executions$failed";
pub const PARAM_STATUS_EQ: &str = "filter.eq.status";
pub const PARAM_NAME_CONTAINS: &str = "filter.cnt.name";
pub const PARAM_NAME_EXCLUDES: &str = "filter.!cnt.name";
pub const PARAM_TAGS: &str = "filter.has.tags";
pub const PARAM_START_AFTER: &str = "filter.gt.startTime";
pub const PARAM_START_BEFORE: &str = "filter.lt.startTime";
pub const PARAM_ATTRIBUTE: &str = "filter.has.compositeAttribute";

/// Launch status selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusFilter {
    /// No failed executions
    Passed,
    /// At least one failed execution
    Failed,
    Stopped,
    Interrupted,
    InProgress,
}

impl StatusFilter {
    /// Server-side status name
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::Passed => "PASSED",
            StatusFilter::Failed => "FAILED",
            StatusFilter::Stopped => "STOPPED",
            StatusFilter::Interrupted => "INTERRUPTED",
            StatusFilter::InProgress => "IN_PROGRESS",
        }
    }

    /// The query parameter this status translates to
    pub fn to_query_param(self) -> (String, String) {
        match self {
            StatusFilter::Failed => (PARAM_FAILED_GTE.to_string(), "1".to_string()),
            StatusFilter::Passed => (PARAM_FAILED_EQ.to_string(), "0".to_string()),
            other => (PARAM_STATUS_EQ.to_string(), other.as_str().to_string()),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "passed" => Ok(StatusFilter::Passed),
            "failed" => Ok(StatusFilter::Failed),
            "stopped" => Ok(StatusFilter::Stopped),
            "interrupted" => Ok(StatusFilter::Interrupted),
            "in_progress" => Ok(StatusFilter::InProgress),
            _ => Err(FilterError::InvalidStatus(s.to_string())),
        }
    }
}

/// A `key=value` launch attribute filter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeFilter {
    pub key: String,
    pub value: String,
}

impl FromStr for AttributeFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| FilterError::InvalidAttribute(s.to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(FilterError::InvalidAttribute(s.to_string()));
        }
        Ok(Self {
            key: key.to_string(),
            value: value.trim().to_string(),
        })
    }
}

impl fmt::Display for AttributeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.value)
    }
}

/// Raw filter input as typed by the user
#[derive(Debug, Clone, Default)]
pub struct FilterIntents {
    pub status: Option<String>,
    pub name_contains: Option<String>,
    pub name_excludes: Option<String>,
    pub tags: Vec<String>,
    pub start_from: Option<String>,
    pub start_to: Option<String>,
    pub attributes: Vec<String>,
}

/// Validated launch filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchFilters {
    pub status: Option<StatusFilter>,
    pub name_contains: Option<String>,
    pub name_excludes: Option<String>,
    pub tags: Vec<String>,
    /// Lower start-time bound, epoch milliseconds (exclusive)
    pub start_from: Option<i64>,
    /// Upper start-time bound, epoch milliseconds (exclusive)
    pub start_to: Option<i64>,
    pub attributes: Vec<AttributeFilter>,
}

impl LaunchFilters {
    /// Validate user input and build filters.
    ///
    /// Fails on malformed attributes, unknown statuses and unparsable dates.
    pub fn from_intents(intents: &FilterIntents) -> Result<Self, FilterError> {
        let status = intents
            .status
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::parse::<StatusFilter>)
            .transpose()?;

        let tags = intents
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        let start_from = intents
            .start_from
            .as_deref()
            .map(|raw| parse_time_bound(raw, false))
            .transpose()?;
        let start_to = intents
            .start_to
            .as_deref()
            .map(|raw| parse_time_bound(raw, true))
            .transpose()?;

        let attributes = intents
            .attributes
            .iter()
            .map(|a| a.parse())
            .collect::<Result<Vec<AttributeFilter>, _>>()?;

        Ok(Self {
            status,
            name_contains: non_empty(intents.name_contains.as_deref()),
            name_excludes: non_empty(intents.name_excludes.as_deref()),
            tags,
            start_from,
            start_to,
            attributes,
        })
    }

    /// Replace the status selector
    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = Some(status);
        self
    }

    /// Convert to `filter.*` query parameters
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(status) = self.status {
            params.push(status.to_query_param());
        }
        if let Some(ref name) = self.name_contains {
            params.push((PARAM_NAME_CONTAINS.to_string(), name.clone()));
        }
        if let Some(ref name) = self.name_excludes {
            params.push((PARAM_NAME_EXCLUDES.to_string(), name.clone()));
        }
        if !self.tags.is_empty() {
            params.push((PARAM_TAGS.to_string(), self.tags.join(",")));
        }
        if let Some(from) = self.start_from {
            params.push((PARAM_START_AFTER.to_string(), from.to_string()));
        }
        if let Some(to) = self.start_to {
            params.push((PARAM_START_BEFORE.to_string(), to.to_string()));
        }
        if !self.attributes.is_empty() {
            let joined = self
                .attributes
                .iter()
                .map(|a| a.to_string())
                .collect::<Vec<_>>()
                .join(",");
            params.push((PARAM_ATTRIBUTE.to_string(), joined));
        }

        params
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse `YYYY-MM-DD` or epoch milliseconds into epoch milliseconds (UTC).
///
/// With `end_of_day`, a date resolves to midnight of the following day so that
/// an exclusive upper bound still covers the whole given day.
pub fn parse_time_bound(raw: &str, end_of_day: bool) -> Result<i64, FilterError> {
    let trimmed = raw.trim();

    if let Ok(millis) = trimmed.parse::<i64>() {
        return Ok(millis);
    }

    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| FilterError::InvalidDate(raw.to_string()))?;
    let date = if end_of_day {
        date.checked_add_days(Days::new(1))
            .ok_or_else(|| FilterError::InvalidDate(raw.to_string()))?
    } else {
        date
    };

    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .ok_or_else(|| FilterError::InvalidDate(raw.to_string()))
}
