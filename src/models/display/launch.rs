//! Launch display model

use tabled::Tabled;

use super::common::{format_timestamp, or_placeholder, truncate_string};
use crate::client::Launch;

/// Maximum width of the attributes column
const ATTRIBUTES_WIDTH: usize = 40;

/// Launch display model for table/CSV output.
#[derive(Debug, Clone, Tabled)]
pub struct LaunchDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    /// Launch number within its name
    #[tabled(rename = "#")]
    pub number: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    /// Failed executions out of total
    #[tabled(rename = "FAILED")]
    pub failed: String,

    #[tabled(rename = "STARTED")]
    pub started: String,

    #[tabled(rename = "ATTRIBUTES")]
    pub attributes: String,
}

impl From<&Launch> for LaunchDisplay {
    fn from(launch: &Launch) -> Self {
        let executions = &launch.statistics.executions;
        Self {
            id: launch.id.clone(),
            name: or_placeholder(&launch.name),
            number: launch
                .number
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
            status: launch.status.to_string(),
            failed: format!("{}/{}", executions.failed, executions.total),
            started: format_timestamp(launch.start_time),
            attributes: truncate_string(&launch.attribute_labels().join(", "), ATTRIBUTES_WIDTH),
        }
    }
}

impl LaunchDisplay {
    /// Column headers in CSV order
    pub fn csv_headers() -> [&'static str; 7] {
        ["ID", "Name", "Number", "Status", "Failed", "Start Time", "Attributes"]
    }

    /// Field values in CSV order (attributes untruncated)
    pub fn csv_record(launch: &Launch) -> Vec<String> {
        let display = Self::from(launch);
        vec![
            display.id,
            launch.name.clone(),
            launch.number.map(|n| n.to_string()).unwrap_or_default(),
            display.status,
            launch.failed_count().to_string(),
            display.started,
            launch.attribute_labels().join(", "),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launch() -> Launch {
        serde_json::from_str(
            r#"{
                "id": 1001, "name": "nightly", "number": 12, "status": "FAILED",
                "startTime": 1709251200000,
                "attributes": [{"key": "env", "value": "staging"}, {"value": "smoke"}],
                "statistics": {"executions": {"total": 10, "failed": 3}}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_launch_display_from_launch() {
        let display = LaunchDisplay::from(&launch());

        assert_eq!(display.id, "1001");
        assert_eq!(display.number, "12");
        assert_eq!(display.status, "FAILED");
        assert_eq!(display.failed, "3/10");
        assert_eq!(display.started, "2024-03-01 00:00:00");
        assert_eq!(display.attributes, "env:staging, smoke");
    }

    #[test]
    fn test_launch_csv_record() {
        let record = LaunchDisplay::csv_record(&launch());
        assert_eq!(record.len(), LaunchDisplay::csv_headers().len());
        assert_eq!(record[1], "nightly");
        assert_eq!(record[4], "3");
    }
}
