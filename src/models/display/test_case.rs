//! Failed test case display model

use tabled::Tabled;

use super::common::or_placeholder;
use crate::client::TestCase;

/// Failed test display model for table output.
#[derive(Debug, Clone, Tabled)]
pub struct TestCaseDisplay {
    #[tabled(rename = "LAUNCH")]
    pub launch: String,

    #[tabled(rename = "SUITE")]
    pub suite: String,

    #[tabled(rename = "TEST")]
    pub name: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "URL")]
    pub url: String,
}

impl From<&TestCase> for TestCaseDisplay {
    fn from(case: &TestCase) -> Self {
        Self {
            launch: or_placeholder(&case.launch_name),
            suite: case.suite_name.clone(),
            name: case.name.clone(),
            status: case.status.to_string(),
            url: case.url.clone(),
        }
    }
}

impl TestCaseDisplay {
    pub fn csv_headers() -> [&'static str; 4] {
        ["Suite Name", "Test Name", "Status", "Test URL"]
    }

    pub fn csv_record(case: &TestCase) -> Vec<String> {
        vec![
            case.suite_name.clone(),
            case.name.clone(),
            case.status.to_string(),
            case.url.clone(),
        ]
    }
}
