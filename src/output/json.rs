//! JSON output formatting

use chrono::Utc;
use serde::Serialize;

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a, T: Serialize + ?Sized> {
    pub data: &'a T,
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// When the output was produced (RFC 3339)
    pub timestamp: String,

    /// CLI version
    pub version: String,

    pub project: String,

    /// Number of records in `data`
    pub count: usize,
}

impl<'a, T: Serialize> JsonOutput<'a, [T]> {
    pub fn new(data: &'a [T], project: &str) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                project: project.to_string(),
                count: data.len(),
            },
        }
    }
}

/// Format records as pretty-printed JSON
pub fn format_json<T: Serialize>(data: &[T], project: &str) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data, project))
}
