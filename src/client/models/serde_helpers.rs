//! Lenient deserializers for ReportPortal payloads
//!
//! Identifiers arrive as numbers or strings depending on server version, and
//! timestamps as epoch milliseconds or RFC 3339 strings.

use chrono::DateTime;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Int(i64),
    Float(f64),
    Str(String),
}

impl RawScalar {
    fn into_id(self) -> String {
        match self {
            RawScalar::Int(n) => n.to_string(),
            RawScalar::Float(f) => format!("{}", f),
            RawScalar::Str(s) => s,
        }
    }

    fn into_millis(self) -> Option<i64> {
        match self {
            RawScalar::Int(n) => Some(n),
            RawScalar::Float(f) => Some(f as i64),
            RawScalar::Str(s) => s.parse::<i64>().ok().or_else(|| {
                DateTime::parse_from_rfc3339(&s)
                    .ok()
                    .map(|dt| dt.timestamp_millis())
            }),
        }
    }
}

/// Identifier as string, accepting numbers
pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawScalar::deserialize(deserializer).map(RawScalar::into_id)
}

/// Optional identifier as string, accepting numbers and null
pub fn opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawScalar>::deserialize(deserializer)?.map(RawScalar::into_id))
}

/// Optional timestamp in epoch milliseconds
pub fn opt_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawScalar>::deserialize(deserializer)?.and_then(RawScalar::into_millis))
}
