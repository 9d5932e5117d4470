//! Common display utilities and helpers

use chrono::DateTime;

/// Placeholder for missing values
pub const EMPTY_CELL: &str = "-";

/// Truncate string to max characters with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format epoch milliseconds as `YYYY-MM-DD HH:MM:SS` (UTC)
pub fn format_timestamp(millis: Option<i64>) -> String {
    millis
        .filter(|ms| *ms > 0)
        .and_then(DateTime::from_timestamp_millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| EMPTY_CELL.to_string())
}

/// Format the span between two epoch-millisecond timestamps
pub fn format_duration_ms(start: Option<i64>, end: Option<i64>) -> String {
    let (Some(start), Some(end)) = (start, end) else {
        return EMPTY_CELL.to_string();
    };
    if end < start {
        return EMPTY_CELL.to_string();
    }

    let total_secs = (end - start) / 1000;
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, mins, secs)
    } else if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Empty strings render as the placeholder
pub fn or_placeholder(value: &str) -> String {
    if value.is_empty() {
        EMPTY_CELL.to_string()
    } else {
        value.to_string()
    }
}
