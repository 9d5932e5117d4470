//! Aggregate counts for summary output

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::client::TestCase;
use crate::client::models::ItemStatus;

/// Number of records per status, in status order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCounts {
    counts: BTreeMap<ItemStatus, usize>,
    total: usize,
}

impl StatusCounts {
    pub fn from_statuses(statuses: impl IntoIterator<Item = ItemStatus>) -> Self {
        let mut counts = BTreeMap::new();
        let mut total = 0;
        for status in statuses {
            *counts.entry(status).or_insert(0) += 1;
            total += 1;
        }
        Self { counts, total }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemStatus, usize)> + '_ {
        self.counts.iter().map(|(s, n)| (*s, *n))
    }
}

impl fmt::Display for StatusCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total: {}", self.total)?;
        for (status, count) in self.iter() {
            writeln!(f, "  {:<12} {}", status.as_str(), count)?;
        }
        Ok(())
    }
}

/// Totals reported for a failed-tests run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FailureTotals {
    pub failed_tests: usize,
    pub suites_with_failures: usize,
    pub launches_with_failures: usize,
}

impl FailureTotals {
    pub fn from_cases(cases: &[TestCase]) -> Self {
        let suites: BTreeSet<_> = cases
            .iter()
            .map(|c| (c.launch_id.as_str(), c.suite_id.as_str()))
            .collect();
        let launches: BTreeSet<_> = cases.iter().map(|c| c.launch_id.as_str()).collect();

        Self {
            failed_tests: cases.len(),
            suites_with_failures: suites.len(),
            launches_with_failures: launches.len(),
        }
    }
}

impl fmt::Display for FailureTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Failed Tests: {}", self.failed_tests)?;
        writeln!(f, "Total Suites with Failures: {}", self.suites_with_failures)?;
        write!(f, "Total Launches with Failures: {}", self.launches_with_failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(launch: &str, suite: &str, id: &str) -> TestCase {
        TestCase {
            id: id.to_string(),
            name: format!("test {}", id),
            status: ItemStatus::Failed,
            suite_id: suite.to_string(),
            suite_name: String::new(),
            launch_id: launch.to_string(),
            launch_name: String::new(),
            start_time: None,
            end_time: None,
            description: None,
            url: String::new(),
        }
    }

    #[test]
    fn test_status_counts() {
        let counts = StatusCounts::from_statuses([
            ItemStatus::Failed,
            ItemStatus::Passed,
            ItemStatus::Failed,
        ]);

        assert_eq!(
            counts.iter().collect::<Vec<_>>(),
            vec![(ItemStatus::Passed, 1), (ItemStatus::Failed, 2)]
        );

        let text = counts.to_string();
        assert!(text.starts_with("Total: 3"));
        // Passed sorts before Failed
        assert!(text.find("PASSED").unwrap() < text.find("FAILED").unwrap());
    }

    #[test]
    fn test_failure_totals_count_distinct_suites_per_launch() {
        let cases = vec![
            case("1", "10", "a"),
            case("1", "10", "b"),
            case("1", "11", "c"),
            case("2", "10", "d"),
        ];

        let totals = FailureTotals::from_cases(&cases);
        assert_eq!(totals.failed_tests, 4);
        assert_eq!(totals.suites_with_failures, 3);
        assert_eq!(totals.launches_with_failures, 2);
    }

    #[test]
    fn test_failure_totals_empty() {
        assert_eq!(FailureTotals::from_cases(&[]), FailureTotals::default());
    }
}
