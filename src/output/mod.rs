//! Output formatting for CLI results

use std::path::Path;

use crate::cli::OutputFormat;
use crate::client::{Launch, TestCase};
use crate::error::Result;

pub mod csv;
pub mod detailed;
pub mod json;
pub mod table;

use crate::models::{FailureTotals, LaunchDisplay, StatusCounts, TestCaseDisplay};

/// Where the records came from and where file output goes
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub base_url: &'a str,
    pub project: &'a str,
    pub csv_path: &'a Path,
}

/// Render a launch listing
pub fn render_launches(
    launches: &[Launch],
    format: OutputFormat,
    ctx: &RenderContext<'_>,
) -> Result<String> {
    let counts = StatusCounts::from_statuses(launches.iter().map(|l| l.status));

    match format {
        OutputFormat::Json => Ok(json::format_json(launches, ctx.project)?),
        OutputFormat::Table => {
            let rows: Vec<LaunchDisplay> = launches.iter().map(LaunchDisplay::from).collect();
            Ok(with_footer(table::format_table(&rows), &counts.to_string()))
        }
        OutputFormat::Summary => Ok(counts.to_string().trim_end().to_string()),
        OutputFormat::Csv => {
            let rows: Vec<_> = launches.iter().map(LaunchDisplay::csv_record).collect();
            csv::write_csv(ctx.csv_path, &LaunchDisplay::csv_headers(), &rows)?;
            Ok(csv::saved_message(ctx.csv_path))
        }
        OutputFormat::Detailed => Ok(detailed::format_launches(launches, ctx)),
    }
}

/// Render failed test cases
pub fn render_test_cases(
    cases: &[TestCase],
    format: OutputFormat,
    ctx: &RenderContext<'_>,
) -> Result<String> {
    let totals = FailureTotals::from_cases(cases);

    match format {
        OutputFormat::Json => Ok(json::format_json(cases, ctx.project)?),
        OutputFormat::Table => {
            let rows: Vec<TestCaseDisplay> = cases.iter().map(TestCaseDisplay::from).collect();
            Ok(with_footer(table::format_table(&rows), &totals.to_string()))
        }
        OutputFormat::Summary => {
            let counts = StatusCounts::from_statuses(cases.iter().map(|c| c.status));
            Ok(format!("{}{}", counts, totals))
        }
        OutputFormat::Csv => {
            let rows: Vec<_> = cases.iter().map(TestCaseDisplay::csv_record).collect();
            csv::write_csv(ctx.csv_path, &TestCaseDisplay::csv_headers(), &rows)?;
            Ok(csv::saved_message(ctx.csv_path))
        }
        OutputFormat::Detailed => Ok(detailed::format_test_cases(cases)),
    }
}

fn with_footer(body: String, footer: &str) -> String {
    format!("{}\n\n{}", body, footer.trim_end())
}
