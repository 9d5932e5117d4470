//! Detailed (verbose) text output

use colored::{ColoredString, Colorize};

use super::RenderContext;
use crate::client::models::{ItemStatus, launch_ui_url};
use crate::client::{Launch, TestCase};
use crate::models::display::{format_duration_ms, format_timestamp};

const RULE: &str = "──────────────────────────────────────────────────────";

fn colored_status(status: ItemStatus) -> ColoredString {
    match status {
        ItemStatus::Passed => status.as_str().green(),
        ItemStatus::Failed | ItemStatus::Interrupted => status.as_str().red(),
        ItemStatus::Stopped | ItemStatus::Cancelled | ItemStatus::Skipped => {
            status.as_str().yellow()
        }
        ItemStatus::InProgress => status.as_str().cyan(),
        ItemStatus::Unknown => status.as_str().normal(),
    }
}

/// One block per launch
pub fn format_launches(launches: &[Launch], ctx: &RenderContext<'_>) -> String {
    if launches.is_empty() {
        return "No launches found.".to_string();
    }

    let mut output = String::new();
    for launch in launches {
        let title = match launch.number {
            Some(n) => format!("{} #{}", launch.name, n),
            None => launch.name.clone(),
        };
        let executions = &launch.statistics.executions;

        output.push_str(&format!("{}\n{}\n", title.bold(), RULE));
        output.push_str(&format!("ID:         {}\n", launch.id));
        output.push_str(&format!("Status:     {}\n", colored_status(launch.status)));
        output.push_str(&format!("Started:    {}\n", format_timestamp(launch.start_time)));
        output.push_str(&format!(
            "Duration:   {}\n",
            format_duration_ms(launch.start_time, launch.end_time)
        ));
        output.push_str(&format!(
            "Executions: {} total, {} passed, {} failed, {} skipped\n",
            executions.total, executions.passed, executions.failed, executions.skipped
        ));
        if !launch.tags.is_empty() {
            output.push_str(&format!("Tags:       {}\n", launch.tags.join(", ")));
        }
        if !launch.attributes.is_empty() {
            output.push_str(&format!(
                "Attributes: {}\n",
                launch.attribute_labels().join(", ")
            ));
        }
        output.push_str(&format!(
            "URL:        {}\n\n",
            launch_ui_url(ctx.base_url, ctx.project, &launch.id)
        ));
    }

    output.trim_end().to_string()
}

/// One block per failed test
pub fn format_test_cases(cases: &[TestCase]) -> String {
    if cases.is_empty() {
        return "No failed tests found.".to_string();
    }

    let mut output = String::new();
    for case in cases {
        let launch = if case.launch_name.is_empty() {
            case.launch_id.clone()
        } else {
            format!("{} ({})", case.launch_name, case.launch_id)
        };

        output.push_str(&format!("{}\n{}\n", case.name.bold(), RULE));
        output.push_str(&format!("ID:       {}\n", case.id));
        output.push_str(&format!("Status:   {}\n", colored_status(case.status)));
        output.push_str(&format!("Suite:    {} ({})\n", case.suite_name, case.suite_id));
        output.push_str(&format!("Launch:   {}\n", launch));
        output.push_str(&format!("Started:  {}\n", format_timestamp(case.start_time)));
        output.push_str(&format!(
            "Duration: {}\n",
            format_duration_ms(case.start_time, case.end_time)
        ));
        if let Some(ref description) = case.description {
            output.push_str(&format!("Details:  {}\n", description));
        }
        output.push_str(&format!("URL:      {}\n\n", case.url));
    }

    output.trim_end().to_string()
}
