//! Failed test collection across launches and suites

use super::models::{TestCase, test_ui_url};
use super::pagination::LaunchQuery;
use super::ReportPortalApi;
use crate::error::Result;
use crate::filter::StatusFilter;

/// Launch whose suites are walked
struct LaunchRef {
    id: String,
    name: String,
}

/// Collect failed tests as annotated test cases.
///
/// Without `launch_id`, launches are listed first with the status filter
/// forced to failed. Launches, suites and tests are visited one request at a
/// time in server order. Non-fatal listing failures are skipped; only an
/// authentication failure aborts.
pub async fn fetch_failed_test_cases<A: ReportPortalApi + ?Sized>(
    api: &A,
    project: &str,
    launch_id: Option<&str>,
    query: &LaunchQuery,
    test_name: Option<&str>,
) -> Result<Vec<TestCase>> {
    api.authenticate().await?;

    let launches = match launch_id {
        Some(id) => vec![LaunchRef {
            id: id.to_string(),
            name: String::new(),
        }],
        None => {
            let query = LaunchQuery::new(
                query.pagination.clone(),
                query.filters.clone().with_status(StatusFilter::Failed),
            );

            api.observer().progress("Fetching failed launches");
            api.fetch_launches(project, &query)
                .await?
                .into_items()
                .into_iter()
                .map(|l| LaunchRef {
                    id: l.id,
                    name: l.name,
                })
                .collect()
        }
    };

    let mut cases = Vec::new();
    for (idx, launch) in launches.iter().enumerate() {
        api.observer().progress(&format!(
            "Launch {}/{}: {}",
            idx + 1,
            launches.len(),
            display_name(launch)
        ));

        let suites = api.fetch_suites(project, &launch.id).await?.into_items();
        for suite in suites {
            let tests = api
                .fetch_tests(project, &launch.id, &suite.id, test_name)
                .await?
                .into_items();

            cases.extend(tests.into_iter().map(|test| TestCase {
                url: test_ui_url(api.base_url(), project, &launch.id, &suite.id, &test.id),
                id: test.id,
                name: test.name,
                status: test.status,
                suite_id: suite.id.clone(),
                suite_name: suite.name.clone(),
                launch_id: launch.id.clone(),
                launch_name: launch.name.clone(),
                start_time: test.start_time,
                end_time: test.end_time,
                description: test.description,
            }));
        }
    }

    api.observer()
        .progress(&format!("Found {} failed tests", cases.len()));
    Ok(cases)
}

fn display_name(launch: &LaunchRef) -> &str {
    if launch.name.is_empty() {
        &launch.id
    } else {
        &launch.name
    }
}
