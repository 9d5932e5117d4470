//! Report command: filter, fetch or reuse cached results, render

use crate::cache::{ResultCache, cache_key};
use crate::cli::{Cli, CommandContext, cache};
use crate::client::{
    Launch, LaunchQuery, ReportPortalApi, TestCase, fetch_failed_test_cases,
};
use crate::error::Result;
use crate::filter::LaunchFilters;
use crate::observe::Observer;
use crate::output::{self, RenderContext};

/// Cache namespace for launch listings
const LAUNCHES_ENDPOINT: &str = "launches";
/// Cache namespace for failed test collections
const FAILED_TESTS_ENDPOINT: &str = "failed-tests";

/// Everything that determines the server's answer for one invocation
#[derive(Debug, Clone)]
pub struct ReportRequest<'a> {
    pub base_url: &'a str,
    pub project: &'a str,
    pub query: &'a LaunchQuery,
    pub failed_tests: bool,
    pub launch_id: Option<&'a str>,
    pub test_name: Option<&'a str>,
}

impl ReportRequest<'_> {
    /// Fingerprint of the request, used as the cache key
    pub fn cache_key(&self) -> String {
        let mut params = self.query.to_query_params();
        params.push(("project".to_string(), self.project.to_string()));
        if let Some(id) = self.launch_id {
            params.push(("launch_id".to_string(), id.to_string()));
        }
        if let Some(name) = self.test_name {
            params.push(("test_name".to_string(), name.to_string()));
        }

        let endpoint = if self.failed_tests {
            FAILED_TESTS_ENDPOINT
        } else {
            LAUNCHES_ENDPOINT
        };
        let borrowed: Vec<(&str, &str)> = params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        cache_key(endpoint, Some(self.base_url), &borrowed)
    }
}

/// Run the CLI invocation
pub async fn run(cli: &Cli) -> Result<()> {
    if cli.cache.reset_cache {
        cache::reset(&cli.cache)?;
    }
    if cli.cache.cache_info {
        return cache::info(&cli.cache, cli.output);
    }
    let Some(project) = cli.project.as_deref() else {
        return Ok(());
    };

    let filters = LaunchFilters::from_intents(&cli.filters.to_intents())?;
    let query = LaunchQuery::new(cli.pagination.to_params(), filters);
    log::debug!("Launch query: {:?}", query.to_query_params());

    let ctx = CommandContext::new(cli.config.as_deref(), cli.no_verify, !cli.debug)?;
    let request = ReportRequest {
        base_url: &ctx.config.base_url,
        project,
        query: &query,
        failed_tests: cli.failed_tests_mode(),
        launch_id: cli.launch_id.as_deref(),
        test_name: cli.test_name.as_deref(),
    };
    let results = open_cache(cli);

    let render_ctx = RenderContext {
        base_url: &ctx.config.base_url,
        project,
        csv_path: &cli.csv_path,
    };

    let rendered = if request.failed_tests {
        let cases = failed_tests(&ctx, &request, &results).await?;
        output::render_test_cases(&cases, cli.output, &render_ctx)?
    } else {
        let launches = launches(&ctx, &request, &results).await?;
        output::render_launches(&launches, cli.output, &render_ctx)?
    };

    ctx.progress.finish();
    println!("{}", rendered);
    Ok(())
}

fn open_cache(cli: &Cli) -> ResultCache {
    if cli.cache.no_cache {
        log::debug!("Cache bypassed (--no-cache)");
        return ResultCache::disabled();
    }
    match cli.cache.resolve_dir() {
        Ok(dir) => {
            let cache = ResultCache::open(&dir, cli.cache.max_age());
            if cache.is_enabled() {
                log::debug!("Using cache at {}", dir.display());
            }
            cache
        }
        Err(e) => {
            log::warn!("No cache directory available: {}", e);
            ResultCache::disabled()
        }
    }
}

async fn launches(
    ctx: &CommandContext,
    request: &ReportRequest<'_>,
    results: &ResultCache,
) -> Result<Vec<Launch>> {
    let key = request.cache_key();
    if let Some(hit) = results.lookup::<Vec<Launch>>(&key) {
        log::info!("Using cached launches ({} entries)", hit.len());
        return Ok(hit);
    }

    ctx.progress.progress("Fetching launches");
    let fetched = ctx
        .client
        .fetch_launches(request.project, request.query)
        .await;
    ctx.progress.finish();

    let fetched = fetched?;
    if fetched.is_failed() {
        return Ok(Vec::new());
    }
    let launches = fetched.into_items();
    results.store(&key, &launches);
    Ok(launches)
}

async fn failed_tests(
    ctx: &CommandContext,
    request: &ReportRequest<'_>,
    results: &ResultCache,
) -> Result<Vec<TestCase>> {
    let key = request.cache_key();
    if let Some(hit) = results.lookup::<Vec<TestCase>>(&key) {
        log::info!("Using cached failed tests ({} entries)", hit.len());
        return Ok(hit);
    }

    let cases = fetch_failed_test_cases(
        &ctx.client,
        request.project,
        request.launch_id,
        request.query,
        request.test_name,
    )
    .await;
    ctx.progress.finish();
    let cases = cases?;

    // Partial results are shown but not cached
    if ctx.progress.failures() == 0 {
        results.store(&key, &cases);
    } else {
        log::warn!(
            "{} request(s) failed; results are incomplete and were not cached",
            ctx.progress.failures()
        );
    }
    Ok(cases)
}
