//! Mock ReportPortal API client for testing
//!
//! Serves canned launches, suites and tests from memory and records which
//! listings were requested, so composition logic can be tested without HTTP.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::models::{ItemStatus, Launch, Suite, TestItem, filter_by_name};
use super::pagination::LaunchQuery;
use super::{Fetched, ReportPortalApi};
use crate::error::{ApiError, Result};
use crate::observe::{Observer, RecordingObserver};

/// Mock API client.
///
/// # Example
/// ```ignore
/// let mock = MockReportPortalClient::new("https://rp")
///     .with_launch("1", "nightly")
///     .with_suite("1", "10", "Auth")
///     .with_tests("10", &[("100", "login")]);
/// ```
pub struct MockReportPortalClient {
    base_url: String,
    launches: Vec<Launch>,
    /// launch id -> suites
    suites: HashMap<String, Vec<Suite>>,
    /// suite id -> failed tests
    tests: HashMap<String, Vec<TestItem>>,
    /// launch id -> error returned when listing its suites
    suite_failures: HashMap<String, ApiError>,
    /// suite id -> error returned when listing its tests
    test_failures: HashMap<String, ApiError>,
    auth_fails: bool,
    calls: Mutex<Vec<String>>,
    launch_queries: Mutex<Vec<LaunchQuery>>,
    /// Notifications emitted by the mock
    pub observer: Arc<RecordingObserver>,
}

impl MockReportPortalClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            launches: Vec::new(),
            suites: HashMap::new(),
            tests: HashMap::new(),
            suite_failures: HashMap::new(),
            test_failures: HashMap::new(),
            auth_fails: false,
            calls: Mutex::new(Vec::new()),
            launch_queries: Mutex::new(Vec::new()),
            observer: Arc::new(RecordingObserver::new()),
        }
    }

    /// Add a failed launch to the listing
    pub fn with_launch(mut self, id: &str, name: &str) -> Self {
        self.launches.push(Launch {
            id: id.to_string(),
            name: name.to_string(),
            number: None,
            status: ItemStatus::Failed,
            start_time: None,
            end_time: None,
            tags: Vec::new(),
            attributes: Vec::new(),
            statistics: Default::default(),
        });
        self
    }

    /// Add a suite under a launch
    pub fn with_suite(mut self, launch_id: &str, id: &str, name: &str) -> Self {
        self.suites
            .entry(launch_id.to_string())
            .or_default()
            .push(Suite {
                id: id.to_string(),
                name: name.to_string(),
                launch_id: Some(launch_id.to_string()),
            });
        self
    }

    /// Set the failed tests under a suite as `(id, name)` pairs
    pub fn with_tests(mut self, suite_id: &str, tests: &[(&str, &str)]) -> Self {
        let items = tests
            .iter()
            .map(|(id, name)| TestItem {
                id: id.to_string(),
                name: name.to_string(),
                status: ItemStatus::Failed,
                parent: Some(suite_id.to_string()),
                launch_id: None,
                start_time: None,
                end_time: None,
                description: None,
            })
            .collect();
        self.tests.insert(suite_id.to_string(), items);
        self
    }

    /// Make the suite listing of a launch fail
    pub fn failing_suites_for(mut self, launch_id: &str, error: ApiError) -> Self {
        self.suite_failures.insert(launch_id.to_string(), error);
        self
    }

    /// Make the test listing of a suite fail
    pub fn failing_tests_for(mut self, suite_id: &str, error: ApiError) -> Self {
        self.test_failures.insert(suite_id.to_string(), error);
        self
    }

    /// Make authentication fail
    pub fn failing_authentication(mut self) -> Self {
        self.auth_fails = true;
        self
    }

    /// Listings requested so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Launch queries received so far
    pub fn launch_queries(&self) -> Vec<LaunchQuery> {
        self.launch_queries
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn check_auth(&self) -> Result<()> {
        if self.auth_fails {
            return Err(ApiError::Authentication("invalid credentials".to_string()).into());
        }
        Ok(())
    }
}

#[async_trait]
impl ReportPortalApi for MockReportPortalClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn observer(&self) -> &dyn Observer {
        self.observer.as_ref()
    }

    async fn authenticate(&self) -> Result<()> {
        self.check_auth()
    }

    async fn fetch_launches(&self, _project: &str, query: &LaunchQuery) -> Result<Fetched<Launch>> {
        self.check_auth()?;
        self.record("launches".to_string());
        if let Ok(mut queries) = self.launch_queries.lock() {
            queries.push(query.clone());
        }
        Ok(Fetched::from_items(self.launches.clone()))
    }

    async fn fetch_suites(&self, _project: &str, launch_id: &str) -> Result<Fetched<Suite>> {
        self.check_auth()?;
        self.record(format!("suites:{}", launch_id));

        if let Some(err) = self.suite_failures.get(launch_id) {
            self.observer.request_failed("fetch_suites", err);
            return Ok(Fetched::Failed(err.clone()));
        }
        let suites = self.suites.get(launch_id).cloned().unwrap_or_default();
        Ok(Fetched::from_items(suites))
    }

    async fn fetch_tests(
        &self,
        _project: &str,
        launch_id: &str,
        suite_id: &str,
        name_filter: Option<&str>,
    ) -> Result<Fetched<TestItem>> {
        self.check_auth()?;
        self.record(format!("tests:{}/{}", launch_id, suite_id));

        if let Some(err) = self.test_failures.get(suite_id) {
            self.observer.request_failed("fetch_tests", err);
            return Ok(Fetched::Failed(err.clone()));
        }
        let tests = self.tests.get(suite_id).cloned().unwrap_or_default();
        Ok(Fetched::from_items(filter_by_name(tests, name_filter)))
    }
}
