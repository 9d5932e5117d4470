//! ReportPortal API client implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use super::models::{Launch, Page, Suite, TestItem, filter_by_name};
use super::pagination::{ITEM_PAGE_SIZE, LaunchQuery};
use super::{Fetched, ReportPortalApi};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::observe::{LogObserver, Observer};

/// OAuth token endpoint, relative to the base URL
const TOKEN_PATH: &str = "/uat/sso/oauth/token";

/// Client credentials the ReportPortal UI uses for the password grant
const OAUTH_CLIENT_ID: &str = "ui";
const OAUTH_CLIENT_SECRET: &str = "uiman";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How the client obtains its bearer token
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Pre-issued API token, used as-is
    Token(String),
    /// Username/password exchanged at the token endpoint
    Password { username: String, password: String },
    /// Nothing configured; every authenticated call fails
    None,
}

impl Credentials {
    /// Pick credentials from config, preferring a token
    pub fn from_config(config: &Config) -> Self {
        if let Some(ref token) = config.token {
            return Credentials::Token(token.clone());
        }
        match (&config.username, &config.password) {
            (Some(username), Some(password)) => Credentials::Password {
                username: username.clone(),
                password: password.clone(),
            },
            _ => Credentials::None,
        }
    }
}

/// Internal authentication state
#[derive(Debug)]
struct AuthState {
    credentials: Credentials,
    token: Option<String>,
}

/// ReportPortal API client
pub struct ReportPortalClient {
    http: HttpClient,
    base_url: String,
    auth_state: RwLock<AuthState>,
    observer: Arc<dyn Observer>,
}

impl ReportPortalClient {
    /// Create a new, unauthenticated client
    pub fn new(base_url: &str, credentials: Credentials, verify_ssl: bool) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(!verify_ssl)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !verify_ssl {
            log::warn!("TLS certificate verification is disabled");
        }

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_state: RwLock::new(AuthState {
                credentials,
                token: None,
            }),
            observer: Arc::new(LogObserver),
        })
    }

    /// Create a client from loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.base_url,
            Credentials::from_config(config),
            config.verify_ssl,
        )
    }

    /// Replace the observer
    pub fn with_observer(mut self, observer: Arc<dyn Observer>) -> Self {
        self.observer = observer;
        self
    }

    /// Whether a bearer token is held
    #[cfg(test)]
    async fn is_authenticated(&self) -> bool {
        self.auth_state.read().await.token.is_some()
    }

    /// Current bearer token, authenticating first if needed
    async fn bearer_token(&self) -> Result<String> {
        if let Some(token) = self.auth_state.read().await.token.clone() {
            return Ok(token);
        }

        self.authenticate().await?;

        let state = self.auth_state.read().await;
        state
            .token
            .clone()
            .ok_or_else(|| ApiError::Authentication("no token after authentication".to_string()).into())
    }

    /// Exchange username/password for an access token
    async fn exchange_password(&self, username: &str, password: &str) -> Result<String> {
        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
        }

        let url = format!("{}{}", self.base_url, TOKEN_PATH);
        self.observer.request("POST", &url, &[]);

        let response = self
            .http
            .post(&url)
            .basic_auth(OAUTH_CLIENT_ID, Some(OAUTH_CLIENT_SECRET))
            .form(&[
                ("grant_type", "password"),
                ("username", username),
                ("password", password),
            ])
            .send()
            .await
            .map_err(|e| ApiError::Authentication(format!("token request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Authentication(format!(
                "token endpoint returned {}",
                status
            ))
            .into());
        }

        let body: TokenResponse = response.json().await.map_err(|e| {
            ApiError::Authentication(format!("invalid token response: {}", e))
        })?;

        Ok(body.access_token)
    }

    /// Authenticated GET of a paged listing, degrading request failures
    async fn list<T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
        params: Vec<(String, String)>,
    ) -> Result<Fetched<T>> {
        let token = self.bearer_token().await?;

        match self.get_json::<Page<T>>(&token, path, &params).await {
            Ok(page) => {
                if let Some(meta) = page.page {
                    log::debug!(
                        "{}: page {} of {}, {} records in total",
                        operation,
                        meta.number.unwrap_or(1),
                        meta.total_pages.unwrap_or(1),
                        meta.total_elements.unwrap_or(page.content.len() as u64)
                    );
                }
                Ok(Fetched::from_items(page.content))
            }
            Err(err) => {
                self.observer.request_failed(operation, &err);
                Ok(Fetched::Failed(err))
            }
        }
    }

    /// Single GET request with status mapping
    async fn get_json<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        params: &[(String, String)],
    ) -> std::result::Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        self.observer.request("GET", &url, params);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .header("Content-Type", "application/json")
            .query(params)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        match status {
            s if s.is_success() => response.json::<T>().await.map_err(|e| {
                ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
            }),
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden),
            StatusCode::NOT_FOUND => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Resource not found".to_string());
                Err(ApiError::NotFound(error_msg))
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Bad request".to_string());
                Err(ApiError::BadRequest(error_msg))
            }
            s if s.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", s));
                Err(ApiError::ServerError(error_msg))
            }
            s => Err(ApiError::InvalidResponse(format!(
                "Unexpected status code: {}",
                s
            ))),
        }
    }
}

#[async_trait]
impl ReportPortalApi for ReportPortalClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn observer(&self) -> &dyn Observer {
        self.observer.as_ref()
    }

    async fn authenticate(&self) -> Result<()> {
        let mut state = self.auth_state.write().await;
        if state.token.is_some() {
            return Ok(());
        }

        let token = match state.credentials {
            Credentials::Token(ref token) => token.clone(),
            Credentials::Password {
                ref username,
                ref password,
            } => self.exchange_password(username, password).await?,
            Credentials::None => {
                return Err(ApiError::Authentication(
                    "no token or username/password configured".to_string(),
                )
                .into());
            }
        };

        state.token = Some(token);
        self.observer.progress("Authenticated with ReportPortal");
        Ok(())
    }

    async fn fetch_launches(&self, project: &str, query: &LaunchQuery) -> Result<Fetched<Launch>> {
        let path = format!("/api/v1/{}/launch", project);
        let params = query.to_query_params();
        self.list("fetch_launches", &path, params).await
    }

    async fn fetch_suites(&self, project: &str, launch_id: &str) -> Result<Fetched<Suite>> {
        let path = format!("/api/v1/{}/item", project);
        let params = vec![
            ("filter.eq.launchId".to_string(), launch_id.to_string()),
            ("filter.eq.type".to_string(), "SUITE".to_string()),
            ("page.size".to_string(), ITEM_PAGE_SIZE.to_string()),
        ];
        self.list("fetch_suites", &path, params).await
    }

    async fn fetch_tests(
        &self,
        project: &str,
        launch_id: &str,
        suite_id: &str,
        name_filter: Option<&str>,
    ) -> Result<Fetched<TestItem>> {
        let path = format!("/api/v1/{}/item", project);
        let params = vec![
            ("filter.eq.launchId".to_string(), launch_id.to_string()),
            ("filter.eq.parentId".to_string(), suite_id.to_string()),
            ("filter.in.status".to_string(), "FAILED".to_string()),
            ("page.size".to_string(), ITEM_PAGE_SIZE.to_string()),
        ];
        let fetched = self.list("fetch_tests", &path, params).await?;
        Ok(fetched.map_items(|items| filter_by_name(items, name_filter)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{LaunchFilters, StatusFilter};
    use crate::observe::RecordingObserver;
    use crate::client::PaginationParams;
    use crate::error::Error;
    use mockito::Matcher;

    const LAUNCHES_BODY: &str = r#"{
        "content": [
            {"id": 1, "name": "nightly", "status": "FAILED",
             "statistics": {"executions": {"failed": 2}}},
            {"id": 2, "name": "nightly", "status": "PASSED"}
        ],
        "page": {"number": 1, "size": 50, "totalElements": 2, "totalPages": 1}
    }"#;

    fn token_client(url: &str) -> ReportPortalClient {
        ReportPortalClient::new(url, Credentials::Token("tok".to_string()), true).unwrap()
    }

    fn password_client(url: &str) -> ReportPortalClient {
        ReportPortalClient::new(
            url,
            Credentials::Password {
                username: "bob".to_string(),
                password: "secret".to_string(),
            },
            true,
        )
        .unwrap()
    }

    #[test]
    fn test_client_creation_trims_base_url() {
        let client = token_client("https://rp.example.com/");
        assert_eq!(client.base_url(), "https://rp.example.com");
    }

    #[test]
    fn test_credentials_prefer_token() {
        let config = Config {
            base_url: "https://rp".to_string(),
            token: Some("t".to_string()),
            username: Some("u".to_string()),
            password: Some("p".to_string()),
            verify_ssl: true,
        };
        assert!(matches!(Credentials::from_config(&config), Credentials::Token(_)));
    }

    #[tokio::test]
    async fn test_fetch_launches_sends_failed_status_filter() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/PROW/launch")
            .match_header("authorization", "Bearer tok")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page.page".into(), "1".into()),
                Matcher::UrlEncoded("page.size".into(), "50".into()),
                Matcher::UrlEncoded("page.sort".into(), "startTime,DESC".into()),
                Matcher::UrlEncoded(
                    "filter.gte.statistics$executions$failed".into(),
                    "1".into(),
                ),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(LAUNCHES_BODY)
            .expect(1)
            .create_async()
            .await;

        let client = token_client(&server.url());
        let query = LaunchQuery::new(
            PaginationParams::new(),
            LaunchFilters::default().with_status(StatusFilter::Failed),
        );

        let launches = client.fetch_launches("PROW", &query).await.unwrap();

        mock.assert_async().await;
        // The server decides what matches; the client only shapes the query
        let ids: Vec<_> = launches.into_items().into_iter().map(|l| l.id).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_pre_supplied_token_never_hits_token_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let token_mock = server
            .mock("POST", TOKEN_PATH)
            .expect(0)
            .create_async()
            .await;

        let client = token_client(&server.url());
        client.authenticate().await.unwrap();

        assert!(client.is_authenticated().await);
        token_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_password_grant_posts_once_and_uses_token() {
        let mut server = mockito::Server::new_async().await;
        let token_mock = server
            .mock("POST", TOKEN_PATH)
            .match_header("authorization", "Basic dWk6dWltYW4=")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "password".into()),
                Matcher::UrlEncoded("username".into(), "bob".into()),
                Matcher::UrlEncoded("password".into(), "secret".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "issued", "token_type": "bearer"}"#)
            .expect(1)
            .create_async()
            .await;
        let launches_mock = server
            .mock("GET", "/api/v1/PROW/launch")
            .match_query(Matcher::Any)
            .match_header("authorization", "Bearer issued")
            .with_status(200)
            .with_body(r#"{"content": []}"#)
            .expect(2)
            .create_async()
            .await;

        let client = password_client(&server.url());
        let query = LaunchQuery::default();

        // Implicit authentication on first use, token reused afterwards
        let first = client.fetch_launches("PROW", &query).await.unwrap();
        let second = client.fetch_launches("PROW", &query).await.unwrap();

        assert!(matches!(first, Fetched::Empty));
        assert!(matches!(second, Fetched::Empty));
        token_mock.assert_async().await;
        launches_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_password_grant_401_is_authentication_error_without_retry() {
        let mut server = mockito::Server::new_async().await;
        let token_mock = server
            .mock("POST", TOKEN_PATH)
            .with_status(401)
            .with_body(r#"{"error": "unauthorized"}"#)
            .expect(1)
            .create_async()
            .await;
        let launches_mock = server
            .mock("GET", "/api/v1/PROW/launch")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = password_client(&server.url());
        let err = client
            .fetch_launches("PROW", &LaunchQuery::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::Authentication(_))));
        assert!(!client.is_authenticated().await);
        token_mock.assert_async().await;
        launches_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_without_network() {
        let mut server = mockito::Server::new_async().await;
        let any = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = ReportPortalClient::new(&server.url(), Credentials::None, true).unwrap();
        let err = client.fetch_suites("PROW", "1").await.unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::Authentication(_))));
        any.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_suites_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/PROW/item")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("filter.eq.launchId".into(), "1001".into()),
                Matcher::UrlEncoded("filter.eq.type".into(), "SUITE".into()),
                Matcher::UrlEncoded("page.size".into(), "100".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"content": [{"id": 70, "name": "Auth", "launchId": 1001}]}"#)
            .create_async()
            .await;

        let client = token_client(&server.url());
        let suites = client.fetch_suites("PROW", "1001").await.unwrap().into_items();

        mock.assert_async().await;
        assert_eq!(suites.len(), 1);
        assert_eq!(suites[0].id, "70");
    }

    #[tokio::test]
    async fn test_fetch_tests_query_and_local_name_filter() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/PROW/item")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("filter.eq.launchId".into(), "1001".into()),
                Matcher::UrlEncoded("filter.eq.parentId".into(), "70".into()),
                Matcher::UrlEncoded("filter.in.status".into(), "FAILED".into()),
                Matcher::UrlEncoded("page.size".into(), "100".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{"content": [
                    {"id": 1, "name": "Login works", "status": "FAILED"},
                    {"id": 2, "name": "search", "status": "FAILED"}
                ]}"#,
            )
            .create_async()
            .await;

        let client = token_client(&server.url());
        let tests = client
            .fetch_tests("PROW", "1001", "70", Some("LOGIN"))
            .await
            .unwrap()
            .into_items();

        mock.assert_async().await;
        assert_eq!(tests.len(), 1);
        assert_eq!(tests[0].name, "Login works");
    }

    #[tokio::test]
    async fn test_server_error_degrades_and_is_reported() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/PROW/item")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let observer = Arc::new(RecordingObserver::new());
        let client = token_client(&server.url()).with_observer(observer.clone());

        let fetched = client.fetch_suites("PROW", "1").await.unwrap();

        match fetched {
            Fetched::Failed(ApiError::ServerError(msg)) => assert_eq!(msg, "boom"),
            other => panic!("expected server error, got {:?}", other),
        }
        assert_eq!(observer.failures(), vec!["fetch_suites".to_string()]);
    }

    #[tokio::test]
    async fn test_rejected_bearer_token_degrades_without_retry() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/PROW/launch")
            .match_query(Matcher::Any)
            .with_status(401)
            .expect(1)
            .create_async()
            .await;

        let client = token_client(&server.url());
        let fetched = client
            .fetch_launches("PROW", &LaunchQuery::default())
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(matches!(fetched, Fetched::Failed(ApiError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/PROW/launch")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>login</html>")
            .create_async()
            .await;

        let client = token_client(&server.url());
        let fetched = client
            .fetch_launches("PROW", &LaunchQuery::default())
            .await
            .unwrap();

        assert!(matches!(fetched, Fetched::Failed(ApiError::InvalidResponse(_))));
    }
}
