use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::models::{
    Case, CasesResponse, Project, ResultBatch, Run, RunRequest, Section, SectionsResponse, Suite,
    SuiteListing,
};
use super::{Catalog, RemoteError};
use crate::cases::CaseRecord;
use crate::config::{RemoteConfig, Strictness, API_PREFIX, DEFAULT_TIMEOUT_SECS};

/// Status and body of one exchange with the service.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// TestRail API client.
///
/// Every request carries basic-auth credentials and JSON `Accept` and
/// `Content-Type` headers, and has a deadline. Certificate validation is
/// skipped unless the configuration turns it back on.
pub struct TestRailClient {
    base_url: String,
    user: String,
    password: String,
    strictness: Strictness,
    client: Client,
}

impl TestRailClient {
    /// Creates a client with the default deadline and the insecure TLS policy.
    ///
    /// # Arguments
    /// * `base_url` - TestRail root, e.g. "https://example.testrail.io"
    /// * `user` - Basic-auth user
    /// * `password` - Password or API key
    pub fn new(
        base_url: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, RemoteError> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user: user.into(),
            password: password.into(),
            strictness: Strictness::default(),
            client: build_http_client(DEFAULT_TIMEOUT_SECS, true)?,
        })
    }

    /// Creates a client from configuration, falling back to the legacy
    /// environment variables for URL and credentials.
    pub fn from_config(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let base_url = config
            .base_url_or_env()
            .ok_or_else(|| RemoteError::MissingConfig("remote.base_url".to_string()))?;
        let user = config
            .user_or_env()
            .ok_or_else(|| RemoteError::MissingConfig("remote.user".to_string()))?;
        let password = config
            .password_or_env()
            .ok_or_else(|| RemoteError::MissingConfig("remote.password".to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user,
            password,
            strictness: config.strictness,
            client: build_http_client(config.timeout_secs, config.accept_invalid_certs)?,
        })
    }

    /// Sets how non-success statuses and undecodable bodies are handled.
    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}/{}", self.base_url, API_PREFIX, endpoint)
    }

    /// Send one request and return the status with the raw body.
    ///
    /// A failed send is a [`RemoteError::Transport`]; no body read is
    /// attempted in that case.
    pub async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse, RemoteError> {
        let url = self.endpoint_url(endpoint);
        debug!(%method, %url, "sending request");

        let mut req = self
            .client
            .request(method, &url)
            .basic_auth(&self.user, Some(&self.password))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");

        if let Some(body) = body {
            req = req.body(body);
        }

        let response = req.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        debug!(%url, status, bytes = body.len(), "received response");
        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }

    async fn get_json<T>(&self, what: &str, endpoint: &str) -> Result<T, RemoteError>
    where
        T: DeserializeOwned + Default,
    {
        let response = self.execute(Method::GET, endpoint, None).await?;
        self.interpret(what, response)
    }

    async fn post_json<B, T>(&self, what: &str, endpoint: &str, body: &B) -> Result<T, RemoteError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        let payload =
            serde_json::to_vec(body).map_err(|e| RemoteError::Decode(format!("{}: {}", what, e)))?;
        let response = self.execute(Method::POST, endpoint, Some(payload)).await?;
        self.interpret(what, response)
    }

    /// Check the status, then decode the body.
    ///
    /// Lenient mode logs both kinds of failure and falls back to
    /// `T::default()` when the body does not decode.
    fn interpret<T>(&self, what: &str, response: RawResponse) -> Result<T, RemoteError>
    where
        T: DeserializeOwned + Default,
    {
        self.check_status(what, &response)?;

        match serde_json::from_slice::<T>(&response.body) {
            Ok(value) => Ok(value),
            Err(e) => match self.strictness {
                Strictness::Strict => Err(RemoteError::Decode(format!("{}: {}", what, e))),
                Strictness::Lenient => {
                    warn!(what, error = %e, "response failed to decode, using empty value");
                    Ok(T::default())
                }
            },
        }
    }

    fn check_status(&self, what: &str, response: &RawResponse) -> Result<(), RemoteError> {
        if response.is_success() {
            return Ok(());
        }
        match self.strictness {
            Strictness::Strict => Err(RemoteError::Status {
                status: response.status,
                message: response.text(),
            }),
            Strictness::Lenient => {
                warn!(what, status = response.status, body = %response.text(), "non-success status");
                Ok(())
            }
        }
    }
}

fn build_http_client(timeout_secs: u64, accept_invalid_certs: bool) -> Result<Client, RemoteError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .danger_accept_invalid_certs(accept_invalid_certs)
        .build()
        .map_err(|e| RemoteError::Transport(format!("Failed to build HTTP client: {}", e)))
}

#[async_trait]
impl Catalog for TestRailClient {
    async fn get_project(&self, project_id: u64) -> Result<Project, RemoteError> {
        self.get_json("project", &format!("get_project/{}", project_id))
            .await
    }

    async fn get_suites(&self, project_id: u64) -> Result<Vec<Suite>, RemoteError> {
        let listing: SuiteListing = self
            .get_json("suites", &format!("get_suites/{}", project_id))
            .await?;
        Ok(listing.into_suites())
    }

    async fn get_sections(&self, project_id: u64, suite_id: u64) -> Result<Vec<Section>, RemoteError> {
        let response: SectionsResponse = self
            .get_json(
                "sections",
                &format!("get_sections/{}&suite_id={}", project_id, suite_id),
            )
            .await?;
        Ok(response.sections)
    }

    async fn get_cases(&self, project_id: u64, suite_id: u64) -> Result<Vec<Case>, RemoteError> {
        let response: CasesResponse = self
            .get_json(
                "cases",
                &format!("get_cases/{}&suite_id={}", project_id, suite_id),
            )
            .await?;
        Ok(response.cases)
    }

    async fn add_case(&self, section_id: u64, case: &CaseRecord) -> Result<Case, RemoteError> {
        self.post_json("case", &format!("add_case/{}", section_id), case)
            .await
    }

    async fn add_run(&self, project_id: u64, run: &RunRequest) -> Result<Run, RemoteError> {
        self.post_json("run", &format!("add_run/{}", project_id), run)
            .await
    }

    async fn add_results_for_cases(
        &self,
        run_id: u64,
        results: &ResultBatch,
    ) -> Result<(), RemoteError> {
        let payload = serde_json::to_vec(results)
            .map_err(|e| RemoteError::Decode(format!("results: {}", e)))?;
        let response = self
            .execute(
                Method::POST,
                &format!("add_results_for_cases/{}", run_id),
                Some(payload),
            )
            .await?;
        self.check_status("results", &response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = TestRailClient::new("https://rail.example.com/", "qa", "secret").unwrap();
        assert_eq!(client.base_url(), "https://rail.example.com");
        assert_eq!(client.strictness(), Strictness::Strict);
    }

    #[test]
    fn test_endpoint_url() {
        let client = TestRailClient::new("https://rail.example.com", "qa", "secret").unwrap();
        assert_eq!(
            client.endpoint_url("get_sections/34&suite_id=5279"),
            "https://rail.example.com/index.php?/api/v2/get_sections/34&suite_id=5279"
        );
    }

    #[test]
    fn test_from_config_requires_base_url() {
        let config = RemoteConfig {
            base_url: None,
            user: Some("qa".into()),
            password: Some("secret".into()),
            ..RemoteConfig::default()
        };
        if std::env::var("ORBITAL_TEST_RAIL").is_err() {
            assert!(matches!(
                TestRailClient::from_config(&config),
                Err(RemoteError::MissingConfig(_))
            ));
        }
    }

    #[test]
    fn test_lenient_decode_falls_back_to_default() {
        let client = TestRailClient::new("https://rail.example.com", "qa", "secret")
            .unwrap()
            .with_strictness(Strictness::Lenient);
        let response = RawResponse {
            status: 500,
            body: b"<html>oops</html>".to_vec(),
        };
        let run: Run = client.interpret("run", response).unwrap();
        assert_eq!(run.id, 0);
    }

    #[test]
    fn test_strict_status_is_error() {
        let client = TestRailClient::new("https://rail.example.com", "qa", "secret").unwrap();
        let response = RawResponse {
            status: 403,
            body: br#"{"error":"no access"}"#.to_vec(),
        };
        let err = client.interpret::<Run>("run", response).unwrap_err();
        assert!(matches!(err, RemoteError::Status { status: 403, .. }));
    }
}
