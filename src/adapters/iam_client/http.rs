//! IAM API client implementation using reqwest.

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue, RETRY_AFTER, USER_AGENT};
use url::Url;

use crate::domain::{AppError, IamApiConfig, ServiceAccount};
use crate::ports::{IamClient, TokenSource};

const DEFAULT_STATUS_MESSAGE: &str = "IAM API request failed";

/// HTTP transport for the IAM v1 API.
///
/// This client performs a single request per call. Retry behavior is implemented
/// by [`super::RetryingIamClient`]. The bearer token is fetched on the first
/// request and reused for the lifetime of the client.
pub struct HttpIamClient {
    api_url: Url,
    client: Client,
    tokens: Box<dyn TokenSource>,
    token: OnceLock<String>,
}

impl std::fmt::Debug for HttpIamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpIamClient")
            .field("api_url", &self.api_url)
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}

impl HttpIamClient {
    /// Create a new HTTP client for the configured endpoint.
    pub fn new(config: &IamApiConfig, tokens: Box<dyn TokenSource>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::IamApi {
                message: format!("Failed to create HTTP client: {}", e),
                status: None,
            })?;

        Ok(Self { api_url: config.api_url.clone(), client, tokens, token: OnceLock::new() })
    }

    fn resource_url(&self, name: &str) -> Result<Url, AppError> {
        self.api_url.join(name.trim_start_matches('/')).map_err(|e| AppError::IamApi {
            message: format!("Invalid resource name '{}': {}", name, e),
            status: None,
        })
    }

    fn bearer_token(&self) -> Result<&str, AppError> {
        if let Some(token) = self.token.get() {
            return Ok(token.as_str());
        }
        let fetched = self.tokens.access_token()?;
        Ok(self.token.get_or_init(|| fetched).as_str())
    }

    fn send_request(&self, name: &str) -> Result<ServiceAccount, AppError> {
        let url = self.resource_url(name)?;
        let token = self.bearer_token()?;
        tracing::debug!(%url, "GET service account");

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, concat!("sa-lookup/", env!("CARGO_PKG_VERSION")))
            .send()
            .map_err(map_send_error)?;

        let status = response.status();
        let retry_after_ms = response.headers().get(RETRY_AFTER).and_then(parse_retry_after_ms);
        let body_text = response.text().unwrap_or_default();

        if status.is_success() {
            return serde_json::from_str(&body_text).map_err(|e| AppError::IamApi {
                message: format!("Failed to parse response: {}", e),
                status: Some(status.as_u16()),
            });
        }

        let mut message = extract_error_message(&body_text).unwrap_or_else(|| {
            if !body_text.trim().is_empty() {
                body_text.clone()
            } else if status.as_u16() == 404 {
                "Not found".to_string()
            } else if status.as_u16() == 429 {
                "Rate limited".to_string()
            } else if status.is_server_error() {
                "Server error".to_string()
            } else {
                DEFAULT_STATUS_MESSAGE.to_string()
            }
        });

        if let Some(value) = retry_after_ms {
            message.push_str(&format!(" (retry_after_ms={})", value));
        }

        Err(AppError::IamApi { message, status: Some(status.as_u16()) })
    }
}

/// Failures before any response arrived are transient; anything else is not.
fn map_send_error(err: reqwest::Error) -> AppError {
    if err.is_connect() || err.is_timeout() || err.is_request() {
        return AppError::Transport(err.to_string());
    }
    AppError::IamApi { message: format!("HTTP request failed: {}", err), status: None }
}

/// Pull `error.message` out of a Google API error envelope.
fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}

fn parse_retry_after_ms(value: &HeaderValue) -> Option<u64> {
    let raw = value.to_str().ok()?.trim();
    let seconds = raw.parse::<u64>().ok()?;
    Some(seconds.saturating_mul(1000))
}

impl IamClient for HttpIamClient {
    fn get_service_account(&self, name: &str) -> Result<ServiceAccount, AppError> {
        self.send_request(name)
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use mockito::Matcher;

    use super::*;
    use crate::adapters::token::StaticTokenSource;

    struct CountingTokenSource {
        calls: Arc<AtomicUsize>,
    }

    impl TokenSource for CountingTokenSource {
        fn access_token(&self) -> Result<String, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("counted-token".to_string())
        }
    }

    const NAME: &str = "projects/-/serviceAccounts/builder@my-project.iam.gserviceaccount.com";
    const PATH: &str = "/v1/projects/-/serviceAccounts/builder@my-project.iam.gserviceaccount.com";

    fn client_for(server: &mockito::Server) -> HttpIamClient {
        let config = IamApiConfig {
            timeout_secs: 1,
            ..IamApiConfig::with_endpoint(Url::parse(&format!("{}/v1", server.url())).unwrap())
        };
        HttpIamClient::new(&config, Box::new(StaticTokenSource::new("test-token"))).unwrap()
    }

    #[test]
    fn get_service_account_success() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", PATH)
            .match_header("authorization", "Bearer test-token")
            .match_header("user-agent", Matcher::Regex("^sa-lookup/".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "name": "projects/my-project/serviceAccounts/builder@my-project.iam.gserviceaccount.com",
                    "projectId": "my-project",
                    "uniqueId": "100200300",
                    "email": "builder@my-project.iam.gserviceaccount.com",
                    "displayName": "Builder"
                }"#,
            )
            .expect(1)
            .create();

        let account = client_for(&server).get_service_account(NAME).unwrap();

        assert_eq!(account.project_id, "my-project");
        assert_eq!(account.unique_id, "100200300");
        assert_eq!(account.display_name, "Builder");
        mock.assert();
    }

    #[test]
    fn not_found_carries_404_status() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", PATH)
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"error":{"code":404,"message":"Unknown service account","status":"NOT_FOUND"}}"#,
            )
            .expect(1)
            .create();

        let err = client_for(&server).get_service_account(NAME).unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Unknown service account");
        mock.assert();
    }

    #[test]
    fn server_error_without_body() {
        let mut server = mockito::Server::new();
        let mock = server.mock("GET", PATH).with_status(503).expect(1).create();

        let err = client_for(&server).get_service_account(NAME).unwrap_err();

        match err {
            AppError::IamApi { message, status } => {
                assert_eq!(status, Some(503));
                assert_eq!(message, "Server error");
            }
            other => panic!("unexpected error variant: {}", other),
        }
        mock.assert();
    }

    #[test]
    fn retry_after_is_carried_in_message() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", PATH)
            .with_status(429)
            .with_header("retry-after", "2")
            .expect(1)
            .create();

        let err = client_for(&server).get_service_account(NAME).unwrap_err();

        assert_eq!(err.status(), Some(429));
        assert!(err.to_string().contains("retry_after_ms=2000"));
    }

    #[test]
    fn malformed_success_body_is_an_error() {
        let mut server = mockito::Server::new();
        let _mock = server.mock("GET", PATH).with_status(200).with_body("not json").create();

        let err = client_for(&server).get_service_account(NAME).unwrap_err();

        assert!(err.to_string().starts_with("Failed to parse response"));
        assert_eq!(err.status(), Some(200));
    }

    #[test]
    fn extracts_top_level_message() {
        assert_eq!(extract_error_message(r#"{"message":"flat"}"#).as_deref(), Some("flat"));
        assert_eq!(extract_error_message("   "), None);
        assert_eq!(extract_error_message("<html>"), None);
    }

    #[test]
    fn connection_refused_is_a_transport_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let config = IamApiConfig {
            timeout_secs: 1,
            ..IamApiConfig::with_endpoint(
                Url::parse(&format!("http://127.0.0.1:{}/v1", port)).unwrap(),
            )
        };
        let client =
            HttpIamClient::new(&config, Box::new(StaticTokenSource::new("test-token"))).unwrap();

        let err = client.get_service_account(NAME).unwrap_err();

        assert!(matches!(err, AppError::Transport(_)), "unexpected error: {:?}", err);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn token_is_fetched_once_per_client() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", PATH)
            .match_header("authorization", "Bearer counted-token")
            .with_status(503)
            .expect(2)
            .create();
        let calls = Arc::new(AtomicUsize::new(0));
        let config = IamApiConfig::with_endpoint(Url::parse(&format!("{}/v1", server.url())).unwrap());
        let client = HttpIamClient::new(
            &config,
            Box::new(CountingTokenSource { calls: Arc::clone(&calls) }),
        )
        .unwrap();

        assert_eq!(client.get_service_account(NAME).unwrap_err().status(), Some(503));
        assert_eq!(client.get_service_account(NAME).unwrap_err().status(), Some(503));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        mock.assert();
    }
}
