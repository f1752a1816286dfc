//! Provider configuration domain models.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

/// Environment variables consulted for the default project, in priority order.
pub const PROJECT_ENV_VARS: [&str; 4] =
    ["GOOGLE_PROJECT", "GOOGLE_CLOUD_PROJECT", "GCLOUD_PROJECT", "CLOUDSDK_CORE_PROJECT"];
/// Environment variable overriding the IAM endpoint.
pub const IAM_ENDPOINT_ENV_VAR: &str = "GOOGLE_IAM_CUSTOM_ENDPOINT";
/// Environment variable carrying an OAuth2 access token.
pub const ACCESS_TOKEN_ENV_VAR: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

/// Provider-level settings loaded from `sa-lookup.toml`.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Default project used when an account id is given without a project.
    #[serde(default)]
    pub project: Option<String>,
    /// Static OAuth2 bearer token.
    #[serde(default)]
    pub access_token: Option<String>,
    /// IAM API configuration.
    #[serde(default)]
    pub iam_api: IamApiConfig,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("project", &self.project)
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("iam_api", &self.iam_api)
            .finish()
    }
}

impl ProviderConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.project.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(AppError::config_error("project must not be empty when set"));
        }
        self.iam_api.validate()
    }

    /// Fill fields left unset by the config file from the environment.
    ///
    /// Values present in the file always win.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if self.project.is_none() {
            self.project = PROJECT_ENV_VARS.iter().find_map(|key| non_empty(*key));
        }
        if self.access_token.is_none() {
            self.access_token = non_empty(ACCESS_TOKEN_ENV_VAR);
        }
        if self.iam_api.api_url == default_api_url()
            && let Some(endpoint) = non_empty(IAM_ENDPOINT_ENV_VAR)
        {
            self.iam_api.api_url = parse_endpoint(&endpoint)?;
        }
        Ok(())
    }
}

/// IAM API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IamApiConfig {
    /// Base URL of the IAM v1 API.
    #[serde(default = "default_api_url", deserialize_with = "deserialize_endpoint")]
    pub api_url: Url,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Maximum attempts per request.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base delay between retries in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for IamApiConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl IamApiConfig {
    /// Configuration pointing at a specific endpoint.
    pub fn with_endpoint(api_url: Url) -> Self {
        Self { api_url: normalize_endpoint(api_url), ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if !matches!(self.api_url.scheme(), "http" | "https") {
            return Err(AppError::config_error(format!(
                "api_url must use http or https, got '{}'",
                self.api_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("timeout_secs must be greater than 0"));
        }
        if self.max_retries == 0 {
            return Err(AppError::config_error("max_retries must be greater than 0"));
        }
        if self.retry_delay_ms == 0 {
            return Err(AppError::config_error("retry_delay_ms must be greater than 0"));
        }
        Ok(())
    }
}

fn deserialize_endpoint<'de, D>(deserializer: D) -> Result<Url, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let url = Url::deserialize(deserializer)?;
    Ok(normalize_endpoint(url))
}

fn parse_endpoint(raw: &str) -> Result<Url, AppError> {
    let url = Url::parse(raw.trim()).map_err(|e| {
        AppError::config_error(format!("{} is not a valid URL: {}", IAM_ENDPOINT_ENV_VAR, e))
    })?;
    Ok(normalize_endpoint(url))
}

/// Resource names are joined onto the endpoint, so it must end with `/`.
fn normalize_endpoint(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn default_api_url() -> Url {
    Url::parse("https://iam.googleapis.com/v1/").expect("Default API URL must be valid")
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    500
}
