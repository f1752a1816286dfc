use std::io;

use thiserror::Error;

/// Library-wide error type for sa-lookup operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// An attribute value failed its schema validator.
    #[error("\"{attribute}\" (\"{value}\") doesn't match regexp \"{pattern}\"")]
    InvalidAttribute { attribute: String, value: String, pattern: String },

    /// Both or neither of the two selector attributes were set.
    #[error("exactly one of account_id or service_account_id must be provided")]
    AmbiguousSelector,

    /// No project on the input and no provider default.
    #[error("project: required field is not set")]
    ProjectNotSet,

    /// No access token could be obtained.
    #[error(
        "No access token available: set GOOGLE_OAUTH_ACCESS_TOKEN, `access_token` in the config file, or log in with gcloud"
    )]
    CredentialsMissing,

    /// External command execution failed.
    #[error("Command '{command}' failed: {details}")]
    CommandFailed { command: String, details: String },

    /// IAM API returned an error response.
    #[error("{message}")]
    IamApi { message: String, status: Option<u16> },

    /// The request never produced a response (connect failure, timeout).
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// Reading the remote resource failed for a reason other than not-found.
    #[error("Error when reading or editing {resource}: {source}")]
    ResourceRead {
        resource: String,
        #[source]
        source: Box<AppError>,
    },

    /// Output rendering failed.
    #[error("Failed to render {format} output: {details}")]
    Render { format: String, details: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// HTTP status reported by the IAM API, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::IamApi { status, .. } => *status,
            AppError::ResourceRead { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Whether the backend reported the resource as missing (HTTP 404).
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
