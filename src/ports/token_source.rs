//! Access token port definition.

use crate::domain::AppError;

/// Source of OAuth2 bearer tokens for IAM requests.
pub trait TokenSource {
    fn access_token(&self) -> Result<String, AppError>;
}
