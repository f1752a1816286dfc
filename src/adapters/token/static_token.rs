use crate::domain::AppError;
use crate::ports::TokenSource;

/// A fixed bearer token from config or `GOOGLE_OAUTH_ACCESS_TOKEN`.
#[derive(Clone)]
pub struct StaticTokenSource {
    token: String,
}

impl std::fmt::Debug for StaticTokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenSource").field("token", &"[REDACTED]").finish()
    }
}

impl StaticTokenSource {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

impl TokenSource for StaticTokenSource {
    fn access_token(&self) -> Result<String, AppError> {
        let token = self.token.trim();
        if token.is_empty() {
            return Err(AppError::CredentialsMissing);
        }
        Ok(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_trimmed_token() {
        let source = StaticTokenSource::new(" ya29.token\n");
        assert_eq!(source.access_token().unwrap(), "ya29.token");
    }

    #[test]
    fn blank_token_is_missing_credentials() {
        let err = StaticTokenSource::new("  ").access_token().unwrap_err();
        assert!(matches!(err, AppError::CredentialsMissing));
    }

    #[test]
    fn debug_hides_token() {
        let rendered = format!("{:?}", StaticTokenSource::new("ya29.secret"));
        assert!(!rendered.contains("ya29.secret"));
    }
}
