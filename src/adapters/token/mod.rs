//! Access token sources.

mod gcloud;
mod static_token;

pub use gcloud::GcloudTokenSource;
pub use static_token::StaticTokenSource;

use crate::domain::ProviderConfig;
use crate::ports::TokenSource;

/// Pick the token source for a configuration: a configured token, else gcloud.
pub fn token_source_for(config: &ProviderConfig) -> Box<dyn TokenSource> {
    match config.access_token.as_deref().filter(|t| !t.trim().is_empty()) {
        Some(token) => Box::new(StaticTokenSource::new(token)),
        None => Box::new(GcloudTokenSource::default()),
    }
}
