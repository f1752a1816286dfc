//! Pure parse/validate for provider configuration (`sa-lookup.toml`).

use crate::domain::{AppError, ProviderConfig};

/// Parse and validate provider configuration from TOML content.
pub fn parse_config_content(content: &str) -> Result<ProviderConfig, AppError> {
    let config: ProviderConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
