//! Provider configuration loading from the filesystem and environment.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::configuration::{CONFIG_FILE, parse::parse_config_content};
use crate::domain::{AppError, ProviderConfig};

/// Load provider configuration.
///
/// An explicit path must exist. Without one, `sa-lookup.toml` in `work_dir` is
/// used when present and defaults otherwise. Environment values then fill the gaps.
pub fn load_provider_config<F>(
    explicit: Option<&Path>,
    work_dir: &Path,
    env: F,
) -> Result<ProviderConfig, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let path = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(AppError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path.to_path_buf())
        }
        None => Some(work_dir.join(CONFIG_FILE)).filter(|p| p.is_file()),
    };

    let mut config = match &path {
        Some(path) => read_config_file(path)?,
        None => ProviderConfig::default(),
    };
    config.apply_env(env)?;
    config.validate()?;

    tracing::debug!(
        source = %path.as_deref().map(|p| p.display().to_string()).unwrap_or_else(|| "defaults".into()),
        project = ?config.project,
        api_url = %config.iam_api.api_url,
        "loaded provider config"
    );
    Ok(config)
}

/// Load configuration the way the CLI does: process environment and working directory.
pub fn load_from_process(explicit: Option<PathBuf>) -> Result<ProviderConfig, AppError> {
    let work_dir = std::env::current_dir()?;
    load_provider_config(explicit.as_deref(), &work_dir, |key| std::env::var(key).ok())
}

fn read_config_file(path: &Path) -> Result<ProviderConfig, AppError> {
    let content = fs::read_to_string(path)?;
    parse_config_content(&content).map_err(|e| match e {
        AppError::TomlParseError(err) => {
            AppError::config_error(format!("Invalid config file {}: {}", path.display(), err))
        }
        other => other,
    })
}
