//! Rendering of data source state for the terminal.

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::{AppError, DataSourceState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Toml,
    Text,
}

impl OutputFormat {
    fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Toml => "toml",
            OutputFormat::Text => "text",
        }
    }
}

pub fn render_state(state: &DataSourceState, format: OutputFormat) -> Result<String, AppError> {
    match format {
        OutputFormat::Json => render_json(state, format),
        OutputFormat::Yaml => serde_yaml::to_string(state)
            .map(|s| s.trim_end().to_string())
            .map_err(|e| render_error(format, e)),
        OutputFormat::Toml => toml::to_string(state)
            .map(|s| s.trim_end().to_string())
            .map_err(|e| render_error(format, e)),
        OutputFormat::Text => Ok(render_text(state)),
    }
}

pub fn render_json<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| render_error(format, e))
}

fn render_text(state: &DataSourceState) -> String {
    let mut rows = vec![
        ("id", state.id.as_str()),
        ("account_id", state.account_id.as_str()),
        ("project", state.project.as_str()),
        ("email", state.email.as_str()),
        ("unique_id", state.unique_id.as_str()),
        ("name", state.name.as_str()),
        ("display_name", state.display_name.as_str()),
    ];
    if let Some(link) = state.service_account_id.as_deref() {
        rows.insert(2, ("service_account_id", link));
    }

    let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(key, value)| format!("{:<width$}  {}", key, value, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_error(format: OutputFormat, err: impl std::fmt::Display) -> AppError {
    AppError::Render { format: format.as_str().to_string(), details: err.to_string() }
}
