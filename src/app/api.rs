//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together context creation
//! and command execution.

use std::path::PathBuf;

use crate::adapters::config_file;
use crate::adapters::{HttpIamClient, RetryPolicy, RetryingIamClient, token_source_for};
use crate::app::{AppContext, commands::read};

pub use crate::domain::data_source::{DataSourceSchema, service_account_schema};
pub use crate::domain::{AppError, DataSourceState, LookupInput, ProviderConfig, ReadOutcome};

/// Create an `AppContext` backed by the IAM REST API.
fn create_context(
    config: ProviderConfig,
) -> Result<AppContext<RetryingIamClient<HttpIamClient>>, AppError> {
    let http = HttpIamClient::new(&config.iam_api, token_source_for(&config))?;
    let client = RetryingIamClient::new(http, RetryPolicy::from_config(&config.iam_api));
    Ok(AppContext::new(config, client))
}

/// Load provider configuration from an optional file plus the process environment.
pub fn load_config(path: Option<PathBuf>) -> Result<ProviderConfig, AppError> {
    config_file::load_from_process(path)
}

/// Read the service account data source with an explicit configuration.
pub fn read_with_config(
    input: &LookupInput,
    config: ProviderConfig,
) -> Result<ReadOutcome, AppError> {
    config.validate()?;
    let ctx = create_context(config)?;
    read::execute(&ctx, input)
}

/// Read the service account data source, loading configuration like the CLI does.
pub fn read(input: &LookupInput, config_path: Option<PathBuf>) -> Result<ReadOutcome, AppError> {
    read_with_config(input, load_config(config_path)?)
}

/// Schema declaration of the data source.
pub fn schema() -> DataSourceSchema {
    service_account_schema()
}
