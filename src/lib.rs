//! sa-lookup: read-only `google_service_account` data source.
//!
//! Resolves either a short account id or a fully-qualified service account link
//! against the IAM API and exposes email, unique id, canonical name and display
//! name.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{load_config, read, read_with_config, schema};
pub use domain::data_source::{DataSourceSchema, expand_service_account_name, service_account_fqn};
pub use domain::{AppError, DataSourceState, IamApiConfig, LookupInput, ProviderConfig, ReadOutcome};
