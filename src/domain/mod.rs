pub mod configuration;
pub mod data_source;
pub mod error;
pub mod service_account;
pub mod validation;

pub use configuration::{IamApiConfig, ProviderConfig};
pub use data_source::{DataSourceState, LookupInput, ReadOutcome};
pub use error::AppError;
pub use service_account::ServiceAccount;
