//! The `google_service_account` data source: inputs, schema, name expansion and state.

pub mod input;
pub mod name;
pub mod schema;
pub mod state;

pub use input::LookupInput;
pub use name::{expand_service_account_name, resolve_project, service_account_fqn};
pub use schema::{
    AttributeMode, AttributeSchema, AttributeValidator, DATA_SOURCE_NAME, DataSourceSchema,
    service_account_schema,
};
pub use state::{DataSourceState, ReadOutcome};

/// Human-readable resource label used in errors and logs.
pub fn resource_label(name: &str) -> String {
    format!("Service Account {:?}", name)
}
