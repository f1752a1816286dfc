use serde::{Deserialize, Serialize};

use super::LookupInput;
use crate::domain::ServiceAccount;

/// Attribute values produced by a successful read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceState {
    /// Resource id; the canonical name of the account.
    pub id: String,
    pub account_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account_id: Option<String>,
    pub project: String,
    pub email: String,
    pub unique_id: String,
    pub name: String,
    pub display_name: String,
}

impl DataSourceState {
    pub fn from_service_account(account: &ServiceAccount, input: &LookupInput) -> Self {
        Self {
            id: account.name.clone(),
            account_id: account.account_id().to_string(),
            service_account_id: input.service_account_id().map(ToOwned::to_owned),
            project: account.project_id.clone(),
            email: account.email.clone(),
            unique_id: account.unique_id.clone(),
            name: account.name.clone(),
            display_name: account.display_name.clone(),
        }
    }
}

/// Result of reading the data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The account exists.
    Found(DataSourceState),
    /// The backend reported the account missing; the id is cleared.
    Gone { resource: String },
}

impl ReadOutcome {
    /// Resource id; empty when the account is gone.
    pub fn id(&self) -> &str {
        match self {
            ReadOutcome::Found(state) => &state.id,
            ReadOutcome::Gone { .. } => "",
        }
    }

    pub fn state(&self) -> Option<&DataSourceState> {
        match self {
            ReadOutcome::Found(state) => Some(state),
            ReadOutcome::Gone { .. } => None,
        }
    }
}
