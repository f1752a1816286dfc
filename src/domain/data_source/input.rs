use serde::{Deserialize, Serialize};

/// User-supplied arguments of the service account data source.
///
/// Empty strings are treated the same as absent values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

impl LookupInput {
    pub fn with_account_id(account_id: impl Into<String>) -> Self {
        Self { account_id: Some(account_id.into()), ..Self::default() }
    }

    pub fn with_service_account_id(service_account_id: impl Into<String>) -> Self {
        Self { service_account_id: Some(service_account_id.into()), ..Self::default() }
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn account_id(&self) -> Option<&str> {
        non_empty(&self.account_id)
    }

    pub fn service_account_id(&self) -> Option<&str> {
        non_empty(&self.service_account_id)
    }

    pub fn project_override(&self) -> Option<&str> {
        non_empty(&self.project)
    }

    /// Look up a set attribute by schema name.
    pub fn get(&self, attribute: &str) -> Option<&str> {
        match attribute {
            "account_id" => self.account_id(),
            "service_account_id" => self.service_account_id(),
            "project" => self.project_override(),
            _ => None,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
