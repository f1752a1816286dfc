use serde::{Deserialize, Serialize};

/// Suffix shared by user-created service account emails.
pub const CREATED_ACCOUNT_EMAIL_DOMAIN: &str = "iam.gserviceaccount.com";

/// A service account as returned by the IAM API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAccount {
    /// Canonical resource name: `projects/{project}/serviceAccounts/{email}`.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub unique_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub etag: String,
    #[serde(default)]
    pub oauth2_client_id: String,
    #[serde(default)]
    pub disabled: bool,
}

impl ServiceAccount {
    /// Local part of the email, i.e. the short account id.
    pub fn account_id(&self) -> &str {
        self.email.split('@').next().unwrap_or_default()
    }
}
