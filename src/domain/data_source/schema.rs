//! Attribute schema of the `google_service_account` data source.

use serde::Serialize;

use super::LookupInput;
use crate::domain::AppError;
use crate::domain::validation::{validate_account_id, validate_service_account_link};

/// Name under which the data source is registered.
pub const DATA_SOURCE_NAME: &str = "google_service_account";

/// How an attribute is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeMode {
    /// May be supplied by the user.
    Optional,
    /// Set by the read operation only.
    Computed,
}

/// Validator attached to an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValidator {
    /// RFC 1035 label of 6 to 30 characters.
    AccountId,
    /// Fully-qualified service account link.
    ServiceAccountLink,
}

impl AttributeValidator {
    fn check(self, attribute: &str, value: &str) -> Result<(), AppError> {
        match self {
            AttributeValidator::AccountId => validate_account_id(attribute, value),
            AttributeValidator::ServiceAccountLink => {
                validate_service_account_link(attribute, value)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeSchema {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mode: AttributeMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validator: Option<AttributeValidator>,
}

impl AttributeSchema {
    const fn optional(name: &'static str, validator: Option<AttributeValidator>) -> Self {
        Self { name, kind: "string", mode: AttributeMode::Optional, validator }
    }

    const fn computed(name: &'static str) -> Self {
        Self { name, kind: "string", mode: AttributeMode::Computed, validator: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataSourceSchema {
    pub name: &'static str,
    pub attributes: Vec<AttributeSchema>,
}

impl DataSourceSchema {
    pub fn attribute(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Run every validator against the attributes set on `input`.
    pub fn validate(&self, input: &LookupInput) -> Result<(), AppError> {
        for attribute in &self.attributes {
            let (Some(validator), Some(value)) = (attribute.validator, input.get(attribute.name))
            else {
                continue;
            };
            validator.check(attribute.name, value)?;
        }
        Ok(())
    }
}

/// Schema declaration of the service account data source.
pub fn service_account_schema() -> DataSourceSchema {
    DataSourceSchema {
        name: DATA_SOURCE_NAME,
        attributes: vec![
            AttributeSchema::optional("account_id", Some(AttributeValidator::AccountId)),
            AttributeSchema::optional(
                "service_account_id",
                Some(AttributeValidator::ServiceAccountLink),
            ),
            AttributeSchema::optional("project", None),
            AttributeSchema::computed("email"),
            AttributeSchema::computed("unique_id"),
            AttributeSchema::computed("name"),
            AttributeSchema::computed("display_name"),
        ],
    }
}
