//! Resource name expansion for service accounts.

use super::LookupInput;
use crate::domain::service_account::CREATED_ACCOUNT_EMAIL_DOMAIN;
use crate::domain::{AppError, ProviderConfig};

const WILDCARD_PREFIX: &str = "projects/-/serviceAccounts/";

/// Resolve the fully-qualified name for a lookup.
///
/// Exactly one of `account_id` and `service_account_id` must be set. A link is
/// used verbatim; an account id is expanded with [`service_account_fqn`].
pub fn expand_service_account_name(
    input: &LookupInput,
    config: &ProviderConfig,
) -> Result<String, AppError> {
    match (input.account_id(), input.service_account_id()) {
        (Some(account_id), None) => service_account_fqn(account_id, input, config),
        (None, Some(service_account_id)) => Ok(service_account_id.to_string()),
        _ => Err(AppError::AmbiguousSelector),
    }
}

/// Expand an account reference into `projects/-/serviceAccounts/{email}`.
///
/// - `projects/...` is already fully qualified and returned unchanged.
/// - Anything containing `@` is an email.
/// - Otherwise it is a short account id in the resolved project.
pub fn service_account_fqn(
    account: &str,
    input: &LookupInput,
    config: &ProviderConfig,
) -> Result<String, AppError> {
    if account.starts_with("projects/") {
        return Ok(account.to_string());
    }

    if account.contains('@') {
        return Ok(format!("{}{}", WILDCARD_PREFIX, account));
    }

    let project = resolve_project(input, config)?;
    Ok(format!("{}{}@{}.{}", WILDCARD_PREFIX, account, project, CREATED_ACCOUNT_EMAIL_DOMAIN))
}

/// The input's `project`, falling back to the provider default.
pub fn resolve_project<'a>(
    input: &'a LookupInput,
    config: &'a ProviderConfig,
) -> Result<&'a str, AppError> {
    input
        .project_override()
        .or(config.project.as_deref().filter(|p| !p.is_empty()))
        .ok_or(AppError::ProjectNotSet)
}
