//! Read operation of the service account data source.

use crate::app::AppContext;
use crate::domain::data_source::{
    DataSourceState, LookupInput, ReadOutcome, expand_service_account_name, resource_label,
    service_account_schema,
};
use crate::domain::AppError;
use crate::ports::IamClient;

/// Validate `input`, resolve the account and map it onto data source state.
///
/// A 404 from the backend is not an error: the outcome is [`ReadOutcome::Gone`].
pub fn execute<C: IamClient>(
    ctx: &AppContext<C>,
    input: &LookupInput,
) -> Result<ReadOutcome, AppError> {
    service_account_schema().validate(input)?;

    let name = expand_service_account_name(input, ctx.config())?;
    tracing::debug!(%name, "reading service account");

    let account = match ctx.iam().get_service_account(&name) {
        Ok(account) => account,
        Err(err) => return handle_not_found(err, resource_label(&name)),
    };

    let state = DataSourceState::from_service_account(&account, input);
    tracing::info!(id = %state.id, email = %state.email, "service account resolved");
    Ok(ReadOutcome::Found(state))
}

fn handle_not_found(err: AppError, resource: String) -> Result<ReadOutcome, AppError> {
    if err.is_not_found() {
        tracing::warn!("Removing {} because it's gone", resource);
        return Ok(ReadOutcome::Gone { resource });
    }
    Err(AppError::ResourceRead { resource, source: Box::new(err) })
}
