//! IAM API client port definition.

use crate::domain::{AppError, ServiceAccount};

/// Port for IAM service account reads.
pub trait IamClient {
    /// Fetch a service account by its fully-qualified resource name.
    ///
    /// A missing account surfaces as [`AppError::IamApi`] with status 404.
    fn get_service_account(&self, name: &str) -> Result<ServiceAccount, AppError>;
}

impl<T: IamClient + ?Sized> IamClient for Box<T> {
    fn get_service_account(&self, name: &str) -> Result<ServiceAccount, AppError> {
        (**self).get_service_account(name)
    }
}
