use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::{AppError, ServiceAccount};
use crate::ports::IamClient;

/// In-memory IAM backend recording every requested name.
#[derive(Clone, Default)]
pub struct FakeIamClient {
    accounts: HashMap<String, ServiceAccount>,
    failure: Option<(u16, String)>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl FakeIamClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, name: impl Into<String>, account: ServiceAccount) -> Self {
        self.accounts.insert(name.into(), account);
        self
    }

    /// Fail every request with the given status and message.
    pub fn failing_with(mut self, status: u16, message: impl Into<String>) -> Self {
        self.failure = Some((status, message.into()));
        self
    }

    pub fn requested_names(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl IamClient for FakeIamClient {
    fn get_service_account(&self, name: &str) -> Result<ServiceAccount, AppError> {
        self.requested.lock().unwrap().push(name.to_string());

        if let Some((status, message)) = &self.failure {
            return Err(AppError::IamApi { message: message.clone(), status: Some(*status) });
        }

        self.accounts.get(name).cloned().ok_or_else(|| AppError::IamApi {
            message: format!("Service account {} not found", name),
            status: Some(404),
        })
    }
}
