use crate::domain::ProviderConfig;
use crate::ports::IamClient;

/// Application context holding dependencies for command execution.
pub struct AppContext<C: IamClient> {
    config: ProviderConfig,
    iam: C,
}

impl<C: IamClient> AppContext<C> {
    /// Create a new application context.
    pub fn new(config: ProviderConfig, iam: C) -> Self {
        Self { config, iam }
    }

    /// Provider configuration (default project, endpoint).
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// IAM client used for remote reads.
    pub fn iam(&self) -> &C {
        &self.iam
    }
}
