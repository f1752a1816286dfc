pub mod parse;
pub mod provider_config;

pub use provider_config::{
    ACCESS_TOKEN_ENV_VAR, IAM_ENDPOINT_ENV_VAR, IamApiConfig, PROJECT_ENV_VARS, ProviderConfig,
};

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE: &str = "sa-lookup.toml";
