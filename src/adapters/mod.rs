pub mod config_file;
pub mod iam_client;
pub mod token;

pub use iam_client::{HttpIamClient, RetryPolicy, RetryingIamClient};
pub use token::{GcloudTokenSource, StaticTokenSource, token_source_for};
