mod iam_client;
mod token_source;

pub use iam_client::IamClient;
pub use token_source::TokenSource;
