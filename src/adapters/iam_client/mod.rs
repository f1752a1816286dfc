pub mod http;
pub mod retrying;

pub use self::http::HttpIamClient;
pub use self::retrying::{RetryPolicy, RetryingIamClient};
