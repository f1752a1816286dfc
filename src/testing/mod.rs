mod fake_iam_client;

pub use fake_iam_client::FakeIamClient;
