//! Shared testing utilities for sa-lookup tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const ACCOUNT_PATH: &str =
    "/v1/projects/-/serviceAccounts/builder-bot@my-project.iam.gserviceaccount.com";
pub const CANONICAL_NAME: &str =
    "projects/my-project/serviceAccounts/builder-bot@my-project.iam.gserviceaccount.com";

const SCRUBBED_ENV: [&str; 7] = [
    "GOOGLE_PROJECT",
    "GOOGLE_CLOUD_PROJECT",
    "GCLOUD_PROJECT",
    "CLOUDSDK_CORE_PROJECT",
    "GOOGLE_IAM_CUSTOM_ENDPOINT",
    "GOOGLE_OAUTH_ACCESS_TOKEN",
    "SA_LOOKUP_LOG",
];

/// Isolated working directory for CLI invocations.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        Self { root: TempDir::new().expect("Failed to create temp directory for tests") }
    }

    pub fn work_dir(&self) -> &Path {
        self.root.path()
    }

    /// Build a command for the `sa-lookup` binary with a clean Google environment.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("sa-lookup").expect("Failed to locate sa-lookup binary");
        cmd.current_dir(self.work_dir());
        for key in SCRUBBED_ENV {
            cmd.env_remove(key);
        }
        cmd
    }

    /// `cli()` pointed at a mock IAM server with a token.
    pub fn cli_against(&self, server_url: &str) -> Command {
        let mut cmd = self.cli();
        cmd.env("GOOGLE_IAM_CUSTOM_ENDPOINT", format!("{}/v1", server_url))
            .env("GOOGLE_OAUTH_ACCESS_TOKEN", "test-token");
        cmd
    }

    /// Write `sa-lookup.toml` into the working directory.
    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.work_dir().join("sa-lookup.toml");
        fs::write(&path, content).expect("Failed to write config");
        path
    }
}

pub fn account_body() -> String {
    format!(
        r#"{{
            "name": "{}",
            "projectId": "my-project",
            "uniqueId": "108765432100000000001",
            "email": "builder-bot@my-project.iam.gserviceaccount.com",
            "displayName": "Build robot"
        }}"#,
        CANONICAL_NAME
    )
}
