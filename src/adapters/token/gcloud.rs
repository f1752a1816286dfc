use std::io::ErrorKind;
use std::process::Command;

use crate::domain::AppError;
use crate::ports::TokenSource;

const GCLOUD_ARGS: [&str; 3] = ["auth", "print-access-token", "--quiet"];

/// Obtains a token from the locally logged-in gcloud CLI.
#[derive(Debug, Clone)]
pub struct GcloudTokenSource {
    program: String,
}

impl Default for GcloudTokenSource {
    fn default() -> Self {
        Self { program: "gcloud".to_string() }
    }
}

impl GcloudTokenSource {
    /// Use a specific executable instead of `gcloud` from `PATH`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    fn command_line(&self) -> String {
        format!("{} {}", self.program, GCLOUD_ARGS.join(" "))
    }
}

impl TokenSource for GcloudTokenSource {
    fn access_token(&self) -> Result<String, AppError> {
        tracing::debug!(command = %self.command_line(), "requesting access token from gcloud");

        let output = match Command::new(&self.program).args(GCLOUD_ARGS).output() {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(AppError::CredentialsMissing),
            Err(e) => {
                return Err(AppError::CommandFailed {
                    command: self.command_line(),
                    details: e.to_string(),
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AppError::CommandFailed {
                command: self.command_line(),
                details: if stderr.is_empty() { "Unknown error".to_string() } else { stderr },
            });
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(AppError::CredentialsMissing);
        }
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial(process)]
    fn missing_executable_means_missing_credentials() {
        let source = GcloudTokenSource::with_program("sa-lookup-test-no-such-gcloud");
        let err = source.access_token().unwrap_err();
        assert!(matches!(err, AppError::CredentialsMissing));
    }

    #[cfg(unix)]
    #[test]
    #[serial(process)]
    fn failing_command_reports_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("gcloud");
        std::fs::write(&script, "#!/bin/sh\necho 'not logged in' >&2\nexit 1\n").unwrap();
        make_executable(&script);

        let source = GcloudTokenSource::with_program(script.to_string_lossy());
        match source.access_token().unwrap_err() {
            AppError::CommandFailed { details, .. } => assert_eq!(details, "not logged in"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    #[serial(process)]
    fn successful_command_yields_token() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("gcloud");
        std::fs::write(&script, "#!/bin/sh\necho ya29.from-gcloud\n").unwrap();
        make_executable(&script);

        let source = GcloudTokenSource::with_program(script.to_string_lossy());
        assert_eq!(source.access_token().unwrap(), "ya29.from-gcloud");
    }

    #[cfg(unix)]
    fn make_executable(path: &std::path::Path) {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(path, perms).unwrap();
    }
}
