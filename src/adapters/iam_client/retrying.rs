//! Retry wrapper for IAM API client operations.

use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::domain::{AppError, IamApiConfig, ServiceAccount};
use crate::ports::IamClient;

const DEFAULT_MAX_DELAY_MS: u64 = 30_000;
const RETRY_AFTER_TOKEN: &str = "retry_after_ms=";
const MAX_LOG_ERROR_CHARS: usize = 512;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay_ms: u64,
    max_delay_ms: u64,
}

impl RetryPolicy {
    pub fn from_config(config: &IamApiConfig) -> Self {
        Self {
            max_attempts: config.max_retries.max(1),
            base_delay_ms: config.retry_delay_ms.max(1),
            max_delay_ms: DEFAULT_MAX_DELAY_MS.max(config.retry_delay_ms),
        }
    }

    fn delay_for_retry(&self, failed_attempt: u32, error: &AppError) -> Duration {
        if let Some(retry_after_ms) = extract_retry_after_ms(error) {
            return Duration::from_millis(retry_after_ms.min(self.max_delay_ms));
        }

        // attempt=1 -> base, attempt=2 -> base*2, attempt=3 -> base*4, capped.
        let exponent = failed_attempt.saturating_sub(1).min(6);
        let multiplier = 1_u64 << exponent;
        let backoff_ms = self.base_delay_ms.saturating_mul(multiplier).min(self.max_delay_ms);
        let jitter_ms = compute_jitter_ms(backoff_ms);
        Duration::from_millis(backoff_ms.saturating_add(jitter_ms).min(self.max_delay_ms))
    }
}

/// Retries transient IAM failures (408, 429, 5xx, transport errors).
pub struct RetryingIamClient<C: IamClient> {
    inner: C,
    policy: RetryPolicy,
}

impl<C: IamClient> RetryingIamClient<C> {
    pub fn new(inner: C, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

impl<C: IamClient> IamClient for RetryingIamClient<C> {
    fn get_service_account(&self, name: &str) -> Result<ServiceAccount, AppError> {
        let mut attempt = 1;
        loop {
            let error = match self.inner.get_service_account(name) {
                Ok(account) => return Ok(account),
                Err(error) => error,
            };

            if !is_retryable_error(&error) || attempt >= self.policy.max_attempts {
                return Err(error);
            }

            let delay = self.policy.delay_for_retry(attempt, &error);
            tracing::warn!(
                attempt,
                max_attempts = self.policy.max_attempts,
                delay_ms = delay.as_millis() as u64,
                error = %format_error_for_log(&error),
                "IAM get_service_account failed, retrying"
            );
            thread::sleep(delay);
            attempt += 1;
        }
    }
}

fn is_retryable_error(error: &AppError) -> bool {
    match error {
        AppError::IamApi { status: Some(code), .. } => {
            *code == 429 || *code == 408 || *code >= 500
        }
        AppError::Transport(_) => true,
        _ => false,
    }
}

fn extract_retry_after_ms(error: &AppError) -> Option<u64> {
    let message = match error {
        AppError::IamApi { message, .. } => message,
        _ => return None,
    };

    let start = message.find(RETRY_AFTER_TOKEN)? + RETRY_AFTER_TOKEN.len();
    let tail = &message[start..];
    let digits: String = tail.chars().take_while(|ch| ch.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u64>().ok()
}

fn compute_jitter_ms(backoff_ms: u64) -> u64 {
    let jitter_cap = backoff_ms / 4; // 25% jitter upper bound
    if jitter_cap == 0 {
        return 0;
    }

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.subsec_nanos() as u64)
        .unwrap_or(0);

    nanos % jitter_cap
}

fn format_error_for_log(error: &AppError) -> String {
    let rendered = match error {
        AppError::IamApi { message, status: Some(code) } => {
            format!("IamApi(status={}): {}", code, message)
        }
        other => other.to_string(),
    };
    sanitize_and_truncate_for_log(&rendered)
}

fn sanitize_and_truncate_for_log(input: &str) -> String {
    let mut output: String = input
        .chars()
        .take(MAX_LOG_ERROR_CHARS)
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if input.chars().count() > MAX_LOG_ERROR_CHARS {
        output.push_str(" [truncated]");
    }
    output
}
