use std::time::Duration;

use crate::retry::RetryPolicy;

/// Client configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash (default:
    /// `http://localhost:3000`).
    pub base_url: String,
    /// Per-attempt request timeout in seconds (default: `10`).
    pub request_timeout_secs: u64,
    /// Maximum fetch attempts including the first (default: `3`).
    pub retry_max_attempts: u32,
    /// Base backoff delay in milliseconds (default: `1000`).
    pub retry_base_delay_ms: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                  |
    /// |------------------------|--------------------------|
    /// | `STS_API_BASE_URL`     | `http://localhost:3000`  |
    /// | `REQUEST_TIMEOUT_SECS` | `10`                     |
    /// | `RETRY_MAX_ATTEMPTS`   | `3`                      |
    /// | `RETRY_BASE_DELAY_MS`  | `1000`                   |
    pub fn from_env() -> Self {
        let base_url = std::env::var("STS_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let retry_max_attempts: u32 = std::env::var("RETRY_MAX_ATTEMPTS")
            .unwrap_or_else(|_| "3".into())
            .parse()
            .expect("RETRY_MAX_ATTEMPTS must be a valid u32");

        let retry_base_delay_ms: u64 = std::env::var("RETRY_BASE_DELAY_MS")
            .unwrap_or_else(|_| "1000".into())
            .parse()
            .expect("RETRY_BASE_DELAY_MS must be a valid u64");

        Self {
            base_url,
            request_timeout_secs,
            retry_max_attempts,
            retry_base_delay_ms,
        }
    }

    /// The retry policy derived from this configuration.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry_max_attempts,
            base_delay: Duration::from_millis(self.retry_base_delay_ms),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".into(),
            request_timeout_secs: 10,
            retry_max_attempts: 3,
            retry_base_delay_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_matches_fetch_contract() {
        let policy = ClientConfig::default().retry_policy();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay, Duration::from_secs(1));
        assert_eq!(policy.request_timeout, Duration::from_secs(10));
    }
}
