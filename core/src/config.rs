//! Client configuration.
//!
//! The base URL can be baked in at build time through `ADMIN_API_BASE_URL`
//! and overridden again at runtime with the same variable.

use std::env;
use std::time::Duration;

use crate::envelope::SUCCESS_CODE;

pub const DEFAULT_BASE_URL: &str = "/api/v1";
pub const DEFAULT_ORIGIN: &str = "http://127.0.0.1:8080";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix joined in front of every endpoint path, e.g. `/api/v1`.
    pub base_url: String,
    /// Scheme and authority that relative base URLs resolve against.
    pub origin: String,
    pub timeout: Duration,
    pub success_code: i64,
    pub login_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: option_env!("ADMIN_API_BASE_URL")
                .unwrap_or(DEFAULT_BASE_URL)
                .to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            timeout: DEFAULT_TIMEOUT,
            success_code: SUCCESS_CODE,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            ..Self::default()
        }
    }

    /// Defaults overridden by `ADMIN_API_*` variables from the process
    /// environment. Unparseable numbers and a zero timeout keep their
    /// defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(base_url) = lookup("ADMIN_API_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(origin) = lookup("ADMIN_API_ORIGIN") {
            config.origin = origin;
        }
        if let Some(secs) = lookup("ADMIN_API_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&secs| secs > 0)
        {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(code) = lookup("ADMIN_API_SUCCESS_CODE").and_then(|v| v.parse().ok()) {
            config.success_code = code;
        }
        config
    }

    /// Join the base URL and an endpoint path without doubling slashes.
    pub fn resolve(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
