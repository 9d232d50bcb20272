use std::time::Duration;

use crate::errors::AppError;

pub const BASE_URL_VAR: &str = "VAULT_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "VAULT_REQUEST_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime settings for talking to the Vault backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Prefix for every endpoint path. Empty means "same origin".
    pub api_base_url: String,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key/value source; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let api_base_url = lookup(BASE_URL_VAR)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or_default();

        let request_timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|e| AppError::InvalidConfig {
                    key: TIMEOUT_VAR.to_string(),
                    message: format!("'{raw}' is not a whole number of seconds ({e})"),
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self { api_base_url, request_timeout })
    }

    pub fn has_base_url(&self) -> bool {
        !self.api_base_url.is_empty()
    }
}
