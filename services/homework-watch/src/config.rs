//! Configuration types for the homework watcher

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Homework status endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Base URL of the Telegram Bot API
    #[serde(default = "default_telegram_api_url")]
    pub telegram_api_url: String,
    /// Delay between the end of one poll cycle and the start of the next
    #[serde(default = "default_retry_period")]
    pub retry_period_seconds: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Watermark for the first request; process start time when absent
    #[serde(default)]
    pub initial_from_date: Option<i64>,
    /// Also send failed-cycle reports to the chat
    #[serde(default)]
    pub report_failures: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            telegram_api_url: default_telegram_api_url(),
            retry_period_seconds: default_retry_period(),
            request_timeout_seconds: default_request_timeout(),
            initial_from_date: None,
            report_failures: false,
        }
    }
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_retry_period() -> u64 {
    600
}

fn default_request_timeout() -> u64 {
    30
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: format!("{:?}", path),
        reason: e.to_string(),
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}

/// Secrets needed before the first poll: both API tokens and the chat to notify
#[derive(Clone)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    /// Read credentials from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through `lookup`, failing on the first absent or empty value.
    ///
    /// Variables are checked in a fixed order (Practicum token, Telegram token,
    /// chat id) and the error names the variable that is missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| -> Result<String, ConfigError> {
            match lookup(name) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => {
                    tracing::error!("Required environment variable {} is not set", name);
                    Err(ConfigError::MissingCredential(name))
                }
            }
        };

        Ok(Self {
            practicum_token: require(PRACTICUM_TOKEN_VAR)?,
            telegram_token: require(TELEGRAM_TOKEN_VAR)?,
            telegram_chat_id: require(TELEGRAM_CHAT_ID_VAR)?,
        })
    }
}
