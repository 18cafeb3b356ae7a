//! Notifier configuration
//!
//! Credentials and tuning knobs, read once from the environment at startup
//! and passed explicitly to the components that need them.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Default homework-status endpoint
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Default Telegram Bot API base URL
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Default log file, appended to across restarts
pub const DEFAULT_LOG_FILE: &str = "reviewbell.log";

/// Errors raised while loading configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// One or more required credentials are unset or empty
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),
}

/// Secrets needed to poll the API and deliver notifications
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// OAuth token for the homework-review API (`PRACTICUM_TOKEN`)
    pub api_token: String,
    /// Telegram bot token (`TELEGRAM_TOKEN`)
    pub bot_token: String,
    /// Telegram chat that receives notifications (`CHAT_ID`)
    pub chat_id: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &"<redacted>")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

/// Notifier configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,

    /// Homework-status endpoint URL
    pub endpoint: String,

    /// Telegram Bot API base URL
    pub telegram_api_url: String,

    /// Sleep between two poll cycles
    pub retry_period: Duration,

    /// Upper bound for a single HTTP request
    pub request_timeout: Duration,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - PRACTICUM_TOKEN (required)
    /// - TELEGRAM_TOKEN (required)
    /// - CHAT_ID (required)
    /// - PRACTICUM_ENDPOINT (optional, default: [`DEFAULT_ENDPOINT`])
    /// - TELEGRAM_API_URL (optional, default: [`DEFAULT_TELEGRAM_API_URL`])
    /// - RETRY_PERIOD (optional, seconds, default: 600)
    /// - REQUEST_TIMEOUT (optional, seconds, default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates configuration from an arbitrary variable source
    ///
    /// All missing credentials are collected, not only the first one, so the
    /// operator can fix them in a single pass.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str, missing: &mut Vec<&'static str>| {
            match lookup(key).map(|v| v.trim().to_string()) {
                Some(value) if !value.is_empty() => value,
                _ => {
                    missing.push(key);
                    String::new()
                }
            }
        };

        let mut missing = Vec::new();
        let api_token = required("PRACTICUM_TOKEN", &mut missing);
        let bot_token = required("TELEGRAM_TOKEN", &mut missing);
        let chat_id = required("CHAT_ID", &mut missing);

        if !missing.is_empty() {
            return Err(ConfigError::MissingCredentials(missing));
        }

        let seconds = |key: &str, default: u64| {
            lookup(key)
                .and_then(|s| s.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(default))
        };

        Ok(Self {
            credentials: Credentials {
                api_token,
                bot_token,
                chat_id,
            },
            endpoint: lookup("PRACTICUM_ENDPOINT")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            telegram_api_url: lookup("TELEGRAM_API_URL")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            retry_period: seconds("RETRY_PERIOD", 600),
            request_timeout: seconds("REQUEST_TIMEOUT", 30),
        })
    }
}

/// Log file path from `LOG_FILE`
///
/// Read separately from [`Config`] because logging is set up before
/// credentials are checked.
pub fn log_file_from_env() -> String {
    std::env::var("LOG_FILE")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string())
}
