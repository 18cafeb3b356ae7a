//! Reviewbell Notifier
//!
//! Watches the review status of a student's homework and reports changes to
//! a Telegram chat.
//!
//! Architecture:
//! - Configuration: credentials and tuning knobs from the environment
//! - Repositories: HTTP access to the review API and to Telegram
//! - Services: de-duplicated notification delivery
//! - Scheduler: the fixed-interval poll loop
//!
//! Missing credentials stop the process before the first poll. After that
//! the loop runs until the process is killed; every failure inside a cycle
//! is reported to the chat and retried on the next cycle.

mod config;
mod error;
mod logging;
mod repository;
mod scheduler;
mod service;

use std::sync::Arc;

use anyhow::{Context, Result};
use reviewbell_client::{HomeworkApiClient, TelegramClient, build_http_client};
use tracing::{error, info};

use crate::config::{Config, ConfigError};
use crate::repository::{HttpHomeworkRepository, TelegramNotificationRepository};
use crate::scheduler::StatusPoller;
use crate::service::NotificationService;

#[tokio::main]
async fn main() -> Result<()> {
    // Optional .env file; real environment variables take precedence
    dotenvy::dotenv().ok();

    let _log_guard = logging::init(&config::log_file_from_env())?;

    info!("Starting Reviewbell notifier");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            let ConfigError::MissingCredentials(names) = &e;
            for name in names {
                error!(severity = "critical", "Required environment variable {} is not set", name);
            }
            return Err(e.into());
        }
    };
    info!(
        "Loaded configuration: endpoint={}, retry_period={:?}, request_timeout={:?}",
        config.endpoint, config.retry_period, config.request_timeout
    );

    let http = build_http_client(config.request_timeout).context("Failed to build HTTP client")?;

    let homeworks = HttpHomeworkRepository::new(HomeworkApiClient::with_client(
        config.endpoint.clone(),
        config.credentials.api_token.clone(),
        http.clone(),
    ));
    let notifications = TelegramNotificationRepository::new(
        TelegramClient::with_client(&config.telegram_api_url, &config.credentials.bot_token, http),
        config.credentials.chat_id.clone(),
    );

    let mut poller = StatusPoller::new(
        Arc::new(homeworks),
        NotificationService::new(Arc::new(notifications)),
        config.retry_period,
        chrono::Utc::now().timestamp(),
    );

    poller.run().await;

    Ok(())
}
