//! Notifications repository
//!
//! Delivers text messages to the configured Telegram chat.

use async_trait::async_trait;
use reviewbell_client::{Result, TelegramClient};

/// Repository trait for delivering notifications
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Sends `text` to the notification chat
    async fn send(&self, text: &str) -> Result<()>;
}

/// Telegram implementation of NotificationRepository
pub struct TelegramNotificationRepository {
    client: TelegramClient,
    chat_id: String,
}

impl TelegramNotificationRepository {
    /// Creates a new Telegram notification repository
    ///
    /// # Arguments
    /// * `client` - Bot API client
    /// * `chat_id` - Chat that receives every notification
    pub fn new(client: TelegramClient, chat_id: String) -> Self {
        Self { client, chat_id }
    }
}

#[async_trait]
impl NotificationRepository for TelegramNotificationRepository {
    async fn send(&self, text: &str) -> Result<()> {
        self.client.send_message(&self.chat_id, text).await
    }
}
