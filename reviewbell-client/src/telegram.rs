//! Telegram Bot API client
//!
//! Only `sendMessage` is needed. Docs: <https://core.telegram.org/bots/api#sendmessage>

use std::fmt;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::truncate_message;

/// HTTP client for the Telegram Bot API
#[derive(Clone)]
pub struct TelegramClient {
    /// `{api_url}/bot{token}`; contains the bot token and must never be logged
    base_url: String,
    /// HTTP client instance
    client: Client,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramClient {
    /// Create a new client with a default HTTP client
    ///
    /// # Arguments
    /// * `api_url` - Bot API base URL (e.g., "https://api.telegram.org")
    /// * `bot_token` - Token issued by BotFather
    pub fn new(api_url: &str, bot_token: &str) -> Self {
        Self::with_client(api_url, bot_token, Client::new())
    }

    /// Create a new client with a custom HTTP client
    pub fn with_client(api_url: &str, bot_token: &str, client: Client) -> Self {
        Self {
            base_url: format!("{}/bot{}", api_url.trim_end_matches('/'), bot_token),
            client,
        }
    }

    /// Send a plain-text message to a chat
    ///
    /// Text longer than [`crate::MAX_MESSAGE_CHARS`] is truncated, since the
    /// Bot API would reject it outright.
    ///
    /// # Errors
    /// - [`ClientError::Transport`] if the request fails; the URL is stripped
    ///   from the error so the bot token does not leak into logs
    /// - [`ClientError::Telegram`] if the Bot API answers with an error
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<()> {
        let url = format!("{}/sendMessage", self.base_url);
        let text = truncate_message(text);
        let response = self
            .client
            .post(&url)
            .json(&SendMessageRequest {
                chat_id,
                text: &text,
            })
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(e.without_url()))?;
        let parsed = serde_json::from_str::<BotApiResponse>(&body);

        match parsed {
            Ok(BotApiResponse { ok: true, .. }) if status.is_success() => {
                debug!("Telegram accepted message for chat {}", chat_id);
                Ok(())
            }
            Ok(BotApiResponse { description, .. }) => Err(ClientError::Telegram {
                status: status.as_u16(),
                description: description.unwrap_or(body),
            }),
            Err(_) if !status.is_success() => Err(ClientError::Telegram {
                status: status.as_u16(),
                description: body,
            }),
            Err(e) => Err(ClientError::Decode(e.to_string())),
        }
    }
}

impl fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramClient").finish_non_exhaustive()
    }
}
