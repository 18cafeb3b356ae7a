//! Reviewbell HTTP Clients
//!
//! Thin, typed HTTP clients for the two remote services the notifier talks to:
//! - The homework-review API, polled for status changes
//! - The Telegram Bot API, used to deliver notifications
//!
//! # Example
//!
//! ```no_run
//! use reviewbell_client::{HomeworkApiClient, TelegramClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = HomeworkApiClient::new(
//!         "https://practicum.yandex.ru/api/user_api/homework_statuses/",
//!         "api-token",
//!     );
//!     let body = api.get_homework_statuses(0).await?;
//!
//!     let bot = TelegramClient::new("https://api.telegram.org", "bot-token");
//!     bot.send_message("12345", &body.to_string()).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
mod homework;
mod telegram;

pub use error::{ClientError, Result};
pub use homework::HomeworkApiClient;
pub use telegram::TelegramClient;

use std::borrow::Cow;
use std::time::Duration;

use reqwest::Client;

/// Build a reqwest client with an explicit request timeout
///
/// Without a timeout a stalled connection would block the poll loop forever.
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Longest text the Telegram Bot API accepts in one message
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Cut `text` to at most [`MAX_MESSAGE_CHARS`] characters
///
/// Cuts on a char boundary and marks the cut with an ellipsis.
pub fn truncate_message(text: &str) -> Cow<'_, str> {
    if text.char_indices().nth(MAX_MESSAGE_CHARS).is_none() {
        return Cow::Borrowed(text);
    }
    let cut = text
        .char_indices()
        .nth(MAX_MESSAGE_CHARS - 1)
        .map_or(text.len(), |(i, _)| i);
    Cow::Owned(format!("{}…", &text[..cut]))
}
