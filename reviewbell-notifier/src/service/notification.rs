//! Notification service
//!
//! Sends a message only when it differs from the last one that was
//! delivered. A failed delivery does not update that state, so the same
//! message counts as new on the next cycle and is retried then.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::repository::NotificationRepository;

/// Result of a notification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The message was new and has been delivered
    Sent,
    /// The message equals the last delivered one; nothing was sent
    Duplicate,
    /// The message was new but delivery failed
    Failed,
}

/// De-duplicating notification sender
pub struct NotificationService {
    repository: Arc<dyn NotificationRepository>,
    /// Text of the last successfully delivered message
    last_sent: String,
}

impl NotificationService {
    /// Creates a new notification service with empty state
    pub fn new(repository: Arc<dyn NotificationRepository>) -> Self {
        Self {
            repository,
            last_sent: String::new(),
        }
    }

    /// Text of the last delivered message, empty if none yet
    #[cfg(test)]
    pub fn last_sent(&self) -> &str {
        &self.last_sent
    }

    /// Delivers `message` unless it was the last one delivered
    ///
    /// Delivery errors are logged and swallowed.
    pub async fn notify(&mut self, message: &str) -> Delivery {
        if message == self.last_sent {
            debug!("No new statuses in the response");
            return Delivery::Duplicate;
        }

        match self.repository.send(message).await {
            Ok(()) => {
                info!("Message sent: {}", message);
                self.last_sent = message.to_string();
                Delivery::Sent
            }
            Err(e) => {
                error!("Message not sent: {}", e);
                Delivery::Failed
            }
        }
    }
}
