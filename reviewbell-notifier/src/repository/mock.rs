//! In-memory repositories for tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reviewbell_client::{ClientError, Result};
use serde_json::Value;

use super::{HomeworkRepository, NotificationRepository};

/// Replays queued responses and records every requested cursor
#[derive(Default)]
pub struct MockHomeworkRepository {
    responses: Mutex<VecDeque<Result<Value>>>,
    requested: Arc<Mutex<Vec<i64>>>,
}

impl MockHomeworkRepository {
    pub fn new(responses: impl IntoIterator<Item = Result<Value>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requested: Arc::default(),
        }
    }

    /// Shared handle to the cursors passed to `fetch_statuses`
    pub fn requested(&self) -> Arc<Mutex<Vec<i64>>> {
        Arc::clone(&self.requested)
    }
}

#[async_trait]
impl HomeworkRepository for MockHomeworkRepository {
    async fn fetch_statuses(&self, from_date: i64) -> Result<Value> {
        self.requested.lock().unwrap().push(from_date);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Decode("no response queued".to_string())))
    }
}

/// Records delivered messages; fails the next `failures` sends
#[derive(Default)]
pub struct MockNotificationRepository {
    sent: Arc<Mutex<Vec<String>>>,
    failures: Mutex<usize>,
}

impl MockNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(failures: usize) -> Self {
        Self {
            sent: Arc::default(),
            failures: Mutex::new(failures),
        }
    }

    /// Shared handle to successfully delivered messages
    pub fn sent(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.sent)
    }
}

#[async_trait]
impl NotificationRepository for MockNotificationRepository {
    async fn send(&self, text: &str) -> Result<()> {
        let mut failures = self.failures.lock().unwrap();
        if *failures > 0 {
            *failures -= 1;
            return Err(ClientError::Telegram {
                status: 502,
                description: "Bad Gateway".to_string(),
            });
        }
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
