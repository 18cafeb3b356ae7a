//! Homeworks repository
//!
//! Fetches raw homework-status responses from the review API.

use async_trait::async_trait;
use reviewbell_client::{HomeworkApiClient, Result};
use serde_json::Value;

/// Repository trait for reading homework statuses
#[async_trait]
pub trait HomeworkRepository: Send + Sync {
    /// Fetches homework statuses changed since `from_date`
    ///
    /// Returns the decoded JSON body; shape validation is left to the caller.
    ///
    /// # Arguments
    /// * `from_date` - Unix timestamp lower bound
    async fn fetch_statuses(&self, from_date: i64) -> Result<Value>;
}

/// HTTP implementation of HomeworkRepository
pub struct HttpHomeworkRepository {
    client: HomeworkApiClient,
}

impl HttpHomeworkRepository {
    /// Creates a new HTTP homework repository
    pub fn new(client: HomeworkApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HomeworkRepository for HttpHomeworkRepository {
    async fn fetch_statuses(&self, from_date: i64) -> Result<Value> {
        self.client.get_homework_statuses(from_date).await
    }
}
