//! Homework-review API client

use std::fmt;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::error::{ClientError, Result};

/// HTTP client for the homework-status endpoint
#[derive(Clone)]
pub struct HomeworkApiClient {
    /// Full URL of the homework-status endpoint
    endpoint: String,
    /// OAuth token sent in the `Authorization` header
    token: String,
    /// HTTP client instance
    client: Client,
}

impl HomeworkApiClient {
    /// Create a new client with a default HTTP client
    ///
    /// # Arguments
    /// * `endpoint` - URL of the homework-status endpoint
    /// * `token` - OAuth token of the student
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(endpoint, token, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// Use this with [`crate::build_http_client`] to apply a request timeout.
    pub fn with_client(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client,
        }
    }

    /// Get the endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch homework statuses changed since `from_date`
    ///
    /// Performs exactly one GET request. There is no retry here: the caller
    /// polls again on its next cycle.
    ///
    /// # Arguments
    /// * `from_date` - Unix timestamp lower bound
    ///
    /// # Returns
    /// The decoded, not yet validated, JSON body
    pub async fn get_homework_statuses(&self, from_date: i64) -> Result<Value> {
        debug!(
            "Requesting {} with params: from_date={}",
            self.endpoint, from_date
        );

        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Check the status code and decode the JSON body
    async fn handle_response(&self, response: reqwest::Response) -> Result<Value> {
        let status = response.status();

        if status != StatusCode::OK {
            let url = response.url().to_string();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::unavailable(url, status.as_u16(), body));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

impl fmt::Debug for HomeworkApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HomeworkApiClient")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .finish()
    }
}
