//! Error types for the Reviewbell clients

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the review API or to Telegram
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (connect, DNS, timeout)
    #[error("connection error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The review API answered with a status other than 200
    #[error("endpoint {url} unavailable. Status code: {status}. Body: {body}")]
    EndpointUnavailable {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// The response body was not valid JSON
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Telegram refused to deliver the message
    #[error("telegram API error (status {status}): {description}")]
    Telegram {
        /// HTTP status code
        status: u16,
        /// Description returned by the Bot API
        description: String,
    },
}

impl ClientError {
    /// Create an endpoint-unavailable error
    pub fn unavailable(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::EndpointUnavailable {
            url: url.into(),
            status,
            body: body.into(),
        }
    }
}
