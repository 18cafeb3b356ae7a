//! Poll cycle errors
//!
//! Everything that can go wrong inside one cycle, tagged with an
//! [`ErrorKind`] so the loop can log and report it uniformly.

use reviewbell_client::{ClientError, truncate_message};
use reviewbell_core::ResponseError;
use thiserror::Error;

/// Classification of a failed cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure before any response
    Transport,
    /// Non-200 response from the review API
    EndpointUnavailable,
    /// Body was not valid JSON
    Decode,
    /// Body had the wrong shape
    TypeMismatch,
    /// A required key was absent
    MissingField,
    /// `status` absent or outside the verdict table
    StatusField,
}

/// Error ending a single poll cycle
///
/// All variants are recoverable: the loop reports them and polls again.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Response(#[from] ResponseError),
}

impl CycleError {
    /// Returns the classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Client(ClientError::Transport(_)) => ErrorKind::Transport,
            Self::Client(ClientError::EndpointUnavailable { .. } | ClientError::Telegram { .. }) => {
                ErrorKind::EndpointUnavailable
            }
            Self::Client(ClientError::Decode(_)) => ErrorKind::Decode,
            Self::Response(ResponseError::TypeMismatch { .. }) => ErrorKind::TypeMismatch,
            Self::Response(ResponseError::MissingField(_)) => ErrorKind::MissingField,
            Self::Response(ResponseError::StatusMissing | ResponseError::UnexpectedStatus(_)) => {
                ErrorKind::StatusField
            }
        }
    }

    /// Text delivered to the chat when this error ends a cycle
    ///
    /// Cut to the chat message limit; a large upstream error page would
    /// otherwise make the notice undeliverable.
    pub fn failure_message(&self) -> String {
        truncate_message(&format!("Program failure: {}", self)).into_owned()
    }
}
