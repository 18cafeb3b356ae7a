//! Homework domain types
//!
//! A homework record as returned by the review API, the closed set of review
//! statuses and the message a status change turns into.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::{ResponseError, Result};

/// A single homework record
///
/// Fields are kept optional so that a record with missing keys can still be
/// represented and reported by [`parse_status`] rather than rejected during
/// decoding. Other keys sent by the API (id, reviewer comment, dates) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Homework {
    pub homework_name: Option<String>,
    pub status: Option<String>,
}

impl Homework {
    /// Build a record from one element of the `homeworks` array
    pub fn from_json(value: &Value) -> Result<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| ResponseError::type_mismatch("homework", "object", value))?;

        let homework_name = match map.get("homework_name") {
            None => None,
            Some(Value::String(name)) => Some(name.clone()),
            Some(other) => {
                return Err(ResponseError::type_mismatch(
                    "homework_name",
                    "string",
                    other,
                ));
            }
        };

        // A non-string status can never match the verdict table, keep its
        // textual form so it surfaces as an unexpected status.
        let status = map.get("status").map(|status| match status {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        });

        Ok(Self {
            homework_name,
            status,
        })
    }
}

/// Review status of a homework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// All known statuses
    pub const ALL: [HomeworkStatus; 3] = [Self::Approved, Self::Reviewing, Self::Rejected];

    /// Wire name used by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// Verdict sentence sent to the user
    pub fn verdict(&self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HomeworkStatus {
    type Err = ResponseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ResponseError::UnexpectedStatus(s.to_string()))
    }
}

/// Extracts the notification message for a homework record
///
/// # Errors
/// - [`ResponseError::MissingField`] if `homework_name` is absent
/// - [`ResponseError::StatusMissing`] if `status` is absent
/// - [`ResponseError::UnexpectedStatus`] if `status` is not a known verdict
pub fn parse_status(homework: &Homework) -> Result<String> {
    let name = homework
        .homework_name
        .as_deref()
        .ok_or(ResponseError::MissingField("homework_name"))?;
    let status: HomeworkStatus = homework
        .status
        .as_deref()
        .ok_or(ResponseError::StatusMissing)?
        .parse()?;

    Ok(format!(
        "Changed review status for \"{}\". {}",
        name,
        status.verdict()
    ))
}
