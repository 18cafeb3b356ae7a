//! Core domain types
//!
//! These types describe what the homework-review API returns and how a
//! single homework record becomes a human-readable notification. They are
//! shared between the HTTP client (decoding) and the notifier (polling).

pub mod homework;
pub mod response;

pub use homework::{Homework, HomeworkStatus, parse_status};
pub use response::{ApiResponse, check_response};
