//! Reviewbell Core
//!
//! Core types and pure checks for the Reviewbell homework notifier.
//!
//! This crate contains:
//! - Domain types: homework records, review statuses and the API response
//! - Response validation: shape checks over the decoded JSON body
//! - Status extraction: turning a homework record into a notification message

pub mod domain;
pub mod error;

pub use error::{ResponseError, Result};
