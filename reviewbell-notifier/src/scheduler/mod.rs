//! Scheduler layer for the notifier
//!
//! This layer owns the poll loop: it fetches homework statuses on a fixed
//! interval, turns status changes into notifications and reports failures.

pub mod poller;

pub use poller::StatusPoller;
