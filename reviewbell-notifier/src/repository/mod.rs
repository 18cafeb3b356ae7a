//! Repository layer
//!
//! Repositories are thin adapters over the HTTP clients. They give the
//! poller two narrow seams, one to fetch homework statuses and one to
//! deliver a chat message, without any business logic.
//!
//! All repositories are trait-based to enable testing and mocking.

mod homeworks;
mod notifications;

// Re-export traits
pub use homeworks::HomeworkRepository;
pub use notifications::NotificationRepository;

// Re-export implementations
pub use homeworks::HttpHomeworkRepository;
pub use notifications::TelegramNotificationRepository;

#[cfg(test)]
pub mod mock;
