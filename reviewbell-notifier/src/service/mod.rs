//! Service layer
//!
//! Services contain the notifier's business logic on top of the
//! repositories. Currently this is de-duplicated notification delivery.

mod notification;

pub use notification::{Delivery, NotificationService};
