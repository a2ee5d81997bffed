//! User-facing notification channel (pub/sub mechanics only).
//!
//! The presentation layer subscribes to a [`NotificationBus`] handed to it at
//! initialization; domain services publish outcome notifications into it.
//! There is no process-wide callback list: each subscription is an explicit
//! object whose lifetime ends when it is dropped, and dropped subscribers are
//! pruned on the next publish.

pub mod bus;
pub mod notification;

pub use bus::{InMemoryNotificationBus, NotificationBus, Subscription};
pub use notification::{Notification, NotificationKind};
