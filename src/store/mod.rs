//! Shared catalog state and its actions

pub mod notification;
mod state;

pub use notification::{Notification, NotificationLevel};
pub use state::{Action, Effect, Snapshot, Store};
