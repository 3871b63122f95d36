//! Notification domain model.
//!
//! Notifications are produced outside the core. The core only reads them and
//! removes them on dismissal; there is no archive state.

use serde::{Deserialize, Serialize};

pub type NotificationId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub read: bool,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub timestamp: String,
}

impl Notification {
    pub fn new(id: impl Into<NotificationId>, title: impl Into<String>, read: bool) -> Self {
        Self {
            id: id.into(),
            read,
            title: title.into(),
            message: String::new(),
            timestamp: String::new(),
        }
    }
}

/// Counts notifications with `read == false`.
pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|item| !item.read).count()
}
