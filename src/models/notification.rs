//! User-facing notification records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Warning,
    Alert,
}

/// A user-visible notification. Purely client state, persisted best-effort
/// across sessions; there is no server-side counterpart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Identifier assigned by the notification center
    pub id: u64,
    /// Severity
    pub kind: NotificationKind,
    /// Short title
    pub title: String,
    /// Message body
    pub message: String,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// Whether the user has seen this notification
    pub read: bool,
}

impl Notification {
    /// Create a new unread notification with the given id
    #[must_use]
    pub fn new(id: u64, kind: NotificationKind, title: &str, message: &str) -> Self {
        Self {
            id,
            kind,
            title: title.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
            read: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_starts_unread() {
        let n = Notification::new(1, NotificationKind::Warning, "Frost", "Below freezing");
        assert!(!n.read);
        assert_eq!(n.kind, NotificationKind::Warning);
        assert_eq!(n.id, 1);
    }
}
