//! Transient UI state.
//!
//! Panel expansion, history scrubbing, and toast notifications. None of this
//! outlives a `ResetGame`, and none of it is ever derived from — rendering
//! decisions that depend on connection or session go through `view`, not here.

use chrono::{DateTime, Utc};

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

/// A toast-style notification.
///
/// Notifications are content-addressed: appending a message identical to the
/// most recent one is suppressed, so a repeating error produces one toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// The UI partition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UiState {
    /// Whether the settings panel is expanded into full view.
    pub settings_expanded: bool,

    /// `None` = viewing the current position; `Some(n)` = viewing ply `n`.
    pub selected_history_index: Option<usize>,

    /// Undismissed notifications, oldest first.
    pub notifications: Vec<Notification>,
}

impl UiState {
    /// The most recent undismissed notification.
    pub fn latest_notification(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    /// Append a notification unless it repeats the most recent message.
    ///
    /// Returns `true` if something was appended.
    pub fn push_notification(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> bool {
        let message = message.into();
        if self
            .latest_notification()
            .is_some_and(|n| n.message == message)
        {
            return false;
        }
        self.notifications.push(Notification {
            kind,
            message,
            created_at: now,
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let ui = UiState::default();
        assert!(!ui.settings_expanded);
        assert_eq!(ui.selected_history_index, None);
        assert!(ui.latest_notification().is_none());
    }

    #[test]
    fn test_duplicate_message_suppressed() {
        let mut ui = UiState::default();
        let now = Utc::now();

        assert!(ui.push_notification(NotificationKind::Error, "Connection failed", now));
        assert!(!ui.push_notification(NotificationKind::Error, "Connection failed", now));
        assert_eq!(ui.notifications.len(), 1);

        // A different message goes through.
        assert!(ui.push_notification(NotificationKind::Error, "Game creation failed", now));
        assert_eq!(ui.notifications.len(), 2);

        // And the original is no longer the latest, so it may repeat.
        assert!(ui.push_notification(NotificationKind::Error, "Connection failed", now));
        assert_eq!(ui.notifications.len(), 3);
    }

    #[test]
    fn test_latest_notification_is_newest() {
        let mut ui = UiState::default();
        let now = Utc::now();
        ui.push_notification(NotificationKind::Info, "first", now);
        ui.push_notification(NotificationKind::Error, "second", now);
        assert_eq!(ui.latest_notification().unwrap().message, "second");
    }
}
