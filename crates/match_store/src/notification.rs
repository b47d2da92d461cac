//! Notifications emitted by the match store.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::info;

/// Kind of a notification, which decides how the view renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Something the user asked for succeeded.
    Success,
    /// Neutral information.
    Info,
}

/// A short message for the notification display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: Option<String>,
}

impl Notification {
    /// Creates a success notification.
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: None,
        }
    }

    /// Creates an informational notification.
    pub fn info(title: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            title: title.into(),
            description: None,
        }
    }

    /// Sets the description line.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Receives notifications from the match store.
pub trait Notifier {
    /// Delivers one notification.
    fn notify(&self, notification: Notification);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

/// Writes notifications to the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        info!(
            kind = ?notification.kind,
            description = notification.description.as_deref().unwrap_or_default(),
            "{}",
            notification.title
        );
    }
}

/// Keeps every notification in memory, for tests and replay.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything received so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.received
            .lock()
            .map(|received| received.clone())
            .unwrap_or_default()
    }

    /// Returns the most recent notification.
    pub fn last(&self) -> Option<Notification> {
        self.notifications().pop()
    }

    /// Drops everything received so far.
    pub fn clear(&self) {
        if let Ok(mut received) = self.received.lock() {
            received.clear();
        }
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut received) = self.received.lock() {
            received.push(notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let notification = Notification::success("Match accepted!")
            .with_description("You can now chat with your meal buddy");

        assert_eq!(notification.kind, NotificationKind::Success);
        assert_eq!(notification.title, "Match accepted!");
        assert_eq!(
            notification.description.as_deref(),
            Some("You can now chat with your meal buddy")
        );
        assert_eq!(Notification::info("x").kind, NotificationKind::Info);
    }

    #[test]
    fn test_recording_notifier_through_arc() {
        let recorder = Arc::new(RecordingNotifier::new());
        let shared = Arc::clone(&recorder);

        shared.notify(Notification::info("Selection cancelled"));
        shared.notify(Notification::success("Match declined"));

        assert_eq!(recorder.notifications().len(), 2);
        assert_eq!(recorder.last().unwrap().title, "Match declined");

        recorder.clear();
        assert!(recorder.notifications().is_empty());
    }
}
