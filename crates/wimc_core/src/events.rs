//! Application-wide alert channel.
//!
//! [`AlertBus`] fans out [`Alert`]s to every subscriber through a
//! `tokio::sync::broadcast` channel. Views publish, the alert host renders.

use tokio::sync::broadcast;

/// Event name used for error alerts raised by edit views.
pub const ERROR_ALERT_EVENT: &str = "whereIsMyComicApp.error";

const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Info,
    Error,
}

/// One user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    /// Event name, e.g. `whereIsMyComicApp.error`.
    pub event: String,
    pub message: String,
}

impl Alert {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            event: ERROR_ALERT_EVENT.to_string(),
            message: message.into(),
        }
    }
}

/// In-process alert fan-out.
#[derive(Debug, Clone)]
pub struct AlertBus {
    sender: broadcast::Sender<Alert>,
}

impl AlertBus {
    /// Creates a bus buffering up to `capacity` unread alerts per subscriber.
    ///
    /// A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes to all current subscribers; silently dropped when there are none.
    pub fn broadcast(&self, alert: Alert) {
        let _ = self.sender.send(alert);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Alert> {
        self.sender.subscribe()
    }
}

impl Default for AlertBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
