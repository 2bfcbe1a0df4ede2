//! Side channels the client reports through: user-visible notifications and
//! hard navigation.
//!
//! A desktop or web shell plugs in its own toast and router; the defaults
//! here only log.

use std::sync::Mutex;

/// Surfaces a transient, user-visible error message.
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// Performs a hard navigation to an application route.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Writes notifications to `tracing` at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, message: &str) {
        tracing::warn!(target: "recharge_admin::notify", %message, "request failed");
    }
}

/// Records navigations in the log instead of performing them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, path: &str) {
        tracing::info!(target: "recharge_admin::navigate", %path, "navigation requested");
    }
}

/// Keeps every message it receives. Useful for shells that render a queue of
/// toasts and for asserting on notifications in tests.
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: Mutex<Vec<String>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    fn push(&self, entry: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(entry.to_string());
        }
    }
}

impl Notifier for MessageLog {
    fn error(&self, message: &str) {
        self.push(message);
    }
}

impl Navigator for MessageLog {
    fn navigate(&self, path: &str) {
        self.push(path);
    }
}
