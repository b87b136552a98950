//! User-facing notifications.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastLevel {
    /// Returns the level name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ToastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single message shown to the member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Severity.
    pub level: ToastLevel,
    /// Text shown.
    pub message: String,
}

impl Toast {
    /// Creates a toast.
    #[must_use]
    pub fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Displays toasts.
pub trait Notifier: Send + Sync {
    /// Shows a toast.
    fn notify(&self, toast: Toast);
}

/// Notifier that keeps every toast in memory.
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct ToastLog {
    toasts: Arc<Mutex<Vec<Toast>>>,
}

impl ToastLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every toast shown so far.
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the most recent toast.
    #[must_use]
    pub fn last(&self) -> Option<Toast> {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Returns how many toasts were shown.
    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true if nothing was shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for ToastLog {
    fn notify(&self, toast: Toast) {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_is_shared_between_clones() {
        let log = ToastLog::new();
        let handle = log.clone();
        log.notify(Toast::new(ToastLevel::Success, "Login successful!"));
        log.notify(Toast::new(ToastLevel::Warning, "No active integrations to test"));

        assert_eq!(handle.len(), 2);
        assert_eq!(
            handle.last(),
            Some(Toast::new(ToastLevel::Warning, "No active integrations to test"))
        );
    }

    #[test]
    fn level_names() {
        assert_eq!(ToastLevel::Error.to_string(), "error");
        assert_eq!(ToastLevel::Info.as_str(), "info");
    }
}
