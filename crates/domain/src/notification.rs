//! User-facing notifications about recovered failures.

use std::time::Duration;

/// How long a notification stays visible unless overridden.
pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_secs(5);

/// A short message shown to the user, with optional detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Short description of what failed.
    pub message: String,
    /// Underlying error message, when one is available.
    pub additional_message: Option<String>,
    /// Display duration.
    pub duration: Option<Duration>,
}

impl Notification {
    /// Creates a notification with only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            additional_message: None,
            duration: None,
        }
    }

    /// Attaches the underlying error message.
    #[must_use]
    pub fn with_additional_message(mut self, detail: impl Into<String>) -> Self {
        self.additional_message = Some(detail.into());
        self
    }

    /// Sets the display duration.
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}
