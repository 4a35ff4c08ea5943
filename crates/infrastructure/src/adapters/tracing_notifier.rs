//! Notifier that emits notifications as log events.

use restpad_application::ports::Notifier;
use restpad_domain::Notification;

/// Reports notifications as `WARN` events on the `restpad::notify` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    /// Creates a new notifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let duration_ms = notification
            .duration
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
        tracing::warn!(
            target: "restpad::notify",
            detail = notification.additional_message.as_deref(),
            duration_ms,
            "{}",
            notification.message
        );
    }
}
