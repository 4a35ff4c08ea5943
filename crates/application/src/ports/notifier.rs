//! Notification port

use std::sync::Arc;

use restpad_domain::Notification;

/// Side channel for surfacing recovered failures to the user.
pub trait Notifier: Send + Sync {
    /// Shows a notification. Delivery failures are the adapter's concern.
    fn notify(&self, notification: Notification);
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}
