//! Notifications
//!
//! User-facing advisory messages ("toasts") raised by cart and wishlist
//! mutations. Delivery is fire-and-forget: a [`Notifier`] never reports back
//! and must not block the operation that raised it.

use std::{
    cell::RefCell,
    fmt::{self, Display, Formatter},
};

use mockall::automock;
use tracing::{info, warn};

/// Kind of notification, which decides how it is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// The operation succeeded.
    Success,

    /// The operation was rejected.
    Error,

    /// Neutral information.
    Info,
}

impl Display for NotificationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
        })
    }
}

/// Sink for user-facing notifications.
#[automock]
pub trait Notifier {
    /// Show `message` to the user.
    fn notify(&self, kind: NotificationKind, message: &str);
}

/// A notification captured by a [`ToastQueue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Notification kind
    pub kind: NotificationKind,

    /// Message text
    pub message: String,
}

impl Display for Toast {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// Collects notifications in the order they were raised.
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: RefCell<Vec<Toast>>,
}

impl ToastQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every queued toast.
    pub fn drain(&self) -> Vec<Toast> {
        self.toasts.take()
    }

    /// Number of queued toasts.
    pub fn len(&self) -> usize {
        self.toasts.borrow().len()
    }

    /// Check if no toasts are queued.
    pub fn is_empty(&self) -> bool {
        self.toasts.borrow().is_empty()
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, kind: NotificationKind, message: &str) {
        self.toasts.borrow_mut().push(Toast {
            kind,
            message: message.to_string(),
        });
    }
}

/// Emits each notification as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        match kind {
            NotificationKind::Error => warn!(%kind, text = message, "notification"),
            NotificationKind::Success | NotificationKind::Info => {
                info!(%kind, text = message, "notification");
            }
        }
    }
}
