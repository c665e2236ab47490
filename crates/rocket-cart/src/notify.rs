//! # Notification Sinks
//!
//! Where the manager's user-facing notices end up.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::ports::NotificationSink;

/// Logs every notice at `warn`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify_error(&self, message: &str) {
        warn!(notice = %message, "Cart notice");
    }
}

/// Forwards notices to a UI toast layer over an unbounded channel.
///
/// ## Usage
/// ```rust
/// use rocket_cart::{ChannelNotifier, NotificationSink};
///
/// let (notifier, mut toasts) = ChannelNotifier::new();
/// notifier.notify_error("error removing product");
/// assert_eq!(toasts.try_recv().unwrap(), "error removing product");
/// ```
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelNotifier {
    /// Creates a notifier and the receiver the toast layer drains.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChannelNotifier { tx }, rx)
    }

    /// Wraps an existing sender.
    pub fn from_sender(tx: mpsc::UnboundedSender<String>) -> Self {
        ChannelNotifier { tx }
    }
}

impl NotificationSink for ChannelNotifier {
    fn notify_error(&self, message: &str) {
        if self.tx.send(message.to_string()).is_err() {
            debug!(notice = %message, "Toast receiver dropped, notice discarded");
        }
    }
}

/// Discards every notice (headless runs, benchmarks).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpNotifier;

impl NotificationSink for NoOpNotifier {
    fn notify_error(&self, _message: &str) {}
}
