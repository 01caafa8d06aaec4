use crate::shared::infrastructure::notifier::Notifier;
use std::fmt;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Error(String),
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Error(message) => write!(f, "error: {message}"),
        }
    }
}

/// Hands notifications to whoever renders them, e.g. a toast queue.
#[derive(Clone)]
pub struct ChannelNotifier {
    sender: UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, UnboundedReceiver<Notification>) {
        let (sender, receiver) = unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn error(&self, message: &str) {
        if self
            .sender
            .send(Notification::Error(message.to_string()))
            .is_err()
        {
            debug!(notification = message, "notification dropped, no receiver");
        }
    }
}
