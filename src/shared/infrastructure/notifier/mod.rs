// Fire and forget channel for messages meant for the shopper.

pub mod channel;
pub mod in_memory;

/// Displays a message to the user. Implementations must not block and never
/// report back whether the message was shown.
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}
