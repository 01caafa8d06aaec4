use crate::shared::infrastructure::notifier::Notifier;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Records every message; used to assert on what the shopper would have seen.
#[derive(Default)]
pub struct InMemoryNotifier {
    messages: Mutex<Vec<String>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for InMemoryNotifier {
    fn error(&self, message: &str) {
        self.lock().push(message.to_string());
    }
}
