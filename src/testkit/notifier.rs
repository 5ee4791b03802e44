//! Notifier that records messages for assertions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::NotificationError;
use crate::port::Notifier;

/// Thread-safe message collector for notification assertions in tests.
///
/// Clones share the same buffer, so a test can keep one handle and give
/// another to the orchestrator. Failed deliveries are still recorded.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every delivery fails.
    pub fn failing() -> Self {
        let notifier = Self::default();
        notifier.set_failing(true);
        notifier
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_message(&self, text: &str) -> Result<(), NotificationError> {
        self.messages.lock().push(text.to_string());
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotificationError::DeliveryFailed(
                "recording notifier set to fail".into(),
            ));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
