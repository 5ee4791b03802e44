//! Notifier port for human-readable trade summaries.
//!
//! Delivery is best effort. A failed delivery is reported back as a
//! [`NotificationError`] so the caller can log it, but it never undoes or
//! blocks an executed trade.

use async_trait::async_trait;
use tracing::info;

use crate::error::NotificationError;

/// Trait for notification handlers.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - Errors are logged by the caller and otherwise ignored
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a plain-text message.
    async fn send_message(&self, text: &str) -> Result<(), NotificationError>;

    /// Notifier name for logging/debugging.
    fn name(&self) -> &'static str;
}

/// Registry of notifiers (composite pattern).
///
/// Broadcasts every message to all registered notifiers. One failing
/// notifier does not stop delivery to the others.
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Number of registered notifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Default for NotifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for NotifierRegistry {
    async fn send_message(&self, text: &str) -> Result<(), NotificationError> {
        let mut failures = Vec::new();
        for notifier in &self.notifiers {
            if let Err(e) = notifier.send_message(text).await {
                failures.push(format!("{}: {e}", notifier.name()));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(NotificationError::DeliveryFailed(failures.join("; ")))
        }
    }

    fn name(&self) -> &'static str {
        "registry"
    }
}

/// A no-op notifier for testing or when notifications are disabled.
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn send_message(&self, _text: &str) -> Result<(), NotificationError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "null"
    }
}

/// A logging notifier that writes messages via tracing.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_message(&self, text: &str) -> Result<(), NotificationError> {
        info!(text = %text, "Notification");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
