//! Notification adapters.
//!
//! Implements the `port::Notifier` trait for remote notification backends.
//! The log and null notifiers live next to the port.

#[cfg(feature = "telegram")]
pub mod telegram;
