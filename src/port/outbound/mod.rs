//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the two collaborators the core depends on:
//! exchanges and notifications.

pub mod exchange;
pub mod notifier;
