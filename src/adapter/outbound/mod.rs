//! Outbound adapters (driven side).

pub mod notifier;
pub mod paper;
