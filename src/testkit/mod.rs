//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`exchange`] — [`ScriptedExchange`](exchange::ScriptedExchange), an
//!   [`ExchangeGateway`](crate::port::ExchangeGateway) with settable books,
//!   balances and scripted order failures.
//! - [`notifier`] — [`RecordingNotifier`](notifier::RecordingNotifier),
//!   which keeps every message and can be told to fail.
//! - [`domain`] — Builders for identifiers and the default test symbol.

pub mod domain;
pub mod exchange;
pub mod notifier;
