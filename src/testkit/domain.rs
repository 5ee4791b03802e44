//! Builders for domain primitives used across tests.

use crate::domain::{Currency, ExchangeId, Symbol};

/// Create an [`ExchangeId`] from a string.
pub fn exchange(id: &str) -> ExchangeId {
    ExchangeId::from(id)
}

/// Create a [`Currency`] from a string.
pub fn currency(code: &str) -> Currency {
    Currency::from(code)
}

/// The `EVER/USDT` pair used throughout the test suite.
pub fn ever_usdt() -> Symbol {
    Symbol::new("EVER", "USDT")
}
