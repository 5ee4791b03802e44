//! Domain errors for lookups and parsing of core domain types.
//!
//! # Examples
//!
//! ```
//! use ceres::domain::error::DomainError;
//! use ceres::domain::id::Symbol;
//!
//! let result = "EVERUSDT".parse::<Symbol>();
//! assert!(matches!(result, Err(DomainError::InvalidSymbol(_))));
//! ```

use thiserror::Error;

use super::id::{Currency, ExchangeId};

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The ledger has no entry for this exchange/currency pair.
    #[error("no balance recorded for {currency} on {exchange}")]
    BalanceNotFound {
        /// Exchange that was looked up.
        exchange: ExchangeId,
        /// Currency that was looked up.
        currency: Currency,
    },

    /// A trading pair was not of the form `COUNTER/BASE`.
    #[error("invalid symbol '{0}', expected COUNTER/BASE")]
    InvalidSymbol(String),

    /// A money calculation left the range of `Decimal`.
    #[error("{quantity} overflows the decimal range")]
    Overflow {
        /// Quantity being computed.
        quantity: &'static str,
    },
}
