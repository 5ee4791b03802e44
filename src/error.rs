use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::{ExchangeId, OrderLeg, OrderSide};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Order book or fee schedule could not be obtained.
///
/// The current cycle aborts; nothing is retried internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketDataError {
    #[error("market data unavailable: {0}")]
    Unavailable(String),

    #[error("no order book returned for {exchange}")]
    MissingBook { exchange: ExchangeId },

    #[error("order book for {exchange} has no {side} levels")]
    EmptySide {
        exchange: ExchangeId,
        side: &'static str,
    },

    #[error("no active exchanges")]
    NoExchanges,
}

/// Execution-related errors with structured variants.
#[derive(Error, Debug, Clone)]
pub enum ExecutionError {
    /// A leg submission failed. Legs are not atomic, so `completed_legs`
    /// may hold an already submitted leg with no compensating order.
    #[error("failed to place {side} order on {exchange}: {reason} ({} leg(s) already placed)", .completed_legs.len())]
    OrderPlacementFailed {
        exchange: ExchangeId,
        side: OrderSide,
        completed_legs: Vec<OrderLeg>,
        reason: String,
    },

    #[error("order rejected: {0}")]
    OrderRejected(String),
}

/// Notification delivery errors. Never fatal to a cycle.
#[derive(Error, Debug, Clone)]
pub enum NotificationError {
    #[error("notification delivery failed: {0}")]
    DeliveryFailed(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error(transparent)]
    Notification(#[from] NotificationError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Check if this error left a leg submitted without its counterpart.
    #[must_use]
    pub fn is_partial_execution(&self) -> bool {
        matches!(
            self,
            Self::Execution(ExecutionError::OrderPlacementFailed { completed_legs, .. })
                if !completed_legs.is_empty()
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
