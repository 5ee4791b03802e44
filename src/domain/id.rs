//! Domain identifier types with proper encapsulation.
//!
//! Identifiers are ordered so that venue selection can break price ties
//! by a fixed lexicographic order rather than by map iteration order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Exchange identifier - newtype for type safety.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeId(String);

impl ExchangeId {
    /// Create a new `ExchangeId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the exchange ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ExchangeId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ExchangeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Currency code such as `BTC` or `USDT`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// Create a new `Currency` from a string.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Get the currency code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Currency {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A spot trading pair written `COUNTER/BASE`, e.g. `EVER/USDT`.
///
/// The counter currency is the one bought and sold; the base currency is
/// the one prices are quoted in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    counter: Currency,
    base: Currency,
}

impl Symbol {
    /// Create a symbol from its two currencies.
    pub fn new(counter: impl Into<Currency>, base: impl Into<Currency>) -> Self {
        Self {
            counter: counter.into(),
            base: base.into(),
        }
    }

    /// The traded currency (left of the slash).
    #[must_use]
    pub const fn counter(&self) -> &Currency {
        &self.counter
    }

    /// The quote currency (right of the slash).
    #[must_use]
    pub const fn base(&self) -> &Currency {
        &self.base
    }
}

impl FromStr for Symbol {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (counter, base) = s
            .split_once('/')
            .ok_or_else(|| DomainError::InvalidSymbol(s.to_string()))?;
        let (counter, base) = (counter.trim(), base.trim());
        if counter.is_empty() || base.is_empty() || base.contains('/') {
            return Err(DomainError::InvalidSymbol(s.to_string()));
        }
        Ok(Self::new(counter, base))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.counter, self.base)
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
