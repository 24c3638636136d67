//! Mutual fund holdings as returned by the brokerage.

use serde::{Deserialize, Serialize};

/// Opaque holdings payload.
///
/// The gateway never interprets the records; it relays whatever shape
/// the brokerage returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Holdings(serde_json::Value);

impl Holdings {
    /// Wrap an upstream payload.
    #[must_use]
    pub const fn new(payload: serde_json::Value) -> Self {
        Self(payload)
    }

    /// Number of records when the payload is an array.
    #[must_use]
    pub fn record_count(&self) -> Option<usize> {
        self.0.as_array().map(Vec::len)
    }

    /// Borrow the raw payload.
    #[must_use]
    pub const fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Unwrap into the raw payload.
    #[must_use]
    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }
}

impl From<serde_json::Value> for Holdings {
    fn from(payload: serde_json::Value) -> Self {
        Self(payload)
    }
}
