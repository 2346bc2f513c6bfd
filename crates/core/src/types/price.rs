//! Type-safe price representation using decimal arithmetic.
//!
//! The catalog service serializes prices as plain JSON numbers
//! (e.g. `179.9`), so `Price` uses `rust_decimal`'s float serde adapter
//! rather than the default string form.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A unit price in the store's display currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;

    #[test]
    fn test_price_from_json_number() {
        let price: Price = serde_json::from_str("179.9").unwrap();
        assert_eq!(price.amount(), Decimal::from_f64(179.9).unwrap());
    }

    #[test]
    fn test_price_display_two_places() {
        let price: Price = serde_json::from_str("179.9").unwrap();
        assert_eq!(price.display(), "$179.90");
    }

    #[test]
    fn test_price_serializes_as_number() {
        let price = Price::new(Decimal::new(100, 0));
        assert_eq!(serde_json::to_string(&price).unwrap(), "100.0");
    }
}
