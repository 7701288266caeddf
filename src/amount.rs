//! Monetary amounts for expense records.
//!
//! Amounts are decimal currency values, never binary floating point. They
//! are persisted as whole cents so SQL aggregation stays exact.

use std::{fmt::Display, str::FromStr};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::Error;

/// The largest storable amount in cents, matching a `decimal(10,2)` column:
/// 99999999.99.
const MAX_AMOUNT_CENTS: i64 = 9_999_999_999;

/// The monetary value of an expense.
///
/// An `Amount` is strictly positive and has exactly two decimal places.
/// Construct one with [Amount::new] or by parsing a string:
///
/// ```rust
/// use outlay::Amount;
///
/// let amount: Amount = "12.5".parse().unwrap();
/// assert_eq!(amount.to_string(), "12.50");
/// assert_eq!(amount.as_cents(), 1250);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Amount(Decimal);

impl Amount {
    /// Create an amount from a decimal value.
    ///
    /// # Errors
    /// Returns [Error::NonPositiveAmount] if `value` is zero or negative,
    /// [Error::AmountPrecision] if `value` has sub-cent precision, or
    /// [Error::AmountTooLarge] if `value` exceeds 99999999.99.
    pub fn new(value: Decimal) -> Result<Self, Error> {
        if value <= Decimal::ZERO {
            return Err(Error::NonPositiveAmount);
        }

        // Normalizing first so that, e.g., "12.500" is accepted as "12.50".
        let mut value = value.normalize();

        if value.scale() > 2 {
            return Err(Error::AmountPrecision);
        }

        if value > Decimal::new(MAX_AMOUNT_CENTS, 2) {
            return Err(Error::AmountTooLarge);
        }

        value.rescale(2);

        Ok(Self(value))
    }

    /// Create an amount from a whole number of cents.
    ///
    /// This is the inverse of [Amount::as_cents] and is used when reading
    /// rows back from the database, so `cents` is expected to be positive.
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The amount as a whole number of cents, e.g. "12.50" becomes 1250.
    ///
    /// The range check in [Amount::new] keeps the mantissa well within
    /// `i64`, so the cast cannot wrap.
    pub fn as_cents(&self) -> i64 {
        self.0.mantissa() as i64
    }

    /// The underlying decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl FromStr for Amount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value =
            Decimal::from_str(s.trim()).map_err(|_| Error::InvalidAmount(s.to_string()))?;

        Self::new(value)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
