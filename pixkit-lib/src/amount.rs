//! Fixed-point payment amounts
//!
//! Amounts are carried as `rust_decimal::Decimal` so that formatting for the
//! wire never goes through binary floating point. The wire text always has a
//! `.` separator and exactly two fraction digits, whatever the host locale.

use crate::{PixError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of fraction digits in the wire representation.
pub const FRACTION_DIGITS: u32 = 2;

/// Payment amount in BRL.
///
/// # Examples
///
/// ```rust
/// use pixkit_lib::Amount;
///
/// let amt = Amount::from_str_checked("1.229").unwrap();
/// assert_eq!(amt.formatted(), "1.23");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount {
    // Decimal serializes as string with the serde feature
    value: Decimal,
}

impl Amount {
    /// Create from a decimal string (e.g., "123.45")
    ///
    /// # Errors
    ///
    /// Returns [`PixError::InvalidAmount`] if the string is not a decimal number.
    pub fn from_str_checked(s: &str) -> Result<Self> {
        Decimal::from_str(s.trim())
            .map(|value| Self { value })
            .map_err(|e| PixError::InvalidAmount(format!("'{}': {}", s, e)))
    }

    /// Create from a whole number of reais.
    ///
    /// ```rust
    /// use pixkit_lib::Amount;
    /// assert_eq!(Amount::from_units(10).formatted(), "10.00");
    /// ```
    pub fn from_units(units: i64) -> Self {
        Self {
            value: Decimal::from(units),
        }
    }

    /// Create from cents (1/100 of a real).
    ///
    /// ```rust
    /// use pixkit_lib::Amount;
    /// assert_eq!(Amount::from_cents(1999).formatted(), "19.99");
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Self {
            value: Decimal::new(cents, FRACTION_DIGITS),
        }
    }

    /// Get the internal Decimal value.
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// True when the amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.value > Decimal::ZERO
    }

    /// Wire text: two fraction digits, half-up rounding, `.` separator.
    ///
    /// ```rust
    /// use pixkit_lib::Amount;
    /// use rust_decimal_macros::dec;
    ///
    /// assert_eq!(Amount::from(dec!(1.0)).formatted(), "1.00");
    /// assert_eq!(Amount::from(dec!(1.001)).formatted(), "1.00");
    /// assert_eq!(Amount::from(dec!(1.005)).formatted(), "1.01");
    /// ```
    pub fn formatted(&self) -> String {
        let mut rounded = self
            .value
            .round_dp_with_strategy(FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(FRACTION_DIGITS);
        rounded.to_string()
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self { value }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for Amount {
    type Err = PixError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_checked(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fmt(value: Decimal) -> String {
        Amount::from(value).formatted()
    }

    #[test]
    fn test_formatted_pads_fraction() {
        assert_eq!(fmt(dec!(1)), "1.00");
        assert_eq!(fmt(dec!(1.0)), "1.00");
        assert_eq!(fmt(dec!(1.00)), "1.00");
        assert_eq!(fmt(dec!(1.000)), "1.00");
        assert_eq!(fmt(dec!(1234567890)), "1234567890.00");
    }

    #[test]
    fn test_formatted_rounds_half_up() {
        assert_eq!(fmt(dec!(1.234)), "1.23");
        assert_eq!(fmt(dec!(1.001)), "1.00");
        assert_eq!(fmt(dec!(1.230)), "1.23");
        assert_eq!(fmt(dec!(1.229)), "1.23");
        assert_eq!(fmt(dec!(1.225)), "1.23");
        assert_eq!(fmt(dec!(0.005)), "0.01");
        assert_eq!(fmt(dec!(9.995)), "10.00");
    }

    #[test]
    fn test_formatted_has_no_grouping() {
        assert_eq!(fmt(dec!(1234567.891)), "1234567.89");
    }

    #[test]
    fn test_parse() {
        let amt = Amount::from_str_checked(" 12.5 ").unwrap();
        assert_eq!(amt.as_decimal(), dec!(12.5));
        assert_eq!(amt.formatted(), "12.50");

        let parsed: Amount = "3".parse().unwrap();
        assert_eq!(parsed, Amount::from_units(3));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = Amount::from_str_checked("1,50").unwrap_err();
        assert!(matches!(err, PixError::InvalidAmount(_)));
        assert!(Amount::from_str_checked("").is_err());
    }

    #[test]
    fn test_is_positive() {
        assert!(Amount::from_cents(1).is_positive());
        assert!(!Amount::from_units(0).is_positive());
        assert!(!Amount::from_units(-1).is_positive());
    }

    #[test]
    fn test_serialization() {
        let amt = Amount::from_str_checked("10.50").unwrap();
        let json = serde_json::to_string(&amt).unwrap();
        assert_eq!(json, "\"10.50\"");
        let parsed: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(amt, parsed);
    }
}
