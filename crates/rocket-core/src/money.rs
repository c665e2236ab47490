//! # Money Module
//!
//! Integer-cents money used by the cart summary.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The catalog serves prices as JSON numbers: 179.9                       │
//! │    179.9 × 3 = 539.6999999999999  ❌                                    │
//! │                                                                         │
//! │  OUR SOLUTION: convert ONCE at the edge, then integer cents             │
//! │    179.9 → 17990 cents                                                 │
//! │    17990 × 3 = 53970 cents  ✅                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rocket_core::money::Money;
//!
//! let price = Money::from_major_f64(179.9).unwrap();
//! assert_eq!(price.cents(), 17990);
//! assert_eq!(price.multiply_quantity(3).cents(), 53970);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

/// A monetary value in the smallest currency unit (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a catalog price in major units (e.g. `179.9`) to cents.
    ///
    /// Rounds half away from zero. Returns `None` for NaN, infinities and
    /// values that do not fit in `i64` cents.
    pub fn from_major_f64(major: f64) -> Option<Self> {
        if !major.is_finite() {
            return None;
        }

        let cents = (major * 100.0).round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }

        Some(Money(cents as i64))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies by a line quantity, saturating on overflow.
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Formats with a currency symbol, e.g. `R$179.90`.
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}{}.{:02}", sign, symbol, self.major().abs(), self.minor())
    }
}

/// Display is for logs; the storefront formats with its own locale.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("$"))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major_f64_rounds() {
        assert_eq!(Money::from_major_f64(179.9).unwrap().cents(), 17990);
        assert_eq!(Money::from_major_f64(139.9).unwrap().cents(), 13990);
        assert_eq!(Money::from_major_f64(0.005).unwrap().cents(), 1);
        assert_eq!(Money::from_major_f64(-2.5).unwrap().cents(), -250);
    }

    #[test]
    fn test_from_major_f64_rejects_non_finite() {
        assert!(Money::from_major_f64(f64::NAN).is_none());
        assert!(Money::from_major_f64(f64::INFINITY).is_none());
        assert!(Money::from_major_f64(1e300).is_none());
    }

    #[test]
    fn test_display_and_format() {
        assert_eq!(Money::from_cents(17990).to_string(), "$179.90");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::from_cents(5).format_with("R$"), "R$0.05");
    }

    #[test]
    fn test_arithmetic() {
        let mut total = Money::zero();
        total += Money::from_cents(17990).multiply_quantity(3);
        total = total + Money::from_cents(10);
        assert_eq!(total.cents(), 53980);
        assert!(!total.is_zero());
    }
}
