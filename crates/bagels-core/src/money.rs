//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Six onion bagels at 0.49 as f32, minus six ledger entries of 0.49:     │
//! │    0.49 * 6 - 0.49 * 6 is not guaranteed to land on 0.0 exactly        │
//! │                                                                         │
//! │  The bundle engine removes ledger entries by *equality of amount*.      │
//! │  That only works if amounts compare exactly.                            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Pence                                            │
//! │    49 pence == 49 pence, always                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bagels_core::money::Money;
//!
//! let price = Money::from_pence(49);          // £0.49
//! let six: Money = price * 6;                 // £2.94
//! let total = six + Money::from_pence(99);    // £3.93
//! assert_eq!(total.to_string(), "£3.93");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in pence.
///
/// ## Design Decisions
/// - **i64 (signed)**: differences between totals may go negative
/// - **Single field tuple struct**: serialises as a bare integer, so menu
///   files write `price = 49`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from pence (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use bagels_core::money::Money;
    ///
    /// let price = Money::from_pence(249); // £2.49
    /// assert_eq!(price.pence(), 249);
    /// ```
    #[inline]
    pub const fn from_pence(pence: i64) -> Self {
        Money(pence)
    }

    /// Returns the value in pence.
    #[inline]
    pub const fn pence(&self) -> i64 {
        self.0
    }

    /// Returns the whole pounds portion.
    #[inline]
    pub const fn pounds(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the pence portion (always 0-99).
    #[inline]
    pub const fn pence_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Formats the amount with the given currency symbol and two decimals.
    ///
    /// ## Example
    /// ```rust
    /// use bagels_core::money::Money;
    ///
    /// assert_eq!(Money::from_pence(442).format_with("$"), "$4.42");
    /// assert_eq!(Money::from_pence(-5).format_with("£"), "-£0.05");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.pounds().abs(),
            self.pence_part()
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows pounds sterling, the till's home currency.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("£"))
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
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a unit count.
impl Mul<usize> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: usize) -> Self {
        Money(self.0 * qty as i64)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pence() {
        let money = Money::from_pence(1099);
        assert_eq!(money.pence(), 1099);
        assert_eq!(money.pounds(), 10);
        assert_eq!(money.pence_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_pence(49).to_string(), "£0.49");
        assert_eq!(Money::from_pence(500).to_string(), "£5.00");
        assert_eq!(Money::from_pence(-550).to_string(), "-£5.50");
        assert_eq!(Money::zero().to_string(), "£0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_pence(1000);
        let b = Money::from_pence(500);

        assert_eq!((a + b).pence(), 1500);
        assert_eq!((a - b).pence(), 500);
        assert_eq!((a * 3_usize).pence(), 3000);

        let mut running = Money::zero();
        running += a;
        running -= b;
        assert_eq!(running.pence(), 500);
    }

    #[test]
    fn test_sum() {
        let prices = [Money::from_pence(49), Money::from_pence(99), Money::from_pence(12)];
        let by_ref: Money = prices.iter().sum();
        let by_value: Money = prices.into_iter().sum();
        assert_eq!(by_ref.pence(), 160);
        assert_eq!(by_value, by_ref);
    }

    #[test]
    fn test_serializes_as_bare_integer() {
        let json = serde_json::to_string(&Money::from_pence(249)).unwrap();
        assert_eq!(json, "249");
    }
}
