//! Money type for Bangladeshi Taka amounts.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount in Bangladeshi Taka (BDT).
///
/// All collections, sale totals, and savings balances in the system are
/// denominated in Taka, so the amount carries no currency tag. Uses
/// `Decimal` internally to avoid floating-point precision errors.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Taka(Decimal);

impl Taka {
    /// A zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new Taka amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Creates an amount from a whole number of taka.
    #[must_use]
    pub fn from_whole(taka: i64) -> Self {
        Self(Decimal::from(taka))
    }

    /// Returns the inner decimal amount.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Returns the absolute value of the amount.
    #[must_use]
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Returns the smaller of two amounts.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self(self.0.min(other.0))
    }

    /// Returns the larger of two amounts.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self(self.0.max(other.0))
    }

    /// Subtracts `other`, clamping the result at zero.
    ///
    /// Used for derived figures like pending amounts that must never
    /// display below zero.
    #[must_use]
    pub fn saturating_sub(self, other: Self) -> Self {
        Self((self.0 - other.0).max(Decimal::ZERO))
    }
}

impl From<Decimal> for Taka {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Taka {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Taka {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Taka {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Taka {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Sum for Taka {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|t| t.0).sum())
    }
}

impl<'a> Sum<&'a Taka> for Taka {
    fn sum<I: Iterator<Item = &'a Taka>>(iter: I) -> Self {
        Self(iter.map(|t| t.0).sum())
    }
}

impl std::fmt::Display for Taka {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\u{09f3}{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_taka_new() {
        let t = Taka::new(dec!(100.50));
        assert_eq!(t.amount(), dec!(100.50));
    }

    #[test]
    fn test_taka_zero() {
        assert!(Taka::ZERO.is_zero());
        assert!(!Taka::ZERO.is_negative());
        assert!(!Taka::ZERO.is_positive());
    }

    #[test]
    fn test_taka_sign_predicates() {
        assert!(Taka::new(dec!(-10)).is_negative());
        assert!(!Taka::new(dec!(-10)).is_positive());
        assert!(Taka::new(dec!(10)).is_positive());
        assert!(!Taka::new(dec!(10)).is_negative());
    }

    #[test]
    fn test_taka_arithmetic() {
        let a = Taka::new(dec!(100));
        let b = Taka::new(dec!(30));
        assert_eq!(a + b, Taka::new(dec!(130)));
        assert_eq!(a - b, Taka::new(dec!(70)));

        let mut c = a;
        c += b;
        assert_eq!(c, Taka::new(dec!(130)));
        c -= a;
        assert_eq!(c, b);
    }

    #[test]
    fn test_taka_sum() {
        let amounts = [Taka::from_whole(10), Taka::from_whole(20), Taka::from_whole(30)];
        let total: Taka = amounts.iter().sum();
        assert_eq!(total, Taka::from_whole(60));
    }

    #[test]
    fn test_taka_saturating_sub() {
        let a = Taka::from_whole(100);
        let b = Taka::from_whole(150);
        assert_eq!(b.saturating_sub(a), Taka::from_whole(50));
        assert_eq!(a.saturating_sub(b), Taka::ZERO);
    }

    #[test]
    fn test_taka_min_max() {
        let a = Taka::from_whole(100);
        let b = Taka::from_whole(150);
        assert_eq!(a.min(b), a);
        assert_eq!(a.max(b), b);
    }

    #[test]
    fn test_taka_display() {
        assert_eq!(Taka::new(dec!(1600)).to_string(), "\u{09f3}1600");
        assert_eq!(Taka::new(dec!(210.25)).to_string(), "\u{09f3}210.25");
    }
}
