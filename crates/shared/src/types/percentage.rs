//! Percentage weights used for uneven splits.

use std::fmt;
use std::iter::Sum;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A percentage weight, conceptually in `[0, 100]`.
///
/// `Percentage::new(dec!(30))` means 30%. Like [`crate::Money`], it never
/// goes through binary floating point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(Decimal);

impl Percentage {
    /// One hundred percent.
    pub const HUNDRED: Self = Self(Decimal::ONE_HUNDRED);

    /// Creates a percentage from its value in percent.
    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the value in percent (e.g. `30` for 30%).
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the value as a fraction of one (e.g. `0.30` for 30%).
    #[must_use]
    pub fn fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// Returns true if the value is strictly below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }
}

impl From<Decimal> for Percentage {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Saturates at `Decimal::MAX` instead of overflowing, so an absurd set of
/// percentages still sums to something far from 100.
impl Sum for Percentage {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.fold(Decimal::ZERO, |acc, p| acc.saturating_add(p.0)))
    }
}

impl<'a> Sum<&'a Percentage> for Percentage {
    fn sum<I: Iterator<Item = &'a Percentage>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fraction() {
        assert_eq!(Percentage::new(dec!(30)).fraction(), dec!(0.30));
        assert_eq!(Percentage::new(dec!(12.5)).fraction(), dec!(0.125));
        assert_eq!(Percentage::HUNDRED.fraction(), Decimal::ONE);
    }

    #[test]
    fn test_sum() {
        let parts = [
            Percentage::new(dec!(33.33)),
            Percentage::new(dec!(33.33)),
            Percentage::new(dec!(33.34)),
        ];
        assert_eq!(parts.iter().sum::<Percentage>(), Percentage::HUNDRED);
    }

    #[test]
    fn test_sum_saturates() {
        let parts = [Percentage::new(Decimal::MAX), Percentage::new(Decimal::MAX)];
        assert_eq!(parts.iter().sum::<Percentage>().value(), Decimal::MAX);
    }

    #[test]
    fn test_display() {
        assert_eq!(Percentage::new(dec!(12.5)).to_string(), "12.5%");
    }

    #[test]
    fn test_is_negative() {
        assert!(Percentage::new(dec!(-1)).is_negative());
        assert!(!Percentage::new(dec!(0)).is_negative());
    }
}
