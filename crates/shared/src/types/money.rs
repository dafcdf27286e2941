//! Money type with exact decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Represents a monetary amount in a two-decimal currency.
///
/// Uses `Decimal` internally to avoid floating-point precision errors.
/// Unrounded intermediate values (e.g. `100 / 3`) keep their full
/// precision until [`Money::round_half_up`] quantizes them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Number of fraction digits of the currency's minor unit.
    pub const DECIMAL_PLACES: u32 = 2;

    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// The smallest unit of the rounding granularity (0.01).
    pub const MINOR_UNIT: Self = Self(Decimal::from_parts(1, 0, 0, false, 2));

    /// Largest amount that can be split: one quadrillion (10^15).
    ///
    /// Keeps every intermediate of an allocation, including the sum of
    /// shares at 100.01%, well inside `Decimal`'s 28 significant digits with
    /// room for two fraction digits.
    pub const MAX_AMOUNT: Self = Self(Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0));

    /// Creates a new Money value from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Returns the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is strictly below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns true if the amount is strictly above zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Rounds to `decimal_places` using round-half-up (ties away from zero).
    ///
    /// This is NOT banker's rounding: `0.125` becomes `0.13`. The result is
    /// rescaled so it always renders with exactly `decimal_places` digits
    /// (`25` becomes `25.00`).
    #[must_use]
    pub fn round_half_up(self, decimal_places: u32) -> Self {
        let mut rounded = self
            .0
            .round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(decimal_places);
        Self(rounded)
    }

    /// Rounds to the minor unit (two decimal places), round-half-up.
    #[must_use]
    pub fn round_to_minor_unit(self) -> Self {
        self.round_half_up(Self::DECIMAL_PLACES)
    }

    /// Returns true if the amount is a whole number of minor units.
    #[must_use]
    pub fn is_minor_unit_multiple(&self) -> bool {
        (self.0 % Self::MINOR_UNIT.0).is_zero()
    }

    /// Returns true if the amount lies outside `[-MAX_AMOUNT, MAX_AMOUNT]`.
    #[must_use]
    pub fn exceeds_max(&self) -> bool {
        self.0.abs() > Self::MAX_AMOUNT.0
    }

    /// Adds two amounts, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Subtracts two amounts, returning `None` on overflow.
    #[must_use]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Sums amounts, returning `None` on overflow.
    pub fn checked_sum<'a, I>(iter: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Self>,
    {
        iter.into_iter()
            .try_fold(Self::ZERO, |acc, amount| acc.checked_add(*amount))
    }

    /// Divides the amount evenly by a participant count at full precision.
    ///
    /// Returns `None` when `count` is zero.
    #[must_use]
    pub fn checked_div_count(self, count: usize) -> Option<Self> {
        self.0.checked_div(Decimal::from(count)).map(Self)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self {
        Self(self.0 * rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
