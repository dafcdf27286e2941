//! Even and percentage allocation with exact-sum reconciliation.
//!
//! Both modes follow the same pipeline:
//! 1. Compute raw shares at full decimal precision
//! 2. Round each share half-up to the minor unit
//! 3. Reconcile the drift against the rounded total
//!
//! The result always satisfies `sum(shares) == round_half_up(total, 2)`.

use billsplit_shared::{Money, Percentage};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::error::SplitError;
use super::reconciler::reconcile;
use super::types::{
    AllocationRequest, AllocationResult, Participant, SplitMethod, SplitMode, default_name,
};

/// Allowed deviation of a percentage sum from 100 (±0.01).
pub const PERCENTAGE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Allocator for dividing a total among participants.
///
/// Stateless: every call is independent and deterministic.
pub struct Allocator;

impl Allocator {
    /// Allocates according to a request's mode.
    ///
    /// # Errors
    ///
    /// See [`Allocator::allocate_even`] and [`Allocator::allocate_by_percentage`].
    pub fn allocate(request: &AllocationRequest) -> Result<AllocationResult, SplitError> {
        let names = request.names.as_deref();
        match &request.mode {
            SplitMode::Even { participants } => {
                Self::allocate_even(request.total, *participants, names)
            }
            SplitMode::ByPercentage(percentages) => {
                Self::allocate_by_percentage(request.total, percentages, names)
            }
        }
    }

    /// Splits `total` evenly among `count` participants.
    ///
    /// Earlier participants absorb the leftover cents.
    ///
    /// # Example
    ///
    /// ```
    /// use billsplit_core::Allocator;
    /// use billsplit_shared::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// // 100 / 3 = [33.34, 33.33, 33.33], sum = 100.00
    /// let result = Allocator::allocate_even(Money::new(dec!(100)), 3, None).unwrap();
    /// assert_eq!(result.sum().amount(), dec!(100));
    /// assert_eq!(result.participants[0].share.amount(), dec!(33.34));
    /// ```
    ///
    /// # Errors
    ///
    /// - [`SplitError::InvalidParticipantCount`] if `count` is zero
    /// - [`SplitError::NegativeAmount`] if `total` is negative
    /// - [`SplitError::AmountOutOfRange`] if `total` exceeds [`Money::MAX_AMOUNT`]
    /// - [`SplitError::NameCountMismatch`] if `names` has the wrong length
    pub fn allocate_even(
        total: Money,
        count: usize,
        names: Option<&[String]>,
    ) -> Result<AllocationResult, SplitError> {
        if count == 0 {
            return Err(SplitError::InvalidParticipantCount(count));
        }
        ensure_valid_total(total)?;
        let names = resolve_names(names, count)?;

        let base = total
            .checked_div_count(count)
            .ok_or(SplitError::InvalidParticipantCount(count))?;
        let rounded = vec![base.round_to_minor_unit(); count];

        debug!(%total, count, %base, "Computed even base share");

        Self::reconcile_into_result(SplitMethod::Even, total, rounded, names)
    }

    /// Splits `total` by one percentage per participant.
    ///
    /// # Example
    ///
    /// ```
    /// use billsplit_core::Allocator;
    /// use billsplit_shared::{Money, Percentage};
    /// use rust_decimal_macros::dec;
    ///
    /// let percentages = [Percentage::new(dec!(50)), Percentage::new(dec!(30)), Percentage::new(dec!(20))];
    /// let result = Allocator::allocate_by_percentage(Money::new(dec!(100)), &percentages, None).unwrap();
    /// assert_eq!(result.shares(), vec![
    ///     Money::new(dec!(50)),
    ///     Money::new(dec!(30)),
    ///     Money::new(dec!(20)),
    /// ]);
    /// ```
    ///
    /// # Errors
    ///
    /// - [`SplitError::InvalidParticipantCount`] if `percentages` is empty
    /// - [`SplitError::NegativeAmount`] if `total` or any percentage is negative
    /// - [`SplitError::AmountOutOfRange`] if `total` exceeds [`Money::MAX_AMOUNT`]
    /// - [`SplitError::NameCountMismatch`] if `names` has the wrong length
    /// - [`SplitError::PercentageSum`] if percentages do not sum to 100 ± 0.01
    pub fn allocate_by_percentage(
        total: Money,
        percentages: &[Percentage],
        names: Option<&[String]>,
    ) -> Result<AllocationResult, SplitError> {
        let count = percentages.len();
        if count == 0 {
            return Err(SplitError::InvalidParticipantCount(count));
        }
        ensure_valid_total(total)?;
        let names = resolve_names(names, count)?;
        validate_percentages(percentages)?;

        let rounded: Vec<Money> = percentages
            .iter()
            .map(|p| (total * p.fraction()).round_to_minor_unit())
            .collect();

        Self::reconcile_into_result(SplitMethod::ByPercentage, total, rounded, names)
    }

    fn reconcile_into_result(
        method: SplitMethod,
        total: Money,
        mut shares: Vec<Money>,
        names: Vec<String>,
    ) -> Result<AllocationResult, SplitError> {
        let target = total.round_to_minor_unit();
        let residual = reconcile(&mut shares, target)?;

        let participants = names
            .into_iter()
            .zip(shares)
            .map(|(name, share)| Participant { name, share })
            .collect();

        Ok(AllocationResult {
            method,
            total: target,
            residual,
            participants,
        })
    }
}

/// Validates a set of percentages and returns their sum.
///
/// Every percentage must be non-negative and the sum must lie within
/// `[100 - 0.01, 100 + 0.01]`.
///
/// # Errors
///
/// - [`SplitError::InvalidParticipantCount`] if `percentages` is empty
/// - [`SplitError::NegativeAmount`] for the first negative percentage
/// - [`SplitError::PercentageSum`] if the sum is out of tolerance
pub fn validate_percentages(percentages: &[Percentage]) -> Result<Decimal, SplitError> {
    if percentages.is_empty() {
        return Err(SplitError::InvalidParticipantCount(0));
    }

    if let Some(negative) = percentages.iter().find(|p| p.is_negative()) {
        return Err(SplitError::NegativeAmount(negative.value()));
    }

    let sum = percentages.iter().sum::<Percentage>().value();
    if (sum - Decimal::ONE_HUNDRED).abs() > PERCENTAGE_TOLERANCE {
        warn!(%sum, "Rejected percentages that do not sum to 100");
        return Err(SplitError::PercentageSum { sum });
    }

    Ok(sum)
}

fn ensure_valid_total(total: Money) -> Result<(), SplitError> {
    if total.is_negative() {
        return Err(SplitError::NegativeAmount(total.amount()));
    }
    if total.exceeds_max() {
        return Err(SplitError::AmountOutOfRange(total.amount()));
    }
    Ok(())
}

/// Resolves participant names, filling blanks with "Person i".
fn resolve_names(names: Option<&[String]>, count: usize) -> Result<Vec<String>, SplitError> {
    let Some(names) = names else {
        return Ok((0..count).map(default_name).collect());
    };

    if names.len() != count {
        return Err(SplitError::NameCountMismatch {
            expected: count,
            got: names.len(),
        });
    }

    Ok(names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let name = name.trim();
            if name.is_empty() {
                default_name(i)
            } else {
                name.to_string()
            }
        })
        .collect())
}
