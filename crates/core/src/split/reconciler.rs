//! Residual redistribution.
//!
//! After every share has been rounded on its own, their sum can drift from
//! the rounded total. The reconciler hands that drift back in minor units,
//! round-robin from the first participant, so earlier participants absorb
//! rounding gains and losses first.
//!
//! Inside the percentage tolerance band the drift scales with the total
//! (`total * 0.0001` at 100.01%), so whole round-robin passes are applied
//! at once. The cost depends on the participant count, never on the size
//! of the residual.

use billsplit_shared::Money;
use rust_decimal::Decimal;
use tracing::debug;

use super::error::SplitError;

/// Adjusts `shares` in minor units until they sum to `target`.
///
/// Returns the residual (`target - sum(shares)` before adjustment).
///
/// The result is the same as handing out one minor unit per step:
/// a positive residual adds a unit to each participant in turn, and a
/// negative residual takes a unit from each participant in turn, skipping
/// shares that are no longer positive. No share is pushed below zero while
/// a positive one remains. That only happens for a negative `target`, and
/// then the rest is taken round-robin from every share.
///
/// # Errors
///
/// - [`SplitError::InvalidParticipantCount`] if `shares` is empty.
/// - [`SplitError::AmountOutOfRange`] if summing the shares overflows.
/// - [`SplitError::UnalignedResidual`] if the residual is not a whole number
///   of minor units, i.e. shares and target were not rounded alike.
///
/// # Example
///
/// ```
/// use billsplit_core::split::reconcile;
/// use billsplit_shared::Money;
/// use rust_decimal_macros::dec;
///
/// let mut shares = vec![Money::new(dec!(33.33)); 3];
/// let residual = reconcile(&mut shares, Money::new(dec!(100.00))).unwrap();
///
/// assert_eq!(residual.amount(), dec!(0.01));
/// assert_eq!(shares[0].amount(), dec!(33.34));
/// ```
pub fn reconcile(shares: &mut [Money], target: Money) -> Result<Money, SplitError> {
    if shares.is_empty() {
        return Err(SplitError::InvalidParticipantCount(0));
    }

    let out_of_range = || SplitError::AmountOutOfRange(target.amount());
    let sum = Money::checked_sum(shares.iter()).ok_or_else(out_of_range)?;
    let residual = target.checked_sub(sum).ok_or_else(out_of_range)?;
    if !residual.is_minor_unit_multiple() {
        return Err(SplitError::UnalignedResidual {
            residual: residual.amount(),
        });
    }
    if residual.is_zero() {
        return Ok(residual);
    }

    let units = residual
        .amount()
        .checked_div(Money::MINOR_UNIT.amount())
        .ok_or_else(out_of_range)?
        .abs();

    if residual.is_positive() {
        let everyone: Vec<usize> = (0..shares.len()).collect();
        spread(shares, &everyone, units, Money::MINOR_UNIT);
    } else {
        take_back(shares, units);
    }

    debug!(%residual, %target, steps = %units, "Reconciled rounding residual");

    Ok(residual)
}

/// Applies `units` steps of `step` round-robin over `indices`: each share
/// gets `units / len` steps and the first `units % len` get one more.
fn spread(shares: &mut [Money], indices: &[usize], units: Decimal, step: Money) {
    let len = Decimal::from(indices.len());
    let per_share = (units / len).floor();
    let extra = units - per_share * len;

    for (rank, &index) in indices.iter().enumerate() {
        let steps = if Decimal::from(rank) < extra {
            per_share + Decimal::ONE
        } else {
            per_share
        };
        shares[index] += step * steps;
    }
}

/// Takes `units` minor units back, round-robin over the positive shares.
///
/// Each round runs whole passes over the shares that are still positive,
/// stopping once the smallest of them runs out, so it finishes in at most
/// one round per participant plus a final partial pass.
fn take_back(shares: &mut [Money], mut units: Decimal) {
    let step = Money::new(-Money::MINOR_UNIT.amount());

    while units > Decimal::ZERO {
        let positive: Vec<usize> = (0..shares.len())
            .filter(|&i| shares[i].is_positive())
            .collect();

        if positive.is_empty() {
            let everyone: Vec<usize> = (0..shares.len()).collect();
            spread(shares, &everyone, units, step);
            return;
        }

        let len = Decimal::from(positive.len());
        if units < len {
            spread(shares, &positive, units, step);
            return;
        }

        let smallest = positive
            .iter()
            .map(|&i| shares[i].amount())
            .min()
            .unwrap_or(Decimal::ZERO);
        // Passes a share survives while still positive at the start of each.
        let until_exhausted = (smallest / Money::MINOR_UNIT.amount()).ceil();
        let passes = (units / len).floor().min(until_exhausted);

        for &index in &positive {
            shares[index] += step * passes;
        }
        units -= passes * len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn money(values: &[Decimal]) -> Vec<Money> {
        values.iter().copied().map(Money::new).collect()
    }

    fn amounts(shares: &[Money]) -> Vec<Decimal> {
        shares.iter().map(Money::amount).collect()
    }

    #[test]
    fn test_zero_residual_is_noop() {
        let mut shares = money(&[dec!(25.00), dec!(25.00)]);
        let residual = reconcile(&mut shares, Money::new(dec!(50.00))).unwrap();
        assert!(residual.is_zero());
        assert_eq!(amounts(&shares), vec![dec!(25.00), dec!(25.00)]);
    }

    #[test]
    fn test_positive_residual_goes_to_first_participants() {
        let mut shares = money(&[dec!(0.00), dec!(0.00), dec!(0.00)]);
        reconcile(&mut shares, Money::new(dec!(0.02))).unwrap();
        assert_eq!(amounts(&shares), vec![dec!(0.01), dec!(0.01), dec!(0.00)]);
    }

    #[test]
    fn test_negative_residual_taken_from_first_participants() {
        // 0.02 / 3 rounds to 0.01 each, overshooting by one cent.
        let mut shares = money(&[dec!(0.01), dec!(0.01), dec!(0.01)]);
        let residual = reconcile(&mut shares, Money::new(dec!(0.02))).unwrap();
        assert_eq!(residual.amount(), dec!(-0.01));
        assert_eq!(amounts(&shares), vec![dec!(0.00), dec!(0.01), dec!(0.01)]);
    }

    #[test]
    fn test_residual_wraps_round_robin() {
        let mut shares = money(&[dec!(1.00), dec!(1.00)]);
        reconcile(&mut shares, Money::new(dec!(2.05))).unwrap();
        assert_eq!(amounts(&shares), vec![dec!(1.03), dec!(1.02)]);
    }

    #[test]
    fn test_negative_residual_skips_zero_shares() {
        let mut shares = money(&[dec!(0.00), dec!(0.50), dec!(0.51)]);
        reconcile(&mut shares, Money::new(dec!(1.00))).unwrap();
        assert_eq!(amounts(&shares), vec![dec!(0.00), dec!(0.49), dec!(0.51)]);
        assert!(shares.iter().all(|s| !s.is_negative()));
    }

    #[test]
    fn test_large_negative_residual_passes_over_zero_shares() {
        // 1.05 over: two passes over three shares, forty-eight over the two
        // still positive, then three cents from the last one.
        let mut shares = money(&[dec!(0.02), dec!(0.00), dec!(0.50), dec!(1.00)]);
        let residual = reconcile(&mut shares, Money::new(dec!(0.47))).unwrap();
        assert_eq!(residual.amount(), dec!(-1.05));
        assert_eq!(
            amounts(&shares),
            vec![dec!(0.00), dec!(0.00), dec!(0.00), dec!(0.47)]
        );
    }

    #[test]
    fn test_large_positive_residual_spreads_evenly() {
        let mut shares = money(&[dec!(0.00), dec!(0.00), dec!(0.00)]);
        reconcile(&mut shares, Money::new(dec!(1000000.01))).unwrap();
        assert_eq!(
            amounts(&shares),
            vec![dec!(333333.34), dec!(333333.34), dec!(333333.33)]
        );
    }

    #[test]
    fn test_overflowing_share_sum_rejected() {
        let mut shares = money(&[Decimal::MAX, Decimal::MAX]);
        assert_eq!(
            reconcile(&mut shares, Money::ZERO),
            Err(SplitError::AmountOutOfRange(Decimal::ZERO))
        );
    }

    #[test]
    fn test_empty_shares_rejected() {
        let mut shares: Vec<Money> = vec![];
        assert_eq!(
            reconcile(&mut shares, Money::new(dec!(1.00))),
            Err(SplitError::InvalidParticipantCount(0))
        );
    }

    #[test]
    fn test_unaligned_residual_rejected() {
        let mut shares = money(&[dec!(33.333)]);
        assert!(matches!(
            reconcile(&mut shares, Money::new(dec!(33.33))),
            Err(SplitError::UnalignedResidual { .. })
        ));
    }
}
