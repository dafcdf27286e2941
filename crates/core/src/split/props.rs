//! Property-based tests for allocation.
//!
//! - Exact-sum invariant
//! - Share count invariant
//! - Non-negativity
//! - Residual is a whole number of minor units
//! - Determinism
//! - Parse/render round trip
//! - Bulk reconciliation matches cent-by-cent redistribution

use billsplit_shared::{Money, Percentage};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::allocator::Allocator;
use super::reconciler::reconcile;
use crate::input::parse_money;

/// Reference redistribution: one minor unit per step, round-robin,
/// skipping non-positive shares when taking back.
fn reconcile_cent_by_cent(shares: &mut [Money], target: Money) {
    let count = shares.len();
    let mut remaining = target - shares.iter().sum::<Money>();
    let mut index = 0;
    while !remaining.is_zero() {
        if remaining.is_positive() {
            shares[index] += Money::MINOR_UNIT;
            remaining -= Money::MINOR_UNIT;
        } else {
            while !shares[index].is_positive() {
                index = (index + 1) % count;
            }
            shares[index] -= Money::MINOR_UNIT;
            remaining += Money::MINOR_UNIT;
        }
        index = (index + 1) % count;
    }
}

/// Strategy to generate cent-valued shares (0.00 to 5.00).
fn cent_shares() -> impl Strategy<Value = Vec<Money>> {
    prop::collection::vec((0i64..500).prop_map(|c| Money::new(Decimal::new(c, 2))), 1..8)
}

/// Strategy to generate non-negative totals (0.000 to 1,000,000.000), with
/// a third decimal so the total itself needs rounding.
fn non_negative_total() -> impl Strategy<Value = Money> {
    (0i64..1_000_000_000i64).prop_map(|mills| Money::new(Decimal::new(mills, 3)))
}

/// Strategy to generate participant count (1 to 50).
fn participant_count() -> impl Strategy<Value = usize> {
    1usize..50
}

/// Strategy to generate percentages that sum to 100, zeros included.
fn percentages_summing_to_100() -> impl Strategy<Value = Vec<Percentage>> {
    prop::collection::vec(0u32..100, 1..12)
        .prop_filter("at least one positive weight", |values| {
            values.iter().any(|v| *v > 0)
        })
        .prop_map(|values| {
            let sum: u32 = values.iter().sum();
            values
                .iter()
                .map(|v| {
                    Percentage::new(Decimal::ONE_HUNDRED * Decimal::from(*v) / Decimal::from(sum))
                })
                .collect()
        })
}

/// Strategy to generate two-decimal percentages that sum to exactly 100.
fn cent_percentages_summing_to_100() -> impl Strategy<Value = Vec<Percentage>> {
    prop::collection::vec(0u32..10_000, 1..8).prop_map(|cuts| {
        let mut cuts: Vec<u32> = cuts;
        cuts.push(0);
        cuts.push(10_000);
        cuts.sort_unstable();
        cuts.windows(2)
            .map(|w| Percentage::new(Decimal::new(i64::from(w[1] - w[0]), 2)))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// For any total and count, even shares sum exactly to the rounded total.
    #[test]
    fn prop_even_sum_invariant(total in non_negative_total(), count in participant_count()) {
        let result = Allocator::allocate_even(total, count, None).unwrap();
        prop_assert_eq!(result.sum(), total.round_to_minor_unit());
        prop_assert_eq!(result.total, total.round_to_minor_unit());
    }

    /// Even split returns exactly `count` non-negative shares.
    #[test]
    fn prop_even_count_and_non_negative(total in non_negative_total(), count in participant_count()) {
        let result = Allocator::allocate_even(total, count, None).unwrap();
        prop_assert_eq!(result.len(), count);
        for (i, share) in result.shares().iter().enumerate() {
            prop_assert!(!share.is_negative(), "Share {} should be non-negative, got {}", i, share);
        }
    }

    /// Even shares differ from each other by at most one minor unit.
    #[test]
    fn prop_even_shares_are_fair(total in non_negative_total(), count in participant_count()) {
        let shares = Allocator::allocate_even(total, count, None).unwrap().shares();
        let max = shares.iter().max().copied().unwrap_or_default();
        let min = shares.iter().min().copied().unwrap_or_default();
        prop_assert!(max - min <= Money::MINOR_UNIT);
    }

    /// For any percentages summing to 100, shares sum exactly to the rounded total.
    #[test]
    fn prop_percentage_sum_invariant(
        total in non_negative_total(),
        percentages in percentages_summing_to_100(),
    ) {
        let result = Allocator::allocate_by_percentage(total, &percentages, None).unwrap();
        prop_assert_eq!(result.sum(), total.round_to_minor_unit());
        prop_assert_eq!(result.len(), percentages.len());
    }

    /// Percentage shares are never negative, even for zero weights.
    #[test]
    fn prop_percentage_non_negative(
        total in non_negative_total(),
        percentages in percentages_summing_to_100(),
    ) {
        let result = Allocator::allocate_by_percentage(total, &percentages, None).unwrap();
        for (i, share) in result.shares().iter().enumerate() {
            prop_assert!(!share.is_negative(), "Share {} should be non-negative, got {}", i, share);
        }
    }

    /// The reconciled residual is always a whole number of minor units.
    #[test]
    fn prop_residual_is_minor_unit_multiple(
        total in non_negative_total(),
        percentages in cent_percentages_summing_to_100(),
        count in participant_count(),
    ) {
        let by_pct = Allocator::allocate_by_percentage(total, &percentages, None).unwrap();
        prop_assert!(by_pct.residual.is_minor_unit_multiple());

        let even = Allocator::allocate_even(total, count, None).unwrap();
        prop_assert!(even.residual.is_minor_unit_multiple());
    }

    /// Identical inputs always produce identical outputs.
    #[test]
    fn prop_allocation_is_deterministic(
        total in non_negative_total(),
        percentages in cent_percentages_summing_to_100(),
    ) {
        let first = Allocator::allocate_by_percentage(total, &percentages, None).unwrap();
        let second = Allocator::allocate_by_percentage(total, &percentages, None).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Rendering a parsed amount and parsing it again yields the same amount.
    #[test]
    fn prop_parse_render_round_trip(mills in any::<i64>().prop_map(|v| v % 1_000_000_000_000)) {
        let text = Decimal::new(mills, 3).to_string();
        let parsed = parse_money(&text).unwrap();
        prop_assert_eq!(parse_money(&parsed.to_string()).unwrap(), parsed);
    }

    /// Applying whole passes at once gives the same shares as handing out
    /// one minor unit at a time.
    #[test]
    fn prop_reconcile_matches_cent_by_cent(
        shares in cent_shares(),
        target_cents in 0i64..5_000,
    ) {
        let target = Money::new(Decimal::new(target_cents, 2));
        let mut bulk = shares.clone();
        let mut reference = shares;

        reconcile(&mut bulk, target).unwrap();
        reconcile_cent_by_cent(&mut reference, target);

        prop_assert_eq!(bulk, reference);
    }

    /// Every share is a whole number of minor units.
    #[test]
    fn prop_shares_are_quantized(total in non_negative_total(), count in participant_count()) {
        let result = Allocator::allocate_even(total, count, None).unwrap();
        prop_assert!(result.shares().iter().all(Money::is_minor_unit_multiple));
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::split::SplitError;
    use rust_decimal_macros::dec;

    /// 100.00 among 3 evenly: first participant absorbs the extra cent.
    #[test]
    fn test_even_100_by_3() {
        let result = Allocator::allocate_even(Money::new(dec!(100.00)), 3, None).unwrap();
        assert_eq!(
            result.shares(),
            vec![
                Money::new(dec!(33.34)),
                Money::new(dec!(33.33)),
                Money::new(dec!(33.33))
            ]
        );
    }

    /// 40 + 40 + 19 = 99: rejected, no result.
    #[test]
    fn test_percentages_summing_to_99_rejected() {
        let percentages = [
            Percentage::new(dec!(40)),
            Percentage::new(dec!(40)),
            Percentage::new(dec!(19)),
        ];
        let err = Allocator::allocate_by_percentage(Money::new(dec!(100)), &percentages, None)
            .unwrap_err();
        assert_eq!(err, SplitError::PercentageSum { sum: dec!(99) });
    }
}
