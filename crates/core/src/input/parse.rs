//! Parsing of raw amount, percentage, and count input.
//!
//! Parsing is kept apart from domain validation: `parse_money("-5")`
//! succeeds, and callers that need a non-negative amount run
//! [`validate_non_negative`] on the result.

use std::str::FromStr;

use billsplit_shared::{Money, Percentage};
use rust_decimal::Decimal;

use crate::split::SplitError;

/// Currency symbols accepted in front of an amount.
const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥', '₹'];

/// Parses a monetary amount.
///
/// Surrounding whitespace, thousands separators, and a leading currency
/// symbol are stripped before parsing.
///
/// ```
/// use billsplit_core::input::parse_money;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(parse_money(" $1,234.50 ").unwrap().amount(), dec!(1234.50));
/// ```
///
/// # Errors
///
/// Returns [`SplitError::InvalidAmount`] on empty, non-numeric, or malformed
/// input.
pub fn parse_money(text: &str) -> Result<Money, SplitError> {
    parse_decimal(text, &clean_amount(text)).map(Money::new)
}

/// Parses a percentage; a trailing `%` is allowed.
///
/// # Errors
///
/// Returns [`SplitError::InvalidAmount`] on empty, non-numeric, or malformed
/// input.
pub fn parse_percentage(text: &str) -> Result<Percentage, SplitError> {
    let trimmed = text.trim();
    let without_sign = trimmed.strip_suffix('%').unwrap_or(trimmed);
    parse_decimal(text, &clean_amount(without_sign)).map(Percentage::new)
}

/// Parses a participant count: digits only, at least 1.
///
/// # Errors
///
/// - [`SplitError::InvalidCount`] if the input is not a whole number
/// - [`SplitError::InvalidParticipantCount`] if it is zero
pub fn parse_participant_count(text: &str) -> Result<usize, SplitError> {
    let trimmed = text.trim();
    let invalid = || SplitError::InvalidCount {
        input: trimmed.to_string(),
    };

    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let count: usize = trimmed.parse().map_err(|_| invalid())?;
    if count < 1 {
        return Err(SplitError::InvalidParticipantCount(count));
    }
    Ok(count)
}

/// Rejects negative amounts; never clamps them to zero.
///
/// # Errors
///
/// - [`SplitError::NegativeAmount`] if `amount` is below zero
/// - [`SplitError::AmountOutOfRange`] if `amount` exceeds [`Money::MAX_AMOUNT`]
pub fn validate_non_negative(amount: Money) -> Result<Money, SplitError> {
    if amount.is_negative() {
        return Err(SplitError::NegativeAmount(amount.amount()));
    }
    if amount.exceeds_max() {
        return Err(SplitError::AmountOutOfRange(amount.amount()));
    }
    Ok(amount)
}

/// Rejects negative percentages.
///
/// # Errors
///
/// Returns [`SplitError::NegativeAmount`] if `percentage` is below zero.
pub fn validate_non_negative_percentage(percentage: Percentage) -> Result<Percentage, SplitError> {
    if percentage.is_negative() {
        return Err(SplitError::NegativeAmount(percentage.value()));
    }
    Ok(percentage)
}

fn clean_amount(text: &str) -> String {
    let trimmed = text.trim();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest.trim_start()),
        None => ("", trimmed),
    };
    let rest = rest.strip_prefix(CURRENCY_SYMBOLS).unwrap_or(rest);

    let mut cleaned = String::with_capacity(trimmed.len());
    cleaned.push_str(sign);
    cleaned.extend(rest.chars().filter(|c| *c != ',' && !c.is_whitespace()));
    cleaned
}

fn parse_decimal(original: &str, cleaned: &str) -> Result<Decimal, SplitError> {
    let invalid = || SplitError::InvalidAmount {
        input: original.trim().to_string(),
    };

    let digits = cleaned.trim_start_matches(['-', '+']);
    if digits.is_empty() || !digits.chars().any(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    Decimal::from_str(cleaned).map_err(|_| invalid())
}
