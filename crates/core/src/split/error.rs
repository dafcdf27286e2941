//! Split error types.

use billsplit_shared::{AppError, Money};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while parsing input or allocating a total.
///
/// Every variant is recoverable: the caller re-collects the offending input
/// and submits a new request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// Input cannot be parsed as a monetary or percentage value.
    #[error("Invalid amount: '{input}' is not a number")]
    InvalidAmount {
        /// The raw input, trimmed.
        input: String,
    },

    /// A parsed amount or percentage is negative.
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    /// An amount is larger than [`Money::MAX_AMOUNT`], or summing shares
    /// overflowed.
    #[error("Amount {0} exceeds the supported maximum of {max}", max = Money::MAX_AMOUNT)]
    AmountOutOfRange(Decimal),

    /// Percentages do not sum to 100 within tolerance.
    #[error("Percentages sum to {sum}%. They must sum to 100%")]
    PercentageSum {
        /// The computed sum of the supplied percentages.
        sum: Decimal,
    },

    /// Fewer than one participant.
    #[error("Participant count must be at least 1, got {0}")]
    InvalidParticipantCount(usize),

    /// Participant count input is not a whole number.
    #[error("Invalid participant count: '{input}' is not a positive integer")]
    InvalidCount {
        /// The raw input, trimmed.
        input: String,
    },

    /// Number of supplied names differs from the participant count.
    #[error("Expected {expected} participant names, got {got}")]
    NameCountMismatch {
        /// Participant count.
        expected: usize,
        /// Names supplied.
        got: usize,
    },

    /// Shares and target were not rounded to the same granularity.
    #[error("Residual {residual} is not a whole number of minor units")]
    UnalignedResidual {
        /// The offending residual.
        residual: Decimal,
    },
}

impl SplitError {
    /// Returns the stable error code used in logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount { .. } => "INVALID_AMOUNT",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::AmountOutOfRange(_) => "AMOUNT_OUT_OF_RANGE",
            Self::PercentageSum { .. } => "PERCENTAGE_SUM",
            Self::InvalidParticipantCount(_) | Self::InvalidCount { .. } => {
                "INVALID_PARTICIPANT_COUNT"
            }
            Self::NameCountMismatch { .. } => "NAME_COUNT_MISMATCH",
            Self::UnalignedResidual { .. } => "UNALIGNED_RESIDUAL",
        }
    }
}

impl From<SplitError> for AppError {
    fn from(err: SplitError) -> Self {
        match err {
            SplitError::UnalignedResidual { .. } => Self::Internal(err.to_string()),
            _ => Self::Validation(err.to_string()),
        }
    }
}
