//! Allocation of a fixed total among participants.
//!
//! Shares are computed at full precision, rounded half-up to the minor unit
//! one by one, and the leftover drift is handed out one cent at a time so
//! the shares always sum to the rounded total.

pub mod allocator;
pub mod error;
pub mod reconciler;
pub mod types;

#[cfg(test)]
mod props;

pub use allocator::{Allocator, PERCENTAGE_TOLERANCE, validate_percentages};
pub use error::SplitError;
pub use reconciler::reconcile;
pub use types::{
    AllocationRequest, AllocationResult, Participant, SplitMethod, SplitMode, default_name,
    default_names,
};
