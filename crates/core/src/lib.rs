//! Core business logic for Billsplit.
//!
//! This crate contains pure allocation logic with ZERO file or terminal
//! dependencies. Everything here is a deterministic function of its inputs.
//!
//! # Modules
//!
//! - `split` - Even and percentage allocation with exact-sum reconciliation
//! - `input` - Parsing and sign validation of raw user input
//! - `report` - Plain-text rendering of allocation results

pub mod input;
pub mod report;
pub mod split;

pub use split::{
    AllocationRequest, AllocationResult, Allocator, Participant, SplitError, SplitMethod,
    SplitMode,
};
