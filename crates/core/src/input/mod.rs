//! Raw input parsing and sign validation.

pub mod parse;

pub use parse::{
    parse_money, parse_participant_count, parse_percentage, validate_non_negative,
    validate_non_negative_percentage,
};
