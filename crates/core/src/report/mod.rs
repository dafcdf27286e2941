//! Plain-text rendering of allocation results.

pub mod render;

pub use render::{DEFAULT_SEPARATOR_WIDTH, render_report};
