//! Text report for an allocation result.

use std::fmt::Write as _;

use crate::split::AllocationResult;

pub use billsplit_shared::config::DEFAULT_SEPARATOR_WIDTH;

/// Renders a result as a plain-text report.
///
/// ```text
/// Bill Split Result
/// Method: Even
/// Total amount: 100.00
/// Number of people: 3
/// Names: Person 1, Person 2, Person 3
/// ----------------------------------------
/// Person 1: 33.34
/// Person 2: 33.33
/// Person 3: 33.33
/// ----------------------------------------
/// Total: 100.00
/// ```
#[must_use]
pub fn render_report(result: &AllocationResult, separator_width: usize) -> String {
    let separator = "-".repeat(separator_width);
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "Bill Split Result");
    let _ = writeln!(out, "Method: {}", result.method);
    let _ = writeln!(out, "Total amount: {}", result.total.round_to_minor_unit());
    let _ = writeln!(out, "Number of people: {}", result.len());
    let _ = writeln!(out, "Names: {}", result.names().join(", "));
    let _ = writeln!(out, "{separator}");
    for participant in result {
        let _ = writeln!(
            out,
            "{}: {}",
            participant.name,
            participant.share.round_to_minor_unit()
        );
    }
    let _ = writeln!(out, "{separator}");
    let _ = write!(out, "Total: {}", result.sum().round_to_minor_unit());

    out
}
