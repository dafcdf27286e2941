//! Interactive split session.
//!
//! A thin loop over the core: every prompt is parsed and validated with
//! `billsplit_core::input`, and the allocation itself is a single
//! [`Allocator::allocate`] call. Generic over its reader and writer so a
//! session can be driven from memory.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use billsplit_core::input::{
    parse_money, parse_participant_count, parse_percentage, validate_non_negative,
    validate_non_negative_percentage,
};
use billsplit_core::report::render_report;
use billsplit_core::split::{default_name, default_names};
use billsplit_core::{AllocationRequest, Allocator, SplitError, SplitMethod};
use billsplit_shared::{AppConfig, AppResult, Money, Percentage};
use tracing::{debug, info, warn};

use crate::export::{default_filename, export_report};

/// Counts for a finished session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Splits that produced a result.
    pub completed: usize,
    /// Splits abandoned because percentages did not sum to 100.
    pub rejected: usize,
    /// Reports written to disk.
    pub exported: Vec<PathBuf>,
}

enum SplitOutcome {
    Completed { exported: Option<PathBuf> },
    Rejected,
}

/// Interactive shell reading answers from `input` and writing prompts to
/// `output`. End of input ends the session cleanly.
pub struct Shell<R, W> {
    input: R,
    output: W,
    config: AppConfig,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Creates a shell over the given reader and writer.
    pub fn new(input: R, output: W, config: AppConfig) -> Self {
        Self {
            input,
            output,
            config,
        }
    }

    /// Runs splits until the user declines another one or input ends.
    pub fn run(&mut self) -> AppResult<SessionSummary> {
        let mut summary = SessionSummary::default();
        writeln!(self.output, "=== Bill Splitter for Groups ===")?;

        while let Some(outcome) = self.run_single_split()? {
            match outcome {
                SplitOutcome::Completed { exported } => {
                    summary.completed += 1;
                    summary.exported.extend(exported);
                }
                SplitOutcome::Rejected => summary.rejected += 1,
            }

            let Some(answer) = self.prompt("Do you want to perform another split? (Y/n): ")? else {
                break;
            };
            if answer.eq_ignore_ascii_case("n") {
                break;
            }
        }

        writeln!(self.output, "Thanks for using Bill Splitter. Goodbye!")?;
        Ok(summary)
    }

    fn run_single_split(&mut self) -> AppResult<Option<SplitOutcome>> {
        let Some(total) = self.prompt_total()? else {
            return Ok(None);
        };
        let Some(count) = self.prompt_count()? else {
            return Ok(None);
        };
        let Some(names) = self.prompt_names(count)? else {
            return Ok(None);
        };
        let Some(method) = self.prompt_method()? else {
            return Ok(None);
        };

        let request = match method {
            SplitMethod::Even => AllocationRequest::even(total, count),
            SplitMethod::ByPercentage => {
                let Some(percentages) = self.prompt_percentages(&names)? else {
                    return Ok(None);
                };
                AllocationRequest::by_percentage(total, percentages)
            }
        }
        .with_names(names);

        let result = match Allocator::allocate(&request) {
            Ok(result) => result,
            Err(SplitError::PercentageSum { sum }) => {
                writeln!(
                    self.output,
                    "Percentages sum to {sum}%. They must sum to 100%. Please re-enter split."
                )?;
                return Ok(Some(SplitOutcome::Rejected));
            }
            Err(err) => return Err(err.into()),
        };

        info!(
            method = %result.method,
            participants = result.len(),
            total = %result.total,
            residual = %result.residual,
            "Split completed"
        );

        let report = render_report(&result, self.config.report.separator_width);
        writeln!(self.output, "\n{report}\n")?;

        let exported = self.offer_export(&report)?;
        Ok(Some(SplitOutcome::Completed { exported }))
    }

    fn prompt_total(&mut self) -> AppResult<Option<Money>> {
        loop {
            let Some(line) = self.prompt("Enter total bill amount: ")? else {
                return Ok(None);
            };
            match parse_money(&line).and_then(validate_non_negative) {
                Ok(total) => return Ok(Some(total)),
                Err(SplitError::NegativeAmount(_)) => {
                    writeln!(self.output, "Amount cannot be negative. Try again.")?;
                }
                Err(SplitError::AmountOutOfRange(_)) => {
                    writeln!(
                        self.output,
                        "Amount is too large (maximum {}). Try again.",
                        Money::MAX_AMOUNT
                    )?;
                }
                Err(err) => {
                    debug!(error = %err, "Rejected total");
                    writeln!(self.output, "Invalid number. Try again (e.g. 123.45).")?;
                }
            }
        }
    }

    fn prompt_count(&mut self) -> AppResult<Option<usize>> {
        loop {
            let Some(line) = self.prompt("Enter number of people sharing the bill: ")? else {
                return Ok(None);
            };
            match parse_participant_count(&line) {
                Ok(count) => return Ok(Some(count)),
                Err(SplitError::InvalidParticipantCount(_)) => {
                    writeln!(self.output, "Please enter an integer >= 1.")?;
                }
                Err(_) => writeln!(self.output, "Please enter a positive integer.")?,
            }
        }
    }

    fn prompt_names(&mut self, count: usize) -> AppResult<Option<Vec<String>>> {
        let Some(answer) =
            self.prompt("Would you like to enter names for each person? (y/N): ")?
        else {
            return Ok(None);
        };
        if !answer.eq_ignore_ascii_case("y") {
            return Ok(Some(default_names(count)));
        }

        let mut names = Vec::with_capacity(count);
        for i in 0..count {
            let message = format!(
                "  Enter name for person #{} (leave blank for default): ",
                i + 1
            );
            let Some(name) = self.prompt(&message)? else {
                return Ok(None);
            };
            names.push(if name.is_empty() { default_name(i) } else { name });
        }
        Ok(Some(names))
    }

    fn prompt_method(&mut self) -> AppResult<Option<SplitMethod>> {
        loop {
            let Some(answer) =
                self.prompt("Split method - Even (E) or By Percentage (P)? [E/P]: ")?
            else {
                return Ok(None);
            };
            match answer.to_ascii_lowercase().as_str() {
                "e" => return Ok(Some(SplitMethod::Even)),
                "p" => return Ok(Some(SplitMethod::ByPercentage)),
                _ => writeln!(
                    self.output,
                    "Please enter 'E' for even or 'P' for percentage-based split."
                )?,
            }
        }
    }

    fn prompt_percentages(&mut self, names: &[String]) -> AppResult<Option<Vec<Percentage>>> {
        writeln!(
            self.output,
            "Enter each person's contribution percentage (values should sum to 100)."
        )?;

        let mut percentages = Vec::with_capacity(names.len());
        for name in names {
            let message = format!("  Percentage for {name}: ");
            loop {
                let Some(line) = self.prompt(&message)? else {
                    return Ok(None);
                };
                match parse_percentage(&line).and_then(validate_non_negative_percentage) {
                    Ok(percentage) => {
                        percentages.push(percentage);
                        break;
                    }
                    Err(SplitError::NegativeAmount(_)) => {
                        writeln!(self.output, "Percentage cannot be negative.")?;
                    }
                    Err(_) => writeln!(
                        self.output,
                        "Invalid percentage. Try again (e.g. 25 or 12.5)."
                    )?,
                }
            }
        }
        Ok(Some(percentages))
    }

    fn offer_export(&mut self, report: &str) -> AppResult<Option<PathBuf>> {
        let Some(answer) =
            self.prompt("Would you like to export results to a .txt file? (y/N): ")?
        else {
            return Ok(None);
        };
        if !answer.eq_ignore_ascii_case("y") {
            return Ok(None);
        }

        let default = default_filename(&self.config.export.file_prefix);
        let Some(filename) = self.prompt(&format!("Enter filename (default '{default}'): "))? else {
            return Ok(None);
        };
        let filename = if filename.is_empty() { default } else { filename };

        let directory = Path::new(&self.config.export.directory);
        match export_report(directory, &filename, report) {
            Ok(path) => {
                writeln!(self.output, "Saved to {}", path.display())?;
                Ok(Some(path))
            }
            Err(err) => {
                warn!(code = err.error_code(), error = %err, "Export failed");
                writeln!(self.output, "Could not save report: {err}")?;
                Ok(None)
            }
        }
    }

    /// Writes `message` and reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, message: &str) -> AppResult<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
