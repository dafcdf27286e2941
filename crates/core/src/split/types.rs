//! Allocation request and result types.

use std::fmt;

use billsplit_shared::{Money, Percentage};
use serde::{Deserialize, Serialize};

/// How a total is divided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMethod {
    /// Every participant owes the same share.
    Even,
    /// Each participant owes an assigned percentage.
    ByPercentage,
}

impl SplitMethod {
    /// Human-readable label used in reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Even => "Even",
            Self::ByPercentage => "By Percentage",
        }
    }
}

impl fmt::Display for SplitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Split mode together with its per-mode inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    /// Even split among `participants` people.
    Even {
        /// Number of participants.
        participants: usize,
    },
    /// One percentage per participant, in order.
    ByPercentage(Vec<Percentage>),
}

impl SplitMode {
    /// Number of participants implied by the mode.
    #[must_use]
    pub fn participant_count(&self) -> usize {
        match self {
            Self::Even { participants } => *participants,
            Self::ByPercentage(percentages) => percentages.len(),
        }
    }

    /// The split method of this mode.
    #[must_use]
    pub const fn method(&self) -> SplitMethod {
        match self {
            Self::Even { .. } => SplitMethod::Even,
            Self::ByPercentage(_) => SplitMethod::ByPercentage,
        }
    }
}

/// Input for a single allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// Total to allocate. Must be non-negative.
    pub total: Money,
    /// Even or percentage mode.
    pub mode: SplitMode,
    /// Optional participant names; defaults are generated when absent.
    pub names: Option<Vec<String>>,
}

impl AllocationRequest {
    /// Creates an even-split request.
    #[must_use]
    pub fn even(total: Money, participants: usize) -> Self {
        Self {
            total,
            mode: SplitMode::Even { participants },
            names: None,
        }
    }

    /// Creates a percentage-split request.
    #[must_use]
    pub fn by_percentage(total: Money, percentages: Vec<Percentage>) -> Self {
        Self {
            total,
            mode: SplitMode::ByPercentage(percentages),
            names: None,
        }
    }

    /// Attaches participant names, in participant order.
    #[must_use]
    pub fn with_names(mut self, names: Vec<String>) -> Self {
        self.names = Some(names);
        self
    }

    /// Number of participants in this request.
    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.mode.participant_count()
    }
}

/// A participant and the share they owe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Display name. Not required to be unique.
    pub name: String,
    /// Allocated share, rounded to the minor unit.
    pub share: Money,
}

/// Outcome of an allocation.
///
/// Invariant: the shares sum exactly to `total`, which is the requested
/// total rounded half-up to the minor unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// Method used.
    pub method: SplitMethod,
    /// The rounded total the shares add up to.
    pub total: Money,
    /// Rounding drift that was redistributed (`total - sum(rounded shares)`
    /// before reconciliation).
    pub residual: Money,
    /// Participants in request order.
    pub participants: Vec<Participant>,
}

impl AllocationResult {
    /// Number of participants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// True if there are no participants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Sum of all shares.
    #[must_use]
    pub fn sum(&self) -> Money {
        self.participants.iter().map(|p| p.share).sum()
    }

    /// Shares in participant order.
    #[must_use]
    pub fn shares(&self) -> Vec<Money> {
        self.participants.iter().map(|p| p.share).collect()
    }

    /// Names in participant order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.participants.iter().map(|p| p.name.as_str()).collect()
    }

    /// Iterates over participants in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Participant> {
        self.participants.iter()
    }
}

impl<'a> IntoIterator for &'a AllocationResult {
    type Item = &'a Participant;
    type IntoIter = std::slice::Iter<'a, Participant>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Default name of the participant at zero-based `index` ("Person 1", ...).
#[must_use]
pub fn default_name(index: usize) -> String {
    format!("Person {}", index + 1)
}

/// Default names for `count` participants.
#[must_use]
pub fn default_names(count: usize) -> Vec<String> {
    (0..count).map(default_name).collect()
}
