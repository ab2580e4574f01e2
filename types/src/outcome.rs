//! Result of racing the configured sources for one lookup.

use crate::Address;
use serde::Serialize;

/// Exactly one `RaceOutcome` is produced per lookup.
///
/// Failures of individual sources never surface here; the coordinator only
/// distinguishes "someone answered", "everyone reported failure" and "the
/// deadline fired first".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RaceOutcome {
    /// The first well-formed response to arrive won the race.
    Success(Address),
    /// Every source reported a failure before the deadline.
    Empty,
    /// The deadline elapsed before a success or all failures were seen.
    Timeout,
}

impl RaceOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, RaceOutcome::Success(_))
    }

    /// The winning address, if any.
    #[must_use]
    pub fn address(&self) -> Option<&Address> {
        match self {
            RaceOutcome::Success(address) => Some(address),
            RaceOutcome::Empty | RaceOutcome::Timeout => None,
        }
    }
}
