//! Navigation outcomes

use std::fmt;

/// Result of a navigation request.
///
/// Only `Moved` means the cursor is where the caller asked; every other
/// variant is a defined no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The cursor is now at the requested step
    Moved,
    /// `prev` at the first step
    AtStart,
    /// `next` at the last step
    AtEnd,
    /// `next` refused by the current step's validator
    Rejected,
    /// `go_to` with an index outside the step list
    OutOfRange,
    /// The sequencer has no steps
    Empty,
}

impl Outcome {
    pub fn moved(self) -> bool {
        matches!(self, Outcome::Moved)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Outcome::Moved => "moved",
            Outcome::AtStart => "already at the first step",
            Outcome::AtEnd => "already at the last step",
            Outcome::Rejected => "current step failed validation",
            Outcome::OutOfRange => "no such step",
            Outcome::Empty => "wizard has no steps",
        };
        write!(f, "{}", text)
    }
}
