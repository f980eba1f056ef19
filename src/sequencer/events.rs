//! Sequencer change notifications
//!
//! Every observable state change is reported to subscribers as a
//! `SequencerEvent`. Hosts either subscribe or poll `StepSequencer::version`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Something that happened to a sequencer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SequencerEvent {
    /// The cursor moved
    Moved { from: usize, to: usize },
    /// `next` was refused because the current step's data failed its validator
    ValidationFailed { index: usize, step: String },
    /// The data of the step at `index` was replaced
    DataChanged {
        index: usize,
        step: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        before: Option<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        after: Option<Value>,
    },
    /// A step was inserted at `index`
    StepInserted { index: usize, step: String },
    /// The step formerly at `index` was removed
    StepRemoved { index: usize, step: String },
    /// Cursor returned to the first step and all data was cleared
    Reset,
}

impl SequencerEvent {
    /// Whether the event reflects a change of sequencer state.
    ///
    /// Validation refusals are reported but leave the state untouched.
    pub fn changes_state(&self) -> bool {
        !matches!(self, SequencerEvent::ValidationFailed { .. })
    }

    /// Short machine name of the event kind
    pub fn kind(&self) -> &'static str {
        match self {
            SequencerEvent::Moved { .. } => "moved",
            SequencerEvent::ValidationFailed { .. } => "validation_failed",
            SequencerEvent::DataChanged { .. } => "data_changed",
            SequencerEvent::StepInserted { .. } => "step_inserted",
            SequencerEvent::StepRemoved { .. } => "step_removed",
            SequencerEvent::Reset => "reset",
        }
    }
}

impl fmt::Display for SequencerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequencerEvent::Moved { from, to } => write!(f, "MOVED {} -> {}", from, to),
            SequencerEvent::ValidationFailed { index, step } => {
                write!(f, "VALIDATION FAILED at {} ({})", index, step)
            }
            SequencerEvent::DataChanged { index, step, .. } => {
                write!(f, "DATA CHANGED at {} ({})", index, step)
            }
            SequencerEvent::StepInserted { index, step } => {
                write!(f, "INSERTED {} at {}", step, index)
            }
            SequencerEvent::StepRemoved { index, step } => {
                write!(f, "REMOVED {} from {}", step, index)
            }
            SequencerEvent::Reset => write!(f, "RESET"),
        }
    }
}

/// Handle returned by `StepSequencer::subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

/// Callback invoked for every sequencer event
pub type Observer = Box<dyn FnMut(&SequencerEvent)>;
