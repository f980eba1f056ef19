//! The step sequencer
//!
//! Owns the ordered step list, the cursor and the step data, and enforces
//! the navigation and validation rules:
//!
//! - `next` is gated by the current step's validator
//! - `prev` and `go_to` never validate, so users can always retreat or jump
//!   through breadcrumbs
//! - structural changes keep the cursor on the same logical step

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use super::events::{Observer, SequencerEvent, SubscriptionId};
use super::outcome::Outcome;
use crate::error::{WizardError, WizardResult};
use crate::models::{merge_shallow, to_record, Record, Step, StepId};

/// Ordered steps plus a cursor.
///
/// Invariant: `current_index < steps.len()` whenever steps is non-empty,
/// and `current_index == 0` when it is empty.
pub struct StepSequencer<T> {
    steps: Vec<Step<T>>,
    current_index: usize,
    version: u64,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl<T> StepSequencer<T> {
    /// Create a sequencer positioned on the first step
    pub fn new(steps: Vec<Step<T>>) -> Self {
        Self {
            steps,
            current_index: 0,
            version: 0,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn steps(&self) -> &[Step<T>] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&Step<T>> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The step under the cursor, `None` when there are no steps
    pub fn current_step(&self) -> Option<&Step<T>> {
        self.steps.get(self.current_index)
    }

    pub fn is_first_step(&self) -> bool {
        !self.steps.is_empty() && self.current_index == 0
    }

    pub fn is_last_step(&self) -> bool {
        !self.steps.is_empty() && self.current_index == self.steps.len() - 1
    }

    /// Advance one step if the current step validates.
    ///
    /// Returns `false` when validation fails, at the last step, or when
    /// there are no steps. Use `try_next` to tell these apart.
    pub fn next(&mut self) -> bool {
        self.try_next().moved()
    }

    pub fn try_next(&mut self) -> Outcome {
        let (valid, key) = match self.current_step() {
            Some(step) => (step.is_valid(), step.key().to_string()),
            None => return Outcome::Empty,
        };

        if !valid {
            debug!(index = self.current_index, step = %key, "next refused by validator");
            self.notify(SequencerEvent::ValidationFailed {
                index: self.current_index,
                step: key,
            });
            return Outcome::Rejected;
        }

        if self.current_index + 1 >= self.steps.len() {
            return Outcome::AtEnd;
        }

        self.move_to(self.current_index + 1);
        Outcome::Moved
    }

    /// Step back one step. Never validates.
    pub fn prev(&mut self) -> bool {
        self.try_prev().moved()
    }

    pub fn try_prev(&mut self) -> Outcome {
        if self.steps.is_empty() {
            return Outcome::Empty;
        }
        if self.current_index == 0 {
            return Outcome::AtStart;
        }

        self.move_to(self.current_index - 1);
        Outcome::Moved
    }

    /// Jump straight to `index`. Never validates.
    pub fn go_to(&mut self, index: usize) -> bool {
        self.try_go_to(index).moved()
    }

    pub fn try_go_to(&mut self, index: usize) -> Outcome {
        if self.steps.is_empty() {
            return Outcome::Empty;
        }
        if index >= self.steps.len() {
            return Outcome::OutOfRange;
        }

        self.move_to(index);
        Outcome::Moved
    }

    /// Move the cursor to the step with the given identity
    pub fn select(&mut self, id: StepId) -> bool {
        match self.index_of(id) {
            Some(index) => self.go_to(index),
            None => {
                warn!(step_id = %id, "tried to select unknown step");
                false
            }
        }
    }

    /// Index of the first step matching `predicate`
    pub fn position_of(&self, predicate: impl Fn(&Step<T>) -> bool) -> Option<usize> {
        self.steps.iter().position(predicate)
    }

    /// Whether any step has the given kind key
    pub fn contains_key(&self, key: &str) -> bool {
        self.steps.iter().any(|step| step.key() == key)
    }

    /// Insert `step` right after the cursor and return its index.
    ///
    /// On an empty sequencer the step becomes the first and current step.
    pub fn insert_step_after_current(&mut self, step: Step<T>) -> usize {
        let current_id = self.current_step().map(Step::id);
        let index = if self.steps.is_empty() {
            0
        } else {
            self.current_index + 1
        };
        let key = step.key().to_string();

        self.steps.insert(index, step);
        if let Some(id) = current_id {
            self.current_index = self.index_of(id).unwrap_or(0);
        }

        debug!(index, step = %key, "step inserted");
        self.notify(SequencerEvent::StepInserted { index, step: key });
        index
    }

    /// Remove every step matching `predicate` and return how many were removed.
    ///
    /// If the current step survives, the cursor stays on it. If it is
    /// removed, the cursor moves to the first surviving step that followed
    /// it, or to the last step when none did.
    pub fn remove_step(&mut self, predicate: impl Fn(&Step<T>) -> bool) -> usize {
        if !self.steps.iter().any(&predicate) {
            return 0;
        }

        let current_id = self.current_step().map(Step::id);
        let old_index = self.current_index;

        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.steps.len());
        let mut kept_before_cursor = 0;
        for (index, step) in std::mem::take(&mut self.steps).into_iter().enumerate() {
            if predicate(&step) {
                removed.push((index, step.key().to_string()));
            } else {
                if index < old_index {
                    kept_before_cursor += 1;
                }
                kept.push(step);
            }
        }
        self.steps = kept;

        self.current_index = match current_id.and_then(|id| self.index_of(id)) {
            Some(index) => index,
            None => kept_before_cursor.min(self.steps.len().saturating_sub(1)),
        };

        let count = removed.len();
        for (index, key) in removed {
            debug!(index, step = %key, "step removed");
            self.notify(SequencerEvent::StepRemoved { index, step: key });
        }
        count
    }

    /// Return to the first step and clear every step's data.
    ///
    /// A sequencer already on its first step with no data set is left
    /// untouched and emits nothing.
    pub fn reset(&mut self) {
        if self.current_index == 0 && self.steps.iter().all(|step| step.data().is_none()) {
            return;
        }
        self.current_index = 0;
        for step in &mut self.steps {
            step.clear_data();
        }
        debug!("sequencer reset");
        self.notify(SequencerEvent::Reset);
    }

    /// Change counter, bumped on every state change
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Register an observer for every future event
    pub fn subscribe(&mut self, observer: impl FnMut(&SequencerEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Drop an observer; returns `false` if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn index_of(&self, id: StepId) -> Option<usize> {
        self.steps.iter().position(|step| step.id() == id)
    }

    fn move_to(&mut self, index: usize) {
        let from = self.current_index;
        if from == index {
            return;
        }
        self.current_index = index;
        debug!(from, to = index, "cursor moved");
        self.notify(SequencerEvent::Moved { from, to: index });
    }

    fn notify(&mut self, event: SequencerEvent) {
        if event.changes_state() {
            self.version += 1;
        }
        for (_, observer) in &mut self.observers {
            observer(&event);
        }
    }
}

impl<T: Serialize> StepSequencer<T> {
    /// Replace the current step's data. No other step is touched.
    ///
    /// Returns `false` when there are no steps.
    pub fn set_step_data(&mut self, data: T) -> bool {
        let index = self.current_index;
        let Some(step) = self.steps.get_mut(index) else {
            return false;
        };

        let after = serde_json::to_value(&data).ok();
        let before = step
            .replace_data(data)
            .and_then(|old| serde_json::to_value(&old).ok());
        let key = step.key().to_string();

        debug!(index, step = %key, "step data set");
        self.notify(SequencerEvent::DataChanged {
            index,
            step: key,
            before,
            after,
        });
        true
    }

    /// Shallow merge of every step's record data, later steps winning.
    ///
    /// Steps with unset data or data that is not a record are skipped.
    pub fn all_data(&self) -> Record {
        self.steps
            .iter()
            .filter_map(|step| step.data().and_then(to_record))
            .fold(Record::new(), |mut acc, record| {
                merge_shallow(&mut acc, record);
                acc
            })
    }

    /// Check every step and return the merged data.
    ///
    /// # Errors
    ///
    /// Returns `WizardError::Validation` naming the first step whose data
    /// fails its validator.
    pub fn submit(&self) -> WizardResult<Record> {
        if let Some(step) = self.steps.iter().find(|step| !step.is_valid()) {
            return Err(WizardError::Validation(format!(
                "step '{}' is incomplete",
                step.title()
            )));
        }
        Ok(self.all_data())
    }
}

impl<T> Default for StepSequencer<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: fmt::Debug> fmt::Debug for StepSequencer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepSequencer")
            .field("steps", &self.steps)
            .field("current_index", &self.current_index)
            .field("version", &self.version)
            .field("observers", &self.observers.len())
            .finish()
    }
}
