//! Conditional step policy
//!
//! A policy inserts or removes one optional step depending on the current
//! step's data, e.g. a newsletter-frequency step that exists only while the
//! user has opted into the newsletter. Hosts apply policies explicitly after
//! calling `set_step_data`; the sequencer itself never looks at payloads.

use tracing::{debug, warn};

use super::step_sequencer::StepSequencer;
use crate::models::Step;

/// What applying a policy did to the step list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyEffect {
    Inserted,
    Removed,
    Unchanged,
}

/// Keeps an optional step present exactly while a condition holds
pub struct ConditionalStep<T> {
    key: String,
    trigger: Option<String>,
    condition: Box<dyn Fn(&T) -> bool>,
    build: Box<dyn Fn() -> Step<T>>,
}

impl<T> ConditionalStep<T> {
    /// `build` must produce a step whose key is `key`.
    pub fn new(
        key: impl Into<String>,
        condition: impl Fn(&T) -> bool + 'static,
        build: impl Fn() -> Step<T> + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            trigger: None,
            condition: Box::new(condition),
            build: Box::new(build),
        }
    }

    /// Only evaluate while the step with `trigger_key` is current
    pub fn after(mut self, trigger_key: impl Into<String>) -> Self {
        self.trigger = Some(trigger_key.into());
        self
    }

    /// Key of the step this policy manages
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Key of the step whose data drives this policy
    pub fn trigger(&self) -> Option<&str> {
        self.trigger.as_deref()
    }

    /// Evaluate the condition against the current step's data and insert or
    /// remove the managed step accordingly.
    ///
    /// Does nothing when there is no current step, the current step is not
    /// the trigger, or its data is unset.
    pub fn apply(&self, sequencer: &mut StepSequencer<T>) -> PolicyEffect {
        let wanted = match sequencer.current_step() {
            Some(current) => {
                if self.trigger.as_deref().is_some_and(|t| t != current.key()) {
                    return PolicyEffect::Unchanged;
                }
                match current.data() {
                    Some(data) => (self.condition)(data),
                    None => return PolicyEffect::Unchanged,
                }
            }
            None => return PolicyEffect::Unchanged,
        };
        let present = sequencer.contains_key(&self.key);

        match (wanted, present) {
            (true, false) => {
                let step = (self.build)();
                if step.key() != self.key {
                    warn!(expected = %self.key, actual = %step.key(), "conditional step built with a different key");
                }
                sequencer.insert_step_after_current(step);
                debug!(step = %self.key, "conditional step inserted");
                PolicyEffect::Inserted
            }
            (false, true) => {
                sequencer.remove_step(|step| step.key() == self.key);
                debug!(step = %self.key, "conditional step removed");
                PolicyEffect::Removed
            }
            _ => PolicyEffect::Unchanged,
        }
    }
}

/// Apply every policy in order, returning the effects that changed anything
pub fn apply_policies<T>(
    policies: &[ConditionalStep<T>],
    sequencer: &mut StepSequencer<T>,
) -> Vec<(String, PolicyEffect)> {
    policies
        .iter()
        .map(|policy| (policy.key().to_string(), policy.apply(sequencer)))
        .filter(|(_, effect)| *effect != PolicyEffect::Unchanged)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn newsletter_policy() -> ConditionalStep<Value> {
        ConditionalStep::new(
            "newsletter",
            |data: &Value| data["newsletter"] == json!(true),
            || Step::new("newsletter", "Newsletter").with_data(json!({"frequency": "weekly"})),
        )
        .after("preferences")
    }

    fn wizard() -> StepSequencer<Value> {
        StepSequencer::new(vec![
            Step::new("user_info", "User Info").with_data(json!({"name": "Ada"})),
            Step::new("preferences", "Preferences").with_data(json!({"newsletter": false})),
            Step::new("review", "Review"),
        ])
    }

    fn keys(seq: &StepSequencer<Value>) -> Vec<&str> {
        seq.steps().iter().map(Step::key).collect()
    }

    #[test]
    fn test_inserts_when_condition_holds() {
        let mut seq = wizard();
        let policy = newsletter_policy();
        seq.go_to(1);
        seq.set_step_data(json!({"newsletter": true}));

        assert_eq!(policy.apply(&mut seq), PolicyEffect::Inserted);
        assert_eq!(keys(&seq), vec!["user_info", "preferences", "newsletter", "review"]);
        assert_eq!(seq.current_step().unwrap().key(), "preferences");

        assert!(seq.next());
        assert_eq!(seq.current_step().unwrap().key(), "newsletter");
    }

    #[test]
    fn test_insertion_is_idempotent() {
        let mut seq = wizard();
        let policy = newsletter_policy();
        seq.go_to(1);
        seq.set_step_data(json!({"newsletter": true}));

        policy.apply(&mut seq);
        assert_eq!(policy.apply(&mut seq), PolicyEffect::Unchanged);
        assert_eq!(seq.len(), 4);
    }

    #[test]
    fn test_removes_when_condition_turns_false() {
        let mut seq = wizard();
        let policy = newsletter_policy();
        seq.go_to(1);
        seq.set_step_data(json!({"newsletter": true}));
        policy.apply(&mut seq);

        seq.set_step_data(json!({"newsletter": false}));
        assert_eq!(policy.apply(&mut seq), PolicyEffect::Removed);
        assert_eq!(keys(&seq), vec!["user_info", "preferences", "review"]);
        assert_eq!(seq.current_step().unwrap().key(), "preferences");
    }

    #[test]
    fn test_ignored_away_from_trigger() {
        let mut seq = wizard();
        let policy = newsletter_policy();
        seq.set_step_data(json!({"newsletter": true}));

        assert_eq!(policy.apply(&mut seq), PolicyEffect::Unchanged);
        assert_eq!(seq.len(), 3);
    }

    #[test]
    fn test_ignored_when_data_unset() {
        let mut seq = wizard();
        let policy = newsletter_policy();
        seq.reset();
        seq.go_to(1);
        assert_eq!(policy.apply(&mut seq), PolicyEffect::Unchanged);
    }

    #[test]
    fn test_untriggered_policy_uses_any_current_step() {
        let mut seq = wizard();
        let policy = ConditionalStep::new(
            "extra",
            |data: &Value| data.get("name").is_some(),
            || Step::new("extra", "Extra"),
        );
        assert_eq!(policy.trigger(), None);
        assert_eq!(policy.apply(&mut seq), PolicyEffect::Inserted);
        assert_eq!(seq.step(1).unwrap().key(), "extra");
    }

    #[test]
    fn test_apply_policies_reports_changes() {
        let mut seq = wizard();
        let policies = vec![newsletter_policy()];
        seq.go_to(1);
        assert!(apply_policies(&policies, &mut seq).is_empty());

        seq.set_step_data(json!({"newsletter": true}));
        assert_eq!(
            apply_policies(&policies, &mut seq),
            vec![("newsletter".to_string(), PolicyEffect::Inserted)]
        );
    }
}
