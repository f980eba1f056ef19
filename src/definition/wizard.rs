//! Runtime wizard assembled from a definition

use serde_json::Value;

use super::rules::{satisfies, violations, RuleViolation};
use super::schema::{StepDefinition, WizardDefinition};
use crate::models::Step;
use crate::sequencer::{apply_policies, ConditionalStep, PolicyEffect, StepSequencer};

/// A sequencer with the conditional policies of its definition
pub struct Wizard {
    pub definition: WizardDefinition,
    pub sequencer: StepSequencer<Value>,
    pub policies: Vec<ConditionalStep<Value>>,
}

impl Wizard {
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Set the current step's data and re-evaluate the conditional steps
    pub fn set_data(&mut self, data: Value) -> Vec<(String, PolicyEffect)> {
        if !self.sequencer.set_step_data(data) {
            return Vec::new();
        }
        apply_policies(&self.policies, &mut self.sequencer)
    }

    /// Rule violations of the current step's data
    pub fn current_violations(&self) -> Vec<RuleViolation> {
        match self.sequencer.current_step() {
            Some(step) => match step.data() {
                Some(data) => violations(self.definition.rules_for(step.key()), data),
                None => Vec::new(),
            },
            None => Vec::new(),
        }
    }
}

impl WizardDefinition {
    /// Assemble a fresh wizard: every step with its initial data and a
    /// validator built from its rules.
    pub fn build(&self) -> Wizard {
        let steps = self.steps.iter().map(build_step).collect();
        let policies = self
            .conditionals
            .iter()
            .map(|conditional| {
                let condition = conditional.when.clone();
                let step = conditional.step.clone();
                ConditionalStep::new(
                    conditional.step.key.clone(),
                    move |data: &Value| condition.matches(data),
                    move || build_step(&step),
                )
                .after(conditional.after.clone())
            })
            .collect();

        Wizard {
            definition: self.clone(),
            sequencer: StepSequencer::new(steps),
            policies,
        }
    }
}

/// Build a sequencer step from its definition
pub fn build_step(def: &StepDefinition) -> Step<Value> {
    let mut step = Step::new(def.key.clone(), def.title.clone());
    if let Some(data) = &def.data {
        step = step.with_data(data.clone());
    }
    if !def.rules.is_empty() {
        let rules = def.rules.clone();
        step = step.with_validator(move |data: &Value| satisfies(&rules, data));
    }
    step
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::builtin::profile;
    use serde_json::json;

    fn keys(wizard: &Wizard) -> Vec<String> {
        wizard
            .sequencer
            .steps()
            .iter()
            .map(|s| s.key().to_string())
            .collect()
    }

    #[test]
    fn test_build_profile() {
        let wizard = profile().build();
        assert_eq!(wizard.name(), "profile");
        assert_eq!(keys(&wizard), vec!["user_info", "preferences", "review"]);
        assert_eq!(wizard.policies.len(), 1);
        assert_eq!(wizard.policies[0].trigger(), Some("preferences"));
        assert!(wizard.sequencer.step(0).unwrap().has_validator());
        assert!(!wizard.sequencer.step(2).unwrap().has_validator());
    }

    #[test]
    fn test_user_info_gates_next() {
        let mut wizard = profile().build();
        assert!(!wizard.sequencer.next());

        let found = wizard.current_violations();
        assert!(found.iter().any(|v| v.field == "name"));

        wizard.set_data(json!({"name": "Ada", "email": "not-an-email"}));
        assert!(!wizard.sequencer.next());
        assert_eq!(wizard.current_violations().len(), 1);

        wizard.set_data(json!({"name": "Ada", "email": "ada@example.com"}));
        assert!(wizard.current_violations().is_empty());
        assert!(wizard.sequencer.next());
    }

    #[test]
    fn test_newsletter_appears_and_disappears() {
        let mut wizard = profile().build();
        wizard.sequencer.go_to(1);

        let effects = wizard.set_data(json!({"theme": "dark", "notifications": true, "newsletter": true}));
        assert_eq!(effects, vec![("newsletter".to_string(), PolicyEffect::Inserted)]);
        assert_eq!(
            keys(&wizard),
            vec!["user_info", "preferences", "newsletter", "review"]
        );

        let effects = wizard.set_data(json!({"theme": "dark", "notifications": true, "newsletter": false}));
        assert_eq!(effects, vec![("newsletter".to_string(), PolicyEffect::Removed)]);
        assert_eq!(keys(&wizard), vec!["user_info", "preferences", "review"]);
    }

    #[test]
    fn test_fresh_conditional_step_has_defaults() {
        let mut wizard = profile().build();
        wizard.sequencer.go_to(1);
        wizard.set_data(json!({"theme": "light", "notifications": true, "newsletter": true}));
        wizard.sequencer.next();

        let step = wizard.sequencer.current_step().unwrap();
        assert_eq!(step.key(), "newsletter");
        assert_eq!(step.data(), Some(&json!({"frequency": "weekly"})));
    }

    #[test]
    fn test_set_data_on_empty_wizard_does_nothing() {
        let mut wizard = profile().build();
        wizard.sequencer.remove_step(|_| true);
        assert!(wizard.set_data(json!({"x": 1})).is_empty());
        assert!(wizard.current_violations().is_empty());
    }
}
