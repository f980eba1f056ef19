//! Wizard definition file format
//!
//! Definitions are YAML or JSON documents describing the steps of a wizard,
//! their initial data, their field rules and any conditional steps.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::rules::FieldRule;
use crate::error::{WizardError, WizardResult};

/// A complete wizard description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardDefinition {
    /// Wizard name, used in the journal
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Steps present from the start, in order
    pub steps: Vec<StepDefinition>,

    /// Steps that appear only while a condition holds
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditionals: Vec<ConditionalDefinition>,
}

/// One step of a definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDefinition {
    /// Unique kind key
    pub key: String,

    /// Display title
    pub title: String,

    /// Initial data; absent means unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<FieldRule>,
}

/// A step inserted after `after` while `when` holds for that step's data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalDefinition {
    /// Key of the step whose data drives the condition
    pub after: String,
    pub when: Condition,
    pub step: StepDefinition,
}

/// Field equality test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub equals: Value,
}

impl Condition {
    pub fn matches(&self, data: &Value) -> bool {
        data.get(&self.field) == Some(&self.equals)
    }
}

/// Serialization format of a definition file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Yaml,
    Json,
}

impl DefinitionFormat {
    /// Pick the format from a file extension; anything but `.json` is YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DefinitionFormat::Json,
            _ => DefinitionFormat::Yaml,
        }
    }
}

impl WizardDefinition {
    /// Parse and validate a YAML definition
    pub fn from_yaml_str(source: &str) -> WizardResult<Self> {
        let definition: WizardDefinition = serde_yaml::from_str(source)?;
        definition.validate()?;
        Ok(definition)
    }

    /// Parse and validate a JSON definition
    pub fn from_json_str(source: &str) -> WizardResult<Self> {
        let definition: WizardDefinition = serde_json::from_str(source)?;
        definition.validate()?;
        Ok(definition)
    }

    /// Load a definition file, choosing the parser by extension
    pub fn load(path: &Path) -> WizardResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            WizardError::Io(format!(
                "Failed to read definition {}: {}",
                path.display(),
                e
            ))
        })?;

        match DefinitionFormat::from_path(path) {
            DefinitionFormat::Json => Self::from_json_str(&source),
            DefinitionFormat::Yaml => Self::from_yaml_str(&source),
        }
    }

    /// Serialize in the given format
    pub fn to_string_as(&self, format: DefinitionFormat) -> WizardResult<String> {
        match format {
            DefinitionFormat::Yaml => Ok(serde_yaml::to_string(self)?),
            DefinitionFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    /// Check structural consistency
    ///
    /// # Errors
    ///
    /// Returns `WizardError::Definition` for an empty name, no steps, blank
    /// keys or titles, duplicate keys, or a conditional whose `after` does
    /// not name a regular step.
    pub fn validate(&self) -> WizardResult<()> {
        if self.name.trim().is_empty() {
            return Err(WizardError::Definition("wizard name cannot be empty".into()));
        }
        if self.steps.is_empty() {
            return Err(WizardError::Definition(format!(
                "wizard '{}' has no steps",
                self.name
            )));
        }

        let mut keys = HashSet::new();
        let all_steps = self
            .steps
            .iter()
            .chain(self.conditionals.iter().map(|c| &c.step));
        for step in all_steps {
            if step.key.trim().is_empty() {
                return Err(WizardError::Definition("step key cannot be empty".into()));
            }
            if step.title.trim().is_empty() {
                return Err(WizardError::Definition(format!(
                    "step '{}' has an empty title",
                    step.key
                )));
            }
            if !keys.insert(step.key.as_str()) {
                return Err(WizardError::Definition(format!(
                    "duplicate step key '{}'",
                    step.key
                )));
            }
        }

        for conditional in &self.conditionals {
            if !self.steps.iter().any(|s| s.key == conditional.after) {
                return Err(WizardError::Definition(format!(
                    "conditional step '{}' follows unknown step '{}'",
                    conditional.step.key, conditional.after
                )));
            }
        }

        Ok(())
    }

    /// The step with `key`, regular or conditional
    pub fn step_definition(&self, key: &str) -> Option<&StepDefinition> {
        self.steps
            .iter()
            .chain(self.conditionals.iter().map(|c| &c.step))
            .find(|step| step.key == key)
    }

    /// Rules of the step with `key`, regular or conditional
    pub fn rules_for(&self, key: &str) -> &[FieldRule] {
        self.step_definition(key)
            .map(|step| step.rules.as_slice())
            .unwrap_or(&[])
    }

    /// Initial value of `field` in the step with `key`
    pub fn initial_value(&self, key: &str, field: &str) -> Option<&Value> {
        self.step_definition(key)?.data.as_ref()?.get(field)
    }
}
