//! Data-driven wizard definitions
//!
//! Wizards can be described in YAML or JSON files instead of code. A
//! definition lists steps with initial data and declarative field rules,
//! plus conditional steps that appear only while a field has a given value.
//!
//! Definitions are resolved by name or path:
//!
//! 1. an existing file path
//! 2. `<name>.yaml`, `<name>.yml` or `<name>.json` in the definitions directory
//! 3. a built-in definition (`profile`)

pub mod builtin;
pub mod rules;
pub mod schema;
pub mod wizard;

use std::path::Path;

use tracing::debug;

use crate::config::WizardPaths;
use crate::error::{WizardError, WizardResult};

pub use builtin::{builtin, profile, BUILTIN_PROFILE};
pub use rules::{FieldRule, RuleViolation};
pub use schema::{
    Condition, ConditionalDefinition, DefinitionFormat, StepDefinition, WizardDefinition,
};
pub use wizard::{build_step, Wizard};

/// Resolve a definition by file path, user definition name, or built-in name
pub fn resolve(name_or_path: &str, paths: &WizardPaths) -> WizardResult<WizardDefinition> {
    let path = Path::new(name_or_path);
    if path.is_file() {
        debug!(path = %path.display(), "loading definition from path");
        return WizardDefinition::load(path);
    }

    if let Some(file) = paths.definition_file(name_or_path) {
        debug!(path = %file.display(), "loading user definition");
        return WizardDefinition::load(&file);
    }

    builtin(name_or_path).ok_or_else(|| WizardError::definition_not_found(name_or_path))
}
