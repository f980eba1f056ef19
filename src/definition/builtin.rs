//! Built-in wizard definitions
//!
//! The `profile` wizard collects user info, preferences, an optional
//! newsletter frequency and ends on a review page.

use serde_json::json;

use super::rules::FieldRule;
use super::schema::{Condition, ConditionalDefinition, StepDefinition, WizardDefinition};

/// Name of the built-in profile wizard
pub const BUILTIN_PROFILE: &str = "profile";

/// Look up a built-in definition by name
pub fn builtin(name: &str) -> Option<WizardDefinition> {
    match name {
        BUILTIN_PROFILE => Some(profile()),
        _ => None,
    }
}

/// The profile wizard
pub fn profile() -> WizardDefinition {
    WizardDefinition {
        name: BUILTIN_PROFILE.to_string(),
        description: Some("User profile with optional newsletter subscription".to_string()),
        steps: vec![user_info(), preferences(), review()],
        conditionals: vec![ConditionalDefinition {
            after: "preferences".to_string(),
            when: Condition {
                field: "newsletter".to_string(),
                equals: json!(true),
            },
            step: newsletter(),
        }],
    }
}

fn user_info() -> StepDefinition {
    StepDefinition {
        key: "user_info".to_string(),
        title: "User Info".to_string(),
        data: Some(json!({"name": "", "email": ""})),
        rules: vec![
            FieldRule::Required {
                field: "name".to_string(),
            },
            FieldRule::Required {
                field: "email".to_string(),
            },
            FieldRule::Email {
                field: "email".to_string(),
            },
        ],
    }
}

fn preferences() -> StepDefinition {
    StepDefinition {
        key: "preferences".to_string(),
        title: "Preferences".to_string(),
        data: Some(json!({"theme": "light", "notifications": true, "newsletter": false})),
        rules: vec![FieldRule::OneOf {
            field: "theme".to_string(),
            values: vec![json!("light"), json!("dark")],
        }],
    }
}

fn newsletter() -> StepDefinition {
    StepDefinition {
        key: "newsletter".to_string(),
        title: "Newsletter Preferences".to_string(),
        data: Some(json!({"frequency": "weekly"})),
        rules: vec![FieldRule::OneOf {
            field: "frequency".to_string(),
            values: vec![json!("daily"), json!("weekly"), json!("monthly")],
        }],
    }
}

fn review() -> StepDefinition {
    StepDefinition {
        key: "review".to_string(),
        title: "Review".to_string(),
        data: None,
        rules: Vec::new(),
    }
}
