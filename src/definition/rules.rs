//! Declarative field rules
//!
//! A step's validator is the conjunction of its rules. Each rule looks at a
//! single top-level field of the step's record data.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Pattern accepted by the `email` rule
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
}

/// A check applied to one field of a step's data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum FieldRule {
    /// Present, non-null, not a blank string, not `false`, not an empty list
    Required { field: String },
    /// A string that looks like an email address
    Email { field: String },
    /// Equal to one of the listed values
    OneOf { field: String, values: Vec<Value> },
    /// A string of at least `min` characters
    MinLength { field: String, min: usize },
}

/// A failed rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleViolation {
    pub field: String,
    pub message: String,
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

impl FieldRule {
    /// The field the rule inspects
    pub fn field(&self) -> &str {
        match self {
            FieldRule::Required { field }
            | FieldRule::Email { field }
            | FieldRule::OneOf { field, .. }
            | FieldRule::MinLength { field, .. } => field,
        }
    }

    /// Check the rule against a step's data
    pub fn check(&self, data: &Value) -> Result<(), RuleViolation> {
        let value = data.get(self.field());
        let passed = match self {
            FieldRule::Required { .. } => match value {
                None | Some(Value::Null) => false,
                Some(Value::String(s)) => !s.trim().is_empty(),
                Some(Value::Bool(b)) => *b,
                Some(Value::Array(items)) => !items.is_empty(),
                Some(_) => true,
            },
            FieldRule::Email { .. } => value
                .and_then(Value::as_str)
                .is_some_and(|s| email_regex().is_match(s.trim())),
            FieldRule::OneOf { values, .. } => value.is_some_and(|v| values.contains(v)),
            FieldRule::MinLength { min, .. } => value
                .and_then(Value::as_str)
                .is_some_and(|s| s.chars().count() >= *min),
        };

        if passed {
            Ok(())
        } else {
            Err(RuleViolation {
                field: self.field().to_string(),
                message: self.requirement(),
            })
        }
    }

    /// Human description of what the rule requires, without the field name
    pub fn requirement(&self) -> String {
        match self {
            FieldRule::Required { .. } => "is required".to_string(),
            FieldRule::Email { .. } => "must be a valid email address".to_string(),
            FieldRule::OneOf { values, .. } => {
                let options: Vec<String> = values.iter().map(render_option).collect();
                format!("must be one of: {}", options.join(", "))
            }
            FieldRule::MinLength { min, .. } => format!("must be at least {} characters", min),
        }
    }
}

impl fmt::Display for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field(), self.requirement())
    }
}

fn render_option(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Every violation of `rules` by `data`, in rule order
pub fn violations(rules: &[FieldRule], data: &Value) -> Vec<RuleViolation> {
    rules.iter().filter_map(|rule| rule.check(data).err()).collect()
}

/// Whether `data` satisfies every rule
pub fn satisfies(rules: &[FieldRule], data: &Value) -> bool {
    rules.iter().all(|rule| rule.check(data).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn required(field: &str) -> FieldRule {
        FieldRule::Required {
            field: field.into(),
        }
    }

    #[test]
    fn test_required() {
        let rule = required("name");
        assert!(rule.check(&json!({"name": "Ada"})).is_ok());
        assert!(rule.check(&json!({"name": "   "})).is_err());
        assert!(rule.check(&json!({"name": null})).is_err());
        assert!(rule.check(&json!({})).is_err());
        assert!(rule.check(&json!({"name": 0})).is_ok());
        assert!(required("terms").check(&json!({"terms": false})).is_err());
        assert!(required("tags").check(&json!({"tags": []})).is_err());
    }

    #[test]
    fn test_email() {
        let rule = FieldRule::Email {
            field: "email".into(),
        };
        assert!(rule.check(&json!({"email": "x@y.com"})).is_ok());
        assert!(rule.check(&json!({"email": "x@y"})).is_err());
        assert!(rule.check(&json!({"email": "a b@y.com"})).is_err());
        assert!(rule.check(&json!({"email": 42})).is_err());
    }

    #[test]
    fn test_one_of() {
        let rule = FieldRule::OneOf {
            field: "theme".into(),
            values: vec![json!("light"), json!("dark")],
        };
        assert!(rule.check(&json!({"theme": "dark"})).is_ok());
        let err = rule.check(&json!({"theme": "blue"})).unwrap_err();
        assert_eq!(err.to_string(), "theme must be one of: light, dark");
    }

    #[test]
    fn test_min_length_counts_chars() {
        let rule = FieldRule::MinLength {
            field: "name".into(),
            min: 3,
        };
        assert!(rule.check(&json!({"name": "Zoë"})).is_ok());
        assert!(rule.check(&json!({"name": "Al"})).is_err());
    }

    #[test]
    fn test_violations_in_rule_order() {
        let rules = vec![
            required("name"),
            required("email"),
            FieldRule::Email {
                field: "email".into(),
            },
        ];
        let data = json!({"name": "", "email": "x@y.com"});

        let found = violations(&rules, &data);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].field, "name");
        assert!(!satisfies(&rules, &data));
        assert!(satisfies(&rules, &json!({"name": "Ada", "email": "x@y.com"})));
    }

    #[test]
    fn test_deserialize_tagged() {
        let rule: FieldRule =
            serde_yaml::from_str("{ rule: min_length, field: name, min: 2 }").unwrap();
        assert_eq!(
            rule,
            FieldRule::MinLength {
                field: "name".into(),
                min: 2
            }
        );
        assert_eq!(rule.to_string(), "name must be at least 2 characters");
    }
}
