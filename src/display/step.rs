//! Step display formatting
//!
//! Formats the current step, the progress trail and step lists for
//! terminal output.

use serde_json::Value;

use crate::models::Step;
use crate::sequencer::StepSequencer;

/// Format the progress trail: done steps ticked, current step marked
pub fn format_progress<T>(sequencer: &StepSequencer<T>) -> String {
    if sequencer.is_empty() {
        return "No steps.\n".to_string();
    }

    let current = sequencer.current_index();
    let mut output = format!(
        "Step {} of {}\n",
        current + 1,
        sequencer.len()
    );

    for (index, step) in sequencer.steps().iter().enumerate() {
        let marker = if index == current {
            ">"
        } else if index < current {
            "x"
        } else {
            " "
        };
        output.push_str(&format!("  [{}] {}. {}\n", marker, index + 1, step.title()));
    }

    output
}

/// Format the current step with its fields
pub fn format_current_step(sequencer: &StepSequencer<Value>) -> String {
    match sequencer.current_step() {
        Some(step) => format_step_details(step, sequencer.current_index(), sequencer.len()),
        None => "No current step.\n".to_string(),
    }
}

/// Format one step's title and fields
pub fn format_step_details(step: &Step<Value>, index: usize, count: usize) -> String {
    let mut output = format!("{} ({}/{})\n", step.title(), index + 1, count);

    match step.data() {
        Some(Value::Object(fields)) if !fields.is_empty() => {
            let width = fields.keys().map(|k| k.chars().count()).max().unwrap_or(0);
            for (name, value) in fields {
                output.push_str(&format!(
                    "  {:<width$}  {}\n",
                    name,
                    format_field(value),
                    width = width
                ));
            }
        }
        Some(Value::Object(_)) | None => output.push_str("  (no fields)\n"),
        Some(other) => output.push_str(&format!("  {}\n", format_field(other))),
    }

    output
}

/// Format a field value the way a user would type it
pub fn format_field(value: &Value) -> String {
    match value {
        Value::String(s) if s.is_empty() => "(empty)".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
