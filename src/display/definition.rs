//! Definition display formatting

use crate::definition::{StepDefinition, WizardDefinition};

/// Format a definition as a step table followed by its conditional steps
pub fn format_definition(definition: &WizardDefinition) -> String {
    let mut output = format!("Wizard: {}\n", definition.name);
    if let Some(description) = &definition.description {
        output.push_str(&format!("  {}\n", description));
    }
    output.push('\n');

    let all: Vec<&StepDefinition> = definition
        .steps
        .iter()
        .chain(definition.conditionals.iter().map(|c| &c.step))
        .collect();
    let key_width = all.iter().map(|s| s.key.chars().count()).max().unwrap_or(3).max(3);
    let title_width = all.iter().map(|s| s.title.chars().count()).max().unwrap_or(5).max(5);

    output.push_str(&format!(
        "{:>2}  {:<key_width$}  {:<title_width$}  {}\n",
        "#",
        "Key",
        "Title",
        "Rules",
        key_width = key_width,
        title_width = title_width,
    ));
    output.push_str(&format!(
        "{:->2}  {:-<key_width$}  {:-<title_width$}  {:-<5}\n",
        "",
        "",
        "",
        "",
        key_width = key_width,
        title_width = title_width,
    ));

    for (index, step) in definition.steps.iter().enumerate() {
        output.push_str(&format!(
            "{:>2}  {:<key_width$}  {:<title_width$}  {}\n",
            index + 1,
            step.key,
            step.title,
            format_rules(step),
            key_width = key_width,
            title_width = title_width,
        ));
    }

    if !definition.conditionals.is_empty() {
        output.push_str("\nConditional steps:\n");
        for conditional in &definition.conditionals {
            output.push_str(&format!(
                "  {} ({}) after '{}' when {} = {}\n",
                conditional.step.title,
                conditional.step.key,
                conditional.after,
                conditional.when.field,
                conditional.when.equals,
            ));
            if !conditional.step.rules.is_empty() {
                output.push_str(&format!("    Rules: {}\n", format_rules(&conditional.step)));
            }
        }
    }

    output
}

fn format_rules(step: &StepDefinition) -> String {
    if step.rules.is_empty() {
        return "-".to_string();
    }
    step.rules
        .iter()
        .map(|rule| rule.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
