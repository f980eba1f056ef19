//! Display formatting for terminal output
//!
//! Provides plain-text formatting of steps, progress, definitions, merged
//! records and journal entries.

pub mod definition;
pub mod step;

use crate::error::WizardResult;
use crate::journal::JournalEntry;
use crate::models::Record;

pub use definition::format_definition;
pub use step::{format_current_step, format_field, format_progress, format_step_details};

/// Format a merged record as pretty JSON
pub fn format_record(record: &Record) -> WizardResult<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Format journal entries, oldest first
pub fn format_journal(entries: &[JournalEntry]) -> String {
    if entries.is_empty() {
        return "No journal entries found.\n".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&entry.format_human_readable());
        output.push('\n');
    }
    output
}
