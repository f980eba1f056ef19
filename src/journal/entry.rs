//! Journal entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::diff::generate_diff;
use crate::sequencer::SequencerEvent;

/// A single journal entry
///
/// Records one sequencer event of a named wizard, with a diff summary for
/// data changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// When the event occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Name of the wizard the event belongs to
    pub wizard: String,

    /// The event itself
    pub event: SequencerEvent,

    /// Human-readable diff summary for data changes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl JournalEntry {
    /// Create an entry stamped with the current time
    pub fn new(wizard: impl Into<String>, event: SequencerEvent) -> Self {
        let diff_summary = match &event {
            SequencerEvent::DataChanged { before, after, .. } => {
                let empty = Value::Object(Default::default());
                generate_diff(
                    before.as_ref().unwrap_or(&empty),
                    after.as_ref().unwrap_or(&empty),
                )
            }
            _ => None,
        };

        Self {
            timestamp: Utc::now(),
            wizard: wizard.into(),
            event,
            diff_summary,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.wizard,
            self.event
        );

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_change_gets_diff() {
        let entry = JournalEntry::new(
            "profile",
            SequencerEvent::DataChanged {
                index: 1,
                step: "preferences".into(),
                before: Some(json!({"newsletter": false})),
                after: Some(json!({"newsletter": true})),
            },
        );
        assert_eq!(
            entry.diff_summary.as_deref(),
            Some("newsletter: false -> true")
        );
    }

    #[test]
    fn test_first_data_counts_as_added_fields() {
        let entry = JournalEntry::new(
            "profile",
            SequencerEvent::DataChanged {
                index: 2,
                step: "review".into(),
                before: None,
                after: Some(json!({"ok": true})),
            },
        );
        assert_eq!(entry.diff_summary.as_deref(), Some("ok: (added) -> true"));
    }

    #[test]
    fn test_navigation_has_no_diff() {
        let entry = JournalEntry::new("profile", SequencerEvent::Moved { from: 0, to: 1 });
        assert!(entry.diff_summary.is_none());
    }

    #[test]
    fn test_serialization() {
        let entry = JournalEntry::new("profile", SequencerEvent::Reset);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains(r#""event":{"event":"reset"}"#));

        let back: JournalEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.event, SequencerEvent::Reset);
        assert_eq!(back.wizard, "profile");
    }

    #[test]
    fn test_human_readable_format() {
        let entry = JournalEntry::new(
            "profile",
            SequencerEvent::DataChanged {
                index: 0,
                step: "user_info".into(),
                before: Some(json!({"name": ""})),
                after: Some(json!({"name": "Ada"})),
            },
        );

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("profile"));
        assert!(formatted.contains("DATA CHANGED at 0 (user_info)"));
        assert!(formatted.contains("Changes: name: \"\" -> \"Ada\""));
    }
}
