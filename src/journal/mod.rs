//! Event journal
//!
//! Records sequencer events of interactive sessions in an append-only
//! line-delimited JSON file.
//!
//! # Architecture
//!
//! - `JournalEntry`: one event with timestamp, wizard name and, for data
//!   changes, a diff summary.
//! - `JournalLogger`: appends entries to the journal file and reads them back.
//! - `generate_diff`: top-level field diff between two step payloads.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::JournalEntry;
pub use logger::JournalLogger;
