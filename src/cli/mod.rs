//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the wizard library.

pub mod definition;
pub mod journal;
pub mod run;

pub use definition::{handle_check_command, handle_init_command, handle_show_command, ShowArgs};
pub use journal::{handle_journal_command, JournalArgs};
pub use run::{handle_run_command, RunArgs};
