//! Journal CLI command

use clap::Args;

use crate::config::WizardPaths;
use crate::display::format_journal;
use crate::error::WizardResult;
use crate::journal::JournalLogger;

/// Arguments for `wizard journal`
#[derive(Args, Debug)]
pub struct JournalArgs {
    /// Number of most recent entries to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// Handle the journal command
pub fn handle_journal_command(paths: &WizardPaths, args: JournalArgs) -> WizardResult<()> {
    let logger = JournalLogger::new(paths.journal_file());
    let entries = logger.read_recent(args.limit)?;
    print!("{}", format_journal(&entries));
    Ok(())
}
