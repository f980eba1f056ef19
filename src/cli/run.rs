//! Run CLI command
//!
//! Starts an interactive session on stdin/stdout.

use clap::Args;
use tracing::info;

use crate::config::{Settings, WizardPaths};
use crate::definition::resolve;
use crate::error::WizardResult;
use crate::journal::JournalLogger;
use crate::session::{SessionOutcome, WizardSession};

/// Arguments for `wizard run`
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Definition file path or name (defaults to the configured definition)
    #[arg(short, long)]
    pub definition: Option<String>,

    /// Do not record this session in the journal
    #[arg(long)]
    pub no_journal: bool,
}

/// Handle the run command
pub fn handle_run_command(
    paths: &WizardPaths,
    settings: &Settings,
    args: RunArgs,
) -> WizardResult<()> {
    let name = args
        .definition
        .unwrap_or_else(|| settings.default_definition.clone());
    let definition = resolve(&name, paths)?;
    info!(wizard = %definition.name, steps = definition.steps.len(), "starting session");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = WizardSession::new(definition.build(), stdin.lock(), stdout.lock());

    if settings.journal_enabled && !args.no_journal {
        paths.ensure_directories()?;
        session = session.with_journal(JournalLogger::new(paths.journal_file()));
    }

    match session.run()? {
        SessionOutcome::Submitted(record) => {
            info!(fields = record.len(), "wizard submitted");
        }
        SessionOutcome::Quit => {
            println!("Wizard closed without submitting.");
        }
    }

    Ok(())
}
