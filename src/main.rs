use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use wizard::cli::{
    handle_check_command, handle_init_command, handle_journal_command, handle_run_command,
    handle_show_command, JournalArgs, RunArgs, ShowArgs,
};
use wizard::config::{Settings, WizardPaths};
use wizard::logging::init_logging;

#[derive(Parser)]
#[command(
    name = "wizard",
    author = "Kaylee Beyene",
    version,
    about = "Multi-step wizards in the terminal",
    long_about = "wizard-cli walks you through multi-step forms defined in YAML or \
                  JSON. Each step validates before you move on, steps can appear \
                  or disappear based on your answers, and everything you enter is \
                  collected into a single record at the end."
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a wizard interactively
    Run(RunArgs),

    /// Show the steps, rules and conditional steps of a definition
    Show(ShowArgs),

    /// Load and validate a definition file
    Check {
        /// Path to a YAML or JSON definition
        path: PathBuf,
    },

    /// Show recent journal entries
    Journal(JournalArgs),

    /// Write default settings and the built-in definition
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = WizardPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    init_logging(&settings, cli.debug)?;

    match cli.command {
        Some(Commands::Run(args)) => handle_run_command(&paths, &settings, args)?,
        Some(Commands::Show(args)) => handle_show_command(&paths, &settings, args)?,
        Some(Commands::Check { path }) => handle_check_command(&path)?,
        Some(Commands::Journal(args)) => handle_journal_command(&paths, args)?,
        Some(Commands::Init) => handle_init_command(&paths, &settings)?,
        Some(Commands::Config) => {
            println!("wizard-cli Configuration");
            println!("========================");
            println!("Base directory:        {}", paths.base_dir().display());
            println!("Definitions directory: {}", paths.definitions_dir().display());
            println!("Settings file:         {}", paths.settings_file().display());
            println!("Journal file:          {}", paths.journal_file().display());
            println!();
            println!("Settings:");
            println!("  Log level:          {}", settings.log_level);
            println!("  Journal enabled:    {}", settings.journal_enabled);
            println!("  Default definition: {}", settings.default_definition);
        }
        None => {
            println!("wizard-cli - Multi-step wizards in the terminal");
            println!();
            println!("Run 'wizard --help' for usage information.");
            println!("Run 'wizard run' to start the default wizard.");
        }
    }

    Ok(())
}
