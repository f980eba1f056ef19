//! Definition CLI commands
//!
//! Implements `show`, `check` and `init`.

use std::path::Path;

use clap::Args;

use crate::config::{Settings, WizardPaths};
use crate::definition::{profile, resolve, DefinitionFormat, WizardDefinition};
use crate::display::format_definition;
use crate::error::{WizardError, WizardResult};

/// Arguments for `wizard show`
#[derive(Args, Debug, Default)]
pub struct ShowArgs {
    /// Definition file path or name (defaults to the configured definition)
    #[arg(short, long)]
    pub definition: Option<String>,

    /// Print the definition source instead of a table (yaml, json)
    #[arg(short, long)]
    pub format: Option<String>,
}

fn parse_format(format: &str) -> WizardResult<DefinitionFormat> {
    match format.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(DefinitionFormat::Yaml),
        "json" => Ok(DefinitionFormat::Json),
        other => Err(WizardError::Validation(format!(
            "Invalid format: '{}'. Valid formats: yaml, json",
            other
        ))),
    }
}

/// Handle the show command
pub fn handle_show_command(
    paths: &WizardPaths,
    settings: &Settings,
    args: ShowArgs,
) -> WizardResult<()> {
    let name = args
        .definition
        .unwrap_or_else(|| settings.default_definition.clone());
    let definition = resolve(&name, paths)?;

    match args.format {
        Some(format) => {
            let format = parse_format(&format)?;
            print!("{}", definition.to_string_as(format)?);
            if format == DefinitionFormat::Json {
                println!();
            }
        }
        None => print!("{}", format_definition(&definition)),
    }

    Ok(())
}

/// Handle the check command
pub fn handle_check_command(path: &Path) -> WizardResult<()> {
    let definition = WizardDefinition::load(path)?;

    let conditionals = definition.conditionals.len();
    println!(
        "OK: '{}' defines {} step{} and {} conditional step{}",
        definition.name,
        definition.steps.len(),
        if definition.steps.len() == 1 { "" } else { "s" },
        conditionals,
        if conditionals == 1 { "" } else { "s" },
    );

    Ok(())
}

/// Handle the init command
///
/// Writes default settings and the built-in profile definition. Existing
/// files are left untouched.
pub fn handle_init_command(paths: &WizardPaths, settings: &Settings) -> WizardResult<()> {
    println!("Initializing wizard-cli at: {}", paths.base_dir().display());

    if paths.is_initialized() {
        println!("Settings already exist: {}", paths.settings_file().display());
    } else {
        settings.save(paths)?;
        println!("Wrote settings: {}", paths.settings_file().display());
    }

    paths.ensure_directories()?;
    let definition = profile();
    let target = paths
        .definitions_dir()
        .join(format!("{}.yaml", definition.name));
    if target.exists() {
        println!("Definition already exists: {}", target.display());
    } else {
        let source = definition.to_string_as(DefinitionFormat::Yaml)?;
        std::fs::write(&target, source)
            .map_err(|e| WizardError::Io(format!("Failed to write definition: {}", e)))?;
        println!("Wrote definition: {}", target.display());
    }

    println!();
    println!("Run 'wizard run' to start the '{}' wizard.", settings.default_definition);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format("YAML").unwrap(), DefinitionFormat::Yaml);
        assert_eq!(parse_format("json").unwrap(), DefinitionFormat::Json);
        assert!(parse_format("toml").unwrap_err().is_validation());
    }

    #[test]
    fn test_init_writes_loadable_definition() {
        let temp_dir = TempDir::new().unwrap();
        let paths = WizardPaths::with_base_dir(temp_dir.path().to_path_buf());

        handle_init_command(&paths, &Settings::default()).unwrap();

        assert!(paths.is_initialized());
        let file = paths.definition_file("profile").unwrap();
        assert_eq!(WizardDefinition::load(&file).unwrap(), profile());

        // second run keeps existing files
        handle_init_command(&paths, &Settings::default()).unwrap();
    }
}
