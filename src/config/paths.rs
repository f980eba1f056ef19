//! Path management for the wizard CLI
//!
//! Provides XDG-compliant path resolution for configuration, definitions,
//! and the event journal.
//!
//! ## Path Resolution Order
//!
//! 1. `WIZARD_CLI_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/wizard-cli` or `~/.config/wizard-cli`
//! 3. Windows: `%APPDATA%\wizard-cli`

use std::path::{Path, PathBuf};

use crate::error::WizardError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "WIZARD_CLI_DATA_DIR";

/// Manages all paths used by the wizard CLI
#[derive(Debug, Clone)]
pub struct WizardPaths {
    /// Base directory for all wizard CLI files
    base_dir: PathBuf,
}

impl WizardPaths {
    /// Create a new WizardPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home or application data directory can be
    /// determined.
    pub fn new() -> Result<Self, WizardError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create WizardPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/wizard-cli/ or equivalent)
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the directory holding user wizard definitions
    pub fn definitions_dir(&self) -> PathBuf {
        self.base_dir.join("definitions")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the event journal
    pub fn journal_file(&self) -> PathBuf {
        self.base_dir.join("journal.log")
    }

    /// Resolve a definition by name inside the definitions directory.
    ///
    /// `.yaml`, `.yml` and `.json` are tried in that order; returns `None`
    /// when no such file exists.
    pub fn definition_file(&self, name: &str) -> Option<PathBuf> {
        let dir = self.definitions_dir();
        ["yaml", "yml", "json"]
            .iter()
            .map(|ext| dir.join(format!("{}.{}", name, ext)))
            .find(|path| path.is_file())
    }

    /// Ensure the base and definitions directories exist
    pub fn ensure_directories(&self) -> Result<(), WizardError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| WizardError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.definitions_dir()).map_err(|e| {
            WizardError::Io(format!("Failed to create definitions directory: {}", e))
        })?;

        Ok(())
    }

    /// Check if the CLI has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default base directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, WizardError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME")
                .map_err(|_| WizardError::Config("HOME environment variable not set".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("wizard-cli"))
}

/// Resolve the default base directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, WizardError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| WizardError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("wizard-cli"))
}
