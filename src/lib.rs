//! wizard-cli - Multi-step wizard sequencing
//!
//! This library provides an ordered step sequencer with a cursor, validation
//! gating on forward navigation, per-step data, structural mutation that
//! keeps the cursor on the same logical step, and aggregation of all step
//! data into one record. On top of it sit data-driven wizard definitions,
//! an interactive line-oriented session and an event journal.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Steps, step IDs and the merged record type
//! - `sequencer`: The step sequencer, its events and conditional steps
//! - `definition`: YAML/JSON wizard definitions and field rules
//! - `journal`: Event journal
//! - `session`: Interactive session host
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use wizard::config::{Settings, WizardPaths};
//!
//! let paths = WizardPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let definition = wizard::definition::resolve(&settings.default_definition, &paths)?;
//! let mut wizard = definition.build();
//! ```

pub mod cli;
pub mod config;
pub mod definition;
pub mod display;
pub mod error;
pub mod journal;
pub mod logging;
pub mod models;
pub mod sequencer;
pub mod session;

pub use error::WizardError;
