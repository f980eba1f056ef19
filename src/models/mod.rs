//! Core data models for the wizard engine
//!
//! This module contains the building blocks the sequencer works on:
//! - Step identity
//! - Steps with their payload and validator
//! - Structured records used for the merged result

pub mod ids;
pub mod record;
pub mod step;

pub use ids::StepId;
pub use record::{merge_shallow, to_record, Record};
pub use step::{Step, Validator};
