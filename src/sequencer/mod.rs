//! Step sequencing and navigation
//!
//! The sequencer holds an ordered list of steps and a cursor, and exposes
//! navigation (`next`, `prev`, `go_to`), data mutation, structural mutation
//! and aggregate data retrieval.
//!
//! # Example
//!
//! ```rust
//! use serde_json::{json, Value};
//! use wizard::models::Step;
//! use wizard::sequencer::StepSequencer;
//!
//! let mut seq = StepSequencer::new(vec![
//!     Step::new("user_info", "User Info")
//!         .with_data(json!({"name": "", "email": "x@y.com"}))
//!         .with_validator(|d: &Value| d["name"] != json!("")),
//!     Step::new("review", "Review"),
//! ]);
//!
//! assert!(!seq.next());
//! seq.set_step_data(json!({"name": "Ada", "email": "x@y.com"}));
//! assert!(seq.next());
//! assert_eq!(seq.all_data()["name"], json!("Ada"));
//! ```

mod events;
mod outcome;
mod policy;
mod step_sequencer;

pub use events::{Observer, SequencerEvent, SubscriptionId};
pub use outcome::Outcome;
pub use policy::{apply_policies, ConditionalStep, PolicyEffect};
pub use step_sequencer::StepSequencer;
