//! Structured records
//!
//! A record is a flat JSON object. Step payloads that serialize to an
//! object contribute their fields to the merged wizard result.

use serde::Serialize;
use serde_json::{Map, Value};

/// Field name to value mapping
pub type Record = Map<String, Value>;

/// Convert a payload into a record.
///
/// Returns `None` for payloads that do not serialize to a JSON object
/// (scalars, arrays, `null`) or fail to serialize at all.
pub fn to_record<T: Serialize>(data: &T) -> Option<Record> {
    match serde_json::to_value(data) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(error = %e, "step data could not be serialized");
            None
        }
    }
}

/// Shallow-merge `other` into `target`; keys in `other` win
pub fn merge_shallow(target: &mut Record, other: Record) {
    for (key, value) in other {
        target.insert(key, value);
    }
}
