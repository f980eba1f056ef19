//! Step identity
//!
//! Every step gets a random identity when it is created. The cursor follows
//! this identity across insertions and removals, so two steps with the same
//! kind key are still distinct.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque identity of a step instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(Uuid);

impl StepId {
    const PREFIX: &'static str = "stp-";

    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse a full UUID, with or without the `stp-` prefix
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        let s = s.strip_prefix(Self::PREFIX).unwrap_or(s);
        Uuid::parse_str(s).map(Self)
    }
}

impl Default for StepId {
    fn default() -> Self {
        Self::new()
    }
}

/// Short form for logs: prefix plus the first 8 hex digits
impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let simple = self.0.simple().to_string();
        write!(f, "{}{}", Self::PREFIX, &simple[..8])
    }
}

impl From<Uuid> for StepId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for StepId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
