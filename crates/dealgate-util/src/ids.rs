//! Strongly-typed identifiers for dealgate

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for an entity that can be offered a deal (usually a customer)
///
/// Assigned by the host. The gate never inspects the contents beyond
/// equality and ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fallback identifier for an entity the host could not name
    pub fn from_fallback_key(key: u64) -> Self {
        Self(format!("Customer_{}", key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
