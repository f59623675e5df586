pub mod writer;

pub use writer::{
    apply_remote_payload, apply_remote_payload_verbatim, assign_identity, extract_identifier,
};

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::StateError;

// ============================================================================
// StateStore
// ============================================================================

/// The persisted-state boundary.
///
/// The engine reads prior property values through `get`, writes merged
/// values through `set`, and records the extracted resource identifier
/// through `set_identifier`. Serializing concurrent reconciliations of the
/// same resource instance is the implementor's job; the engine assumes at
/// most one in-flight merge per instance.
pub trait StateStore {
    /// Prior value of a property, by state name. `None` when nothing was
    /// ever stored (first read).
    fn get(&self, key: &str) -> Option<Value>;

    /// Store a merged property value under its state name.
    fn set(&mut self, key: &str, value: Value) -> Result<(), StateError>;

    /// Record the resource identifier.
    fn set_identifier(&mut self, id: &str);
}

// ============================================================================
// MemoryState
// ============================================================================

/// In-memory `StateStore`, for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct MemoryState {
    values: BTreeMap<String, Value>,
    identifier: Option<String>,
}

impl MemoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a prior value, as if left behind by an earlier reconciliation.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }
}

impl StateStore for MemoryState {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StateError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn set_identifier(&mut self, id: &str) {
        self.identifier = Some(id.to_string());
    }
}

// ============================================================================
// Tests
// ============================================================================
