//! Order-preserving reorder policy for lists whose order carries no meaning.
//!
//! The remote system does not guarantee a stable order for logically
//! unordered data, but the property stays a list for downstream
//! compatibility. Before coercion, the remote list is re-sequenced to track
//! the prior local order as closely as possible. Correspondence is full deep
//! value equality, not hashing.

use serde_json::Value;

/// Re-sequence `remote` to follow `prior`'s element order.
///
/// Every prior element with a deep-equal remote counterpart contributes that
/// remote element, in prior order; remote elements with no prior counterpart
/// are appended afterwards in their remote order. An element whose content
/// changed therefore leaves its old position and lands at the end — callers
/// depend on that exact behavior, so it is preserved as is.
///
/// A null input returns the other input unchanged; non-array inputs return
/// the remote value unchanged (nothing to reorder).
pub fn reorder_to_prior(prior: &Value, remote: &Value) -> Value {
    if prior.is_null() {
        return remote.clone();
    }
    if remote.is_null() {
        return prior.clone();
    }

    let (prior_items, remote_items) = match (prior.as_array(), remote.as_array()) {
        (Some(p), Some(r)) => (p, r),
        _ => return remote.clone(),
    };

    let mut reordered = Vec::with_capacity(remote_items.len());
    for prior_item in prior_items {
        if let Some(remote_item) = remote_items.iter().find(|item| *item == prior_item) {
            reordered.push(remote_item.clone());
        }
    }
    for remote_item in remote_items {
        if !prior_items.iter().any(|item| item == remote_item) {
            reordered.push(remote_item.clone());
        }
    }
    Value::Array(reordered)
}

// ============================================================================
// Tests
// ============================================================================
