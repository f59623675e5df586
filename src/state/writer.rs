//! Applying a merged payload to persisted state, and identifier extraction.

use serde_json::{Map, Value};

use crate::error::{IdentifierError, Result};
use crate::merge::{coerce_value, reorder_to_prior};
use crate::schema::Schema;

use super::StateStore;

/// Apply a freshly fetched remote payload to local state, with the
/// order-preserving reorder policy enabled for `ignore_order` lists.
///
/// This is the state-refresh path: the stored order reflects the user's
/// prior ordering wherever the remote content still matches it.
pub fn apply_remote_payload<S: StateStore>(
    schema: &Schema,
    payload: &Map<String, Value>,
    state: &mut S,
) -> Result<()> {
    apply_with_options(schema, payload, state, true)
}

/// Apply a remote payload keeping list properties exactly in the order the
/// remote system returned them (data-source reads).
pub fn apply_remote_payload_verbatim<S: StateStore>(
    schema: &Schema,
    payload: &Map<String, Value>,
    state: &mut S,
) -> Result<()> {
    apply_with_options(schema, payload, state, false)
}

fn apply_with_options<S: StateStore>(
    schema: &Schema,
    payload: &Map<String, Value>,
    state: &mut S,
    reorder_enabled: bool,
) -> Result<()> {
    for (name, remote_value) in payload {
        let property = match schema.get(name) {
            Some(property) => property,
            None => {
                tracing::warn!(
                    property = name.as_str(),
                    "remote payload holds a property the schema does not declare; skipping"
                );
                continue;
            }
        };
        // The identifier is assigned through `assign_identity`, not stored
        // as an ordinary property.
        if property.identifier {
            continue;
        }

        let prior = state.get(property.state_name()).unwrap_or(Value::Null);

        let remote_value = if reorder_enabled && property.ignore_order {
            reorder_to_prior(&prior, remote_value)
        } else {
            remote_value.clone()
        };

        let merged = coerce_value(property, &remote_value, &prior)?;
        if !merged.is_null() {
            state.set(property.state_name(), merged)?;
        }
    }
    Ok(())
}

// ============================================================================
// Identifier extraction
// ============================================================================

/// Extract the resource identifier from a payload in canonical string form.
///
/// Integers render as base-10 digits; a floating-point identifier is
/// assumed integral even when wire-encoded as floating point, so it
/// truncates to its integer part first; strings pass through verbatim.
pub fn extract_identifier(
    schema: &Schema,
    payload: &Map<String, Value>,
) -> Result<String, IdentifierError> {
    let property = schema
        .identifier()
        .ok_or(IdentifierError::NoIdentifierProperty)?;

    let value = payload
        .get(&property.name)
        .filter(|value| !value.is_null())
        .ok_or_else(|| IdentifierError::MissingIdentifier(property.name.clone()))?;

    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Ok(u.to_string())
            } else if let Some(f) = n.as_f64() {
                Ok((f.trunc() as i64).to_string())
            } else {
                Err(IdentifierError::UnsupportedIdentifierType {
                    property: property.name.clone(),
                    received: "number",
                })
            }
        }
        Value::String(s) => Ok(s.clone()),
        other => Err(IdentifierError::UnsupportedIdentifierType {
            property: property.name.clone(),
            received: crate::merge::coerce::shape_of(other),
        }),
    }
}

/// Extract the identifier from the payload and record it on the state.
pub fn assign_identity<S: StateStore>(
    schema: &Schema,
    payload: &Map<String, Value>,
    state: &mut S,
) -> Result<()> {
    let id = extract_identifier(schema, payload)?;
    state.set_identifier(&id);
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
