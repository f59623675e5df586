//! Type-directed coercion of a single property value from its wire
//! representation to its canonical local-state representation.

use serde_json::Value;

use crate::error::MergeError;
use crate::schema::{PrimitiveKind, Property, PropertyKind};

use super::list::{merge_object_set, merge_ordered_object_list};
use super::object::merge_object;

/// Human-readable shape of a value, for error messages.
pub(crate) fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Coerce `remote` against the prior `local` value for one property.
///
/// Write-only properties return the local value unchanged — a remote read
/// must never leak into or overwrite a write-protected field. Null remote
/// scalars propagate as null. Object and object-collection kinds delegate
/// to the recursive mergers.
pub fn coerce_value(
    property: &Property,
    remote: &Value,
    local: &Value,
) -> Result<Value, MergeError> {
    if property.write_only {
        return Ok(local.clone());
    }

    match property.kind {
        PropertyKind::Primitive(kind) => coerce_primitive(property, kind, remote),

        PropertyKind::Object => merge_object(property, remote, local),

        PropertyKind::List => {
            if property.item_kind.is_some() {
                // Primitive elements pass through verbatim, order preserved.
                Ok(remote.clone())
            } else if property.element_schema.is_some() {
                merge_ordered_object_list(property, remote, local)
            } else {
                Err(MergeError::UnsupportedType(property.name.clone()))
            }
        }

        PropertyKind::Set => {
            if property.item_kind.is_some() {
                // Primitive equality suffices downstream; no hashing needed.
                Ok(remote.clone())
            } else if property.element_schema.is_some() {
                merge_object_set(property, remote, local)
            } else {
                Err(MergeError::UnsupportedType(property.name.clone()))
            }
        }
    }
}

fn coerce_primitive(
    property: &Property,
    kind: PrimitiveKind,
    remote: &Value,
) -> Result<Value, MergeError> {
    if remote.is_null() {
        return Ok(Value::Null);
    }

    let mismatch = |expected: &'static str| MergeError::SchemaMismatch {
        property: property.name.clone(),
        expected,
        received: shape_of(remote),
    };

    match kind {
        PrimitiveKind::String => match remote {
            Value::String(_) => Ok(remote.clone()),
            _ => Err(mismatch("string")),
        },

        // Wire payloads commonly carry every number as floating point; an
        // integer property accepts either encoding and truncates toward the
        // integer part.
        PrimitiveKind::Int => match remote {
            Value::Number(n) if n.is_i64() || n.is_u64() => Ok(remote.clone()),
            Value::Number(n) => match n.as_f64() {
                Some(f) => Ok(Value::from(f.trunc() as i64)),
                None => Err(mismatch("integer")),
            },
            _ => Err(mismatch("integer")),
        },

        PrimitiveKind::Float => match remote {
            Value::Number(_) => Ok(remote.clone()),
            _ => Err(mismatch("number")),
        },

        PrimitiveKind::Bool => match remote {
            Value::Bool(_) => Ok(remote.clone()),
            _ => Err(mismatch("boolean")),
        },
    }
}

// ============================================================================
// Tests
// ============================================================================
