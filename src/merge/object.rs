//! Recursive object merging.
//!
//! Merges one object-typed payload value against its corresponding local
//! value, field by field, driven by the property's element schema. Handles
//! the wrapper encoding: a nested object stored locally as a single-element
//! array is unwrapped on read, and re-wrapped on write when the property's
//! policy flag asks for it.

use serde_json::{Map, Value};

use crate::error::MergeError;
use crate::schema::Property;

use super::coerce::{coerce_value, shape_of};

/// Merge an object-typed remote value against its local counterpart.
///
/// Null inputs normalize to empty mappings; a local value in the
/// single-element-array wrapper encoding is unwrapped. Fails only on a
/// non-mapping remote shape or by propagating a child coercion failure.
pub fn merge_object(
    property: &Property,
    remote: &Value,
    local: &Value,
) -> Result<Value, MergeError> {
    let element_schema = property
        .element_schema
        .as_ref()
        .ok_or_else(|| MergeError::UnsupportedType(property.name.clone()))?;

    let empty = Map::new();
    let remote_map = match remote {
        Value::Null => &empty,
        Value::Object(map) => map,
        other => {
            return Err(MergeError::SchemaMismatch {
                property: property.name.clone(),
                expected: "object",
                received: shape_of(other),
            })
        }
    };
    let local_map = unwrap_local_object(local).unwrap_or(&empty);

    let mut merged = Map::new();
    for child in element_schema.iter() {
        let remote_child = remote_map.get(&child.name).unwrap_or(&Value::Null);
        let local_child = local_map.get(child.state_name()).unwrap_or(&Value::Null);
        let value = coerce_value(child, remote_child, local_child)?;
        // Output keys follow the declared state identity, not the payload's
        // raw spelling.
        merged.insert(child.state_name().to_string(), value);
    }

    if property.wrap_nested_object {
        Ok(Value::Array(vec![Value::Object(merged)]))
    } else {
        Ok(Value::Object(merged))
    }
}

/// Local state may hold a nested object directly or as a one-element array
/// (the wrapper encoding). Any other shape reads as absent.
fn unwrap_local_object(local: &Value) -> Option<&Map<String, Value>> {
    match local {
        Value::Object(map) => Some(map),
        Value::Array(items) if items.len() == 1 => items[0].as_object(),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
