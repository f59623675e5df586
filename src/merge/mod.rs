//! Schema-driven merge of a remote payload tree against local state.
//!
//! The engine is purely functional: inputs are never mutated, every call
//! produces a freshly allocated merged tree, and no component holds shared
//! mutable state, so concurrent merges over independent resources sharing
//! one schema need no locking.

pub mod coerce;
pub mod hash;
pub mod list;
pub mod object;
pub mod reorder;

pub use coerce::coerce_value;
pub use hash::canonical_hash;
pub use list::{merge_object_set, merge_ordered_object_list};
pub use object::merge_object;
pub use reorder::reorder_to_prior;

use serde_json::{Map, Value};

use crate::error::MergeError;
use crate::schema::Schema;

use coerce::shape_of;

/// Merge a full remote resource tree against the prior local tree.
///
/// Coerces every schema-declared property (the identifier included) and
/// keys the output by state name. Remote properties absent from the schema
/// are skipped with a diagnostic, never an error — the schema may trail the
/// remote system's evolution.
pub fn merge_resource(
    schema: &Schema,
    remote: &Value,
    local: &Value,
) -> Result<Value, MergeError> {
    let empty = Map::new();
    let remote_map = match remote {
        Value::Null => &empty,
        Value::Object(map) => map,
        other => {
            return Err(MergeError::SchemaMismatch {
                property: "resource".to_string(),
                expected: "object",
                received: shape_of(other),
            })
        }
    };
    let local_map = local.as_object().unwrap_or(&empty);

    for name in remote_map.keys() {
        if schema.get(name).is_none() {
            tracing::warn!(
                property = name.as_str(),
                "remote payload holds a property the schema does not declare; skipping"
            );
        }
    }

    let mut merged = Map::new();
    for property in schema.iter() {
        let remote_value = remote_map.get(&property.name).unwrap_or(&Value::Null);
        let local_value = local_map.get(property.state_name()).unwrap_or(&Value::Null);
        let value = coerce_value(property, remote_value, local_value)?;
        merged.insert(property.state_name().to_string(), value);
    }
    Ok(Value::Object(merged))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{p, PrimitiveKind};
    use serde_json::json;

    fn service_schema() -> Schema {
        Schema::new(vec![
            p::int("id").identifier(),
            p::string("label"),
            p::boolean("enabled"),
            p::string("api_key").write_only(),
            p::list_of("ports", PrimitiveKind::Int),
            p::set_of_objects(
                "listeners",
                Schema::new(vec![p::string("name"), p::int("port")]),
            ),
        ])
    }

    #[test]
    fn merges_all_declared_properties() {
        let schema = service_schema();
        let remote = json!({
            "id": 42.0,
            "label": "svc",
            "enabled": true,
            "ports": [8080, 8443],
            "listeners": [{"name": "http", "port": 8080}],
        });
        let local = json!({"api_key": "kept-secret"});

        let merged = merge_resource(&schema, &remote, &local).unwrap();
        assert_eq!(merged["id"], json!(42));
        assert_eq!(merged["label"], json!("svc"));
        assert_eq!(merged["api_key"], json!("kept-secret"));
        assert_eq!(merged["ports"], json!([8080, 8443]));
        assert_eq!(merged["listeners"][0]["name"], json!("http"));
    }

    #[test]
    fn unknown_remote_properties_are_skipped_not_fatal() {
        let schema = Schema::new(vec![p::string("label")]);
        let remote = json!({"label": "svc", "added_upstream": 1});

        let merged = merge_resource(&schema, &remote, &Value::Null).unwrap();
        assert_eq!(merged, json!({"label": "svc"}));
    }

    #[test]
    fn merging_a_tree_against_itself_is_a_fixed_point() {
        let schema = service_schema();
        let remote = json!({
            "id": 42,
            "label": "svc",
            "enabled": true,
            "ports": [1, 2],
            "listeners": [{"name": "http", "port": 8080}],
        });

        let once = merge_resource(&schema, &remote, &remote).unwrap();
        let twice = merge_resource(&schema, &once, &once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn non_object_remote_tree_is_rejected() {
        let schema = service_schema();
        let err = merge_resource(&schema, &json!([1, 2]), &Value::Null).unwrap_err();
        assert!(matches!(err, MergeError::SchemaMismatch { .. }));
    }

    #[test]
    fn null_remote_tree_nulls_every_readable_property() {
        let schema = Schema::new(vec![p::string("label"), p::string("secret").write_only()]);
        let local = json!({"label": "old", "secret": "kept"});

        let merged = merge_resource(&schema, &Value::Null, &local).unwrap();
        assert!(merged["label"].is_null());
        assert_eq!(merged["secret"], json!("kept"));
    }
}
