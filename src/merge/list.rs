//! Collection reconciliation for object-typed elements.
//!
//! Ordered lists pair elements positionally — when order is significant,
//! position is identity. Unordered sets pair elements by canonical hash of
//! the raw (pre-merge) values, so a remote element finds "the same" local
//! element regardless of where either sits in its collection.

use serde_json::Value;

use crate::error::MergeError;
use crate::schema::Property;

use super::coerce::shape_of;
use super::hash::canonical_hash;
use super::object::merge_object;

/// Positional reconciliation of an order-significant object list.
///
/// Walks `0..max(len(remote), len(local))`, merging the element pair at
/// each index (absent sides read as null). Output order is index order.
pub fn merge_ordered_object_list(
    property: &Property,
    remote: &Value,
    local: &Value,
) -> Result<Value, MergeError> {
    let remote_items = collection_items(property, remote)?;
    let local_items = local.as_array().map(Vec::as_slice).unwrap_or(&[]);

    let len = remote_items.len().max(local_items.len());
    let mut merged = Vec::with_capacity(len);
    for index in 0..len {
        let remote_item = remote_items.get(index).unwrap_or(&Value::Null);
        let local_item = local_items.get(index).unwrap_or(&Value::Null);
        merged.push(merge_object(property, remote_item, local_item)?);
    }
    Ok(Value::Array(merged))
}

/// Hash-based reconciliation of an order-insignificant object set.
///
/// Every remote element seeks the first local element with an equal
/// canonical hash (scanning in local order) and merges against it, or
/// against null prior state when nothing matches. Output order is remote
/// traversal order; local elements without a remote counterpart are
/// dropped — absence in the remote payload is authoritative removal.
///
/// The scan is O(|remote| x |local|) hash comparisons; collections in this
/// domain hold tens of elements, so no index structure is kept.
pub fn merge_object_set(
    property: &Property,
    remote: &Value,
    local: &Value,
) -> Result<Value, MergeError> {
    let remote_items = collection_items(property, remote)?;
    let local_items = local.as_array().map(Vec::as_slice).unwrap_or(&[]);

    let local_hashes: Vec<u64> = local_items.iter().map(canonical_hash).collect();

    let mut merged = Vec::with_capacity(remote_items.len());
    for remote_item in remote_items {
        let remote_hash = canonical_hash(remote_item);
        let matched = local_hashes
            .iter()
            .position(|&local_hash| local_hash == remote_hash)
            .map(|index| &local_items[index]);

        let prior = matched.unwrap_or(&Value::Null);
        merged.push(merge_object(property, remote_item, prior)?);
    }
    Ok(Value::Array(merged))
}

fn collection_items<'a>(
    property: &Property,
    remote: &'a Value,
) -> Result<&'a [Value], MergeError> {
    match remote {
        Value::Null => Ok(&[]),
        Value::Array(items) => Ok(items),
        other => Err(MergeError::SchemaMismatch {
            property: property.name.clone(),
            expected: "array",
            received: shape_of(other),
        }),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{p, Schema};
    use serde_json::json;

    fn listeners(kind: fn(&'static str, Schema) -> Property) -> Property {
        kind(
            "listeners",
            Schema::new(vec![
                p::string("name"),
                p::int("port"),
                p::string("cert").write_only(),
            ]),
        )
    }

    fn ordered_listeners() -> Property {
        listeners(|name, schema| p::list_of_objects(name, schema))
    }

    fn listener_set() -> Property {
        listeners(|name, schema| p::set_of_objects(name, schema))
    }

    // --- positional lists ---

    #[test]
    fn positional_merge_pairs_by_index() {
        let property = ordered_listeners();
        let remote = json!([
            {"name": "a", "port": 80.0},
            {"name": "b", "port": 443.0},
        ]);
        let local = json!([
            {"name": "a", "port": 80, "cert": "cert-a"},
            {"name": "b", "port": 443, "cert": "cert-b"},
        ]);

        let merged = merge_ordered_object_list(&property, &remote, &local).unwrap();
        let items = merged.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["cert"], json!("cert-a"));
        assert_eq!(items[1]["cert"], json!("cert-b"));
        assert_eq!(items[1]["port"], json!(443));
    }

    #[test]
    fn positional_merge_covers_the_longer_side() {
        let property = ordered_listeners();
        let remote = json!([{"name": "a", "port": 80}]);
        let local = json!([
            {"name": "a", "port": 80, "cert": "cert-a"},
            {"name": "b", "port": 443, "cert": "cert-b"},
        ]);

        let merged = merge_ordered_object_list(&property, &remote, &local).unwrap();
        let items = merged.as_array().unwrap();
        // Index 1 merges a null remote against the surviving local element.
        assert_eq!(items.len(), 2);
        assert!(items[1]["name"].is_null());
        assert_eq!(items[1]["cert"], json!("cert-b"));
    }

    #[test]
    fn positional_merge_of_list_against_itself_is_identity() {
        let property = ordered_listeners();
        let value = json!([
            {"name": "a", "port": 80, "cert": "c1"},
            {"name": "b", "port": 443, "cert": "c2"},
        ]);

        let merged = merge_ordered_object_list(&property, &value, &value).unwrap();
        assert_eq!(merged, value);
    }

    #[test]
    fn positional_merge_rejects_non_array_remote() {
        let property = ordered_listeners();
        let err =
            merge_ordered_object_list(&property, &json!({"name": "a"}), &Value::Null).unwrap_err();
        assert!(matches!(
            err,
            MergeError::SchemaMismatch { expected: "array", .. }
        ));
    }

    // --- hash-matched sets ---

    #[test]
    fn set_merge_matches_reordered_elements() {
        let property = listener_set();
        let local = json!([
            {"name": "a", "port": 1, "cert": "cert-a"},
            {"name": "b", "port": 2, "cert": "cert-b"},
        ]);
        // Matching hashes the raw element values, so the fixture keeps each
        // surviving element byte-for-byte identical across both sides.
        let remote = json!([
            {"name": "b", "port": 2, "cert": "cert-b"},
            {"name": "a", "port": 1, "cert": "cert-a"},
            {"name": "c", "port": 3, "cert": "cert-c"},
        ]);

        let merged = merge_object_set(&property, &remote, &local).unwrap();
        let items = merged.as_array().unwrap();
        assert_eq!(items.len(), 3);

        // Remote traversal order is preserved; matched elements resolved
        // against their local counterparts keep the write-only field.
        assert_eq!(items[0]["name"], json!("b"));
        assert_eq!(items[0]["cert"], json!("cert-b"));
        assert_eq!(items[1]["name"], json!("a"));
        assert_eq!(items[1]["cert"], json!("cert-a"));
        // The newly appeared element merged against a null prior: its
        // write-only field has no local value to keep.
        assert_eq!(items[2]["name"], json!("c"));
        assert!(items[2]["cert"].is_null());
    }

    #[test]
    fn set_merge_keeps_every_remote_element() {
        let property = listener_set();
        let remote = json!([
            {"name": "a", "port": 1},
            {"name": "b", "port": 2},
        ]);

        let merged = merge_object_set(&property, &remote, &Value::Null).unwrap();
        assert_eq!(merged.as_array().unwrap().len(), 2);
    }

    #[test]
    fn set_merge_drops_local_only_elements() {
        let property = listener_set();
        let local = json!([
            {"name": "gone", "port": 9, "cert": "cert-gone"},
        ]);
        let remote = json!([{"name": "kept", "port": 1}]);

        let merged = merge_object_set(&property, &remote, &local).unwrap();
        let items = merged.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["name"], json!("kept"));
    }

    #[test]
    fn set_merge_matches_float_encoded_remote_against_coerced_local() {
        // Local state holds the integer the previous sync coerced; the next
        // remote read renders the same port as floating point. The pair must
        // still hash-match, or the write-only field would come back null.
        let property = listener_set();
        let local = json!([{"name": "https", "port": 443, "cert": "kept"}]);
        let remote = json!([{"name": "https", "port": 443.0, "cert": "kept"}]);

        let merged = merge_object_set(&property, &remote, &local).unwrap();
        let items = merged.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["cert"], json!("kept"));
        assert_eq!(items[0]["port"], json!(443));
    }

    #[test]
    fn set_merge_is_insensitive_to_key_order_in_elements() {
        let property = listener_set();
        let local: Value =
            serde_json::from_str(r#"[{"port": 1, "name": "a", "cert": "cert-a"}]"#).unwrap();
        let remote: Value =
            serde_json::from_str(r#"[{"name": "a", "cert": "cert-a", "port": 1}]"#).unwrap();

        let merged = merge_object_set(&property, &remote, &local).unwrap();
        let items = merged.as_array().unwrap();
        assert_eq!(items[0]["cert"], json!("cert-a"));
    }

    #[test]
    fn set_merge_null_remote_yields_empty() {
        let property = listener_set();
        let local = json!([{"name": "a", "port": 1, "cert": "x"}]);
        let merged = merge_object_set(&property, &Value::Null, &local).unwrap();
        assert_eq!(merged, json!([]));
    }
}
