//! Canonical structural hashing.
//!
//! The hash decides "same logical element" for set reconciliation,
//! independent of mapping key order. Array order stays significant, so
//! callers needing order-insensitive comparison must compare object hashes,
//! never array hashes.

use serde_json::Value;
use sha2::{Digest, Sha256};

/// Deterministic structural hash of a value tree.
///
/// Mappings hash their keys in lexicographic order, so two objects with the
/// same entries hash equally regardless of insertion order. Stable across
/// processes (SHA-256 of a canonical rendering, truncated to 64 bits).
/// Never fails.
pub fn canonical_hash(value: &Value) -> u64 {
    let mut rendered = String::new();
    render_canonical(value, &mut rendered);

    let digest = Sha256::digest(rendered.as_bytes());
    u64::from_be_bytes(digest[..8].try_into().unwrap_or_default())
}

fn render_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            for key in keys {
                out.push_str(key);
                out.push_str(&canonical_hash(&map[key]).to_string());
            }
        }
        Value::Array(items) => {
            for item in items {
                out.push_str(&canonical_hash(item).to_string());
            }
        }
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&render_number(n)),
        Value::String(s) => out.push_str(s),
    }
}

/// Wire payloads encode integers as floating point, while coerced local
/// values hold them natively; an integral float renders by its integer part
/// so `443.0` and `443` hash identically.
fn render_number(n: &serde_json::Number) -> String {
    if !n.is_i64() && !n.is_u64() {
        if let Some(f) = n.as_f64() {
            if f.fract() == 0.0 && (f as i64) as f64 == f {
                return (f as i64).to_string();
            }
        }
    }
    n.to_string()
}

// ============================================================================
// Tests
// ============================================================================
