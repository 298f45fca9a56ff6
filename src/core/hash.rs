//! Stable hash engine.
//!
//! `hash = SHA-256(stableJSON({ content, context?, id?, dataFormat }))`
//!
//! `stable_json` sorts object keys at every level, so neither key insertion
//! order nor `serde_json`'s `preserve_order` feature can change a digest.
//! Because hashing runs on the built markup tree rather than on source text,
//! file layout never reaches the digest.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use super::unit::DataFormat;

/// Serialize `value` as compact JSON with object keys sorted by byte order.
pub fn stable_json(value: &Value) -> String {
    let mut out = String::new();
    write_value(value, &mut out);
    out
}

fn write_value(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_string(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(key, out);
                out.push(':');
                write_value(&map[key.as_str()], out);
            }
            out.push('}');
        }
    }
}

fn write_string(s: &str, out: &mut String) {
    // Same escaping as JSON.stringify.
    out.push_str(&Value::from(s).to_string());
}

/// Compute the stable SHA-256 hex digest of a unit's identity.
///
/// `content` must already be canonical. Absent `context`/`id` are omitted
/// from the hashed object rather than written as `null`.
pub fn hash_source(
    content: &Value,
    context: Option<&str>,
    id: Option<&str>,
    data_format: DataFormat,
) -> String {
    let mut obj = Map::new();
    obj.insert("content".into(), content.clone());
    if let Some(context) = context {
        obj.insert("context".into(), context.into());
    }
    if let Some(id) = id {
        obj.insert("id".into(), id.into());
    }
    obj.insert("dataFormat".into(), data_format.as_str().into());

    let mut hasher = Sha256::new();
    hasher.update(stable_json(&Value::Object(obj)).as_bytes());
    hex::encode(hasher.finalize())
}
