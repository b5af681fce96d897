//! JSON codec for operations.
//!
//! Wire shape of one operation:
//!
//! ```text
//! { "type": "set" | "set-leaf" | "set-tree" | "remove",
//!   "path": [key, ...],
//!   "value": <any>,            // set, set-leaf
//!   "entries": [entry, ...] }  // set-tree
//! ```
//!
//! Path keys are JSON strings (object members) or non-negative integers
//! (indices).

use json_tree_path::{Key, Path};
use serde_json::{Map, Value};

use super::Operation;
use crate::entry::{entries_from_json, entries_to_json};
use crate::error::{TreeError, TreeResult};

// ── Path helpers ──────────────────────────────────────────────────────────

fn encode_path(path: &[Key]) -> Value {
    Value::Array(path.iter().map(Key::to_json).collect())
}

fn decode_path(v: &Value) -> TreeResult<Path> {
    v.as_array()
        .ok_or_else(|| TreeError::InvalidOperation("path must be an array".into()))?
        .iter()
        .map(|step| {
            Key::from_json(step)
                .ok_or_else(|| TreeError::InvalidOperation(format!("invalid path step {step}")))
        })
        .collect()
}

// ── Serialization ─────────────────────────────────────────────────────────

/// Serialize an [`Operation`] to its wire record.
pub fn to_json(op: &Operation) -> Value {
    let mut m = Map::new();
    m.insert("type".into(), Value::from(op.type_name()));
    m.insert("path".into(), encode_path(op.path()));
    match op {
        Operation::Set { value, .. } | Operation::SetLeaf { value, .. } => {
            m.insert("value".into(), value.clone());
        }
        Operation::SetTree { entries, .. } => {
            m.insert("entries".into(), entries_to_json(entries));
        }
        Operation::Remove { .. } => {}
    }
    Value::Object(m)
}

pub fn to_json_operations(ops: &[Operation]) -> Value {
    Value::Array(ops.iter().map(to_json).collect())
}

// ── Deserialization ───────────────────────────────────────────────────────

/// Deserialize one wire record.
///
/// # Errors
///
/// - [`TreeError::InvalidOperationType`] for a tag this version does not know.
/// - [`TreeError::InvalidOperation`] for a malformed record.
/// - [`TreeError::InvalidEntry`] for malformed `set-tree` entries.
pub fn from_json(v: &Value) -> TreeResult<Operation> {
    let obj = v
        .as_object()
        .ok_or_else(|| TreeError::InvalidOperation("operation must be an object".into()))?;
    let type_name = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| TreeError::InvalidOperation("missing 'type' field".into()))?;
    let path = decode_path(
        obj.get("path")
            .ok_or_else(|| TreeError::InvalidOperation("missing 'path' field".into()))?,
    )?;
    let value = || {
        obj.get("value")
            .cloned()
            .ok_or_else(|| TreeError::InvalidOperation(format!("{type_name} requires 'value'")))
    };

    match type_name {
        "set" => Ok(Operation::Set { path, value: value()? }),
        "set-leaf" => Ok(Operation::SetLeaf { path, value: value()? }),
        "set-tree" => {
            let entries = obj
                .get("entries")
                .ok_or_else(|| TreeError::InvalidOperation("set-tree requires 'entries'".into()))?;
            Ok(Operation::SetTree { path, entries: entries_from_json(entries)? })
        }
        "remove" => Ok(Operation::Remove { path }),
        other => Err(TreeError::InvalidOperationType(other.to_string())),
    }
}

pub fn from_json_operations(v: &Value) -> TreeResult<Vec<Operation>> {
    v.as_array()
        .ok_or_else(|| TreeError::InvalidOperation("operations must be an array".into()))?
        .iter()
        .map(from_json)
        .collect()
}
