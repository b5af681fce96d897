//! Serialized tree entries.
//!
//! The canonical recursive encoding of a subtree, carried by `set-tree`
//! operations. On the wire an entry is a JSON triple:
//!
//! ```text
//! ["leaf", key, value]
//! ["tree", key, [entry, ...]]
//! ```
//!
//! Entries produced by this crate are sorted by key at every level.

use json_tree_path::Key;
use serde_json::{Map, Value};

use crate::error::{TreeError, TreeResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Leaf { key: Key, value: Value },
    Tree { key: Key, entries: Vec<Entry> },
}

impl Entry {
    pub fn key(&self) -> &Key {
        match self {
            Entry::Leaf { key, .. } | Entry::Tree { key, .. } => key,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Entry::Leaf { .. } => "leaf",
            Entry::Tree { .. } => "tree",
        }
    }

    pub fn to_json(&self) -> Value {
        let body = match self {
            Entry::Leaf { value, .. } => value.clone(),
            Entry::Tree { entries, .. } => entries_to_json(entries),
        };
        Value::Array(vec![Value::from(self.kind()), self.key().to_json(), body])
    }

    pub fn from_json(v: &Value) -> TreeResult<Entry> {
        let triple = match v.as_array() {
            Some(items) if items.len() == 3 => items,
            _ => return Err(TreeError::InvalidEntry("entry must be a 3-element array".into())),
        };
        let key = Key::from_json(&triple[1])
            .ok_or_else(|| TreeError::InvalidEntry(format!("invalid entry key {}", triple[1])))?;
        match triple[0].as_str() {
            Some("leaf") => Ok(Entry::Leaf { key, value: triple[2].clone() }),
            Some("tree") => Ok(Entry::Tree { key, entries: entries_from_json(&triple[2])? }),
            _ => Err(TreeError::InvalidEntry(format!("unrecognized entry type {}", triple[0]))),
        }
    }

    /// The raw value this entry describes.
    pub fn to_value(&self) -> Value {
        match self {
            Entry::Leaf { value, .. } => value.clone(),
            Entry::Tree { entries, .. } => entries_to_value(entries),
        }
    }
}

pub fn entries_to_json(entries: &[Entry]) -> Value {
    Value::Array(entries.iter().map(Entry::to_json).collect())
}

pub fn entries_from_json(v: &Value) -> TreeResult<Vec<Entry>> {
    v.as_array()
        .ok_or_else(|| TreeError::InvalidEntry("entries must be an array".into()))?
        .iter()
        .map(Entry::from_json)
        .collect()
}

/// Rebuild the raw container a list of entries describes.
pub fn entries_to_value(entries: &[Entry]) -> Value {
    assemble_container(entries.iter().map(|e| (e.key().clone(), e.to_value())).collect())
}

/// Sort entries by key, the canonical order.
pub(crate) fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(|a, b| a.key().cmp(b.key()));
}

/// Turn keyed members into a raw container.
///
/// Members keyed exactly `0, 1, .., n-1` (as indices, in that order, n >= 1)
/// form an array. Anything else, including no members at all, forms an
/// object with index keys written as decimal property names.
pub(crate) fn assemble_container(members: Vec<(Key, Value)>) -> Value {
    let dense = !members.is_empty()
        && members
            .iter()
            .enumerate()
            .all(|(i, (key, _))| key.as_index() == Some(i as u64));
    if dense {
        return Value::Array(members.into_iter().map(|(_, v)| v).collect());
    }
    let mut map = Map::new();
    for (key, value) in members {
        map.insert(key.to_property(), value);
    }
    Value::Object(map)
}
