//! Raw-value realization of the node contract.
//!
//! Works on [`serde_json::Value`] in place. Objects and arrays are
//! containers, everything else is a leaf. No child objects are kept:
//! children are borrowed straight out of the native mapping whenever the
//! algorithms (or a [`ValueView`]) ask for them.
//!
//! Keys are coerced the way property access works on raw JSON: an index
//! key on an object addresses the decimal property name, and a string key
//! on an array addresses the index it spells.
//!
//! Arrays stay dense. Writing at index `len` appends and writing further
//! out is a [`TreeError::TypeMismatch`]; removing index `i` truncates the
//! array to length `i`. Array additions coming out of the diff always land
//! at the current end, and array removals are always a trailing run in
//! ascending order, so both are reproduced exactly.

use std::cmp::Ordering;

use json_tree_path::{child_path, Key, Path};
use serde_json::{Map, Value};

use crate::entry::{entries_to_value, Entry};
use crate::error::{TreeError, TreeResult};
use crate::json_stable::stringify;
use crate::operation::Operation;
use crate::storage::{NodeRef, NodeSource, TreeSource, TreeTarget};

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

fn lookup<'a>(value: &'a Value, key: &Key) -> Option<&'a Value> {
    match (value, key) {
        (Value::Object(map), Key::Str(s)) => map.get(s.as_str()),
        (Value::Object(map), Key::Index(i)) => map.get(&i.to_string()),
        (Value::Array(items), key) => items.get(key.to_index()?),
        _ => None,
    }
}

fn lookup_mut<'a>(value: &'a mut Value, key: &Key) -> Option<&'a mut Value> {
    match value {
        Value::Object(map) => map.get_mut(&key.to_property()),
        Value::Array(items) => items.get_mut(key.to_index()?),
        _ => None,
    }
}

impl TreeSource for Value {
    type Node = Value;

    fn children(&self) -> Vec<(Key, &Value)> {
        match self {
            Value::Object(map) => map.iter().map(|(k, v)| (Key::Str(k.clone()), v)).collect(),
            Value::Array(items) => items.iter().enumerate().map(|(i, v)| (Key::from(i), v)).collect(),
            _ => Vec::new(),
        }
    }

    fn child(&self, key: &Key) -> Option<&Value> {
        lookup(self, key)
    }

    /// An object never diffs member by member against an array.
    fn same_shape(&self, other: &Value) -> bool {
        matches!(
            (self, other),
            (Value::Object(_), Value::Object(_)) | (Value::Array(_), Value::Array(_))
        )
    }
}

impl NodeSource for Value {
    type Tree = Value;

    fn view(&self) -> NodeRef<'_, Value> {
        if is_container(self) {
            NodeRef::Tree(self)
        } else {
            NodeRef::Leaf(self)
        }
    }

    fn replacement(&self, path: Path) -> Operation {
        Operation::Set { path, value: self.clone() }
    }
}

impl TreeTarget for Value {
    fn is_container(&self) -> bool {
        is_container(self)
    }

    fn new_tree(_path: &[Key]) -> Self {
        Value::Object(Map::new())
    }

    fn tree_from_entries(_path: &[Key], entries: &[Entry]) -> TreeResult<Self> {
        Ok(entries_to_value(entries))
    }

    fn node_from_value(_path: &[Key], value: Value) -> Value {
        value
    }

    fn leaf_node(_path: &[Key], value: Value) -> Value {
        value
    }

    fn into_node(tree: Self) -> Value {
        tree
    }

    fn child_tree_mut(&mut self, key: &Key) -> Option<&mut Value> {
        lookup_mut(self, key).filter(|child| is_container(child))
    }

    fn insert_node(&mut self, key: Key, node: Value) -> TreeResult<()> {
        match self {
            Value::Object(map) => {
                map.insert(key.to_property(), node);
                Ok(())
            }
            Value::Array(items) => {
                let i = key.to_index().ok_or_else(|| {
                    TreeError::TypeMismatch(format!("array cannot hold non-index key '{key}'"))
                })?;
                match i.cmp(&items.len()) {
                    Ordering::Less => items[i] = node,
                    Ordering::Equal => items.push(node),
                    Ordering::Greater => {
                        return Err(TreeError::TypeMismatch(format!(
                            "index {i} is past the end of an array of length {}",
                            items.len()
                        )))
                    }
                }
                Ok(())
            }
            scalar => Err(TreeError::TypeMismatch(format!(
                "cannot set key '{key}' on scalar {}",
                stringify(scalar)
            ))),
        }
    }

    /// On an array this truncates at `key`, so every element after it goes
    /// too. A remove written by hand for an interior index deletes siblings
    /// it does not name.
    fn remove_key(&mut self, key: &Key) -> TreeResult<Option<Value>> {
        match self {
            Value::Object(map) => Ok(map.shift_remove(&key.to_property())),
            Value::Array(items) => match key.to_index() {
                Some(i) if i < items.len() => Ok(items.split_off(i).into_iter().next()),
                _ => Ok(None),
            },
            scalar => Err(TreeError::TypeMismatch(format!(
                "cannot remove key '{key}' from scalar {}",
                stringify(scalar)
            ))),
        }
    }
}

/// A path-carrying view into a raw value.
///
/// Child views are created on demand by [`ValueView::get_node`] and borrow
/// from the same underlying value.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueView<'a> {
    path: Path,
    value: &'a Value,
}

impl<'a> ValueView<'a> {
    pub fn root(value: &'a Value) -> Self {
        Self { path: Vec::new(), value }
    }

    pub fn path(&self) -> &[Key] {
        &self.path
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    pub fn is_leaf(&self) -> bool {
        !is_container(self.value)
    }

    pub fn get_node(&self, key: &Key) -> Option<ValueView<'a>> {
        let value = lookup(self.value, key)?;
        Some(Self { path: child_path(&self.path, key.clone()), value })
    }

    /// Views of every child, in order.
    pub fn entries(&self) -> Vec<ValueView<'a>> {
        let value: &'a Value = self.value;
        value
            .children()
            .into_iter()
            .map(|(key, child)| Self { path: child_path(&self.path, key), value: child })
            .collect()
    }

    /// Walk `path` from this view without materializing anything.
    pub fn find(&self, path: &[Key]) -> Option<ValueView<'a>> {
        let mut current = self.clone();
        for key in path {
            current = current.get_node(key)?;
        }
        Some(current)
    }

    /// The serialized entry for this view; `None` at the root.
    pub fn to_entry(&self) -> Option<Entry> {
        let key = self.path.last()?.clone();
        Some(if self.is_leaf() {
            Entry::Leaf { key, value: self.value.clone() }
        } else {
            Entry::Tree { key, entries: self.value.to_entries() }
        })
    }
}
