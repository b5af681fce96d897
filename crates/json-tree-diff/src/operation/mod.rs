//! The operation model: one recorded change to a tree.
//!
//! # Operations
//!
//! - `set`: replace the value at a path with a raw value.
//! - `set-leaf`: replace the node at a path with an opaque leaf.
//! - `set-tree`: replace the node at a path with a subtree given as
//!   serialized [`Entry`] items.
//! - `remove`: delete the node at a path.
//!
//! Operations emitted by the diff always carry a non-empty path; replacing a
//! whole tree is expressed as per-child operations against the root.

pub mod codec;
pub mod format;

use json_tree_path::{Key, Path};
use serde_json::Value;

use crate::entry::Entry;

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Set { path: Path, value: Value },
    SetLeaf { path: Path, value: Value },
    SetTree { path: Path, entries: Vec<Entry> },
    Remove { path: Path },
}

impl Operation {
    /// The wire tag of the operation.
    pub fn type_name(&self) -> &'static str {
        match self {
            Operation::Set { .. } => "set",
            Operation::SetLeaf { .. } => "set-leaf",
            Operation::SetTree { .. } => "set-tree",
            Operation::Remove { .. } => "remove",
        }
    }

    pub fn path(&self) -> &[Key] {
        match self {
            Operation::Set { path, .. }
            | Operation::SetLeaf { path, .. }
            | Operation::SetTree { path, .. }
            | Operation::Remove { path } => path,
        }
    }

    pub fn is_remove(&self) -> bool {
        matches!(self, Operation::Remove { .. })
    }
}

pub use codec::{from_json, from_json_operations, to_json, to_json_operations};
pub use format::format_operation;
