//! json-tree-diff: structural diff and patch for nested JSON trees.
//!
//! [`diff`] computes the operations that turn one tree into another and
//! [`apply_operations`] replays them. Both run on two realizations of the
//! same node contract (see [`storage`]):
//!
//! - the typed node model ([`Tree`] / [`Node`]), which records changes as
//!   `set-leaf` and `set-tree` operations;
//! - plain [`serde_json::Value`]s, which record changes as `set`.
//!
//! ```
//! use json_tree_diff::{diff, with_operations, Tree};
//! use serde_json::json;
//!
//! let a = Tree::from_value(&json!({"a": {"idk": 123}, "x": 1})).unwrap();
//! let b = Tree::from_value(&json!({"a": {"idk": 456}})).unwrap();
//! let ops = diff(&a, &b);
//! assert_eq!(ops.len(), 2);
//! assert_eq!(with_operations(&a, &ops).unwrap(), b);
//! ```

pub mod diff;
pub mod entry;
pub mod error;
pub mod json_cli;
pub mod json_stable;
pub mod node;
pub mod operation;
pub mod patch;
pub mod storage;
pub mod value_tree;

pub use diff::{diff, diff_at, leaves_equal};
pub use entry::Entry;
pub use error::{TreeError, TreeResult};
pub use json_tree_path::{Key, Path};
pub use node::{Leaf, Node, Tree};
pub use operation::Operation;
pub use patch::{apply_operation, apply_operations, with_operations};
pub use storage::{
    create_container, find_tree, traverse_path, Materializer, NodeRef, NodeSource, TreeSource,
    TreeTarget,
};
pub use value_tree::ValueView;
