//! Human-readable operation rendering for logs. Not meant to be parsed.

use json_tree_path::format_path;

use super::Operation;
use crate::entry::entries_to_json;
use crate::json_stable::stringify;

/// Render an operation, e.g. `set-leaf(["a"]["idk"], 456)`.
pub fn format_operation(op: &Operation) -> String {
    match op {
        Operation::Remove { path } => format!("remove({})", format_path(path)),
        Operation::Set { path, value } => {
            format!("set({}, {})", format_path(path), stringify(value))
        }
        Operation::SetLeaf { path, value } => {
            format!("set-leaf({}, {})", format_path(path), stringify(value))
        }
        Operation::SetTree { path, entries } => {
            format!("set-tree({}, {})", format_path(path), stringify(&entries_to_json(entries)))
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_operation(self))
    }
}
