//! Patch apply logic: replay operations against a tree.
//!
//! `remove` walks to the parent without creating anything, so removing
//! under a missing parent is a silent no-op. The `set*` operations walk
//! with [`create_container`], creating an empty container wherever an
//! intermediate step is missing or held by a leaf.
//!
//! Application is not transactional: when an operation fails, the ones
//! before it have already been applied.

use json_tree_path::{format_path, split_path};
use tracing::{debug, trace};

use crate::error::TreeResult;
use crate::operation::Operation;
use crate::storage::{create_container, traverse_path, Materializer, TreeTarget};

/// Apply one operation to `tree` in place.
///
/// # Errors
///
/// - [`PathError::EmptyPath`](json_tree_path::PathError::EmptyPath) for an
///   operation addressing the root.
/// - [`TreeError::TypeMismatch`](crate::TreeError::TypeMismatch) when a
///   `set*` lands on a scalar root, or on a raw array index past its end.
pub fn apply_operation<T: TreeTarget>(tree: &mut T, op: &Operation) -> TreeResult<()> {
    let (prefix, key) = split_path(op.path())?;
    trace!(op = op.type_name(), path = %format_path(op.path()), "applying operation");

    if op.is_remove() {
        if let Some(parent) = traverse_path(tree, prefix, None)? {
            if parent.is_container() {
                parent.remove_key(key)?;
            }
        }
        return Ok(());
    }

    let vivify: Materializer<'_, T> = &create_container::<T>;
    let Some(parent) = traverse_path(tree, prefix, Some(vivify))? else {
        return Ok(());
    };
    let path = op.path();
    let node = match op {
        Operation::Set { value, .. } => T::node_from_value(path, value.clone()),
        Operation::SetLeaf { value, .. } => T::leaf_node(path, value.clone()),
        Operation::SetTree { entries, .. } => T::into_node(T::tree_from_entries(path, entries)?),
        Operation::Remove { .. } => return Ok(()),
    };
    parent.insert_node(key.clone(), node)
}

/// Apply `ops` to `tree` in place, strictly in order.
pub fn apply_operations<T: TreeTarget>(tree: &mut T, ops: &[Operation]) -> TreeResult<()> {
    debug!(operations = ops.len(), "applying operations");
    for op in ops {
        apply_operation(tree, op)?;
    }
    Ok(())
}

/// Apply `ops` to a copy of `tree` and return the copy. `tree` itself is
/// left untouched.
pub fn with_operations<T: TreeTarget + Clone>(tree: &T, ops: &[Operation]) -> TreeResult<T> {
    let mut result = tree.clone();
    apply_operations(&mut result, ops)?;
    Ok(result)
}
