//! Tree diff: the operations that turn one tree into another.
//!
//! Per level, the first tree's children are visited in its own insertion
//! order, emitting removals and in-place changes; then every key only the
//! second tree has is added, in the second tree's insertion order. That
//! order is part of the output contract.
//!
//! A leaf never diffs into a container or back: a kind change at a key is
//! always one replacement operation carrying the second tree's node.

use json_tree_path::{child_path, Key, Path};
use serde_json::Value;
use tracing::debug;

use crate::json_stable::stringify;
use crate::operation::Operation;
use crate::storage::{NodeRef, NodeSource, TreeSource};

/// Operations that, applied in order to `a`, reproduce `b`.
pub fn diff<T: TreeSource>(a: &T, b: &T) -> Vec<Operation> {
    diff_at(a, b, &[])
}

/// Like [`diff`], with every emitted path prefixed by `path`.
pub fn diff_at<T: TreeSource>(a: &T, b: &T, path: &[Key]) -> Vec<Operation> {
    let mut ops = Vec::new();
    let mut path = path.to_vec();
    diff_trees(&mut ops, &mut path, a, b);
    debug!(operations = ops.len(), "computed tree diff");
    ops
}

/// Leaf equality policy.
///
/// Two leaf values are equal when they are the same value in memory, or
/// when their canonical serializations match. This is deliberately looser
/// than strict equality: values that serialize identically (object members
/// in a different order, for example) never produce an operation.
pub fn leaves_equal(a: &Value, b: &Value) -> bool {
    std::ptr::eq(a, b) || stringify(a) == stringify(b)
}

fn diff_trees<T: TreeSource>(ops: &mut Vec<Operation>, path: &mut Path, a: &T, b: &T) {
    for (key, node_a) in a.children() {
        let node_b = b.child(&key);
        path.push(key);
        match node_b {
            None => ops.push(Operation::Remove { path: path.clone() }),
            Some(node_b) => diff_nodes(ops, path, node_a, node_b),
        }
        path.pop();
    }
    for (key, node_b) in b.children() {
        if a.child(&key).is_none() {
            ops.push(node_b.replacement(child_path(path, key)));
        }
    }
}

fn diff_nodes<N: NodeSource>(ops: &mut Vec<Operation>, path: &mut Path, a: &N, b: &N) {
    match (a.view(), b.view()) {
        (NodeRef::Tree(tree_a), NodeRef::Tree(tree_b)) if tree_a.same_shape(tree_b) => {
            diff_trees(ops, path, tree_a, tree_b)
        }
        (NodeRef::Leaf(va), NodeRef::Leaf(vb)) if leaves_equal(va, vb) => {}
        _ => ops.push(b.replacement(path.clone())),
    }
}
