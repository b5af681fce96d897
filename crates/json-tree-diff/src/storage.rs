//! The node contract shared by both tree realizations.
//!
//! The diff and patch algorithms are written once against these traits.
//! A realization supplies the storage strategy:
//!
//! - [`Tree`](crate::node::Tree) / [`Node`](crate::node::Node) keep
//!   persistent child objects, each carrying its own path.
//! - [`serde_json::Value`] is walked directly; children are borrowed views
//!   into the native mapping (see [`crate::value_tree`]).
//!
//! Containers implement [`TreeSource`] (and [`TreeTarget`] for mutation);
//! their children implement [`NodeSource`].

use json_tree_path::{Key, Path};
use serde_json::Value;

use crate::entry::{sort_entries, Entry};
use crate::error::TreeResult;
use crate::operation::Operation;

/// A child seen as either a container or a leaf value.
#[derive(Debug)]
pub enum NodeRef<'a, T> {
    Tree(&'a T),
    Leaf(&'a Value),
}

/// Read access to a container.
pub trait TreeSource: Sized {
    type Node: NodeSource<Tree = Self>;

    /// Children in insertion order.
    fn children(&self) -> Vec<(Key, &Self::Node)>;

    fn child(&self, key: &Key) -> Option<&Self::Node>;

    /// Whether two containers may be diffed member by member. A `false`
    /// here makes the diff replace the container wholesale.
    fn same_shape(&self, _other: &Self) -> bool {
        true
    }

    /// Canonical serialized form of the children, sorted by key.
    fn to_entries(&self) -> Vec<Entry> {
        let mut entries: Vec<Entry> = self
            .children()
            .into_iter()
            .map(|(key, node)| match node.view() {
                NodeRef::Leaf(value) => Entry::Leaf { key, value: value.clone() },
                NodeRef::Tree(tree) => Entry::Tree { key, entries: tree.to_entries() },
            })
            .collect();
        sort_entries(&mut entries);
        entries
    }
}

/// Read access to a child node.
pub trait NodeSource: Sized {
    type Tree: TreeSource<Node = Self>;

    fn view(&self) -> NodeRef<'_, Self::Tree>;

    /// The single operation that puts this node at `path`, replacing
    /// whatever is there.
    fn replacement(&self, path: Path) -> Operation;
}

/// Write access to a container, used by the patch algorithm.
pub trait TreeTarget: TreeSource {
    /// Whether keys can be inserted into or removed from this node.
    fn is_container(&self) -> bool;

    /// A fresh empty container located at `path`.
    fn new_tree(path: &[Key]) -> Self;

    fn tree_from_entries(path: &[Key], entries: &[Entry]) -> TreeResult<Self>;

    /// A node holding `value`, decomposed the way this realization stores
    /// raw data.
    fn node_from_value(path: &[Key], value: Value) -> Self::Node;

    /// A node holding `value` as an opaque leaf.
    fn leaf_node(path: &[Key], value: Value) -> Self::Node;

    fn into_node(tree: Self) -> Self::Node;

    /// The child at `key`, if it is a container.
    fn child_tree_mut(&mut self, key: &Key) -> Option<&mut Self>;

    /// Insert or overwrite the child at `key`.
    fn insert_node(&mut self, key: Key, node: Self::Node) -> TreeResult<()>;

    /// Remove the child at `key`; absent keys are a no-op.
    fn remove_key(&mut self, key: &Key) -> TreeResult<Option<Self::Node>>;
}

/// Materialization hook for [`traverse_path`].
///
/// Called with the path of the missing step and the leaf value sitting in
/// the way, if any. Returning a container attaches it at that step;
/// returning `None` stops the traversal.
pub type Materializer<'m, T> = &'m dyn Fn(&[Key], Option<&Value>) -> Option<T>;

/// Walk `path` from `tree` down to the container at its end.
///
/// At each step where the child is absent or is a leaf, `on_missing` decides
/// what happens. Without a hook the traversal yields `None` there.
pub fn traverse_path<'t, T: TreeTarget>(
    tree: &'t mut T,
    path: &[Key],
    on_missing: Option<Materializer<'_, T>>,
) -> TreeResult<Option<&'t mut T>> {
    let mut current = tree;
    for (i, key) in path.iter().enumerate() {
        let displaced = match current.child(key).map(NodeSource::view) {
            Some(NodeRef::Tree(_)) => None,
            Some(NodeRef::Leaf(value)) => Some(Some(value)),
            None => Some(None),
        };
        if let Some(leaf) = displaced {
            let Some(hook) = on_missing else {
                return Ok(None);
            };
            let Some(created) = hook(&path[..=i], leaf) else {
                return Ok(None);
            };
            current.insert_node(key.clone(), T::into_node(created))?;
        }
        current = match current.child_tree_mut(key) {
            Some(next) => next,
            None => return Ok(None),
        };
    }
    Ok(Some(current))
}

/// Read-only walk to the container at `path`. Never materializes.
pub fn find_tree<'t, T: TreeSource>(tree: &'t T, path: &[Key]) -> Option<&'t T> {
    let mut current = tree;
    for key in path {
        current = match current.child(key)?.view() {
            NodeRef::Tree(next) => next,
            NodeRef::Leaf(_) => return None,
        };
    }
    Some(current)
}

/// Materialization strategy that creates an empty container at every
/// missing or leaf-occupied step.
pub fn create_container<T: TreeTarget>(path: &[Key], displaced: Option<&Value>) -> Option<T> {
    tracing::debug!(
        path = %json_tree_path::format_path(path),
        replaces_leaf = displaced.is_some(),
        "materializing container"
    );
    Some(T::new_tree(path))
}
