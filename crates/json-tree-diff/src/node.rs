//! The typed node tree.
//!
//! A [`Node`] is either a [`Tree`] (ordered map of children) or a [`Leaf`]
//! (opaque immutable value). Every node knows its own path; a tree only
//! accepts children whose path is its own path plus exactly one key.

use std::sync::Arc;

use indexmap::IndexMap;
use json_tree_path::{child_path, is_parent_of, Key, Path};
use serde_json::Value;

use crate::entry::{assemble_container, Entry};
use crate::error::{TreeError, TreeResult};
use crate::operation::Operation;
use crate::storage::{NodeRef, NodeSource, TreeSource, TreeTarget};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Tree(Tree),
    Leaf(Leaf),
}

/// A terminal value. Cloning shares the value instead of copying it.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    path: Path,
    value: Arc<Value>,
}

/// A container of children keyed in insertion order.
///
/// Equality is structural: same path and same children per key, regardless
/// of insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tree {
    path: Path,
    children: IndexMap<Key, Node>,
}

impl Leaf {
    pub fn new(path: Path, value: Value) -> Self {
        Self { path, value: Arc::new(value) }
    }

    pub fn path(&self) -> &[Key] {
        &self.path
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Node {
    /// Wrap a raw value: objects and arrays become trees, everything else a
    /// leaf.
    pub fn from_value(path: Path, value: &Value) -> Node {
        match value {
            Value::Object(_) | Value::Array(_) => Node::Tree(Tree::from_value_at(path, value)),
            scalar => Node::Leaf(Leaf::new(path, scalar.clone())),
        }
    }

    /// Rebuild the node a serialized entry describes, under `parent`.
    pub fn from_entry(parent: &[Key], entry: &Entry) -> Node {
        let path = child_path(parent, entry.key().clone());
        match entry {
            Entry::Leaf { value, .. } => Node::Leaf(Leaf::new(path, value.clone())),
            Entry::Tree { entries, .. } => Node::Tree(Tree::from_entries_at(path, entries)),
        }
    }

    pub fn path(&self) -> &[Key] {
        match self {
            Node::Tree(tree) => &tree.path,
            Node::Leaf(leaf) => &leaf.path,
        }
    }

    /// The last key of the path; `None` for a root.
    pub fn key(&self) -> Option<&Key> {
        self.path().last()
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn as_tree(&self) -> Option<&Tree> {
        match self {
            Node::Tree(tree) => Some(tree),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Tree(_) => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Node::Tree(tree) => tree.to_value(),
            Node::Leaf(leaf) => leaf.value().clone(),
        }
    }

    /// The serialized entry for this node; `None` for a root, which has no
    /// key to record.
    pub fn to_entry(&self) -> Option<Entry> {
        let key = self.key()?.clone();
        Some(match self {
            Node::Leaf(leaf) => Entry::Leaf { key, value: leaf.value().clone() },
            Node::Tree(tree) => Entry::Tree { key, entries: tree.to_entries() },
        })
    }
}

impl Tree {
    pub fn new(path: Path) -> Self {
        Self { path, children: IndexMap::new() }
    }

    /// Build a root tree from a raw object or array.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::TypeMismatch`] for a scalar.
    pub fn from_value(value: &Value) -> TreeResult<Self> {
        match value {
            Value::Object(_) | Value::Array(_) => Ok(Self::from_value_at(Vec::new(), value)),
            other => Err(TreeError::TypeMismatch(format!(
                "cannot build a tree from scalar {other}"
            ))),
        }
    }

    /// Build a tree located at `path`. Scalars yield an empty tree.
    pub fn from_value_at(path: Path, value: &Value) -> Self {
        let mut tree = Self::new(path);
        match value {
            Value::Object(map) => {
                for (k, v) in map {
                    tree.insert_child(Key::Str(k.clone()), v);
                }
            }
            Value::Array(items) => {
                for (i, v) in items.iter().enumerate() {
                    tree.insert_child(Key::from(i), v);
                }
            }
            _ => {}
        }
        tree
    }

    pub fn from_entries(entries: &[Entry]) -> Self {
        Self::from_entries_at(Vec::new(), entries)
    }

    /// Rebuild a tree at `path` from serialized entries. Later entries win
    /// over earlier ones with the same key.
    pub fn from_entries_at(path: Path, entries: &[Entry]) -> Self {
        let mut tree = Self::new(path);
        for entry in entries {
            let node = Node::from_entry(&tree.path, entry);
            tree.children.insert(entry.key().clone(), node);
        }
        tree
    }

    fn insert_child(&mut self, key: Key, value: &Value) {
        let node = Node::from_value(child_path(&self.path, key.clone()), value);
        self.children.insert(key, node);
    }

    pub fn path(&self) -> &[Key] {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.children.keys()
    }

    /// Children in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&Key, &Node)> {
        self.children.iter()
    }

    /// Insert `node` as a child, keyed by the last step of its path.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::StructuralViolation`] unless the node's path is
    /// this tree's path plus one key.
    pub fn add_node(&mut self, node: Node) -> TreeResult<()> {
        if !is_parent_of(&self.path, node.path()) {
            return Err(TreeError::structural(&self.path, node.path()));
        }
        let key = node.path()[self.path.len()].clone();
        self.children.insert(key, node);
        Ok(())
    }

    pub fn get_node(&self, key: &Key) -> Option<&Node> {
        self.children.get(key)
    }

    /// Remove the child at `key`, keeping the order of the others.
    pub fn remove_node(&mut self, key: &Key) -> Option<Node> {
        self.children.shift_remove(key)
    }

    /// Remove `node` from this tree after checking it is a direct child.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::StructuralViolation`] if `node` does not sit
    /// directly below this tree.
    pub fn remove_child_node(&mut self, node: &Node) -> TreeResult<Option<Node>> {
        if !is_parent_of(&self.path, node.path()) {
            return Err(TreeError::structural(&self.path, node.path()));
        }
        Ok(self.children.shift_remove(&node.path()[self.path.len()]))
    }

    /// Insert the raw `value` under `key`, decomposing containers.
    pub fn set(&mut self, key: Key, value: &Value) {
        self.insert_child(key, value);
    }

    /// Convert back to a raw value.
    ///
    /// Children keyed `0..n` in order come back as an array, any other
    /// tree (including an empty one) as an object.
    pub fn to_value(&self) -> Value {
        assemble_container(
            self.children
                .iter()
                .map(|(k, node)| (k.clone(), node.to_value()))
                .collect(),
        )
    }
}

// ── Storage contract ─────────────────────────────────────────────────────

impl TreeSource for Tree {
    type Node = Node;

    fn children(&self) -> Vec<(Key, &Node)> {
        self.children.iter().map(|(k, n)| (k.clone(), n)).collect()
    }

    fn child(&self, key: &Key) -> Option<&Node> {
        self.children.get(key)
    }
}

impl NodeSource for Node {
    type Tree = Tree;

    fn view(&self) -> NodeRef<'_, Tree> {
        match self {
            Node::Tree(tree) => NodeRef::Tree(tree),
            Node::Leaf(leaf) => NodeRef::Leaf(leaf.value()),
        }
    }

    fn replacement(&self, path: Path) -> Operation {
        match self {
            Node::Leaf(leaf) => Operation::SetLeaf { path, value: leaf.value().clone() },
            Node::Tree(tree) => Operation::SetTree { path, entries: tree.to_entries() },
        }
    }
}

impl TreeTarget for Tree {
    fn is_container(&self) -> bool {
        true
    }

    fn new_tree(path: &[Key]) -> Self {
        Tree::new(path.to_vec())
    }

    fn tree_from_entries(path: &[Key], entries: &[Entry]) -> TreeResult<Self> {
        Ok(Tree::from_entries_at(path.to_vec(), entries))
    }

    fn node_from_value(path: &[Key], value: Value) -> Node {
        Node::from_value(path.to_vec(), &value)
    }

    fn leaf_node(path: &[Key], value: Value) -> Node {
        Node::Leaf(Leaf::new(path.to_vec(), value))
    }

    fn into_node(tree: Self) -> Node {
        Node::Tree(tree)
    }

    fn child_tree_mut(&mut self, key: &Key) -> Option<&mut Tree> {
        match self.children.get_mut(key) {
            Some(Node::Tree(tree)) => Some(tree),
            _ => None,
        }
    }

    fn insert_node(&mut self, key: Key, node: Node) -> TreeResult<()> {
        if node.key() != Some(&key) {
            return Err(TreeError::structural(&self.path, node.path()));
        }
        self.add_node(node)
    }

    fn remove_key(&mut self, key: &Key) -> TreeResult<Option<Node>> {
        Ok(self.remove_node(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn k(s: &str) -> Key {
        Key::from(s)
    }

    #[test]
    fn from_value_wraps_every_level() {
        let tree = Tree::from_value(&json!({"a": {"idk": 123}, "l": [true]})).unwrap();
        let a = tree.get_node(&k("a")).and_then(Node::as_tree).unwrap();
        assert_eq!(a.path(), &[k("a")]);
        let idk = a.get_node(&k("idk")).and_then(Node::as_leaf).unwrap();
        assert_eq!(idk.value(), &json!(123));
        assert_eq!(idk.path(), &[k("a"), k("idk")]);
        let l = tree.get_node(&k("l")).and_then(Node::as_tree).unwrap();
        assert!(l.get_node(&Key::Index(0)).unwrap().is_leaf());
    }

    #[test]
    fn from_value_rejects_scalars() {
        assert!(matches!(Tree::from_value(&json!(3)), Err(TreeError::TypeMismatch(_))));
    }

    #[test]
    fn add_node_checks_parentage() {
        let mut tree = Tree::new(vec![k("a")]);
        tree.add_node(Node::Leaf(Leaf::new(vec![k("a"), k("b")], json!(1)))).unwrap();
        assert_eq!(tree.len(), 1);

        let stranger = Node::Leaf(Leaf::new(vec![k("x"), k("b")], json!(1)));
        assert!(matches!(tree.add_node(stranger), Err(TreeError::StructuralViolation { .. })));

        let grandchild = Node::Leaf(Leaf::new(vec![k("a"), k("b"), k("c")], json!(1)));
        assert!(matches!(tree.add_node(grandchild), Err(TreeError::StructuralViolation { .. })));
    }

    #[test]
    fn add_node_last_write_wins() {
        let mut tree = Tree::new(vec![]);
        tree.add_node(Node::Leaf(Leaf::new(vec![k("a")], json!(1)))).unwrap();
        tree.add_node(Node::Leaf(Leaf::new(vec![k("b")], json!(2)))).unwrap();
        tree.add_node(Node::Leaf(Leaf::new(vec![k("a")], json!(3)))).unwrap();
        assert_eq!(tree.to_value(), json!({"a": 3, "b": 2}));
        // Overwriting keeps the original slot.
        let order: Vec<&Key> = tree.keys().collect();
        assert_eq!(order, vec![&k("a"), &k("b")]);
    }

    #[test]
    fn remove_node_keeps_order_and_ignores_missing() {
        let mut tree = Tree::from_value(&json!({"a": 1, "b": 2, "c": 3})).unwrap();
        assert!(tree.remove_node(&k("b")).is_some());
        assert!(tree.remove_node(&k("zz")).is_none());
        let order: Vec<&Key> = tree.keys().collect();
        assert_eq!(order, vec![&k("a"), &k("c")]);
    }

    #[test]
    fn remove_child_node_validates() {
        let mut tree = Tree::from_value(&json!({"a": {"b": 1}})).unwrap();
        let foreign = Node::Leaf(Leaf::new(vec![k("a"), k("b")], json!(1)));
        assert!(tree.remove_child_node(&foreign).is_err());
        let direct = Node::Leaf(Leaf::new(vec![k("a")], json!(null)));
        assert!(tree.remove_child_node(&direct).unwrap().is_some());
        assert!(tree.is_empty());
    }

    #[test]
    fn clone_is_deep_for_trees_and_shared_for_leaves() {
        let original = Tree::from_value(&json!({"a": {"b": "text"}})).unwrap();
        let mut copy = original.clone();

        let leaf_a = original.get_node(&k("a")).and_then(Node::as_tree).unwrap().get_node(&k("b")).and_then(Node::as_leaf).unwrap();
        let leaf_b = copy.get_node(&k("a")).and_then(Node::as_tree).unwrap().get_node(&k("b")).and_then(Node::as_leaf).unwrap();
        assert!(std::ptr::eq(leaf_a.value(), leaf_b.value()));

        copy.child_tree_mut(&k("a")).unwrap().set(k("c"), &json!(1));
        assert_eq!(original.to_value(), json!({"a": {"b": "text"}}));
        assert_eq!(copy.to_value(), json!({"a": {"b": "text", "c": 1}}));
    }

    #[test]
    fn to_value_arrays() {
        let tree = Tree::from_value(&json!({"list": [1, [2, 3]], "empty": []})).unwrap();
        // Empty containers have no keys to tell them apart.
        assert_eq!(tree.to_value(), json!({"list": [1, [2, 3]], "empty": {}}));

        let mut sparse = Tree::from_value(&json!([1, 2, 3])).unwrap();
        sparse.remove_node(&Key::Index(1));
        assert_eq!(sparse.to_value(), json!({"0": 1, "2": 3}));
    }

    #[test]
    fn entries_roundtrip() {
        let tree = Tree::from_value(&json!({"b": {"b2": {"b3": 123}}, "a": 1})).unwrap();
        let entries = tree.to_entries();
        assert_eq!(
            crate::entry::entries_to_json(&entries),
            json!([["leaf", "a", 1], ["tree", "b", [["tree", "b2", [["leaf", "b3", 123]]]]]])
        );
        let rebuilt = Tree::from_entries(&entries);
        assert_eq!(rebuilt.to_value(), tree.to_value());
        let b3 = rebuilt
            .get_node(&k("b")).and_then(Node::as_tree).unwrap()
            .get_node(&k("b2")).and_then(Node::as_tree).unwrap()
            .get_node(&k("b3")).unwrap();
        assert_eq!(b3.path(), &[k("b"), k("b2"), k("b3")]);
    }

    #[test]
    fn node_to_entry() {
        let tree = Tree::from_value(&json!({"v": true})).unwrap();
        let v = tree.get_node(&k("v")).unwrap();
        assert_eq!(v.to_entry(), Some(Entry::Leaf { key: k("v"), value: json!(true) }));
        assert_eq!(Node::Tree(Tree::new(vec![])).to_entry(), None);
    }

    #[test]
    fn insert_node_requires_matching_key() {
        let mut tree = Tree::new(vec![]);
        let node = Node::Leaf(Leaf::new(vec![k("a")], json!(1)));
        assert!(tree.insert_node(k("b"), node.clone()).is_err());
        tree.insert_node(k("a"), node).unwrap();
        assert_eq!(tree.len(), 1);
    }
}
