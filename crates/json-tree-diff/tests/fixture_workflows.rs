//! End-to-end diff / patch workflows over a shared pair of documents.

use json_tree_diff::{
    apply_operations, diff, operation, with_operations, Entry, Key, Node, Operation, Path, Tree,
};
use serde_json::{json, Value};

fn data_a() -> Value {
    json!({
        "a": {
            "idk": 123,
            "test": [1, 2, 3],
            "static": { "v": false },
        },
        "a2": {
            "a3": { "a4": { "a5": "test" } },
            "a3b": "hi",
            "a3c": { "v": true },
        }
    })
}

fn data_b() -> Value {
    json!({
        "b": { "b2": { "b3": 123 } },
        "a": {
            "idk": 456,
            "test": [1, 3, 5],
            "static": { "v": false },
        },
        "a2": {
            "a3": { "a4": { "a5": "testing" } },
            "b3b": "hi",
            "b3c": { "v": true },
        }
    })
}

fn path(steps: &[Value]) -> Path {
    steps.iter().map(|s| Key::from_json(s).unwrap()).collect()
}

fn leaf(key: &str, value: Value) -> Entry {
    Entry::Leaf { key: Key::from(key), value }
}

// ── Node model ────────────────────────────────────────────────────────────

fn expected_node_ops() -> Vec<Operation> {
    vec![
        Operation::SetLeaf { path: path(&[json!("a"), json!("idk")]), value: json!(456) },
        Operation::SetLeaf { path: path(&[json!("a"), json!("test"), json!(1)]), value: json!(3) },
        Operation::SetLeaf { path: path(&[json!("a"), json!("test"), json!(2)]), value: json!(5) },
        Operation::SetLeaf {
            path: path(&[json!("a2"), json!("a3"), json!("a4"), json!("a5")]),
            value: json!("testing"),
        },
        Operation::Remove { path: path(&[json!("a2"), json!("a3b")]) },
        Operation::Remove { path: path(&[json!("a2"), json!("a3c")]) },
        Operation::SetLeaf { path: path(&[json!("a2"), json!("b3b")]), value: json!("hi") },
        Operation::SetTree {
            path: path(&[json!("a2"), json!("b3c")]),
            entries: vec![leaf("v", json!(true))],
        },
        Operation::SetTree {
            path: path(&[json!("b")]),
            entries: vec![Entry::Tree { key: Key::from("b2"), entries: vec![leaf("b3", json!(123))] }],
        },
    ]
}

#[test]
fn node_model_builds_from_fixture() {
    let tree = Tree::from_value(&data_a()).unwrap();
    let idk = tree
        .get_node(&Key::from("a"))
        .and_then(Node::as_tree)
        .and_then(|a| a.get_node(&Key::from("idk")))
        .and_then(Node::as_leaf)
        .unwrap();
    assert_eq!(idk.value(), &json!(123));
}

#[test]
fn node_model_diff_matches_expected_operations() {
    let a = Tree::from_value(&data_a()).unwrap();
    let b = Tree::from_value(&data_b()).unwrap();
    assert_eq!(diff(&a, &b), expected_node_ops());
}

#[test]
fn node_model_operations_wire_form() {
    let a = Tree::from_value(&data_a()).unwrap();
    let b = Tree::from_value(&data_b()).unwrap();
    let wire = operation::to_json_operations(&diff(&a, &b));
    assert_eq!(wire[1], json!({"type": "set-leaf", "path": ["a", "test", 1], "value": 3}));
    assert_eq!(
        wire[8],
        json!({"type": "set-tree", "path": ["b"], "entries": [["tree", "b2", [["leaf", "b3", 123]]]]})
    );
    assert_eq!(operation::from_json_operations(&wire).unwrap(), expected_node_ops());
}

#[test]
fn node_model_round_trip() {
    let a = Tree::from_value(&data_a()).unwrap();
    let b = Tree::from_value(&data_b()).unwrap();

    let ops = diff(&a, &b);
    let patched = with_operations(&a, &ops).unwrap();
    assert_eq!(patched, b);
    assert_eq!(patched.to_value(), data_b());
    assert!(diff(&patched, &b).is_empty());

    // The source tree is untouched.
    assert_eq!(a.to_value(), data_a());
}

#[test]
fn node_model_reverse_round_trip() {
    let a = Tree::from_value(&data_a()).unwrap();
    let b = Tree::from_value(&data_b()).unwrap();
    let ops = diff(&b, &a);
    assert_eq!(ops[0], Operation::Remove { path: path(&[json!("b")]) });
    let patched = with_operations(&b, &ops).unwrap();
    assert_eq!(patched, a);
    assert_eq!(patched.to_value(), data_a());
}

// ── Raw values ────────────────────────────────────────────────────────────

fn expected_raw_ops() -> Vec<Operation> {
    vec![
        Operation::Set { path: path(&[json!("a"), json!("idk")]), value: json!(456) },
        Operation::Set { path: path(&[json!("a"), json!("test"), json!(1)]), value: json!(3) },
        Operation::Set { path: path(&[json!("a"), json!("test"), json!(2)]), value: json!(5) },
        Operation::Set {
            path: path(&[json!("a2"), json!("a3"), json!("a4"), json!("a5")]),
            value: json!("testing"),
        },
        Operation::Remove { path: path(&[json!("a2"), json!("a3b")]) },
        Operation::Remove { path: path(&[json!("a2"), json!("a3c")]) },
        Operation::Set { path: path(&[json!("a2"), json!("b3b")]), value: json!("hi") },
        Operation::Set { path: path(&[json!("a2"), json!("b3c")]), value: json!({"v": true}) },
        Operation::Set { path: path(&[json!("b")]), value: json!({"b2": {"b3": 123}}) },
    ]
}

#[test]
fn raw_diff_matches_expected_operations() {
    assert_eq!(diff(&data_a(), &data_b()), expected_raw_ops());
}

#[test]
fn raw_round_trip_in_place() {
    let a = data_a();
    let b = data_b();
    let mut doc = a.clone();
    apply_operations(&mut doc, &diff(&a, &b)).unwrap();
    assert_eq!(doc, b);
    assert!(diff(&doc, &b).is_empty());
}

#[test]
fn raw_reverse_round_trip() {
    let a = data_a();
    let b = data_b();
    let patched = with_operations(&b, &diff(&b, &a)).unwrap();
    assert_eq!(patched, a);
    assert_eq!(b, data_b());
}

// ── Cross-realization ─────────────────────────────────────────────────────

#[test]
fn node_operations_apply_to_raw_values() {
    // set-leaf and set-tree are understood by the raw adapter too.
    let mut doc = data_a();
    apply_operations(&mut doc, &expected_node_ops()).unwrap();
    assert_eq!(doc, data_b());
}

#[test]
fn raw_operations_apply_to_node_model() {
    let a = Tree::from_value(&data_a()).unwrap();
    let patched = with_operations(&a, &expected_raw_ops()).unwrap();
    assert_eq!(patched, Tree::from_value(&data_b()).unwrap());
}
