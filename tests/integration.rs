//! Integration tests.
//!
//! Verifies the public API against the concrete end-to-end scenarios and
//! cross-cutting invariants this crate's evaluation core is required to
//! satisfy.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use gpkernel::{
    evaluate, evaluate_many, evaluate_tiled, jacobian, InMemoryDataset, Node, NodeKind, Range,
    StorageOrder, Tree,
};

#[test]
fn scenario_constant_tree_broadcasts() {
    let tree = Tree::new(vec![Node::constant(3.5)]).unwrap();
    let ds: InMemoryDataset<f64> = InMemoryDataset::new().with_column(1, vec![0.0; 5]);
    let out = evaluate(&tree, &ds, Range::new(0, 5), None).unwrap();
    assert_eq!(out, vec![3.5, 3.5, 3.5, 3.5, 3.5]);
}

#[test]
fn scenario_weighted_variable() {
    let tree = Tree::new(vec![Node::weighted_variable(1, 2.0)]).unwrap();
    let ds: InMemoryDataset<f64> =
        InMemoryDataset::new().with_column(1, vec![1.0, 2.0, 3.0, 4.0]);
    let out = evaluate(&tree, &ds, Range::new(0, 4), None).unwrap();
    assert_eq!(out, vec![2.0, 4.0, 6.0, 8.0]);
}

#[test]
fn scenario_binary_add() {
    let nodes = vec![
        Node::variable(1),
        Node::variable(2),
        Node::operator(NodeKind::Add, 2, 2),
    ];
    let tree = Tree::new(nodes).unwrap();
    let ds: InMemoryDataset<f64> = InMemoryDataset::new()
        .with_column(1, vec![1.0, 2.0, 3.0])
        .with_column(2, vec![10.0, 20.0, 30.0]);
    let out = evaluate(&tree, &ds, Range::new(0, 3), None).unwrap();
    assert_eq!(out, vec![11.0, 22.0, 33.0]);
}

#[test]
fn scenario_mul_arity_five_fold() {
    let mut nodes: Vec<Node> = [2.0, 3.0, 5.0, 7.0, 11.0]
        .iter()
        .map(|v| Node::constant(*v))
        .collect();
    nodes.push(Node::operator(NodeKind::Mul, 5, 5));
    let tree = Tree::new(nodes).unwrap();
    let ds: InMemoryDataset<f64> = InMemoryDataset::new().with_column(1, vec![0.0; 2]);
    let out = evaluate(&tree, &ds, Range::new(0, 2), None).unwrap();
    assert_eq!(out, vec![2310.0, 2310.0]);
}

#[test]
fn scenario_sub_nary_fold() {
    let nodes = vec![
        Node::constant(10.0),
        Node::constant(1.0),
        Node::constant(2.0),
        Node::constant(3.0),
        Node::operator(NodeKind::Sub, 4, 4),
    ];
    let tree = Tree::new(nodes).unwrap();
    let ds: InMemoryDataset<f64> = InMemoryDataset::new().with_column(1, vec![0.0; 3]);
    let out = evaluate(&tree, &ds, Range::new(0, 3), None).unwrap();
    assert_eq!(out, vec![4.0, 4.0, 4.0]);
}

#[test]
fn scenario_parameter_override() {
    let mut nodes: Vec<Node> = [2.0, 3.0, 5.0, 7.0, 11.0]
        .iter()
        .map(|v| Node::constant(*v).optimized())
        .collect();
    nodes.push(Node::operator(NodeKind::Mul, 5, 5));
    let tree = Tree::new(nodes).unwrap();
    let ds: InMemoryDataset<f64> = InMemoryDataset::new().with_column(1, vec![0.0; 3]);
    let params = [1.0, 1.0, 1.0, 1.0, 1.0];
    let out = evaluate(&tree, &ds, Range::new(0, 3), Some(&params)).unwrap();
    assert_eq!(out, vec![1.0, 1.0, 1.0]);
}

#[test]
fn scenario_jacobian_of_linear_combination() {
    let nodes = vec![
        Node::constant(2.0).optimized(),
        Node::variable(1),
        Node::operator(NodeKind::Mul, 2, 2),
        Node::constant(3.0).optimized(),
        Node::operator(NodeKind::Add, 2, 4),
    ];
    let tree = Tree::new(nodes).unwrap();
    let ds: InMemoryDataset<f64> = InMemoryDataset::new().with_column(1, vec![1.0, 2.0, 3.0]);
    let j = jacobian(
        &tree,
        &ds,
        &[2.0, 3.0],
        Range::new(0, 3),
        StorageOrder::RowMajor,
    )
    .unwrap();

    assert_eq!(j.get(0, 0), 1.0);
    assert_eq!(j.get(1, 0), 2.0);
    assert_eq!(j.get(2, 0), 3.0);
    assert_eq!(j.get(0, 1), 1.0);
    assert_eq!(j.get(1, 1), 1.0);
    assert_eq!(j.get(2, 1), 1.0);
}

#[test]
fn evaluate_tiled_matches_single_range_evaluate() {
    let nodes = vec![Node::weighted_variable(1, 1.0)];
    let tree = Tree::new(nodes).unwrap();
    let values: Vec<f64> = (0..150).map(f64::from).collect();
    let ds: InMemoryDataset<f64> = InMemoryDataset::new().with_column(1, values);

    let whole = evaluate(&tree, &ds, Range::new(0, 150), None).unwrap();
    let tiled = evaluate_tiled(&tree, &ds, Range::new(0, 150), 17, None).unwrap();
    assert_eq!(whole, tiled);
}

#[test]
fn evaluate_many_runs_independent_trees_over_a_shared_dataset() {
    let trees = vec![
        Tree::new(vec![Node::weighted_variable(1, 1.0)]).unwrap(),
        Tree::new(vec![Node::weighted_variable(1, 2.0)]).unwrap(),
        Tree::new(vec![Node::constant(9.0)]).unwrap(),
    ];
    let ds: InMemoryDataset<f64> = InMemoryDataset::new().with_column(1, vec![10.0, 20.0]);
    let out = evaluate_many(&trees, &ds, Range::new(0, 2), 0).unwrap();
    assert_eq!(out[0], vec![10.0, 20.0]);
    assert_eq!(out[1], vec![20.0, 40.0]);
    assert_eq!(out[2], vec![9.0, 9.0]);
}

#[test]
fn storage_order_equivalence_under_transpose() {
    let nodes = vec![
        Node::constant(2.0).optimized(),
        Node::variable(1),
        Node::operator(NodeKind::Mul, 2, 2),
        Node::constant(3.0).optimized(),
        Node::operator(NodeKind::Add, 2, 4),
    ];
    let tree = Tree::new(nodes).unwrap();
    let ds: InMemoryDataset<f64> = InMemoryDataset::new().with_column(1, vec![1.0, 2.0, 3.0, 4.0]);

    let row = jacobian(
        &tree,
        &ds,
        &[2.0, 3.0],
        Range::new(0, 4),
        StorageOrder::RowMajor,
    )
    .unwrap();
    let col = jacobian(
        &tree,
        &ds,
        &[2.0, 3.0],
        Range::new(0, 4),
        StorageOrder::ColumnMajor,
    )
    .unwrap();

    for r in 0..row.rows() {
        for c in 0..row.cols() {
            assert_eq!(row.get(r, c), col.get(r, c));
        }
    }
}
