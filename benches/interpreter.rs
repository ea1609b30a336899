//! Row-blocked primal interpreter benchmark.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use gpkernel::{evaluate, InMemoryDataset, Node, NodeKind, Range, Tree};
use rand::prelude::*;

/// `((a + b) * c - d) / e`, five variables, one Add/Mul/Sub/Div each.
fn arithmetic_tree() -> Tree {
    let nodes = vec![
        Node::variable(1),
        Node::variable(2),
        Node::operator(NodeKind::Add, 2, 2),
        Node::variable(3),
        Node::operator(NodeKind::Mul, 2, 4),
        Node::variable(4),
        Node::operator(NodeKind::Sub, 2, 6),
        Node::variable(5),
        Node::operator(NodeKind::Div, 2, 8),
    ];
    Tree::new(nodes).unwrap()
}

fn dataset(rows: usize) -> InMemoryDataset<f64> {
    let mut rng = rand::rng();
    let mut column = |hash: u64, ds: InMemoryDataset<f64>| {
        let values: Vec<f64> = (0..rows).map(|_| rng.random_range(1.0..10.0)).collect();
        ds.with_column(hash, values)
    };
    let mut ds = InMemoryDataset::new();
    for hash in 1..=5 {
        ds = column(hash, ds);
    }
    ds
}

fn bench_row_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpreter-row-counts");
    let tree = arithmetic_tree();

    for rows in [1_000usize, 10_000, 100_000] {
        let ds = dataset(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(
            criterion::BenchmarkId::from_parameter(rows),
            &rows,
            |b, &rows| {
                b.iter(|| {
                    evaluate(
                        black_box(&tree),
                        black_box(&ds),
                        Range::new(0, rows),
                        None,
                    )
                    .unwrap()
                })
            },
        );
    }
    group.finish();
}

fn bench_batch_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpreter-batch-sizes");
    let tree = arithmetic_tree();
    let ds = dataset(50_000);

    for batch_size in [16usize, 64, 256, 1024] {
        let interp = gpkernel::Interpreter::<f64>::new().with_batch_size(batch_size);
        group.bench_with_input(
            criterion::BenchmarkId::from_parameter(batch_size),
            &batch_size,
            |b, _| {
                b.iter(|| {
                    interp
                        .evaluate(black_box(&tree), black_box(&ds), Range::new(0, 50_000), None)
                        .unwrap()
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_row_counts, bench_batch_sizes);
criterion_main!(benches);
