//! Chunked forward-mode Jacobian benchmark.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use gpkernel::{jacobian, DualDimension, InMemoryDataset, JacobianCalculator, Node, NodeKind,
    Range, StorageOrder, Tree};
use rand::prelude::*;

/// `sum(coeff[i] * X[i])` over `n_params` variables, all coefficients
/// marked `optimize`.
fn linear_combination(n_params: usize) -> Tree {
    let mut nodes = Vec::with_capacity(n_params * 3 + 1);
    let mut products = Vec::with_capacity(n_params);
    for i in 0..n_params {
        nodes.push(Node::constant(1.0).optimized());
        nodes.push(Node::variable(i as u64 + 1));
        nodes.push(Node::operator(NodeKind::Mul, 2, 2));
        products.push(nodes.len() - 1);
    }
    let add_arity = u16::try_from(n_params).unwrap();
    let add_length = u16::try_from(products.len() * 3).unwrap();
    nodes.push(Node::operator(NodeKind::Add, add_arity, add_length));
    Tree::new(nodes).unwrap()
}

fn dataset(n_params: usize, rows: usize) -> InMemoryDataset<f64> {
    let mut rng = rand::rng();
    let mut ds = InMemoryDataset::new();
    for hash in 1..=n_params as u64 {
        let values: Vec<f64> = (0..rows).map(|_| rng.random_range(-5.0..5.0)).collect();
        ds = ds.with_column(hash, values);
    }
    ds
}

fn bench_parameter_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("jacobian-parameter-counts");

    for n_params in [4usize, 8, 32, 128] {
        let tree = linear_combination(n_params);
        let ds = dataset(n_params, 1_000);
        let coeff = vec![1.0; n_params];
        group.throughput(Throughput::Elements((n_params * 1_000) as u64));
        group.bench_with_input(
            criterion::BenchmarkId::from_parameter(n_params),
            &n_params,
            |b, _| {
                b.iter(|| {
                    jacobian(
                        black_box(&tree),
                        black_box(&ds),
                        black_box(&coeff),
                        Range::new(0, 1_000),
                        StorageOrder::RowMajor,
                    )
                    .unwrap()
                })
            },
        );
    }
    group.finish();
}

fn bench_dual_dimension(c: &mut Criterion) {
    let mut group = c.benchmark_group("jacobian-dual-dimension");
    let n_params = 32;
    let tree = linear_combination(n_params);
    let ds = dataset(n_params, 2_000);
    let coeff = vec![1.0; n_params];

    for (label, dim) in [("four", DualDimension::Four), ("eight", DualDimension::Eight)] {
        let calc = JacobianCalculator::new(dim);
        group.bench_function(label, |b| {
            b.iter(|| {
                calc.jacobian(
                    black_box(&tree),
                    black_box(&ds),
                    black_box(&coeff),
                    Range::new(0, 2_000),
                    StorageOrder::RowMajor,
                )
                .unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parameter_counts, bench_dual_dimension);
criterion_main!(benches);
