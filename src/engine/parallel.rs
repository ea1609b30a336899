//! Parallel multi-tree driver.
//!
//! Evaluates many trees over the same dataset range concurrently. Each tree
//! is independent — no shared mutable state, no lock on the hot path — so
//! this is a plain fork-join fan-out over a work-stealing pool, the same
//! `rayon` dependency `tachyon::engine::parallel` uses for its Merkle-leaf
//! hashing, generalized here from byte chunks to whole-tree evaluations
//! (`spec.md` §4.H).

use tracing::debug_span;

use crate::dataset::Dataset;
use crate::engine::interpreter::Interpreter;
use crate::error::EvalError;
use crate::scalar::Scalar;
use crate::tree::{Range, Tree};

/// Evaluates every tree in `trees` over the same `dataset`/`range`, returning
/// one output vector per tree.
///
/// `n_threads == 0` lets `rayon` pick automatically (its global pool
/// default); otherwise a dedicated pool of `n_threads` workers is built for
/// this call.
///
/// # Errors
///
/// Returns the first [`EvalError`] encountered, by tree index; other trees'
/// results are discarded.
pub fn evaluate_many<S: Scalar>(
    trees: &[Tree],
    dataset: &dyn Dataset<S>,
    range: Range,
    n_threads: usize,
) -> Result<Vec<Vec<S>>, EvalError> {
    let _span = debug_span!(
        "evaluate_many",
        tree_count = trees.len(),
        range_size = range.size(),
        n_threads
    )
    .entered();

    let interp: Interpreter<S> = Interpreter::new();
    run_with_pool(n_threads, || {
        #[cfg(feature = "multithread")]
        {
            use rayon::prelude::*;
            trees
                .par_iter()
                .map(|tree| interp.evaluate(tree, dataset, range, None))
                .collect()
        }
        #[cfg(not(feature = "multithread"))]
        {
            trees
                .iter()
                .map(|tree| interp.evaluate(tree, dataset, range, None))
                .collect()
        }
    })
}

/// Evaluates every tree in `trees` over `range`, writing tree `i`'s output
/// into `out[i * range.size() .. (i + 1) * range.size()]` (row-major,
/// one row per tree).
///
/// # Errors
///
/// Returns [`EvalError::OutputSizeMismatch`] if `out.len() != trees.len() *
/// range.size()`, or the first per-tree [`EvalError`] encountered.
pub fn evaluate_many_into<S: Scalar>(
    trees: &[Tree],
    dataset: &dyn Dataset<S>,
    range: Range,
    out: &mut [S],
    n_threads: usize,
) -> Result<(), EvalError> {
    let expected = trees.len() * range.size();
    if out.len() != expected {
        return Err(EvalError::OutputSizeMismatch {
            expected,
            actual: out.len(),
        });
    }

    let _span = debug_span!(
        "evaluate_many",
        tree_count = trees.len(),
        range_size = range.size(),
        n_threads
    )
    .entered();

    let interp: Interpreter<S> = Interpreter::new();
    run_with_pool(n_threads, || {
        #[cfg(feature = "multithread")]
        {
            use rayon::prelude::*;
            trees
                .par_iter()
                .zip(out.par_chunks_mut(range.size()))
                .try_for_each(|(tree, slot)| interp.evaluate_into(tree, dataset, range, slot, None))
        }
        #[cfg(not(feature = "multithread"))]
        {
            trees
                .iter()
                .zip(out.chunks_mut(range.size()))
                .try_for_each(|(tree, slot)| interp.evaluate_into(tree, dataset, range, slot, None))
        }
    })
}

/// Runs `body` on a dedicated pool of `n_threads` workers, or on `rayon`'s
/// global pool when `n_threads == 0`. Without the `multithread` feature,
/// `n_threads` is accepted but has no effect — `body` always runs serially.
#[cfg(feature = "multithread")]
#[allow(clippy::expect_used)] // only fails on OS thread-spawn failure, unrecoverable here
fn run_with_pool<R: Send>(n_threads: usize, body: impl FnOnce() -> R + Send) -> R {
    if n_threads == 0 {
        return body();
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .build()
        .expect("failed to build a rayon thread pool with the requested thread count");
    pool.install(body)
}

#[cfg(not(feature = "multithread"))]
fn run_with_pool<R: Send>(_n_threads: usize, body: impl FnOnce() -> R + Send) -> R {
    body()
}
