//! # gpkernel
//!
//! Expression-tree evaluation core for symbolic-regression and
//! genetic-programming systems: a postorder-encoded tree, a row-blocked
//! primal interpreter, and a forward-mode automatic-differentiation path
//! that reuses the same dispatch table and kernels under a dual scalar.
//!
//! Dataset parsing, tree construction/mutation, genetic operators,
//! pretty-printing, optimizers, and CLI/language-binding surfaces are
//! deliberately out of scope; this crate is the narrow numeric core those
//! surfaces consume.

//! # Usage
//! ```rust
//! use gpkernel::{evaluate, InMemoryDataset, Node, NodeKind, Range, Tree};
//!
//! let nodes = vec![
//!     Node::variable(1),
//!     Node::variable(2),
//!     Node::operator(NodeKind::Add, 2, 2),
//! ];
//! let tree = Tree::new(nodes)?;
//! let dataset: InMemoryDataset<f64> = InMemoryDataset::new()
//!     .with_column(1, vec![1.0, 2.0, 3.0])
//!     .with_column(2, vec![10.0, 20.0, 30.0]);
//!
//! let out = evaluate(&tree, &dataset, Range::new(0, 3), None)?;
//! assert_eq!(out, vec![11.0, 22.0, 33.0]);
//! # Ok::<(), gpkernel::EvalError>(())
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod dataset;
pub mod dual;
pub mod engine;
pub mod error;
pub mod kernels;
pub mod node;
pub mod scalar;
pub mod tree;

// =============================================================================
// EXPORTS
// =============================================================================

pub use dataset::{Dataset, InMemoryDataset};
pub use dual::{Dual, DualDimension};
pub use engine::{
    evaluate_many, evaluate_many_into, DispatchTable, EngineConfig, Interpreter, Jacobian,
    JacobianCalculator, StorageOrder,
};
pub use error::{DatasetError, EvalError, TreeError};
pub use node::{ArityKind, Node, NodeKind};
pub use scalar::Scalar;
pub use tree::{hash_subtrees, Range, Tree};

/// Evaluates `tree` over `range`, returning a freshly allocated vector.
///
/// Thin convenience wrapper over a default-configured [`Interpreter`]; build
/// one directly to reuse its dispatch table and row-block width across many
/// calls.
///
/// # Errors
///
/// See [`Interpreter::evaluate_into`].
pub fn evaluate<S: Scalar>(
    tree: &Tree,
    dataset: &dyn Dataset<S>,
    range: Range,
    parameters: Option<&[S]>,
) -> Result<Vec<S>, EvalError> {
    Interpreter::new().evaluate(tree, dataset, range, parameters)
}

/// Evaluates `tree` over `range`, writing into `out`. See [`evaluate`].
///
/// # Errors
///
/// See [`Interpreter::evaluate_into`].
pub fn evaluate_into<S: Scalar>(
    tree: &Tree,
    dataset: &dyn Dataset<S>,
    range: Range,
    out: &mut [S],
    parameters: Option<&[S]>,
) -> Result<(), EvalError> {
    Interpreter::new().evaluate_into(tree, dataset, range, out, parameters)
}

/// Tiles `range` into chunks of `tile` rows, evaluating each independently.
/// See [`Interpreter::evaluate_tiled`].
///
/// # Errors
///
/// See [`Interpreter::evaluate_tiled`].
pub fn evaluate_tiled<S: Scalar>(
    tree: &Tree,
    dataset: &dyn Dataset<S>,
    range: Range,
    tile: usize,
    parameters: Option<&[S]>,
) -> Result<Vec<S>, EvalError> {
    Interpreter::new().evaluate_tiled(tree, dataset, range, tile, parameters)
}

/// Computes the Jacobian of `tree`'s output with respect to `coeff`, using
/// the default dual dimension ([`DualDimension::Four`]).
///
/// # Errors
///
/// See [`JacobianCalculator::jacobian`].
pub fn jacobian(
    tree: &Tree,
    dataset: &dyn Dataset<f64>,
    coeff: &[f64],
    range: Range,
    order: StorageOrder,
) -> Result<Jacobian, EvalError> {
    JacobianCalculator::default().jacobian(tree, dataset, coeff, range, order)
}

/// Computes the Jacobian and copies its flattened storage into `out`. See
/// [`jacobian`].
///
/// # Errors
///
/// See [`JacobianCalculator::jacobian_into`].
pub fn jacobian_into(
    tree: &Tree,
    dataset: &dyn Dataset<f64>,
    coeff: &[f64],
    range: Range,
    out: &mut [f64],
    order: StorageOrder,
) -> Result<(), EvalError> {
    JacobianCalculator::default().jacobian_into(tree, dataset, coeff, range, out, order)
}
