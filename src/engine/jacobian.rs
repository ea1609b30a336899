//! Forward-mode derivative calculator.
//!
//! Drives [`Interpreter`] with a [`Dual`] scalar, sweeping the parameter
//! vector in chunks of the dual dimension and scattering each sweep's
//! derivative lanes into a [`Jacobian`] (`spec.md` §4.G). The chunk width is
//! fixed at the type level by a const generic on `Dual`, so
//! [`JacobianCalculator`] holds one of two monomorphized interpreters
//! depending on the runtime-chosen [`DualDimension`].

use std::collections::HashSet;

use tracing::debug_span;

use crate::dataset::{Dataset, InMemoryDataset};
use crate::dual::{Dual, DualDimension};
use crate::engine::config::EngineConfig;
use crate::engine::interpreter::Interpreter;
use crate::error::EvalError;
use crate::node::NodeKind;
use crate::tree::{Range, Tree};

/// Layout of a [`Jacobian`]'s flattened storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOrder {
    /// `data[row * cols + col]`.
    RowMajor,
    /// `data[col * rows + row]`.
    ColumnMajor,
}

/// A dense `(range.size, P)` matrix of partial derivatives, where `P` is the
/// parameter count and each row corresponds to one evaluated row.
#[derive(Debug, Clone, PartialEq)]
pub struct Jacobian {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
    order: StorageOrder,
}

impl Jacobian {
    /// Number of output rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of parameter columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// The storage order of [`Jacobian::as_slice`].
    #[must_use]
    pub const fn order(&self) -> StorageOrder {
        self.order
    }

    /// `d output[row] / d coeff[col]`.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        match self.order {
            StorageOrder::RowMajor => self.data[row * self.cols + col],
            StorageOrder::ColumnMajor => self.data[col * self.rows + row],
        }
    }

    /// The flattened matrix in its declared [`StorageOrder`].
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Consumes `self`, returning the flattened matrix.
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }
}

/// Owns one of the two dual-dimensioned interpreters and exposes the
/// Jacobian entry points. Construct once and reuse; switching
/// [`DualDimension`] requires building a new calculator since the dual type
/// is fixed at the type level.
pub enum JacobianCalculator {
    /// 4 derivative lanes per sweep.
    Four(Interpreter<Dual<4>>),
    /// 8 derivative lanes per sweep.
    Eight(Interpreter<Dual<8>>),
}

impl JacobianCalculator {
    /// A calculator with every built-in kernel registered for the chosen
    /// dual dimension and default row-block width.
    #[must_use]
    pub fn new(dual_dimension: DualDimension) -> Self {
        match dual_dimension {
            DualDimension::Four => Self::Four(Interpreter::new()),
            DualDimension::Eight => Self::Eight(Interpreter::new()),
        }
    }

    /// Builds a calculator from an [`EngineConfig`], honoring its configured
    /// dual dimension and row-block width rather than the defaults
    /// [`JacobianCalculator::new`] assumes.
    #[must_use]
    pub fn from_config(config: EngineConfig) -> Self {
        Self::new(config.dual_dimension()).with_batch_size(config.batch_size())
    }

    /// Returns a calculator with the row-block width overridden.
    #[must_use]
    pub fn with_batch_size(self, batch_size: usize) -> Self {
        match self {
            Self::Four(i) => Self::Four(i.with_batch_size(batch_size)),
            Self::Eight(i) => Self::Eight(i.with_batch_size(batch_size)),
        }
    }

    /// Computes the Jacobian of `tree`'s output with respect to `coeff` over
    /// `range`, returning a freshly allocated matrix.
    ///
    /// # Errors
    ///
    /// See [`Interpreter::evaluate_into`]; `coeff` must have exactly
    /// `tree.parameter_count()` entries.
    pub fn jacobian(
        &self,
        tree: &Tree,
        dataset: &dyn Dataset<f64>,
        coeff: &[f64],
        range: Range,
        order: StorageOrder,
    ) -> Result<Jacobian, EvalError> {
        match self {
            Self::Four(interp) => jacobian_generic::<4>(interp, tree, dataset, coeff, range, order),
            Self::Eight(interp) => {
                jacobian_generic::<8>(interp, tree, dataset, coeff, range, order)
            }
        }
    }

    /// Computes the Jacobian and copies its flattened storage into `out`.
    ///
    /// # Errors
    ///
    /// As [`JacobianCalculator::jacobian`], plus [`EvalError::OutputSizeMismatch`]
    /// if `out`'s length does not equal `range.size() * coeff.len()`.
    pub fn jacobian_into(
        &self,
        tree: &Tree,
        dataset: &dyn Dataset<f64>,
        coeff: &[f64],
        range: Range,
        out: &mut [f64],
        order: StorageOrder,
    ) -> Result<(), EvalError> {
        let computed = self.jacobian(tree, dataset, coeff, range, order)?;
        if out.len() != computed.data.len() {
            return Err(EvalError::OutputSizeMismatch {
                expected: computed.data.len(),
                actual: out.len(),
            });
        }
        out.copy_from_slice(&computed.data);
        Ok(())
    }
}

impl Default for JacobianCalculator {
    fn default() -> Self {
        Self::new(DualDimension::Four)
    }
}

/// Materializes every `Variable` column `tree` references, over `range`, as
/// zero-derivative duals. Built once per call rather than per chunk: the
/// dataset contribution to every sweep is the same constant real values, only
/// `optimize`-marked leaves vary.
fn dualize_dataset<const D: usize>(
    tree: &Tree,
    dataset: &dyn Dataset<f64>,
    range: Range,
) -> Result<InMemoryDataset<Dual<D>>, EvalError> {
    let mut hashes = HashSet::new();
    for node in tree.nodes() {
        if node.kind == NodeKind::Variable {
            hashes.insert(node.hash);
        }
    }

    let mut out = InMemoryDataset::new();
    for hash in hashes {
        let column = dataset.column(hash, range).map_err(|e| match e {
            crate::error::DatasetError::UnknownVariable { hash } => {
                EvalError::UnknownVariable { hash }
            }
            crate::error::DatasetError::RangeOutOfBounds { start, end, .. } => {
                EvalError::InvalidRange { start, end }
            }
        })?;
        let dual_column: Vec<Dual<D>> = column.iter().map(|v| Dual::constant(*v)).collect();
        out = out.with_column(hash, dual_column);
    }
    Ok(out)
}

fn jacobian_generic<const D: usize>(
    interp: &Interpreter<Dual<D>>,
    tree: &Tree,
    dataset: &dyn Dataset<f64>,
    coeff: &[f64],
    range: Range,
    order: StorageOrder,
) -> Result<Jacobian, EvalError> {
    let p = coeff.len();
    let rows = range.size();
    let chunk_count = if p == 0 { 0 } else { (p - 1) / D + 1 };
    let _span = debug_span!("jacobian", parameters = p, dual_dimension = D, chunk_count).entered();

    let dual_dataset = dualize_dataset::<D>(tree, dataset, range)?;
    let mut data = vec![0.0_f64; rows * p];

    let mut start = 0;
    while start < p {
        let width = D.min(p - start);
        let mut inputs: Vec<Dual<D>> = coeff.iter().map(|c| Dual::constant(*c)).collect();
        for k in 0..width {
            inputs[start + k].deriv[k] = 1.0;
        }

        let mut sweep = vec![Dual::<D>::constant(0.0); rows];
        interp.evaluate_into(tree, &dual_dataset, range, &mut sweep, Some(&inputs))?;

        for (r, value) in sweep.iter().enumerate() {
            for k in 0..width {
                let idx = match order {
                    StorageOrder::RowMajor => r * p + (start + k),
                    StorageOrder::ColumnMajor => (start + k) * rows + r,
                };
                data[idx] = value.deriv[k];
            }
        }
        start += D;
    }

    Ok(Jacobian {
        data,
        rows,
        cols: p,
        order,
    })
}
