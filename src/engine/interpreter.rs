//! Row-blocked primal interpreter.
//!
//! Walks nodes in postorder, invoking kernels from a [`DispatchTable`] and
//! writing the root column into the caller's output span, one row block at
//! a time (`spec.md` §4.F). Confining all per-node columns to a block of
//! `batch_size` rows keeps the working buffer in L1/L2 cache regardless of
//! how large the dataset range is.

use crate::dataset::Dataset;
use crate::engine::buffer::WorkBuffer;
use crate::engine::config::EngineConfig;
use crate::engine::dispatch::DispatchTable;
use crate::error::{DatasetError, EvalError};
use crate::kernels::Kernel;
use crate::node::NodeKind;
use crate::scalar::Scalar;
use crate::tree::{Range, Tree};

/// Per-node bookkeeping resolved once per call, before the row-block loop.
enum NodeMeta<'a, S> {
    /// Constant leaf: its working column was filled once, in setup.
    Constant,
    /// Variable leaf: dataset column for `[range.start, range.end)` plus the
    /// resolved multiplicative weight.
    Variable { column: &'a [S], weight: S },
    /// Inner node with a kernel from the dispatch table.
    Inner(Kernel<S>),
}

/// Owns a [`DispatchTable`] and [`EngineConfig`] and exposes the primal
/// evaluation entry points. Construct once and reuse across many calls; the
/// table and config are read-only thereafter (`spec.md` §3).
pub struct Interpreter<S: Scalar> {
    dispatch: DispatchTable<S>,
    config: EngineConfig,
}

impl<S: Scalar> Interpreter<S> {
    /// An interpreter with every built-in kernel registered and default
    /// configuration (batch size 64).
    #[must_use]
    pub fn new() -> Self {
        Self {
            dispatch: DispatchTable::with_defaults(),
            config: EngineConfig::new(),
        }
    }

    /// An interpreter built from an explicit dispatch table and config
    /// (e.g. one with a `Dynamic` kernel registered).
    #[must_use]
    pub const fn with_dispatch(dispatch: DispatchTable<S>, config: EngineConfig) -> Self {
        Self { dispatch, config }
    }

    /// The interpreter's dispatch table, for registering additional
    /// (e.g. `Dynamic`) kernels before evaluating.
    pub fn dispatch_mut(&mut self) -> &mut DispatchTable<S> {
        &mut self.dispatch
    }

    /// Returns an interpreter with the row-block width overridden.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.config = self.config.with_batch_size(batch_size);
        self
    }

    /// Evaluates `tree` over `range`, returning a freshly allocated vector.
    ///
    /// # Errors
    ///
    /// See [`Interpreter::evaluate_into`].
    pub fn evaluate(
        &self,
        tree: &Tree,
        dataset: &dyn Dataset<S>,
        range: Range,
        parameters: Option<&[S]>,
    ) -> Result<Vec<S>, EvalError> {
        let mut out = vec![S::zero(); range.size()];
        self.evaluate_into(tree, dataset, range, &mut out, parameters)?;
        Ok(out)
    }

    /// Evaluates `tree` over `range`, writing into `out`.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError`] if the tree contains a disabled node, `out`'s
    /// length doesn't match `range.size()`, a `Variable` node's hash is
    /// unknown to `dataset`, a node's kind has no registered kernel
    /// (only possible for `Dynamic`), or `parameters` is shorter than the
    /// tree's `optimize`-marked leaf count.
    pub fn evaluate_into(
        &self,
        tree: &Tree,
        dataset: &dyn Dataset<S>,
        range: Range,
        out: &mut [S],
        parameters: Option<&[S]>,
    ) -> Result<(), EvalError> {
        if let Some(index) = tree.has_disabled() {
            return Err(EvalError::DisabledNode { index });
        }
        if out.len() != range.size() {
            return Err(EvalError::OutputSizeMismatch {
                expected: range.size(),
                actual: out.len(),
            });
        }

        let batch_size = self.config.batch_size();
        let mut buf: WorkBuffer<S> = WorkBuffer::new(tree.len(), batch_size);
        let metas = build_meta(tree, dataset, range, parameters, &self.dispatch, &mut buf)?;

        let root = tree.root_index();
        let nodes = tree.nodes();
        let mut row = 0;
        while row < range.size() {
            let width = batch_size.min(range.size() - row);
            for (i, meta) in metas.iter().enumerate() {
                match meta {
                    NodeMeta::Constant => {}
                    NodeMeta::Variable { column, weight } => {
                        let src = &column[row..row + width];
                        let dst = buf.column_mut(i);
                        for k in 0..width {
                            dst[k] = *weight * src[k];
                        }
                    }
                    NodeMeta::Inner(kernel) => {
                        kernel(&mut buf, nodes, i, width);
                    }
                }
            }
            out[row..row + width].copy_from_slice(&buf.column(root)[..width]);
            row += width;
        }
        Ok(())
    }

    /// Tiles `range` into chunks of `tile` rows and evaluates each via
    /// [`Interpreter::evaluate_into`], concatenating the results. Equivalent
    /// to a single `evaluate` call over the full range
    /// (`spec.md` §6: "conceptual sugar").
    ///
    /// # Errors
    ///
    /// See [`Interpreter::evaluate_into`]; additionally returns
    /// [`EvalError::InvalidRange`] if `tile` is zero.
    pub fn evaluate_tiled(
        &self,
        tree: &Tree,
        dataset: &dyn Dataset<S>,
        range: Range,
        tile: usize,
        parameters: Option<&[S]>,
    ) -> Result<Vec<S>, EvalError> {
        if tile == 0 {
            return Err(EvalError::InvalidRange {
                start: range.start,
                end: range.start,
            });
        }
        let mut out = Vec::with_capacity(range.size());
        let mut start = range.start;
        while start < range.end {
            let end = (start + tile).min(range.end);
            let sub = Range::new(start, end);
            let mut chunk = vec![S::zero(); sub.size()];
            self.evaluate_into(tree, dataset, sub, &mut chunk, parameters)?;
            out.extend(chunk);
            start = end;
        }
        Ok(out)
    }
}

impl<S: Scalar> Default for Interpreter<S> {
    fn default() -> Self {
        Self::new()
    }
}

fn build_meta<'a, S: Scalar>(
    tree: &Tree,
    dataset: &'a dyn Dataset<S>,
    range: Range,
    parameters: Option<&[S]>,
    dispatch: &DispatchTable<S>,
    buf: &mut WorkBuffer<S>,
) -> Result<Vec<NodeMeta<'a, S>>, EvalError> {
    let mut param_cursor = 0usize;
    let mut metas = Vec::with_capacity(tree.len());

    for (index, node) in tree.nodes().iter().enumerate() {
        if node.kind == NodeKind::Dynamic {
            // Unlike Constant/Variable, Dynamic is a leaf that is still
            // dispatched through the table: arity and evaluation are left
            // entirely to user registration (`spec.md` §9).
            let kernel = dispatch
                .try_get(node.kind)
                .ok_or(EvalError::UnregisteredKind {
                    kind: node.kind,
                    index,
                })?;
            metas.push(NodeMeta::Inner(kernel));
        } else if node.kind.is_leaf() {
            let param = if node.optimize {
                let params = parameters.ok_or(EvalError::ParameterShortfall {
                    needed: tree.parameter_count(),
                    available: 0,
                })?;
                let value = *params.get(param_cursor).ok_or(EvalError::ParameterShortfall {
                    needed: tree.parameter_count(),
                    available: params.len(),
                })?;
                param_cursor += 1;
                value
            } else {
                S::from_f64(node.value)
            };

            match node.kind {
                NodeKind::Constant => {
                    buf.column_mut(index).fill(param);
                    metas.push(NodeMeta::Constant);
                }
                NodeKind::Variable => {
                    let column = dataset.column(node.hash, range).map_err(|e| match e {
                        DatasetError::UnknownVariable { hash } => {
                            EvalError::UnknownVariable { hash }
                        }
                        DatasetError::RangeOutOfBounds { start, end, .. } => {
                            EvalError::InvalidRange { start, end }
                        }
                    })?;
                    metas.push(NodeMeta::Variable {
                        column,
                        weight: param,
                    });
                }
                _ => unreachable!("non-leaf/non-dynamic kind reached the leaf branch"),
            }
        } else {
            let kernel = dispatch
                .try_get(node.kind)
                .ok_or(EvalError::UnregisteredKind {
                    kind: node.kind,
                    index,
                })?;
            metas.push(NodeMeta::Inner(kernel));
        }
    }

    Ok(metas)
}
