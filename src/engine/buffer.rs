//! The working buffer: one column per node, `batch_size` rows per column,
//! laid out column-major in a single allocation.
//!
//! One column per node times `batch_size` rows keeps the whole buffer in
//! L1/L2 cache regardless of the dataset's row count (`spec.md` §4.F,
//! §9). The buffer is allocated once per call and reused across row blocks.

use crate::scalar::Scalar;

/// Column-major working buffer used by the primal interpreter.
///
/// Because nodes are stored in postorder, every child column has a lower
/// index than its parent's column; kernels exploit this with
/// [`WorkBuffer::split_for_write`] to get simultaneous read access to all
/// sibling/child columns and write access to the parent column without
/// unsafe code.
pub struct WorkBuffer<S> {
    data: Vec<S>,
    batch_size: usize,
}

impl<S: Scalar> WorkBuffer<S> {
    /// Allocates a buffer sized for `num_nodes` columns of `batch_size` rows
    /// each, zero-initialized.
    #[must_use]
    pub fn new(num_nodes: usize, batch_size: usize) -> Self {
        Self {
            data: vec![S::zero(); num_nodes * batch_size],
            batch_size,
        }
    }

    /// The block width each column was allocated with.
    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Read-only view of node `i`'s column.
    #[must_use]
    pub fn column(&self, i: usize) -> &[S] {
        let start = i * self.batch_size;
        &self.data[start..start + self.batch_size]
    }

    /// Mutable view of node `i`'s column.
    pub fn column_mut(&mut self, i: usize) -> &mut [S] {
        let start = i * self.batch_size;
        &mut self.data[start..start + self.batch_size]
    }

    /// Splits the buffer into an immutable view of every column with index
    /// `< parent` and a mutable view of `parent`'s own column.
    ///
    /// Valid because the postorder invariant guarantees every child of
    /// `parent` has a strictly smaller index.
    pub fn split_for_write(&mut self, parent: usize) -> (ChildColumns<'_, S>, &mut [S]) {
        let mid = parent * self.batch_size;
        let (left, right) = self.data.split_at_mut(mid);
        (
            ChildColumns {
                data: left,
                batch_size: self.batch_size,
            },
            &mut right[..self.batch_size],
        )
    }
}

/// A read-only view of every working column with index below some `parent`,
/// handed to a kernel alongside the mutable parent column it is about to
/// fill in.
pub struct ChildColumns<'a, S> {
    data: &'a [S],
    batch_size: usize,
}

impl<S> ChildColumns<'_, S> {
    /// The column for node `i` (which must be `< parent` of the enclosing
    /// [`WorkBuffer::split_for_write`] call).
    #[must_use]
    pub fn get(&self, i: usize) -> &[S] {
        let start = i * self.batch_size;
        &self.data[start..start + self.batch_size]
    }
}
