//! Column-oriented dataset view.
//!
//! Generalizes `tachyon`'s domain-separated keying (`TachyonDomain`,
//! `custom_domain`) from `u64` domain ids to `u64` variable-column hashes:
//! given a variable hash and a half-open row range, a [`Dataset`] returns a
//! contiguous view of exactly the requested length.

use std::collections::HashMap;

use crate::error::DatasetError;
use crate::scalar::Scalar;
use crate::tree::Range;

/// A column-oriented, read-only view over tabular data.
///
/// Implementors guarantee contiguous access for any in-bounds `[start, end)`
/// in every column; invalid hashes are a precondition violation
/// (`spec.md` §6).
pub trait Dataset<S: Scalar>: Send + Sync {
    /// Returns the column for `hash` restricted to `range`, or an error if
    /// the hash is unknown or the range exceeds the column.
    fn column(&self, hash: u64, range: Range) -> Result<&[S], DatasetError>;

    /// Number of rows in the dataset (the length of every column).
    fn num_rows(&self) -> usize;
}

/// A simple in-memory, `HashMap`-backed [`Dataset`] implementation.
///
/// Suitable for tests and for callers that have already materialized their
/// table in memory; dataset parsing/I/O from external formats is out of
/// scope for this core (`spec.md` §1).
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataset<S> {
    columns: HashMap<u64, Vec<S>>,
    num_rows: usize,
}

impl<S: Scalar> InMemoryDataset<S> {
    /// An empty dataset with no rows.
    #[must_use]
    pub fn new() -> Self {
        Self {
            columns: HashMap::new(),
            num_rows: 0,
        }
    }

    /// Inserts a column, keyed by its variable hash.
    ///
    /// # Panics
    ///
    /// Panics if a column of a different length than previously inserted
    /// columns is added — every column in a dataset must have the same
    /// number of rows.
    pub fn with_column(mut self, hash: u64, values: Vec<S>) -> Self {
        if self.columns.is_empty() {
            self.num_rows = values.len();
        } else {
            assert_eq!(
                values.len(),
                self.num_rows,
                "all columns in a Dataset must have the same length"
            );
        }
        self.columns.insert(hash, values);
        self
    }
}

impl<S: Scalar> Dataset<S> for InMemoryDataset<S> {
    fn column(&self, hash: u64, range: Range) -> Result<&[S], DatasetError> {
        let col = self
            .columns
            .get(&hash)
            .ok_or(DatasetError::UnknownVariable { hash })?;
        if range.end > col.len() {
            return Err(DatasetError::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                len: col.len(),
            });
        }
        Ok(&col[range.start..range.end])
    }

    fn num_rows(&self) -> usize {
        self.num_rows
    }
}
