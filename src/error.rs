//! Error taxonomy.
//!
//! Three categories per the core's error handling design: tree construction
//! violations ([`TreeError`]), evaluation-time contract violations
//! ([`EvalError`]), and dataset contract violations ([`DatasetError`]).
//! Numeric conditions (NaN, infinity) are never represented here — they
//! propagate as IEEE values, per design.

use thiserror::Error;

/// A contract violation discovered while constructing a [`crate::tree::Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A tree must contain at least one node.
    #[error("tree has no nodes")]
    Empty,
    /// `length`/`arity` are inconsistent at the given node index: the sum of
    /// each child's `length + 1` did not equal the parent's `length`.
    #[error("node {index}: length/arity inconsistent (expected length {expected}, got {actual})")]
    LengthArityMismatch {
        /// Index of the offending node.
        index: usize,
        /// `length` value implied by the node's children.
        expected: u16,
        /// `length` value actually stored on the node.
        actual: u16,
    },
    /// A node's declared `arity` does not match what its [`crate::node::NodeKind`]
    /// permits.
    #[error("node {index}: kind {kind} does not permit arity {arity}")]
    InvalidArity {
        /// Index of the offending node.
        index: usize,
        /// The node's kind.
        kind: crate::node::NodeKind,
        /// The node's declared arity.
        arity: u16,
    },
    /// `optimize` was set on a non-leaf node, which is undefined.
    #[error("node {index}: optimize is only defined on leaf nodes")]
    OptimizeOnInnerNode {
        /// Index of the offending node.
        index: usize,
    },
    /// The sibling-stride recurrence walked out of the node's subtree range.
    #[error("node {index}: child recurrence escaped subtree bounds")]
    ChildOutOfBounds {
        /// Index of the offending node.
        index: usize,
    },
}

/// A contract violation discovered while evaluating a tree.
#[derive(Debug, Clone, Error)]
pub enum EvalError {
    /// The tree failed construction-time validation; callers must not reach
    /// an evaluation entry point with an unvalidated tree.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// The output span's length did not equal `range.size()`.
    #[error("output span has length {actual}, expected {expected}")]
    OutputSizeMismatch {
        /// Required length (`range.size()`).
        expected: usize,
        /// Actual length of the caller's output span.
        actual: usize,
    },
    /// A `Variable` node referenced a hash the dataset does not recognize.
    #[error("unknown variable hash {hash:#x}")]
    UnknownVariable {
        /// The offending hash.
        hash: u64,
    },
    /// A `Range` was empty or inverted (`start > end`).
    #[error("invalid range [{start}, {end})")]
    InvalidRange {
        /// Range start.
        start: usize,
        /// Range end.
        end: usize,
    },
    /// A `Dynamic` node had no kernel registered for the requested scalar
    /// type, or a node's kind had no entry at all (a registry bug, not a
    /// caller bug, but still fatal).
    #[error("no kernel registered for node kind {kind} at node {index}")]
    UnregisteredKind {
        /// The offending kind.
        kind: crate::node::NodeKind,
        /// Index of the offending node.
        index: usize,
    },
    /// The tree contained a disabled node; evaluation of disabled trees is
    /// undefined input.
    #[error("tree contains a disabled node at index {index}")]
    DisabledNode {
        /// Index of the offending node.
        index: usize,
    },
    /// `parameters` was supplied but had fewer entries than the tree has
    /// `optimize`-marked leaves.
    #[error("parameter vector too short: needed {needed}, got {available}")]
    ParameterShortfall {
        /// Number of `optimize`-marked leaves in the tree.
        needed: usize,
        /// Number of entries supplied.
        available: usize,
    },
}

/// A contract violation discovered in a [`crate::dataset::Dataset`] access.
#[derive(Debug, Clone, Copy, Error)]
pub enum DatasetError {
    /// The requested variable hash is not present in the dataset.
    #[error("unknown variable hash {hash:#x}")]
    UnknownVariable {
        /// The offending hash.
        hash: u64,
    },
    /// The requested range exceeds the column's length.
    #[error("range [{start}, {end}) exceeds column length {len}")]
    RangeOutOfBounds {
        /// Range start.
        start: usize,
        /// Range end.
        end: usize,
        /// Column length.
        len: usize,
    },
}
