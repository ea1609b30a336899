//! Dispatch-table and interpreter configuration.
//!
//! `spec.md` §6 lists `scalarTypes`, `batchSize`, and `dualDimension` as the
//! dispatch table builder's recognized options. There is no on-disk config
//! format for this core (§6: "no wire protocols, no on-disk formats"), so
//! this is a plain builder, the same shape as `tachyon`'s compile-time
//! feature flags turned into a runtime struct since batch size and dual
//! dimension are useful to vary per call here rather than per build.
//! `scalarTypes` itself is a type-level choice (`f32`/`f64` via
//! [`crate::scalar::Scalar`] bounds), not a field this struct can hold.

use crate::dual::DualDimension;

/// Row-block width and derivative-sweep width for an evaluation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    batch_size: usize,
    dual_dimension: DualDimension,
}

impl EngineConfig {
    /// Default configuration: batch size 64, dual dimension 4
    /// (`spec.md` §6 defaults).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            batch_size: 64,
            dual_dimension: DualDimension::Four,
        }
    }

    /// Overrides the row-block width.
    ///
    /// # Panics
    ///
    /// Panics if `batch_size` is zero.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        assert!(batch_size > 0, "batch_size must be positive");
        self.batch_size = batch_size;
        self
    }

    /// Overrides the derivative sweep width used by a
    /// [`crate::engine::JacobianCalculator`] built via
    /// [`crate::engine::JacobianCalculator::from_config`].
    #[must_use]
    pub const fn with_dual_dimension(mut self, dual_dimension: DualDimension) -> Self {
        self.dual_dimension = dual_dimension;
        self
    }

    /// The configured row-block width.
    #[must_use]
    pub const fn batch_size(self) -> usize {
        self.batch_size
    }

    /// The configured dual dimension.
    #[must_use]
    pub const fn dual_dimension(self) -> DualDimension {
        self.dual_dimension
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
