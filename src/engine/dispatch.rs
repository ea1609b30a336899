//! Dispatch table: maps `(NodeKind, Scalar)` to a vectorized kernel.
//!
//! Generalizes `tachyon::engine::dispatcher::get_best_kernel`'s "select a
//! function pointer once, reuse it for every call" pattern from a
//! CPU-feature-keyed hash backend to a node-kind-keyed numeric kernel.
//! Registration is keyed by [`NodeKind::index`]; `try_get` returns `None`
//! for leaves; an unregistered inner kind (always `Dynamic`, since every
//! built-in kind is registered by [`DispatchTable::with_defaults`]) is a
//! precondition violation surfaced by the interpreter as
//! [`crate::error::EvalError::UnregisteredKind`].

use crate::kernels::{binary, unary, variadic, Kernel};
use crate::node::{NodeKind, NODE_KIND_COUNT};
use crate::scalar::Scalar;

/// A `(NodeKind, Scalar)` to kernel mapping, built once and read-only
/// thereafter (`spec.md` §3: "read-only during evaluation").
pub struct DispatchTable<S: Scalar> {
    entries: [Option<Kernel<S>>; NODE_KIND_COUNT],
}

impl<S: Scalar> DispatchTable<S> {
    /// An empty table with no kernels registered.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: [None; NODE_KIND_COUNT],
        }
    }

    /// A table with every built-in operator kind registered to its portable
    /// kernel. `Dynamic` is left unregistered; callers that use `Dynamic`
    /// nodes must call [`DispatchTable::register`] themselves
    /// (`spec.md` §9: "Implementations should require explicit registration
    /// ... and treat an unregistered Dynamic as a precondition violation").
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut table = Self::empty();
        table.register(NodeKind::Add, variadic::add);
        table.register(NodeKind::Sub, variadic::sub);
        table.register(NodeKind::Mul, variadic::mul);
        table.register(NodeKind::Div, variadic::div);
        table.register(NodeKind::Fmax, variadic::fmax);
        table.register(NodeKind::Fmin, variadic::fmin);
        table.register(NodeKind::Aq, binary::aq);
        table.register(NodeKind::Pow, binary::pow);
        table.register(NodeKind::Abs, unary::abs);
        table.register(NodeKind::Acos, unary::acos);
        table.register(NodeKind::Asin, unary::asin);
        table.register(NodeKind::Atan, unary::atan);
        table.register(NodeKind::Cbrt, unary::cbrt);
        table.register(NodeKind::Ceil, unary::ceil);
        table.register(NodeKind::Cos, unary::cos);
        table.register(NodeKind::Cosh, unary::cosh);
        table.register(NodeKind::Exp, unary::exp);
        table.register(NodeKind::Floor, unary::floor);
        table.register(NodeKind::Log, unary::log);
        table.register(NodeKind::Logabs, unary::logabs);
        table.register(NodeKind::Log1p, unary::log1p);
        table.register(NodeKind::Sin, unary::sin);
        table.register(NodeKind::Sinh, unary::sinh);
        table.register(NodeKind::Sqrt, unary::sqrt);
        table.register(NodeKind::Sqrtabs, unary::sqrtabs);
        table.register(NodeKind::Tan, unary::tan);
        table.register(NodeKind::Tanh, unary::tanh);
        table.register(NodeKind::Square, unary::square);
        table
    }

    /// Registers (or replaces) the kernel for `kind`.
    pub fn register(&mut self, kind: NodeKind, kernel: Kernel<S>) {
        self.entries[kind.index()] = Some(kernel);
    }

    /// The kernel for `kind`, or `None` if unregistered (always `None` for
    /// leaf kinds, which the interpreter never dispatches through the
    /// table).
    #[must_use]
    pub fn try_get(&self, kind: NodeKind) -> Option<Kernel<S>> {
        self.entries[kind.index()]
    }
}

impl<S: Scalar> Default for DispatchTable<S> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_are_never_registered() {
        let table: DispatchTable<f64> = DispatchTable::with_defaults();
        assert!(table.try_get(NodeKind::Constant).is_none());
        assert!(table.try_get(NodeKind::Variable).is_none());
    }

    #[test]
    fn dynamic_is_unregistered_by_default() {
        let table: DispatchTable<f64> = DispatchTable::with_defaults();
        assert!(table.try_get(NodeKind::Dynamic).is_none());
    }

    #[test]
    fn every_arithmetic_kind_has_a_kernel() {
        let table: DispatchTable<f64> = DispatchTable::with_defaults();
        assert!(table.try_get(NodeKind::Add).is_some());
        assert!(table.try_get(NodeKind::Pow).is_some());
        assert!(table.try_get(NodeKind::Square).is_some());
    }
}
