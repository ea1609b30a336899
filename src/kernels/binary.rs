//! Fixed-arity binary kernels: `Pow` and `Aq`.
//!
//! Unlike `Sub`/`Div`/`Add`/`Mul`/`Fmax`/`Fmin`, these never generalize to a
//! variadic fold (`spec.md` §3: "Arity ≥ 2" for the arithmetic group, but
//! `Aq`/`Pow` are always exactly 2).

use crate::engine::buffer::WorkBuffer;
use crate::node::Node;
use crate::scalar::Scalar;
use crate::tree::children_of;

#[inline]
#[allow(clippy::expect_used)] // arity == 2 is checked by Tree::new for Pow/Aq
fn child_pair(nodes: &[Node], parent: usize) -> (usize, usize) {
    let mut it = children_of(nodes, parent);
    let right = it.next().expect("binary node has two children");
    let left = it.next().expect("binary node has two children");
    // `children_of` yields right-to-left (sibling-stride order); the
    // left-to-right operand order for `a op b` is (left, right).
    (left, right)
}

/// `pow(a, b)`.
pub fn pow<S: Scalar>(buf: &mut WorkBuffer<S>, nodes: &[Node], parent: usize, width: usize) {
    let (a, b) = child_pair(nodes, parent);
    let (children, out) = buf.split_for_write(parent);
    let ca = children.get(a);
    let cb = children.get(b);
    for i in 0..width {
        out[i] = ca[i].powf(cb[i]);
    }
}

/// Analytic quotient: `a / sqrt(1 + b^2)`.
pub fn aq<S: Scalar>(buf: &mut WorkBuffer<S>, nodes: &[Node], parent: usize, width: usize) {
    let (a, b) = child_pair(nodes, parent);
    let (children, out) = buf.split_for_write(parent);
    let ca = children.get(a);
    let cb = children.get(b);
    let one = S::one();
    for i in 0..width {
        out[i] = ca[i] / (one + cb[i] * cb[i]).sqrt();
    }
}
