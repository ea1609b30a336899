//! Unary per-batch kernels.
//!
//! Each applies an elementwise function to the single child column at
//! `parent - 1`, writing into `parent`'s column (`spec.md` §4.E).

use crate::engine::buffer::WorkBuffer;
use crate::node::Node;
use crate::scalar::Scalar;

#[inline]
fn apply<S: Scalar>(buf: &mut WorkBuffer<S>, parent: usize, width: usize, f: impl Fn(S) -> S) {
    let child = parent - 1;
    let (children, out) = buf.split_for_write(parent);
    let src = children.get(child);
    for i in 0..width {
        out[i] = f(src[i]);
    }
}

macro_rules! unary_kernel {
    ($name:ident, $method:ident) => {
        /// Unary kernel: see module docs.
        pub fn $name<S: Scalar>(buf: &mut WorkBuffer<S>, _nodes: &[Node], parent: usize, width: usize) {
            apply(buf, parent, width, S::$method);
        }
    };
}

unary_kernel!(abs, abs);
unary_kernel!(acos, acos);
unary_kernel!(asin, asin);
unary_kernel!(atan, atan);
unary_kernel!(cbrt, cbrt);
unary_kernel!(ceil, ceil);
unary_kernel!(cos, cos);
unary_kernel!(cosh, cosh);
unary_kernel!(exp, exp);
unary_kernel!(floor, floor);
unary_kernel!(log, ln);
unary_kernel!(log1p, ln_1p);
unary_kernel!(sin, sin);
unary_kernel!(sinh, sinh);
unary_kernel!(sqrt, sqrt);
unary_kernel!(tan, tan);
unary_kernel!(tanh, tanh);

/// `log(|x|)`.
pub fn logabs<S: Scalar>(buf: &mut WorkBuffer<S>, _nodes: &[Node], parent: usize, width: usize) {
    apply(buf, parent, width, |x| S::ln(S::abs(x)));
}

/// `sqrt(|x|)`.
pub fn sqrtabs<S: Scalar>(buf: &mut WorkBuffer<S>, _nodes: &[Node], parent: usize, width: usize) {
    apply(buf, parent, width, |x| S::sqrt(S::abs(x)));
}

/// `x * x` (not `pow(x, 2)`).
pub fn square<S: Scalar>(buf: &mut WorkBuffer<S>, _nodes: &[Node], parent: usize, width: usize) {
    apply(buf, parent, width, |x| x * x);
}
