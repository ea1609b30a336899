//! Variadic kernels: `Add`, `Sub`, `Mul`, `Div`, `Fmax`, `Fmin`.
//!
//! Folds children left-to-right using the kernel's binary operation, in
//! chunks of five children at a time (`spec.md` §4.E), with the arity-1
//! edge cases `Sub(x) = -x` and `Div(x) = 1/x`.

use crate::engine::buffer::WorkBuffer;
use crate::node::Node;
use crate::scalar::Scalar;
use crate::tree::children_of;

/// Chunk width for the unrolled fold (`spec.md` §4.E, §9).
const FOLD_CHUNK: usize = 5;

/// Index of the leftmost child (`spec.md`'s "first operand") of `parent`.
/// `children_of` walks right to left, so the first operand is the last item
/// it yields; `nth` drives the iterator without collecting it.
#[allow(clippy::expect_used)] // arity >= 1 is checked by Tree::new for every variadic kind
fn leftmost_child(nodes: &[Node], parent: usize) -> usize {
    let arity = nodes[parent].arity as usize;
    children_of(nodes, parent)
        .nth(arity - 1)
        .expect("arity >= 1 is checked by Tree::new")
}

/// Folds every child but the leftmost into it using `op`, processing up to
/// `FOLD_CHUNK` sibling columns per inner pass through a fixed-size index
/// buffer — no heap allocation, so the per-row-block cost is independent of
/// how many times this runs (`spec.md` §4.E: "kernels never allocate").
/// `op`'s combination of the non-leftmost children must be order-independent
/// (true for all of `Add`/`Mul`/`Fmax`/`Fmin`/`Sub`/`Div`: the "rest" folds
/// under the variadic kernel's own commutative operation either way).
fn fold_variadic<S: Scalar>(
    buf: &mut WorkBuffer<S>,
    nodes: &[Node],
    parent: usize,
    width: usize,
    op: impl Fn(S, S) -> S,
) {
    let arity = nodes[parent].arity as usize;
    let leftmost = leftmost_child(nodes, parent);

    let (cols, out) = buf.split_for_write(parent);
    let first = cols.get(leftmost);
    out[..width].copy_from_slice(&first[..width]);

    let mut rest = children_of(nodes, parent).take(arity - 1);
    let mut chunk = [0usize; FOLD_CHUNK];
    loop {
        let mut n = 0;
        while n < FOLD_CHUNK {
            match rest.next() {
                Some(c) => {
                    chunk[n] = c;
                    n += 1;
                }
                None => break,
            }
        }
        if n == 0 {
            break;
        }
        for &c in &chunk[..n] {
            let src = cols.get(c);
            for i in 0..width {
                out[i] = op(out[i], src[i]);
            }
        }
    }
}

/// `a + b + ...`; identity on the sole child at arity 1.
pub fn add<S: Scalar>(buf: &mut WorkBuffer<S>, nodes: &[Node], parent: usize, width: usize) {
    fold_variadic(buf, nodes, parent, width, |a, b| a + b);
}

/// `a * b * ...`; identity on the sole child at arity 1.
pub fn mul<S: Scalar>(buf: &mut WorkBuffer<S>, nodes: &[Node], parent: usize, width: usize) {
    fold_variadic(buf, nodes, parent, width, |a, b| a * b);
}

/// `max(a, b, ...)`; identity on the sole child at arity 1.
pub fn fmax<S: Scalar>(buf: &mut WorkBuffer<S>, nodes: &[Node], parent: usize, width: usize) {
    fold_variadic(buf, nodes, parent, width, S::fmax);
}

/// `min(a, b, ...)`; identity on the sole child at arity 1.
pub fn fmin<S: Scalar>(buf: &mut WorkBuffer<S>, nodes: &[Node], parent: usize, width: usize) {
    fold_variadic(buf, nodes, parent, width, S::fmin);
}

/// `a - (b + c + ...)`; negates the sole child at arity 1.
pub fn sub<S: Scalar>(buf: &mut WorkBuffer<S>, nodes: &[Node], parent: usize, width: usize) {
    if nodes[parent].arity == 1 {
        let leftmost = leftmost_child(nodes, parent);
        let (cols, out) = buf.split_for_write(parent);
        let src = cols.get(leftmost);
        for i in 0..width {
            out[i] = -src[i];
        }
        return;
    }
    fold_variadic(buf, nodes, parent, width, |a, b| a - b);
}

/// `a / (b * c * ...)`; inverts the sole child at arity 1.
pub fn div<S: Scalar>(buf: &mut WorkBuffer<S>, nodes: &[Node], parent: usize, width: usize) {
    if nodes[parent].arity == 1 {
        let leftmost = leftmost_child(nodes, parent);
        let (cols, out) = buf.split_for_write(parent);
        let src = cols.get(leftmost);
        let one = S::one();
        for i in 0..width {
            out[i] = one / src[i];
        }
        return;
    }
    fold_variadic(buf, nodes, parent, width, |a, b| a / b);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    fn leaf_buffer(values: &[f64]) -> (WorkBuffer<f64>, Vec<Node>) {
        let mut buf: WorkBuffer<f64> = WorkBuffer::new(values.len() + 1, 1);
        for (i, v) in values.iter().enumerate() {
            buf.column_mut(i)[0] = *v;
        }
        let mut nodes: Vec<Node> = values.iter().map(|_| Node::constant(0.0)).collect();
        let n = values.len() as u16;
        nodes.push(Node::operator(NodeKind::Add, n, n));
        (buf, nodes)
    }

    #[test]
    fn mul_arity_five() {
        let (mut buf, nodes) = leaf_buffer(&[2.0, 3.0, 5.0, 7.0, 11.0]);
        mul(&mut buf, &nodes, 5, 1);
        assert_eq!(buf.column(5)[0], 2310.0);
    }

    #[test]
    fn sub_nary_fold() {
        let (mut buf, nodes) = leaf_buffer(&[10.0, 1.0, 2.0, 3.0]);
        sub(&mut buf, &nodes, 4, 1);
        assert_eq!(buf.column(4)[0], 4.0);
    }

    #[test]
    fn sub_arity_one_negates() {
        let (mut buf, nodes) = leaf_buffer(&[7.0]);
        sub(&mut buf, &nodes, 1, 1);
        assert_eq!(buf.column(1)[0], -7.0);
    }

    #[test]
    fn div_arity_one_inverts() {
        let (mut buf, nodes) = leaf_buffer(&[4.0]);
        div(&mut buf, &nodes, 1, 1);
        assert_eq!(buf.column(1)[0], 0.25);
    }

    #[test]
    fn add_arity_one_is_identity() {
        let (mut buf, nodes) = leaf_buffer(&[4.5]);
        add(&mut buf, &nodes, 1, 1);
        assert_eq!(buf.column(1)[0], 4.5);
    }

    #[test]
    fn div_nary_fold() {
        let (mut buf, nodes) = leaf_buffer(&[100.0, 2.0, 5.0]);
        div(&mut buf, &nodes, 3, 1);
        assert_eq!(buf.column(3)[0], 10.0);
    }

    #[test]
    fn add_folds_more_than_one_chunk() {
        let values: Vec<f64> = (1..=11).map(f64::from).collect();
        let (mut buf, nodes) = leaf_buffer(&values);
        add(&mut buf, &nodes, 11, 1);
        let expected: f64 = values.iter().sum();
        assert_eq!(buf.column(11)[0], expected);
    }
}
