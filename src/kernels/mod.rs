//! Per-batch kernels.
//!
//! Column-major, batch-width-bounded implementations of every
//! [`crate::node::NodeKind`] operator. Kernels never allocate and never
//! read outside the current row block (`spec.md` §4.E). Generic over
//! [`Scalar`](crate::scalar::Scalar) so the same bodies serve the primal and
//! dual evaluation paths.

pub mod binary;
pub mod unary;
pub mod variadic;

use crate::engine::buffer::WorkBuffer;
use crate::node::Node;

/// Uniform kernel signature: fills node `parent`'s working column from its
/// children's columns, for the first `width` rows of the current block.
pub type Kernel<S> = fn(&mut WorkBuffer<S>, &[Node], usize, usize);
