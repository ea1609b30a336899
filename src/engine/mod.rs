//! Stateful evaluation machinery: working buffer, dispatch table, row-blocked
//! interpreter, forward-mode derivative calculator, and the parallel
//! multi-tree driver.
//!
//! Mirrors `tachyon::engine`'s split between `dispatcher` (kernel lookup) and
//! `parallel` (fan-out), with the primal interpreter and Jacobian calculator
//! added as the two numeric entry points this crate exists to provide.

pub mod buffer;
pub mod config;
pub mod dispatch;
pub mod interpreter;
pub mod jacobian;
pub mod parallel;

pub use config::EngineConfig;
pub use dispatch::DispatchTable;
pub use interpreter::Interpreter;
pub use jacobian::{Jacobian, JacobianCalculator, StorageOrder};
pub use parallel::{evaluate_many, evaluate_many_into};
