//! Bolero property tests.
//!
//! Run as ordinary assertions via `cargo test`, or as fuzz targets via
//! `cargo bolero test`.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

#[cfg(test)]
mod fuzz {
    mod tree_shape;
}
