//! Drivers tying grids, kernels, strategies and the aggregator together.

pub mod bench;
pub mod jacobi;
pub mod matmul;
