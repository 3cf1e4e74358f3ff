//! Per-partition compute kernels.
//! A kernel reads whatever input it holds
//! and writes only the rows of the chunk it is handed.

mod jacobi;
mod matmul;

pub use jacobi::*;
pub use matmul::*;

use crate::domain::RowChunk;
use crate::util::*;

pub trait RowKernel: Sync {
    type Cell: Cell;

    /// Compute every output cell of `chunk`,
    /// returns the kernel's partial statistic for those rows.
    fn compute(&self, chunk: &mut RowChunk<'_, Self::Cell>) -> f64;

    /// Same result as `compute`, iterating in `block_size` tiles.
    fn compute_blocked(
        &self,
        chunk: &mut RowChunk<'_, Self::Cell>,
        _block_size: usize,
    ) -> f64 {
        self.compute(chunk)
    }
}
