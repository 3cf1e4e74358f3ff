mod chunk;
mod owned;
mod shared;

pub use chunk::*;
pub use owned::*;
pub use shared::*;

use crate::decomposition::RowRange;
use crate::error::*;
use crate::util::*;
use rayon::prelude::*;

pub trait GridView<T: Cell>: Sync {
    /// Grid is `n x n`.
    fn n(&self) -> usize;

    fn buffer(&self) -> &[T];

    fn buffer_mut(&mut self) -> &mut [T];

    /// Whether writes made by a forked child are visible to the parent.
    fn is_process_shared(&self) -> bool;

    #[track_caller]
    fn get(&self, row: usize, col: usize) -> T {
        debug_assert!(
            row < self.n() && col < self.n(),
            "({}, {}) outside of {}x{} grid",
            row,
            col,
            self.n(),
            self.n()
        );
        self.buffer()[coord_to_linear(self.n(), row, col)]
    }

    #[track_caller]
    fn set(&mut self, row: usize, col: usize, value: T) {
        let n = self.n();
        debug_assert!(
            row < n && col < n,
            "({}, {}) outside of {}x{} grid",
            row,
            col,
            n,
            n
        );
        self.buffer_mut()[coord_to_linear(n, row, col)] = value;
    }

    fn row(&self, row: usize) -> &[T] {
        let n = self.n();
        &self.buffer()[row * n..(row + 1) * n]
    }

    /// One chunk of output rows per range.
    fn split_rows_mut(
        &mut self,
        ranges: &[RowRange],
    ) -> Result<Vec<RowChunk<'_, T>>> {
        let n = self.n();
        split_rows_mut(self.buffer_mut(), n, ranges)
    }

    /// Set every cell from its `(row, col)`, one rayon task per row.
    fn par_set_values<F: Fn(usize, usize) -> T + Send + Sync>(
        &mut self,
        f: F,
    ) {
        let n = self.n();
        self.buffer_mut().par_chunks_mut(n).enumerate().for_each(
            |(row, values): (usize, &mut [T])| {
                for (col, value) in values.iter_mut().enumerate() {
                    *value = f(row, col);
                }
            },
        );
    }

    /// Copy other grid into self
    fn par_copy_from<GridType: GridView<T>>(&mut self, other: &GridType) {
        debug_assert_eq!(self.n(), other.n());
        let n = self.n();
        self.buffer_mut()
            .par_chunks_mut(n)
            .zip(other.buffer().par_chunks(n))
            .for_each(|(dst, src)| dst.copy_from_slice(src));
    }
}

/// Grids are plain data, two grids are equal when their cells are.
pub fn grids_equal<T: Cell, A: GridView<T>, B: GridView<T>>(
    a: &A,
    b: &B,
) -> bool {
    a.n() == b.n() && a.buffer() == b.buffer()
}
