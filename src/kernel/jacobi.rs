use super::*;
use crate::domain::*;

/// One Jacobi sweep of the 4-point average for the rows of a chunk of `B`,
/// reading the current state `A`.
/// Boundary columns of `B` are never written.
pub struct JacobiKernel<'a> {
    n: usize,
    input: &'a [f64],
}

impl<'a> JacobiKernel<'a> {
    pub fn new<GridType: GridView<f64>>(input: &'a GridType) -> Self {
        JacobiKernel {
            n: input.n(),
            input: input.buffer(),
        }
    }
}

impl RowKernel for JacobiKernel<'_> {
    type Cell = f64;

    /// Returns the sum of `|A - B|` over the chunk.
    fn compute(&self, chunk: &mut RowChunk<'_, f64>) -> f64 {
        debug_assert_eq!(chunk.n(), self.n);
        let n = self.n;
        let mut local_diff = 0.0;
        for (i, out_row) in chunk.row_iter_mut() {
            debug_assert!(i >= 1 && i + 1 < n, "row {i} is not interior");
            let up = &self.input[(i - 1) * n..i * n];
            let middle = &self.input[i * n..(i + 1) * n];
            let down = &self.input[(i + 1) * n..(i + 2) * n];
            for j in 1..n - 1 {
                let v = 0.25 * (up[j] + down[j] + middle[j - 1] + middle[j + 1]);
                out_row[j] = v;
                local_diff += (middle[j] - v).abs();
            }
        }
        local_diff
    }
}
