use super::*;
use crate::domain::*;

/// `C = A * B` for the rows of a chunk of `C`.
/// All three matrices must have the same size.
pub struct MatMulKernel<'a, T: Cell> {
    n: usize,
    a: &'a [T],
    b: &'a [T],
}

impl<'a, T: Cell> MatMulKernel<'a, T> {
    pub fn new<GridA: GridView<T>, GridB: GridView<T>>(
        a: &'a GridA,
        b: &'a GridB,
    ) -> Self {
        debug_assert_eq!(a.n(), b.n());
        MatMulKernel {
            n: a.n(),
            a: a.buffer(),
            b: b.buffer(),
        }
    }
}

impl<T: Cell> RowKernel for MatMulKernel<'_, T> {
    type Cell = T;

    fn compute(&self, chunk: &mut RowChunk<'_, T>) -> f64 {
        debug_assert_eq!(chunk.n(), self.n);
        let n = self.n;
        for (i, c_row) in chunk.row_iter_mut() {
            let a_row = &self.a[i * n..(i + 1) * n];
            for (j, c) in c_row.iter_mut().enumerate() {
                let mut accumulator = T::zero();
                for (k, a) in a_row.iter().enumerate() {
                    accumulator = accumulator + *a * self.b[k * n + j];
                }
                *c = accumulator;
            }
        }
        0.0
    }

    fn compute_blocked(
        &self,
        chunk: &mut RowChunk<'_, T>,
        block_size: usize,
    ) -> f64 {
        debug_assert_eq!(chunk.n(), self.n);
        debug_assert!(block_size > 0);
        let n = self.n;
        let rows = chunk.rows();
        for v in chunk.buffer_mut() {
            *v = T::zero();
        }

        for ii in rows.iter().step_by(block_size) {
            let i_end = (ii + block_size).min(rows.end);
            for jj in (0..n).step_by(block_size) {
                let j_end = (jj + block_size).min(n);
                for kk in (0..n).step_by(block_size) {
                    let k_end = (kk + block_size).min(n);
                    for i in ii..i_end {
                        let c_row = chunk.row_mut(i);
                        for k in kk..k_end {
                            let a_ik = self.a[i * n + k];
                            let b_row = &self.b[k * n..(k + 1) * n];
                            for j in jj..j_end {
                                c_row[j] = c_row[j] + a_ik * b_row[j];
                            }
                        }
                    }
                }
            }
        }
        0.0
    }
}
