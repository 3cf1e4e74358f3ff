use super::*;
use crate::error::*;
use crate::util::*;

/// Grid on the private heap of the process.
/// A forked child gets its own copy-on-write version of it.
pub struct OwnedGrid<T: Cell> {
    n: usize,
    buffer: Vec<T>,
}

impl<T: Cell> OwnedGrid<T> {
    /// Allocate a zeroed `n x n` grid.
    pub fn allocate(n: usize) -> Result<Self> {
        let len = cell_count(n)?;
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(len)
            .map_err(|e| BenchError::Allocation {
                n,
                reason: e.to_string(),
            })?;
        buffer.resize(len, T::zero());
        Ok(OwnedGrid { n, buffer })
    }
}

impl<T: Cell> GridView<T> for OwnedGrid<T> {
    fn n(&self) -> usize {
        self.n
    }

    fn buffer(&self) -> &[T] {
        &self.buffer
    }

    fn buffer_mut(&mut self) -> &mut [T] {
        &mut self.buffer
    }

    fn is_process_shared(&self) -> bool {
        false
    }
}

/// Number of cells in an `n x n` grid, rejecting empty and overflowing sizes.
pub(crate) fn cell_count(n: usize) -> Result<usize> {
    if n == 0 {
        return Err(BenchError::InvalidArgument(
            "grid size must be positive".to_string(),
        ));
    }
    n.checked_mul(n).ok_or_else(|| BenchError::Allocation {
        n,
        reason: "cell count overflows usize".to_string(),
    })
}
