pub use num_traits::{Num, One, Zero};

/// Numeric grid cell.
/// `Pod` lets a cell live in a raw shared mapping.
pub trait Cell:
    Num + Copy + Send + Sync + bytemuck::Pod + std::fmt::Debug
{
}

impl<T: Num + Copy + Send + Sync + bytemuck::Pod + std::fmt::Debug> Cell
    for T
{
}

/// Linear index of `(row, col)` in a row-major `n x n` buffer.
#[inline]
pub fn coord_to_linear(n: usize, row: usize, col: usize) -> usize {
    row * n + col
}

/// Inverse of `coord_to_linear`.
#[inline]
pub fn linear_to_coord(n: usize, index: usize) -> (usize, usize) {
    (index / n, index % n)
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn linear_round_trip() {
        let n = 7;
        assert_eq!(coord_to_linear(n, 0, 0), 0);
        assert_eq!(coord_to_linear(n, 2, 3), 17);
        assert_eq!(linear_to_coord(n, 17), (2, 3));
        assert_eq!(linear_to_coord(n, 48), (6, 6));
    }
}
