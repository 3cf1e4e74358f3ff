//! Work done between two Jacobi sweeps, after every worker has joined.

use crate::domain::*;
use rayon::prelude::*;

/// Sum of `|A - B|` over the interior cells.
pub fn sum_abs_diff<GridA: GridView<f64>, GridB: GridView<f64>>(
    a: &GridA,
    b: &GridB,
) -> f64 {
    debug_assert_eq!(a.n(), b.n());
    let n = a.n();
    if n < 3 {
        return 0.0;
    }
    (1..n - 1)
        .into_par_iter()
        .map(|i| {
            let a_row = a.row(i);
            let b_row = b.row(i);
            (1..n - 1).map(|j| (a_row[j] - b_row[j]).abs()).sum::<f64>()
        })
        .sum()
}

/// Close a sweep: settle the sweep difference and make `B` the new `A`.
/// `partial` is the statistic the strategy collected from its workers,
/// when it could observe one.
/// Must only be called once every worker of the sweep has joined.
pub fn finish_sweep<GridA: GridView<f64>, GridB: GridView<f64>>(
    a: &mut GridA,
    b: &GridB,
    partial: Option<f64>,
) -> f64 {
    profiling::scope!("finish_sweep");
    let difference = partial.unwrap_or_else(|| sum_abs_diff(a, b));
    a.par_copy_from(b);
    difference
}
