use crate::domain::*;

/// Dirichlet setup of the Jacobi grids:
/// `boundary` on the outer ring, `interior` everywhere else.
pub fn boundary_fill<GridType: GridView<f64>>(
    grid: &mut GridType,
    boundary: f64,
    interior: f64,
) {
    let n = grid.n();
    grid.par_set_values(|row, col| {
        if row == 0 || col == 0 || row == n - 1 || col == n - 1 {
            boundary
        } else {
            interior
        }
    });
}
