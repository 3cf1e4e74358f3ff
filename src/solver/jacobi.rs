use crate::aggregate;
use crate::config::Termination;
use crate::decomposition::RowRange;
use crate::domain::*;
use crate::error::*;
use crate::kernel::JacobiKernel;
use crate::strategy::*;
use log::debug;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct JacobiReport {
    /// Sweeps actually run.
    pub sweeps: usize,

    /// Difference reported by the last sweep.
    pub last_difference: f64,
}

/// Sweep `a` into `b` until `termination` says stop.
/// After every sweep `b` is copied back into `a`.
///
/// When the strategy forks and the grids are private,
/// children write their own copies of `b`,
/// so `a` never advances past its initial state.
pub fn solve<GridA, GridB, StrategyType>(
    strategy: &StrategyType,
    a: &mut GridA,
    b: &mut GridB,
    ranges: &[RowRange],
    termination: Termination,
) -> Result<JacobiReport>
where
    GridA: GridView<f64>,
    GridB: GridView<f64>,
    StrategyType: ExecutionStrategy,
{
    debug_assert_eq!(a.n(), b.n());
    let mut report = JacobiReport::default();
    for sweep in 0..termination.max_iterations() {
        profiling::scope!("jacobi sweep");
        let partial = {
            let kernel = JacobiKernel::new(&*a);
            strategy.run(&kernel, b, ranges)?
        };
        let difference = aggregate::finish_sweep(a, b, partial);
        debug!("sweep {sweep}: difference {difference}");
        profiling::finish_frame!();

        report.sweeps = sweep + 1;
        report.last_difference = difference;
        if termination.converged(difference) {
            break;
        }
    }
    Ok(report)
}
