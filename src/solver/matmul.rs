use crate::decomposition::RowRange;
use crate::domain::*;
use crate::error::*;
use crate::kernel::MatMulKernel;
use crate::strategy::*;
use crate::util::*;

/// `C = A * B`, one worker per range of `C` rows.
pub fn multiply<T, GridA, GridB, GridC, StrategyType>(
    strategy: &StrategyType,
    a: &GridA,
    b: &GridB,
    c: &mut GridC,
    ranges: &[RowRange],
) -> Result<()>
where
    T: Cell,
    GridA: GridView<T>,
    GridB: GridView<T>,
    GridC: GridView<T>,
    StrategyType: ExecutionStrategy,
{
    if a.n() != b.n() || a.n() != c.n() {
        return Err(BenchError::InvalidArgument(format!(
            "matrix sizes differ: A is {}, B is {}, C is {}",
            a.n(),
            b.n(),
            c.n()
        )));
    }
    let kernel = MatMulKernel::new(a, b);
    strategy.run(&kernel, c, ranges)?;
    profiling::finish_frame!();
    Ok(())
}
