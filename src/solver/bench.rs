//! Whole benchmark runs: allocate, fill, time, compute, record.

use crate::config::*;
use crate::domain::*;
use crate::error::*;
use crate::initial_conditions::*;
use crate::results::append_result;
use crate::solver::{jacobi, matmul};
use crate::strategy::*;
use crate::timing::*;
use log::{error, info};

#[derive(Clone, Debug, PartialEq)]
pub struct MatMulReport {
    pub n: usize,
    pub workers: usize,
    pub strategy: StrategyKind,
    pub timings: Timings,

    /// Wrapping sum of every cell of `C`.
    pub checksum: i64,
}

impl MatMulReport {
    /// Report on stdout.
    pub fn print(&self) {
        let n = self.n;
        match self.strategy {
            StrategyKind::Sequential => {
                println!("Matrix size: {n} x {n}");
            }
            StrategyKind::Processes => {
                println!(
                    "Matrix size: {n} x {n}, Processes: {}",
                    self.workers
                );
            }
            StrategyKind::Threads => {
                println!("Matrix size: {n} x {n}, Threads: {}", self.workers);
            }
        }
        print_timings(&self.timings);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct JacobiRunReport {
    pub n: usize,
    pub workers: usize,
    pub strategy: StrategyKind,
    pub timings: Timings,
    pub solve: jacobi::JacobiReport,

    /// Final value of the center cell.
    pub center: f64,
}

impl JacobiRunReport {
    pub fn print(&self) {
        let unit = match self.strategy {
            StrategyKind::Processes => "processes",
            StrategyKind::Threads => "threads",
            StrategyKind::Sequential => "worker",
        };
        println!(
            "Jacobi with {} {unit} completed in {} iterations.",
            self.workers, self.solve.sweeps
        );
        println!(
            "Grid size: {n} x {n}, center value: {:.6}, last difference: {:e}",
            self.center,
            self.solve.last_difference,
            n = self.n
        );
        print_timings(&self.timings);
    }
}

fn print_timings(timings: &Timings) {
    println!("User CPU time: {:.6} seconds", timings.user_cpu);
    if timings.children_user_cpu > 0.0 {
        println!(
            "Child processes user CPU time: {:.6} seconds",
            timings.children_user_cpu
        );
    }
    println!(
        "Total execution time (wall-clock): {:.6} seconds",
        timings.wall
    );
}

/// A results file that can not be written does not fail the run.
fn record(ctx: &RunContext, timings: &Timings) {
    if let Err(e) = append_result(&ctx.results_path, timings.wall) {
        error!("{e}");
    }
}

/// Multiply two random `n x n` matrices with `strategy`.
/// With the process strategy `C` lives in a shared mapping.
pub fn run_matmul(
    ctx: &RunContext,
    strategy: &Strategy,
) -> Result<MatMulReport> {
    ctx.validate()?;
    let ranges = ctx.ranges()?;
    info!(
        "multiplying {n}x{n} matrices with {} {} worker(s)",
        ranges.len(),
        strategy.name(),
        n = ctx.n
    );

    let mut a = OwnedGrid::<i32>::allocate(ctx.n)?;
    let mut b = OwnedGrid::<i32>::allocate(ctx.n)?;
    rand_fill(&mut a, RANDOM_MAX, ctx.seed, 0);
    rand_fill(&mut b, RANDOM_MAX, ctx.seed, 1);

    let (checksum, timings) = match strategy.kind() {
        StrategyKind::Processes => {
            let mut c = SharedGrid::<i32>::allocate(ctx.n)?;
            let ((), timings) = timed(|| {
                matmul::multiply(strategy, &a, &b, &mut c, &ranges)
            })?;
            (grid_checksum(&c), timings)
        }
        _ => {
            let mut c = OwnedGrid::<i32>::allocate(ctx.n)?;
            let ((), timings) = timed(|| {
                matmul::multiply(strategy, &a, &b, &mut c, &ranges)
            })?;
            (grid_checksum(&c), timings)
        }
    };
    record(ctx, &timings);

    Ok(MatMulReport {
        n: ctx.n,
        workers: ranges.len(),
        strategy: strategy.kind(),
        timings,
        checksum,
    })
}

fn grid_checksum<GridType: GridView<i32>>(grid: &GridType) -> i64 {
    grid.buffer()
        .iter()
        .fold(0i64, |acc, v| acc.wrapping_add(*v as i64))
}

/// Relax an `n x n` grid with boundary 1.0 and interior 0.0.
/// Process runs use private grids unless `ctx.shared_grids` is set,
/// in which case they advance like the threaded solver.
pub fn run_jacobi(
    ctx: &RunContext,
    strategy: &Strategy,
) -> Result<JacobiRunReport> {
    ctx.validate()?;
    if ctx.shared_grids {
        let a = SharedGrid::<f64>::allocate(ctx.n)?;
        let b = SharedGrid::<f64>::allocate(ctx.n)?;
        run_jacobi_on(ctx, strategy, a, b)
    } else {
        let a = OwnedGrid::<f64>::allocate(ctx.n)?;
        let b = OwnedGrid::<f64>::allocate(ctx.n)?;
        run_jacobi_on(ctx, strategy, a, b)
    }
}

fn run_jacobi_on<GridType: GridView<f64>>(
    ctx: &RunContext,
    strategy: &Strategy,
    mut a: GridType,
    mut b: GridType,
) -> Result<JacobiRunReport> {
    let ranges = ctx.ranges()?;
    info!(
        "relaxing {n}x{n} grid with {} {} worker(s), {:?}",
        ranges.len(),
        strategy.name(),
        ctx.termination,
        n = ctx.n
    );

    boundary_fill(&mut a, 1.0, 0.0);
    boundary_fill(&mut b, 1.0, 0.0);

    let (solve, timings) = timed(|| {
        jacobi::solve(strategy, &mut a, &mut b, &ranges, ctx.termination)
    })?;
    record(ctx, &timings);

    Ok(JacobiRunReport {
        n: ctx.n,
        workers: ranges.len(),
        strategy: strategy.kind(),
        timings,
        solve,
        center: a.get(ctx.n / 2, ctx.n / 2),
    })
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn temp_results(name: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("partbench_{}_{}.txt", name, std::process::id()));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn invalid_context_rejected_before_work() {
        let path = temp_results("invalid");
        let ctx = RunContext::for_matmul(0, 2).with_results_path(&path);
        let strategy = Strategy::new(StrategyKind::Threads, 2, None).unwrap();
        assert!(matches!(
            run_matmul(&ctx, &strategy),
            Err(BenchError::InvalidArgument(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn matmul_records_one_line() {
        let path = temp_results("matmul_line");
        let ctx = RunContext::for_matmul(16, 3)
            .with_seed(Some(11))
            .with_results_path(&path);
        let strategy = Strategy::new(StrategyKind::Threads, 3, None).unwrap();
        let report = run_matmul(&ctx, &strategy).unwrap();
        assert_eq!(report.workers, 3);
        assert!(report.checksum > 0);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn checksum_taken_from_finished_product() {
        let n = 12;
        let seed = Some(21);
        let mut a = OwnedGrid::<i32>::allocate(n).unwrap();
        let mut b = OwnedGrid::<i32>::allocate(n).unwrap();
        rand_fill(&mut a, RANDOM_MAX, seed, 0);
        rand_fill(&mut b, RANDOM_MAX, seed, 1);
        let mut expected = OwnedGrid::<i32>::allocate(n).unwrap();
        let ranges = [crate::decomposition::RowRange::new(0, n)];
        let sequential =
            Strategy::new(StrategyKind::Sequential, 1, None).unwrap();
        matmul::multiply(&sequential, &a, &b, &mut expected, &ranges)
            .unwrap();

        for kind in [StrategyKind::Processes, StrategyKind::Threads] {
            let path = temp_results(&format!("checksum_{kind:?}"));
            let ctx = RunContext::for_matmul(n, 3)
                .with_seed(seed)
                .with_results_path(&path);
            let strategy = Strategy::new(kind, 3, None).unwrap();
            let report = run_matmul(&ctx, &strategy).unwrap();
            assert_eq!(report.checksum, grid_checksum(&expected));
            assert!(report.timings.wall >= 0.0);
            std::fs::remove_file(&path).unwrap();
        }
    }

    #[test]
    fn unwritable_results_do_not_fail_run() {
        let ctx = RunContext::for_jacobi(5, 2)
            .with_termination(Termination::FixedIterations(2))
            .with_results_path("/nonexistent/dir/results.txt");
        let strategy = Strategy::new(StrategyKind::Threads, 2, None).unwrap();
        let report = run_jacobi(&ctx, &strategy).unwrap();
        assert_eq!(report.solve.sweeps, 2);
        assert_eq!(report.center, 0.25);
    }
}
