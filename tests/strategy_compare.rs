use float_cmp::assert_approx_eq;
use partbench::config::*;
use partbench::decomposition::*;
use partbench::domain::*;
use partbench::initial_conditions::*;
use partbench::solver::{jacobi, matmul};
use partbench::strategy::*;

fn random_inputs(n: usize, seed: u64) -> (OwnedGrid<i32>, OwnedGrid<i32>) {
    let mut a = OwnedGrid::allocate(n).unwrap();
    let mut b = OwnedGrid::allocate(n).unwrap();
    rand_fill(&mut a, RANDOM_MAX, Some(seed), 0);
    rand_fill(&mut b, RANDOM_MAX, Some(seed), 1);
    (a, b)
}

#[test]
fn matmul_strategies_agree() {
    let n = 37;
    let workers = 5;
    let (a, b) = random_inputs(n, 42);
    let ranges = partition(0, n, workers, PartitionPolicy::Balanced).unwrap();

    let mut expected = OwnedGrid::<i32>::allocate(n).unwrap();
    let plain = Strategy::new(StrategyKind::Sequential, 1, None).unwrap();
    matmul::multiply(&plain, &a, &b, &mut expected, &ranges).unwrap();

    let mut blocked_c = OwnedGrid::<i32>::allocate(n).unwrap();
    let blocked = Strategy::new(StrategyKind::Sequential, 1, Some(8)).unwrap();
    matmul::multiply(&blocked, &a, &b, &mut blocked_c, &ranges).unwrap();
    assert!(grids_equal(&expected, &blocked_c));

    let mut threads_c = OwnedGrid::<i32>::allocate(n).unwrap();
    let threads =
        Strategy::new(StrategyKind::Threads, workers, None).unwrap();
    matmul::multiply(&threads, &a, &b, &mut threads_c, &ranges).unwrap();
    assert!(grids_equal(&expected, &threads_c));

    let mut processes_c = SharedGrid::<i32>::allocate(n).unwrap();
    let processes =
        Strategy::new(StrategyKind::Processes, workers, None).unwrap();
    matmul::multiply(&processes, &a, &b, &mut processes_c, &ranges).unwrap();
    assert!(grids_equal(&expected, &processes_c));
}

#[test]
fn matmul_policy_does_not_change_product() {
    let n = 23;
    let (a, b) = random_inputs(n, 7);
    let threads = Strategy::new(StrategyKind::Threads, 4, None).unwrap();

    let mut balanced = OwnedGrid::<i32>::allocate(n).unwrap();
    let ranges = partition(0, n, 4, PartitionPolicy::Balanced).unwrap();
    matmul::multiply(&threads, &a, &b, &mut balanced, &ranges).unwrap();

    let mut last = OwnedGrid::<i32>::allocate(n).unwrap();
    let ranges = partition(0, n, 4, PartitionPolicy::LastAbsorbs).unwrap();
    matmul::multiply(&threads, &a, &b, &mut last, &ranges).unwrap();

    assert!(grids_equal(&balanced, &last));
}

#[test]
fn jacobi_strategies_agree() {
    let n = 16;
    let workers = 4;
    let sweeps = 25;
    let ranges =
        partition(1, n - 1, workers, PartitionPolicy::Balanced).unwrap();
    let termination = Termination::FixedIterations(sweeps);

    let mut seq_a = OwnedGrid::<f64>::allocate(n).unwrap();
    let mut seq_b = OwnedGrid::<f64>::allocate(n).unwrap();
    boundary_fill(&mut seq_a, 1.0, 0.0);
    boundary_fill(&mut seq_b, 1.0, 0.0);
    let sequential = Strategy::new(StrategyKind::Sequential, 1, None).unwrap();
    let seq_report =
        jacobi::solve(&sequential, &mut seq_a, &mut seq_b, &ranges, termination)
            .unwrap();

    let mut thr_a = OwnedGrid::<f64>::allocate(n).unwrap();
    let mut thr_b = OwnedGrid::<f64>::allocate(n).unwrap();
    boundary_fill(&mut thr_a, 1.0, 0.0);
    boundary_fill(&mut thr_b, 1.0, 0.0);
    let threads =
        Strategy::new(StrategyKind::Threads, workers, None).unwrap();
    let thr_report =
        jacobi::solve(&threads, &mut thr_a, &mut thr_b, &ranges, termination)
            .unwrap();

    let mut proc_a = SharedGrid::<f64>::allocate(n).unwrap();
    let mut proc_b = SharedGrid::<f64>::allocate(n).unwrap();
    boundary_fill(&mut proc_a, 1.0, 0.0);
    boundary_fill(&mut proc_b, 1.0, 0.0);
    let processes =
        Strategy::new(StrategyKind::Processes, workers, None).unwrap();
    let proc_report = jacobi::solve(
        &processes,
        &mut proc_a,
        &mut proc_b,
        &ranges,
        termination,
    )
    .unwrap();

    assert_eq!(seq_report.sweeps, sweeps);
    assert_eq!(thr_report.sweeps, sweeps);
    assert_eq!(proc_report.sweeps, sweeps);
    assert_approx_eq!(
        f64,
        seq_report.last_difference,
        thr_report.last_difference,
        epsilon = 1e-12
    );
    assert_approx_eq!(
        f64,
        seq_report.last_difference,
        proc_report.last_difference,
        epsilon = 1e-12
    );

    // Every cell is computed from the same inputs in the same order.
    assert!(grids_equal(&seq_a, &thr_a));
    assert!(grids_equal(&seq_a, &proc_a));
}

#[test]
fn jacobi_private_process_grids_do_not_advance() {
    let n = 10;
    let ranges = partition(1, n - 1, 3, PartitionPolicy::Balanced).unwrap();
    let mut a = OwnedGrid::<f64>::allocate(n).unwrap();
    let mut b = OwnedGrid::<f64>::allocate(n).unwrap();
    boundary_fill(&mut a, 1.0, 0.0);
    boundary_fill(&mut b, 1.0, 0.0);

    let mut initial = OwnedGrid::<f64>::allocate(n).unwrap();
    initial.par_copy_from(&a);

    let processes = Strategy::new(StrategyKind::Processes, 3, None).unwrap();
    let report = jacobi::solve(
        &processes,
        &mut a,
        &mut b,
        &ranges,
        Termination::FixedIterations(5),
    )
    .unwrap();

    assert_eq!(report.sweeps, 5);
    assert_eq!(report.last_difference, 0.0);
    assert!(grids_equal(&a, &initial));
    assert!(grids_equal(&b, &initial));
}
