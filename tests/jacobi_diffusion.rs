use partbench::config::*;
use partbench::decomposition::*;
use partbench::domain::*;
use partbench::initial_conditions::*;
use partbench::solver::jacobi;
use partbench::strategy::*;

fn hot_boundary(n: usize) -> (OwnedGrid<f64>, OwnedGrid<f64>) {
    let mut a = OwnedGrid::allocate(n).unwrap();
    let mut b = OwnedGrid::allocate(n).unwrap();
    boundary_fill(&mut a, 1.0, 0.0);
    boundary_fill(&mut b, 1.0, 0.0);
    (a, b)
}

#[test]
fn heat_only_flows_inward() {
    let n = 12;
    let ranges = partition(1, n - 1, 3, PartitionPolicy::Balanced).unwrap();
    let threads = Strategy::new(StrategyKind::Threads, 3, None).unwrap();
    let (mut a, mut b) = hot_boundary(n);

    let mut previous = OwnedGrid::<f64>::allocate(n).unwrap();
    for _ in 0..40 {
        previous.par_copy_from(&a);
        jacobi::solve(
            &threads,
            &mut a,
            &mut b,
            &ranges,
            Termination::FixedIterations(1),
        )
        .unwrap();
        for (new, old) in a.buffer().iter().zip(previous.buffer()) {
            assert!(new >= old, "cell dropped from {old} to {new}");
        }
    }

    // Boundary is never written.
    for k in 0..n {
        assert_eq!(a.get(0, k), 1.0);
        assert_eq!(a.get(n - 1, k), 1.0);
        assert_eq!(a.get(k, 0), 1.0);
        assert_eq!(a.get(k, n - 1), 1.0);
    }
}

#[test]
fn interior_stays_between_boundary_and_initial() {
    let n = 9;
    let ranges =
        partition(1, n - 1, 4, PartitionPolicy::LastAbsorbs).unwrap();
    let threads = Strategy::new(StrategyKind::Threads, 4, None).unwrap();
    let (mut a, mut b) = hot_boundary(n);

    jacobi::solve(
        &threads,
        &mut a,
        &mut b,
        &ranges,
        Termination::FixedIterations(2 * n),
    )
    .unwrap();

    for i in 1..n - 1 {
        for j in 1..n - 1 {
            let v = a.get(i, j);
            assert!(v > 0.0 && v < 1.0, "cell ({i}, {j}) = {v}");
        }
    }
}

#[test]
fn converges_towards_boundary_value() {
    let n = 8;
    let ranges = partition(1, n - 1, 2, PartitionPolicy::Balanced).unwrap();
    let sequential = Strategy::new(StrategyKind::Sequential, 1, None).unwrap();
    let (mut a, mut b) = hot_boundary(n);

    let report = jacobi::solve(
        &sequential,
        &mut a,
        &mut b,
        &ranges,
        Termination::ConvergenceThreshold {
            epsilon: TOLERANCE,
            max_iterations: 10_000,
        },
    )
    .unwrap();

    assert!(report.sweeps < 10_000);
    assert!(report.last_difference < TOLERANCE);
    for v in a.buffer() {
        assert!((1.0 - v).abs() < 1e-4);
    }
}
