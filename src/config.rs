//! Run configuration.
//! Everything a run needs is carried in one `RunContext`
//! that is validated before any grid is allocated or worker spawned.

use crate::decomposition::*;
use crate::error::*;
use std::path::PathBuf;

/// Upper bound on worker threads for the threaded multiplication.
pub const MAX_THREADS: usize = 12;

/// Worker count of the multi-process Jacobi solver.
pub const JACOBI_PROCESSES: usize = 12;

/// Jacobi sweeps per run.
pub const MAX_ITERS: usize = 1000;

/// Default epsilon of `Termination::ConvergenceThreshold`.
pub const TOLERANCE: f64 = 1e-6;

/// Tile edge of the cache-blocked multiplication.
pub const BLOCK_SIZE: usize = 64;

/// Random matrix cells are drawn from `0..RANDOM_MAX`.
pub const RANDOM_MAX: i32 = 10;

pub const RESULTS_FILE: &str = "resultados.txt";
pub const PROCESS_RESULTS_FILE: &str = "resultados_procesos.txt";

/// When the Jacobi solver stops sweeping.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Termination {
    /// Always run this many sweeps.
    FixedIterations(usize),

    /// Stop once a sweep changes the grid by less than `epsilon`,
    /// or after `max_iterations` sweeps.
    ConvergenceThreshold { epsilon: f64, max_iterations: usize },
}

impl Default for Termination {
    fn default() -> Self {
        Termination::FixedIterations(MAX_ITERS)
    }
}

impl Termination {
    pub fn max_iterations(&self) -> usize {
        match self {
            Termination::FixedIterations(n) => *n,
            Termination::ConvergenceThreshold { max_iterations, .. } => {
                *max_iterations
            }
        }
    }

    pub fn converged(&self, difference: f64) -> bool {
        match self {
            Termination::FixedIterations(_) => false,
            Termination::ConvergenceThreshold { epsilon, .. } => {
                difference < *epsilon
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.max_iterations() == 0 {
            return Err(BenchError::InvalidArgument(
                "iteration count must be positive".to_string(),
            ));
        }
        if let Termination::ConvergenceThreshold { epsilon, .. } = self {
            if !epsilon.is_finite() || *epsilon <= 0.0 {
                return Err(BenchError::InvalidArgument(format!(
                    "tolerance must be a positive number, got {epsilon}"
                )));
            }
        }
        Ok(())
    }
}

/// Explicit state of one benchmark run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunContext {
    /// Grids are `n x n`.
    pub n: usize,

    /// Number of row partitions, one per worker.
    pub workers: usize,

    pub max_workers: Option<usize>,

    /// Smallest accepted `n`.
    pub min_n: usize,

    /// First and last `boundary_offset` rows are not partitioned.
    pub boundary_offset: usize,

    pub policy: PartitionPolicy,

    pub termination: Termination,

    pub results_path: PathBuf,

    /// Seed of the random fill, entropy when `None`.
    pub seed: Option<u64>,

    /// Tile edge for the sequential strategy, no tiling when `None`.
    pub block_size: Option<usize>,

    /// Allocate Jacobi grids in process-shared memory.
    pub shared_grids: bool,
}

impl RunContext {
    /// Multiplication: every row of `C` is partitioned.
    pub fn for_matmul(n: usize, workers: usize) -> Self {
        RunContext {
            n,
            workers,
            max_workers: None,
            min_n: 1,
            boundary_offset: 0,
            policy: PartitionPolicy::default(),
            termination: Termination::default(),
            results_path: PathBuf::from(RESULTS_FILE),
            seed: None,
            block_size: None,
            shared_grids: false,
        }
    }

    /// Jacobi: only interior rows are partitioned,
    /// so the grid needs at least one interior row.
    pub fn for_jacobi(n: usize, workers: usize) -> Self {
        RunContext {
            min_n: 3,
            boundary_offset: 1,
            ..Self::for_matmul(n, workers)
        }
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = Some(max_workers);
        self
    }

    pub fn with_policy(mut self, policy: PartitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_termination(mut self, termination: Termination) -> Self {
        self.termination = termination;
        self
    }

    pub fn with_results_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.results_path = path.into();
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_block_size(mut self, block_size: Option<usize>) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_shared_grids(mut self, shared_grids: bool) -> Self {
        self.shared_grids = shared_grids;
        self
    }

    /// Reject the run before anything is allocated or spawned.
    pub fn validate(&self) -> Result<()> {
        if self.n == 0 {
            return Err(BenchError::InvalidArgument(
                "size must be a positive integer".to_string(),
            ));
        }
        if self.n < self.min_n {
            return Err(BenchError::InvalidArgument(format!(
                "size must be at least {}, got {}",
                self.min_n, self.n
            )));
        }
        if self.workers == 0 {
            return Err(BenchError::InvalidArgument(
                "worker count must be a positive integer".to_string(),
            ));
        }
        if let Some(max_workers) = self.max_workers {
            if self.workers > max_workers {
                return Err(BenchError::InvalidArgument(format!(
                    "worker count must be <= {max_workers}, got {}",
                    self.workers
                )));
            }
        }
        if self.block_size == Some(0) {
            return Err(BenchError::InvalidArgument(
                "block size must be positive".to_string(),
            ));
        }
        self.termination.validate()
    }

    /// Row ranges, one per worker, over the partitioned rows.
    pub fn ranges(&self) -> Result<Vec<RowRange>> {
        let low = self.boundary_offset;
        let high = self.n.saturating_sub(self.boundary_offset);
        partition(low, high, self.workers, self.policy)
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn termination_default() {
        let t = Termination::default();
        assert_eq!(t.max_iterations(), MAX_ITERS);
        assert!(!t.converged(0.0));

        let t = Termination::ConvergenceThreshold {
            epsilon: TOLERANCE,
            max_iterations: 10,
        };
        assert!(t.converged(1e-9));
        assert!(!t.converged(1.0));
    }

    #[test]
    fn validate_rejects() {
        assert!(RunContext::for_matmul(0, 1).validate().is_err());
        assert!(RunContext::for_matmul(4, 0).validate().is_err());
        assert!(RunContext::for_matmul(4, 13)
            .with_max_workers(MAX_THREADS)
            .validate()
            .is_err());
        assert!(RunContext::for_matmul(4, 12)
            .with_max_workers(MAX_THREADS)
            .validate()
            .is_ok());
        assert!(RunContext::for_jacobi(2, 1).validate().is_err());
        assert!(RunContext::for_matmul(4, 1)
            .with_block_size(Some(0))
            .validate()
            .is_err());
        assert!(RunContext::for_jacobi(8, 2)
            .with_termination(Termination::FixedIterations(0))
            .validate()
            .is_err());
        assert!(RunContext::for_jacobi(8, 2)
            .with_termination(Termination::ConvergenceThreshold {
                epsilon: -1.0,
                max_iterations: 5
            })
            .validate()
            .is_err());
    }

    #[test]
    fn ranges_cover_partitioned_rows() {
        let ranges = RunContext::for_matmul(10, 3).ranges().unwrap();
        assert_eq!(ranges.first().unwrap().start, 0);
        assert_eq!(ranges.last().unwrap().end, 10);

        let ranges = RunContext::for_jacobi(10, 3).ranges().unwrap();
        assert_eq!(ranges.first().unwrap().start, 1);
        assert_eq!(ranges.last().unwrap().end, 9);
        assert_eq!(ranges[0].len(), 3);
    }
}
