use super::*;
use log::debug;
use std::panic::AssertUnwindSafe;
use std::sync::{Mutex, PoisonError};

/// One task per range on a dedicated pool of named threads.
/// The scope end is the join barrier.
#[derive(Debug)]
pub struct ThreadStrategy {
    pool: rayon::ThreadPool,
    workers: usize,
}

impl ThreadStrategy {
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(BenchError::InvalidArgument(
                "number of threads must be positive".to_string(),
            ));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("worker_thread_{}", i))
            .build()
            .map_err(|e| BenchError::WorkerSpawn {
                index: 0,
                reason: e.to_string(),
            })?;
        Ok(ThreadStrategy { pool, workers })
    }
}

impl ExecutionStrategy for ThreadStrategy {
    fn name(&self) -> &'static str {
        "threads"
    }

    fn workers(&self) -> usize {
        self.workers
    }

    fn run<Kernel: RowKernel, GridType: GridView<Kernel::Cell>>(
        &self,
        kernel: &Kernel,
        output: &mut GridType,
        ranges: &[RowRange],
    ) -> Result<Option<f64>> {
        let chunks = output.split_rows_mut(ranges)?;

        // Only shared mutable state between workers.
        let accumulator = Mutex::new(0.0);

        let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| {
            self.pool.scope(|s| {
                for mut chunk in chunks {
                    let accumulator = &accumulator;
                    s.spawn(move |_| {
                        profiling::scope!("thread worker");
                        debug!("thread task owns rows {}", chunk.rows());
                        let local = kernel.compute(&mut chunk);
                        let mut total = accumulator
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner);
                        *total += local;
                    });
                }
            })
        }));

        if let Err(payload) = outcome {
            let rows = RowRange::span(ranges).unwrap_or_default();
            return Err(BenchError::WorkerJoin {
                rows: rows.to_string(),
                reason: panic_message(payload.as_ref()),
            });
        }

        let total = accumulator
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(Some(total))
    }
}
