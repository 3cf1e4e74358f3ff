use super::*;
use crate::domain::RowChunk;
use log::debug;
use std::panic::AssertUnwindSafe;

/// One forked child process per range.
/// Children inherit the inputs copy-on-write,
/// their writes only reach the parent through a process-shared output grid.
#[derive(Debug, Clone, Copy)]
pub struct ProcessStrategy {
    workers: usize,
}

impl ProcessStrategy {
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(BenchError::InvalidArgument(
                "number of processes must be positive".to_string(),
            ));
        }
        Ok(ProcessStrategy { workers })
    }
}

/// A child that has been forked and not yet waited on.
struct ChildWorker {
    pid: libc::pid_t,
    rows: RowRange,
}

impl ChildWorker {
    /// Blocks until the child exits, consuming the handle.
    fn wait(self) -> Result<()> {
        let mut status: libc::c_int = 0;
        loop {
            let waited = unsafe { libc::waitpid(self.pid, &mut status, 0) };
            if waited == self.pid {
                break;
            }
            let e = std::io::Error::last_os_error();
            if e.kind() == std::io::ErrorKind::Interrupted {
                continue;
            }
            return Err(self.failure(format!("waitpid failed: {e}")));
        }

        if libc::WIFEXITED(status) {
            match libc::WEXITSTATUS(status) {
                0 => Ok(()),
                code => Err(self.failure(format!("exited with status {code}"))),
            }
        } else if libc::WIFSIGNALED(status) {
            let signal = libc::WTERMSIG(status);
            Err(self.failure(format!("killed by signal {signal}")))
        } else {
            Err(self.failure(format!("unexpected wait status {status}")))
        }
    }

    fn failure(&self, reason: String) -> BenchError {
        BenchError::WorkerJoin {
            rows: self.rows.to_string(),
            reason: format!("process {} {}", self.pid, reason),
        }
    }
}

/// Body of a forked child, never returns.
fn run_child<Kernel: RowKernel>(
    kernel: &Kernel,
    chunk: &mut RowChunk<'_, Kernel::Cell>,
) -> ! {
    let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| {
        profiling::scope!("process worker");
        kernel.compute(chunk)
    }));
    let status = if outcome.is_ok() { 0 } else { 1 };
    // _exit: the child must not run the parent's destructors or flush
    // its stdio buffers a second time.
    unsafe { libc::_exit(status) }
}

impl ExecutionStrategy for ProcessStrategy {
    fn name(&self) -> &'static str {
        "processes"
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
        if !output.is_process_shared() {
            debug!(
                "output grid is private, rows computed by child processes \
                 are discarded when they exit"
            );
        }
        let chunks = output.split_rows_mut(ranges)?;

        let mut children = Vec::with_capacity(chunks.len());
        let mut spawn_failure = None;
        for (index, mut chunk) in chunks.into_iter().enumerate() {
            let rows = chunk.rows();
            match unsafe { libc::fork() } {
                -1 => {
                    spawn_failure = Some(BenchError::WorkerSpawn {
                        index,
                        reason: std::io::Error::last_os_error().to_string(),
                    });
                    break;
                }
                0 => run_child(kernel, &mut chunk),
                pid => {
                    debug!("process {pid} owns rows {rows}");
                    children.push(ChildWorker { pid, rows });
                }
            }
        }

        // Reap every child, even after a failure, so none is left behind.
        let mut join_failure = None;
        for child in children {
            if let Err(e) = child.wait() {
                join_failure.get_or_insert(e);
            }
        }

        match spawn_failure.or(join_failure) {
            Some(e) => Err(e),
            None => Ok(None),
        }
    }
}
