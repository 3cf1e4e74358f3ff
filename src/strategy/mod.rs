//! Execution strategies.
//! A strategy takes a kernel, an output grid and the row ranges,
//! runs one worker per range and only returns once every worker is done.
//! The return value is the combined kernel statistic,
//! when the strategy can observe it.

mod processes;
mod sequential;
mod threads;

pub use processes::*;
pub use sequential::*;
pub use threads::*;

use crate::decomposition::RowRange;
use crate::domain::GridView;
use crate::error::*;
use crate::kernel::RowKernel;
use clap::ValueEnum;

pub trait ExecutionStrategy {
    fn name(&self) -> &'static str;

    /// How many workers run concurrently.
    fn workers(&self) -> usize;

    fn run<Kernel: RowKernel, GridType: GridView<Kernel::Cell>>(
        &self,
        kernel: &Kernel,
        output: &mut GridType,
        ranges: &[RowRange],
    ) -> Result<Option<f64>>;
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum StrategyKind {
    Sequential,
    Processes,
    Threads,
}

/// Strategy chosen at startup.
#[derive(Debug)]
pub enum Strategy {
    Sequential(SequentialStrategy),
    Processes(ProcessStrategy),
    Threads(ThreadStrategy),
}

impl Strategy {
    /// `block_size` only applies to the sequential strategy.
    pub fn new(
        kind: StrategyKind,
        workers: usize,
        block_size: Option<usize>,
    ) -> Result<Self> {
        Ok(match kind {
            StrategyKind::Sequential => {
                Strategy::Sequential(SequentialStrategy::new(block_size))
            }
            StrategyKind::Processes => {
                Strategy::Processes(ProcessStrategy::new(workers)?)
            }
            StrategyKind::Threads => {
                Strategy::Threads(ThreadStrategy::new(workers)?)
            }
        })
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Sequential(_) => StrategyKind::Sequential,
            Strategy::Processes(_) => StrategyKind::Processes,
            Strategy::Threads(_) => StrategyKind::Threads,
        }
    }
}

impl ExecutionStrategy for Strategy {
    fn name(&self) -> &'static str {
        match self {
            Strategy::Sequential(s) => s.name(),
            Strategy::Processes(s) => s.name(),
            Strategy::Threads(s) => s.name(),
        }
    }

    fn workers(&self) -> usize {
        match self {
            Strategy::Sequential(s) => s.workers(),
            Strategy::Processes(s) => s.workers(),
            Strategy::Threads(s) => s.workers(),
        }
    }

    fn run<Kernel: RowKernel, GridType: GridView<Kernel::Cell>>(
        &self,
        kernel: &Kernel,
        output: &mut GridType,
        ranges: &[RowRange],
    ) -> Result<Option<f64>> {
        match self {
            Strategy::Sequential(s) => s.run(kernel, output, ranges),
            Strategy::Processes(s) => s.run(kernel, output, ranges),
            Strategy::Threads(s) => s.run(kernel, output, ranges),
        }
    }
}

/// Best effort text for a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn strategy_new() {
        let s = Strategy::new(StrategyKind::Sequential, 8, Some(16)).unwrap();
        assert_eq!(s.kind(), StrategyKind::Sequential);
        assert_eq!(s.workers(), 1);

        let s = Strategy::new(StrategyKind::Threads, 3, None).unwrap();
        assert_eq!(s.kind(), StrategyKind::Threads);
        assert_eq!(s.workers(), 3);
        assert_eq!(s.name(), "threads");

        assert!(Strategy::new(StrategyKind::Processes, 0, None).is_err());
        assert!(Strategy::new(StrategyKind::Threads, 0, None).is_err());
    }

    #[test]
    fn panic_message_test() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn std::any::Any + Send> =
            Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
        let payload: Box<dyn std::any::Any + Send> = Box::new(3);
        assert_eq!(panic_message(payload.as_ref()), "worker panicked");
    }
}
