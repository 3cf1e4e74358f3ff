use super::*;

/// Single control flow, one call over every row.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialStrategy {
    block_size: Option<usize>,
}

impl SequentialStrategy {
    pub fn new(block_size: Option<usize>) -> Self {
        SequentialStrategy {
            block_size: block_size.filter(|b| *b > 0),
        }
    }

    pub fn block_size(&self) -> Option<usize> {
        self.block_size
    }
}

impl ExecutionStrategy for SequentialStrategy {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn workers(&self) -> usize {
        1
    }

    fn run<Kernel: RowKernel, GridType: GridView<Kernel::Cell>>(
        &self,
        kernel: &Kernel,
        output: &mut GridType,
        ranges: &[RowRange],
    ) -> Result<Option<f64>> {
        let Some(span) = RowRange::span(ranges) else {
            return Ok(Some(0.0));
        };
        let mut chunks = output.split_rows_mut(&[span])?;
        let chunk = &mut chunks[0];

        profiling::scope!("sequential worker");
        let statistic = match self.block_size {
            Some(block_size) => kernel.compute_blocked(chunk, block_size),
            None => kernel.compute(chunk),
        };
        Ok(Some(statistic))
    }
}
