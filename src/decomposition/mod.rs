//! Row decomposition.
//! A grid is split into contiguous half-open row ranges,
//! one per worker, in ascending order with no gaps.

use crate::error::*;
use clap::ValueEnum;

/// Rows `[start, end)` owned by exactly one worker for one phase.
#[derive(Hash, Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl std::fmt::Display for RowRange {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

impl RowRange {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        RowRange { start, end }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, row: usize) -> bool {
        self.start <= row && row < self.end
    }

    pub fn iter(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    /// Smallest range covering every range in `ranges`.
    /// Assumes ascending order.
    pub fn span(ranges: &[RowRange]) -> Option<RowRange> {
        let first = ranges.first()?;
        let last = ranges.last()?;
        Some(RowRange::new(first.start, last.end))
    }
}

/// How rows that do not divide evenly are handed out.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum PartitionPolicy {
    /// The first `rows % workers` ranges each get one extra row.
    #[default]
    Balanced,

    /// Every range gets `rows / workers`, the last one takes the remainder.
    LastAbsorbs,
}

/// Split `[low, high)` into `workers` contiguous ranges.
pub fn partition(
    low: usize,
    high: usize,
    workers: usize,
    policy: PartitionPolicy,
) -> Result<Vec<RowRange>> {
    if workers == 0 || high < low {
        return Err(BenchError::InvalidPartition { low, high, workers });
    }

    let rows = high - low;
    let base = rows / workers;
    let remainder = rows % workers;

    let mut result = Vec::with_capacity(workers);
    let mut start = low;
    for w in 0..workers {
        let len = match policy {
            PartitionPolicy::Balanced => base + (w < remainder) as usize,
            PartitionPolicy::LastAbsorbs if w == workers - 1 => high - start,
            PartitionPolicy::LastAbsorbs => base,
        };
        let end = start + len;
        result.push(RowRange::new(start, end));
        start = end;
    }
    debug_assert_eq!(start, high);
    Ok(result)
}
