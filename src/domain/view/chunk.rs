use crate::decomposition::RowRange;
use crate::error::*;
use crate::util::*;

/// Mutable access to the rows of one partition.
/// Rows are addressed with grid (world) row indices.
pub struct RowChunk<'a, T: Cell> {
    rows: RowRange,
    n: usize,
    buffer: &'a mut [T],
}

impl<'a, T: Cell> RowChunk<'a, T> {
    pub fn new(rows: RowRange, n: usize, buffer: &'a mut [T]) -> Self {
        debug_assert_eq!(buffer.len(), rows.len() * n);
        RowChunk { rows, n, buffer }
    }

    pub fn rows(&self) -> RowRange {
        self.rows
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn buffer_mut(&mut self) -> &mut [T] {
        &mut *self.buffer
    }

    #[track_caller]
    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        debug_assert!(
            self.rows.contains(row),
            "{} does not contain row {}",
            self.rows,
            row
        );
        let start = (row - self.rows.start) * self.n;
        &mut self.buffer[start..start + self.n]
    }

    pub fn row_iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut [T])> {
        let first = self.rows.start;
        self.buffer
            .chunks_exact_mut(self.n)
            .enumerate()
            .map(move |(i, values)| (first + i, values))
    }
}

/// Carve one chunk per range out of a row-major buffer.
/// Ranges must be ascending and disjoint,
/// rows between ranges (e.g. grid boundary) are left out.
pub fn split_rows_mut<'a, T: Cell>(
    buffer: &'a mut [T],
    n: usize,
    ranges: &[RowRange],
) -> Result<Vec<RowChunk<'a, T>>> {
    let mut result = Vec::with_capacity(ranges.len());
    let mut rest = buffer;
    let mut cursor = 0;
    for range in ranges {
        if range.start < cursor || range.end * n > cursor * n + rest.len() {
            return Err(BenchError::InvalidPartition {
                low: range.start,
                high: range.end,
                workers: ranges.len(),
            });
        }
        let skip = (range.start - cursor) * n;
        let (_, tail) = std::mem::take(&mut rest).split_at_mut(skip);
        let (rows, tail) = tail.split_at_mut(range.len() * n);
        result.push(RowChunk::new(*range, n, rows));
        rest = tail;
        cursor = range.end;
    }
    Ok(result)
}
