use crate::domain::*;
use rand::prelude::*;
use rayon::prelude::*;

/// Fill with integers drawn from `0..max_val`.
/// Each row gets its own generator, seeded from `seed` and `stream`
/// when a seed is given, so equal seeds give equal grids
/// regardless of how rayon schedules the rows.
/// Use a distinct `stream` for each grid of a run.
pub fn rand_fill<GridType: GridView<i32>>(
    grid: &mut GridType,
    max_val: i32,
    seed: Option<u64>,
    stream: u64,
) {
    debug_assert!(max_val > 0);
    let n = grid.n();
    grid.buffer_mut().par_chunks_mut(n).enumerate().for_each(
        |(row, values): (usize, &mut [i32])| {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(
                    seed ^ (stream << 32) ^ (row as u64),
                ),
                None => StdRng::from_entropy(),
            };
            for v in values {
                *v = rng.gen_range(0..max_val);
            }
        },
    );
}
