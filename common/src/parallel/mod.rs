//! Row-parallel processing utilities for row-major grids.

use rayon::prelude::*;

#[cfg(test)]
mod tests;

/// Chunks handed to rayon per worker thread, so uneven rows still balance.
const CHUNKS_PER_THREAD: usize = 3;

/// Whole rows per parallel task for a grid of `height` rows.
#[inline]
fn rows_per_chunk(height: usize) -> usize {
    let num_chunks = rayon::current_num_threads() * CHUNKS_PER_THREAD;
    height.div_ceil(num_chunks).max(1)
}

/// Splits a row-major buffer into parallel chunks of complete rows.
///
/// Yields `(first_row, chunk)` pairs; every chunk length is a multiple of `width`.
pub fn par_row_chunks_mut<T: Send>(
    data: &mut [T],
    width: usize,
) -> impl IndexedParallelIterator<Item = (usize, &mut [T])> {
    assert!(width > 0, "row width must be > 0");
    assert_eq!(
        data.len() % width,
        0,
        "buffer length must be a multiple of the row width"
    );
    let rows = rows_per_chunk(data.len() / width);
    data.par_chunks_mut(width * rows)
        .enumerate()
        .map(move |(chunk_idx, chunk)| (chunk_idx * rows, chunk))
}

/// Calls `f(y, row)` for every row of a row-major buffer, rows spread across threads.
///
/// Does nothing for an empty buffer.
pub fn par_for_each_row<T, F>(data: &mut [T], width: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    if data.is_empty() {
        return;
    }
    par_row_chunks_mut(data, width).for_each(|(first_row, chunk)| {
        for (local_y, row) in chunk.chunks_mut(width).enumerate() {
            f(first_row + local_y, row);
        }
    });
}

/// Maximum of `values` computed in parallel. NaN values are skipped.
///
/// Returns `f32::NEG_INFINITY` for an empty slice.
pub fn par_max_f32(values: &[f32]) -> f32 {
    values
        .par_iter()
        .copied()
        .reduce(|| f32::NEG_INFINITY, f32::max)
}
