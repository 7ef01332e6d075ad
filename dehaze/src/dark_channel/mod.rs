//! Dark channel computation.
//!
//! The dark channel of a pixel is the minimum sample over all three color
//! channels and over the square window of half-width `patch_radius` centered
//! on it. Windows are clamped to the image bounds, so border pixels use a
//! smaller asymmetric window (no wraparound, no reflection).
//!
//! The window minimum is separable: a per-pixel channel minimum is eroded
//! horizontally with a monotonic deque, then vertically by folding whole rows.
//! Min is exact and order independent, so the result is bit-identical to the
//! naive per-pixel scan.


use std::collections::VecDeque;

use common::Buffer2;
use common::parallel::par_for_each_row;

use crate::image::{RgbImage, ScalarMap};

/// Computes the dark channel of `image` with a `(2 * patch_radius + 1)²` window.
pub fn dark_channel(image: &RgbImage, patch_radius: usize) -> ScalarMap {
    let (width, height) = image.size();
    let channel_min: Vec<f32> = image.iter().map(|p| p[0].min(p[1]).min(p[2])).collect();

    erode(&channel_min, width, height, patch_radius)
}

/// Min filter over a clamped square window on a single-channel grid.
pub(crate) fn erode(values: &[f32], width: usize, height: usize, radius: usize) -> ScalarMap {
    assert_eq!(
        values.len(),
        width * height,
        "Pixel count must match width * height"
    );

    let mut horizontal = vec![0.0f32; width * height];
    par_for_each_row(&mut horizontal, width, |y, row| {
        sliding_min(&values[y * width..(y + 1) * width], radius, row);
    });

    let mut output = vec![0.0f32; width * height];
    par_for_each_row(&mut output, width, |y, row| {
        let y_start = y.saturating_sub(radius);
        let y_end = (y + radius + 1).min(height);

        row.copy_from_slice(&horizontal[y_start * width..(y_start + 1) * width]);
        for ny in y_start + 1..y_end {
            let src = &horizontal[ny * width..(ny + 1) * width];
            for (out, &v) in row.iter_mut().zip(src) {
                *out = out.min(v);
            }
        }
    });

    Buffer2::new(width, height, output)
}

/// 1D minimum over `[i - radius, i + radius]` clamped to the slice.
///
/// The deque holds indices of strictly increasing values; its front is the
/// minimum of the current window.
fn sliding_min(input: &[f32], radius: usize, output: &mut [f32]) {
    debug_assert_eq!(input.len(), output.len());
    let n = input.len();
    let mut deque: VecDeque<usize> = VecDeque::with_capacity((2 * radius + 1).min(n));
    let mut next = 0;

    for (i, out) in output.iter_mut().enumerate() {
        let window_end = (i + radius).min(n - 1);
        while next <= window_end {
            let value = input[next];
            while deque.back().is_some_and(|&back| input[back] >= value) {
                deque.pop_back();
            }
            deque.push_back(next);
            next += 1;
        }

        let window_start = i.saturating_sub(radius);
        while deque.front().is_some_and(|&front| front < window_start) {
            deque.pop_front();
        }

        *out = input[deque[0]];
    }
}
