//! Clamped-window box mean over multi-channel grids.

use common::parallel::par_for_each_row;

/// Mean of every channel over the `(2 * radius + 1)²` window clamped to the grid.
///
/// Border pixels average only the in-bounds samples, matching the dark
/// channel's window convention. Sums are taken from an `f64` integral image.
pub(crate) fn box_mean<const N: usize>(
    values: &[[f32; N]],
    width: usize,
    height: usize,
    radius: usize,
) -> Vec<[f32; N]> {
    assert_eq!(
        values.len(),
        width * height,
        "Pixel count must match width * height"
    );

    let integral = integral_image(values, width, height);
    let stride = width + 1;

    let mut output = vec![[0.0f32; N]; width * height];
    par_for_each_row(&mut output, width, |y, row| {
        let y0 = y.saturating_sub(radius);
        let y1 = (y + radius + 1).min(height);
        let top = &integral[y0 * stride..(y0 + 1) * stride];
        let bottom = &integral[y1 * stride..(y1 + 1) * stride];

        for (x, out) in row.iter_mut().enumerate() {
            let x0 = x.saturating_sub(radius);
            let x1 = (x + radius + 1).min(width);
            let count = ((x1 - x0) * (y1 - y0)) as f64;
            for c in 0..N {
                let sum = bottom[x1][c] - bottom[x0][c] - top[x1][c] + top[x0][c];
                out[c] = (sum / count) as f32;
            }
        }
    });

    output
}

/// Summed-area table with a zero first row and column: `(width + 1) * (height + 1)` entries.
fn integral_image<const N: usize>(
    values: &[[f32; N]],
    width: usize,
    height: usize,
) -> Vec<[f64; N]> {
    let stride = width + 1;
    let mut integral = vec![[0.0f64; N]; stride * (height + 1)];

    for y in 0..height {
        let mut row_sum = [0.0f64; N];
        for x in 0..width {
            let v = &values[y * width + x];
            for c in 0..N {
                row_sum[c] += v[c] as f64;
            }
            let above = integral[y * stride + x + 1];
            let cell = &mut integral[(y + 1) * stride + x + 1];
            for c in 0..N {
                cell[c] = above[c] + row_sum[c];
            }
        }
    }

    integral
}
