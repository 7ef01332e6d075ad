//! Resampling between full and working resolution of the fast guided filter.
//!
//! Decimation is nearest-neighbor; upsampling is bilinear with pixel-center
//! alignment and edge clamping.

use common::Buffer2;

/// Working-resolution length: `round(len / ratio)`, at least 1.
pub(crate) fn subsampled_len(len: usize, ratio: usize) -> usize {
    ((len as f64 / ratio as f64).round() as usize).max(1)
}

/// Nearest-neighbor decimation of `src` to `width` x `height`.
///
/// Destination `(x, y)` takes source `(floor(x * W / width), floor(y * H / height))`.
pub(crate) fn downsample_nearest<T: Copy>(
    src: &Buffer2<T>,
    width: usize,
    height: usize,
) -> Buffer2<T> {
    let (src_width, src_height) = src.size();
    let columns: Vec<usize> = (0..width)
        .map(|x| (x * src_width / width).min(src_width - 1))
        .collect();

    Buffer2::from_fn(width, height, |x, y| {
        let sy = (y * src_height / height).min(src_height - 1);
        src[(columns[x], sy)]
    })
}

/// Precomputed bilinear taps along one axis.
#[derive(Debug, Clone)]
pub(crate) struct AxisTaps {
    lo: Vec<usize>,
    hi: Vec<usize>,
    weight: Vec<f32>,
}

impl AxisTaps {
    /// Taps mapping `dst_len` destination positions onto `src_len` source samples.
    ///
    /// `src = (dst + 0.5) * src_len / dst_len - 0.5`, clamped to `[0, src_len - 1]`.
    pub(crate) fn new(src_len: usize, dst_len: usize) -> Self {
        assert!(src_len > 0, "source axis must not be empty");
        let scale = src_len as f64 / dst_len as f64;
        let last = (src_len - 1) as f64;

        let mut lo = Vec::with_capacity(dst_len);
        let mut hi = Vec::with_capacity(dst_len);
        let mut weight = Vec::with_capacity(dst_len);
        for d in 0..dst_len {
            let pos = ((d as f64 + 0.5) * scale - 0.5).clamp(0.0, last);
            let l = pos.floor() as usize;
            lo.push(l);
            hi.push((l + 1).min(src_len - 1));
            weight.push((pos - l as f64) as f32);
        }

        Self { lo, hi, weight }
    }

    #[inline]
    pub(crate) fn get(&self, d: usize) -> (usize, usize, f32) {
        (self.lo[d], self.hi[d], self.weight[d])
    }
}

#[inline]
fn lerp<const N: usize>(a: &[f32; N], b: &[f32; N], t: f32) -> [f32; N] {
    std::array::from_fn(|c| a[c] + (b[c] - a[c]) * t)
}

/// Bilinear sample of the row-major `src` grid at destination `(x, y)`.
#[inline]
pub(crate) fn bilinear_at<const N: usize>(
    src: &[[f32; N]],
    src_width: usize,
    xs: &AxisTaps,
    ys: &AxisTaps,
    x: usize,
    y: usize,
) -> [f32; N] {
    let (x0, x1, wx) = xs.get(x);
    let (y0, y1, wy) = ys.get(y);
    let top = lerp(&src[y0 * src_width + x0], &src[y0 * src_width + x1], wx);
    let bottom = lerp(&src[y1 * src_width + x0], &src[y1 * src_width + x1], wx);
    lerp(&top, &bottom, wy)
}
