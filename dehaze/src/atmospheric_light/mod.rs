//! Atmospheric light (airlight) estimation.
//!
//! The most haze-opaque pixels are the ones with the largest dark channel.
//! Their original colors are averaged to estimate the airlight `A`.


use crate::config::AIRLIGHT_FLOOR;
use crate::image::{RgbImage, ScalarMap};

/// Airlight color, one component per channel, each in `[AIRLIGHT_FLOOR, 1]`
/// for normalized input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphericLight([f32; 3]);

impl AtmosphericLight {
    /// Creates an airlight, flooring every component at [`AIRLIGHT_FLOOR`].
    pub fn new(rgb: [f32; 3]) -> Self {
        Self(rgb.map(|c| c.max(AIRLIGHT_FLOOR)))
    }

    #[inline]
    pub fn rgb(&self) -> [f32; 3] {
        self.0
    }
}

/// Number of brightest-dark-channel pixels averaged for an image of `pixel_count` pixels.
///
/// `round(fraction * pixel_count)`, at least 1 and at most `pixel_count`.
pub fn sample_count(pixel_count: usize, fraction: f32) -> usize {
    let count = (fraction as f64 * pixel_count as f64).round() as usize;
    count.clamp(1, pixel_count.max(1))
}

/// Estimates the airlight from the pixels with the largest dark channel values.
///
/// Ties at the selection boundary are broken by row-major index, lower index
/// first, so the result is deterministic. Which of several equal pixels make
/// the cut is otherwise arbitrary and can shift `A` slightly.
pub fn estimate_atmospheric_light(
    image: &RgbImage,
    dark_channel: &ScalarMap,
    fraction: f32,
) -> AtmosphericLight {
    assert!(
        image.same_size(dark_channel),
        "dark channel must match image dimensions"
    );
    assert!(!image.is_empty(), "image must not be empty");

    let pixel_count = image.len();
    let count = sample_count(pixel_count, fraction);

    // Brightest first, then lowest index first.
    let mut order: Vec<usize> = (0..pixel_count).collect();
    let brightest_first = |a: &usize, b: &usize| {
        dark_channel[*b]
            .total_cmp(&dark_channel[*a])
            .then_with(|| a.cmp(b))
    };
    if count < pixel_count {
        order.select_nth_unstable_by(count - 1, brightest_first);
    }
    let selected = &mut order[..count];
    selected.sort_unstable();

    let mut sum = [0.0f64; 3];
    for &idx in selected.iter() {
        let p = image[idx];
        for c in 0..3 {
            sum[c] += p[c] as f64;
        }
    }
    let mean = sum.map(|s| (s / count as f64) as f32);
    let airlight = AtmosphericLight::new(mean);

    tracing::debug!(
        samples = count,
        airlight = ?airlight.rgb(),
        "Estimated atmospheric light"
    );

    airlight
}
