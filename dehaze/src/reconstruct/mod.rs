//! Haze model inversion and conversion back to 8-bit.


use common::parallel::{par_for_each_row, par_max_f32};
use rayon::prelude::*;

use crate::atmospheric_light::AtmosphericLight;
use crate::error::{Error, Result, Stage};
use crate::image::{ByteImage, RgbImage, ScalarMap};

/// Inverts `I = J·t + A·(1 − t)` per pixel and channel:
/// `J = A + (I − A) / max(t, t0)`.
pub fn recover_radiance(
    image: &RgbImage,
    airlight: &AtmosphericLight,
    transmission: &ScalarMap,
    t0: f32,
) -> RgbImage {
    assert!(
        image.same_size(transmission),
        "transmission must match image dimensions"
    );

    let a = airlight.rgb();
    let mut radiance = image.clone();
    let width = image.width();
    par_for_each_row(radiance.pixels_mut(), width, |y, row| {
        for (px, &t) in row.iter_mut().zip(transmission.row(y)) {
            let t = t.max(t0);
            for c in 0..3 {
                px[c] = a[c] + (px[c] - a[c]) / t;
            }
        }
    });
    radiance
}

/// Rescales by the global maximum sample and quantizes to 8-bit RGB.
///
/// The maximum is taken over all channels together, so one bright outlier
/// darkens the whole image. Samples are rounded to nearest and saturated
/// into `[0, 255]`.
pub fn to_display(radiance: &RgbImage) -> Result<ByteImage> {
    let (width, height) = radiance.size();
    let samples = radiance.pixels().as_flattened();

    if let Some(pos) = samples.par_iter().position_first(|v| !v.is_finite()) {
        let pixel = pos / 3;
        return Err(Error::NumericFailure {
            stage: Stage::Reconstruction,
            detail: format!(
                "non-finite radiance {} at ({}, {})",
                samples[pos],
                pixel % width.max(1),
                pixel / width.max(1)
            ),
        });
    }

    let max = par_max_f32(samples);
    let scale = if max > 0.0 { 255.0 / max } else { 255.0 };
    tracing::debug!(max, "Rescaling radiance by global maximum");

    let mut bytes = vec![0u8; width * height * 3];
    par_for_each_row(&mut bytes, width * 3, |y, row| {
        for (out, &v) in row.iter_mut().zip(radiance.row(y).as_flattened()) {
            *out = (v * scale).round().clamp(0.0, 255.0) as u8;
        }
    });

    Ok(ByteImage::new(width, height, 3, bytes))
}

/// [`recover_radiance`] followed by [`to_display`].
pub fn reconstruct(
    image: &RgbImage,
    airlight: &AtmosphericLight,
    transmission: &ScalarMap,
    t0: f32,
) -> Result<ByteImage> {
    let radiance = recover_radiance(image, airlight, transmission, t0);
    to_display(&radiance)
}
