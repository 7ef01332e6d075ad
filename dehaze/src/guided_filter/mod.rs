//! Fast guided filter used to refine the transmission map.
//!
//! The filter models the output as a local linear transform of the guide,
//! `q = aᵀ·I + b`, fitted by least squares in every window. Depth edges that
//! show up in the guide are therefore kept in the refined transmission,
//! instead of the blocky halos left by the dark channel window.
//!
//! The fast variant fits `a` and `b` on a decimated copy of the guide and the
//! input, then interpolates the coefficients back to full resolution:
//!
//! 1. nearest-neighbor decimation by `subsample_ratio`
//! 2. box means of `I`, `p`, `I·p`, `I·Iᵀ` with radius `radius / subsample_ratio`
//! 3. `a = (Σ + εU)⁻¹ · cov(I, p)`, `b = mean(p) − aᵀ·mean(I)`
//! 4. box means of `a` and `b`
//! 5. bilinear upsampling of the averaged coefficients (pixel-center aligned)
//! 6. `q = aᵀ·I + b` with the full-resolution guide
//!
//! With [`GuideMode::Luminance`] the guide is reduced to one luma plane and
//! step 3 becomes the scalar `a = cov / (var + ε)`.

mod box_filter;
mod resample;


use common::Buffer2;
use common::parallel::par_for_each_row;
use serde::{Deserialize, Serialize};

use crate::image::{RgbImage, ScalarMap};

use box_filter::box_mean;
use resample::{AxisTaps, bilinear_at, downsample_nearest, subsampled_len};

/// Rec. 601 luma weights used by [`GuideMode::Luminance`].
const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// How the color guide drives the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuideMode {
    /// Full color guide with a 3x3 covariance per window.
    #[default]
    Color,
    /// Guide reduced to Rec. 601 luma; scalar coefficients.
    Luminance,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuidedFilterParams {
    /// Window radius at full resolution.
    pub radius: usize,
    /// Regularization ε.
    pub epsilon: f32,
    /// Decimation factor; 1 runs the filter at full resolution.
    pub subsample_ratio: usize,
    pub mode: GuideMode,
}

/// Edge-preserving smoothing of `input` steered by `guide`.
///
/// The output has the dimensions of `input`.
pub fn guided_filter(guide: &RgbImage, input: &ScalarMap, params: &GuidedFilterParams) -> ScalarMap {
    assert!(
        guide.same_size(input),
        "guide and input must have the same dimensions"
    );
    assert!(
        params.subsample_ratio >= 1,
        "subsample_ratio must be >= 1, got {}",
        params.subsample_ratio
    );

    let (width, height) = guide.size();
    if width == 0 || height == 0 {
        return input.clone();
    }

    let ratio = params.subsample_ratio;
    let sub_width = subsampled_len(width, ratio);
    let sub_height = subsampled_len(height, ratio);
    let sub_radius = params.radius / ratio;

    let guide_small = downsample_nearest(guide, sub_width, sub_height);
    let input_small = downsample_nearest(input, sub_width, sub_height);

    tracing::debug!(
        width,
        height,
        sub_width,
        sub_height,
        sub_radius,
        epsilon = params.epsilon,
        mode = ?params.mode,
        "Guided filter"
    );

    match params.mode {
        GuideMode::Color => {
            let coefficients =
                fit_color(&guide_small, &input_small, sub_radius, params.epsilon);
            apply(guide, &coefficients, sub_width, sub_height, |a, px| {
                a[0] * px[0] + a[1] * px[1] + a[2] * px[2] + a[3]
            })
        }
        GuideMode::Luminance => {
            let coefficients =
                fit_luminance(&guide_small, &input_small, sub_radius, params.epsilon);
            apply(guide, &coefficients, sub_width, sub_height, |a, px| {
                a[0] * luma(px) + a[1]
            })
        }
    }
}

#[inline]
fn luma(px: &[f32; 3]) -> f32 {
    LUMA_WEIGHTS[0] * px[0] + LUMA_WEIGHTS[1] * px[1] + LUMA_WEIGHTS[2] * px[2]
}

/// Averaged `[a_r, a_g, a_b, b]` per working-resolution pixel.
fn fit_color(guide: &RgbImage, input: &ScalarMap, radius: usize, epsilon: f32) -> Vec<[f32; 4]> {
    let (width, height) = guide.size();

    // I (3), p, I·p (3), upper triangle of I·Iᵀ (6).
    let terms: Vec<[f32; 13]> = guide
        .iter()
        .zip(input.iter())
        .map(|(i, &p)| {
            [
                i[0],
                i[1],
                i[2],
                p,
                i[0] * p,
                i[1] * p,
                i[2] * p,
                i[0] * i[0],
                i[0] * i[1],
                i[0] * i[2],
                i[1] * i[1],
                i[1] * i[2],
                i[2] * i[2],
            ]
        })
        .collect();
    let means = box_mean(&terms, width, height, radius);

    let eps = epsilon as f64;
    let coefficients: Vec<[f32; 4]> = means
        .iter()
        .map(|m| {
            let m = m.map(|v| v as f64);
            let (mean_i, mean_p) = ([m[0], m[1], m[2]], m[3]);
            let cov = [
                m[4] - mean_i[0] * mean_p,
                m[5] - mean_i[1] * mean_p,
                m[6] - mean_i[2] * mean_p,
            ];
            let rr = m[7] - mean_i[0] * mean_i[0] + eps;
            let rg = m[8] - mean_i[0] * mean_i[1];
            let rb = m[9] - mean_i[0] * mean_i[2];
            let gg = m[10] - mean_i[1] * mean_i[1] + eps;
            let gb = m[11] - mean_i[1] * mean_i[2];
            let bb = m[12] - mean_i[2] * mean_i[2] + eps;

            let a = solve_symmetric3([rr, rg, rb, gg, gb, bb], cov);
            let b = mean_p - a[0] * mean_i[0] - a[1] * mean_i[1] - a[2] * mean_i[2];
            [a[0] as f32, a[1] as f32, a[2] as f32, b as f32]
        })
        .collect();

    box_mean(&coefficients, width, height, radius)
}

/// Averaged `[a, b]` per working-resolution pixel for a luma guide.
fn fit_luminance(
    guide: &RgbImage,
    input: &ScalarMap,
    radius: usize,
    epsilon: f32,
) -> Vec<[f32; 2]> {
    let (width, height) = guide.size();

    let terms: Vec<[f32; 4]> = guide
        .iter()
        .zip(input.iter())
        .map(|(px, &p)| {
            let i = luma(px);
            [i, p, i * p, i * i]
        })
        .collect();
    let means = box_mean(&terms, width, height, radius);

    let eps = epsilon as f64;
    let coefficients: Vec<[f32; 2]> = means
        .iter()
        .map(|m| {
            let [mean_i, mean_p, mean_ip, mean_ii] = m.map(|v| v as f64);
            let cov = mean_ip - mean_i * mean_p;
            let var = mean_ii - mean_i * mean_i;
            let a = cov / (var + eps);
            let b = mean_p - a * mean_i;
            [a as f32, b as f32]
        })
        .collect();

    box_mean(&coefficients, width, height, radius)
}

/// Solves `S·x = v` for a symmetric positive definite 3x3 `S` given as
/// `[s00, s01, s02, s11, s12, s22]`, via the adjugate.
fn solve_symmetric3(s: [f64; 6], v: [f64; 3]) -> [f64; 3] {
    let [s00, s01, s02, s11, s12, s22] = s;

    let c00 = s11 * s22 - s12 * s12;
    let c01 = s02 * s12 - s01 * s22;
    let c02 = s01 * s12 - s02 * s11;
    let c11 = s00 * s22 - s02 * s02;
    let c12 = s01 * s02 - s00 * s12;
    let c22 = s00 * s11 - s01 * s01;

    let det = s00 * c00 + s01 * c01 + s02 * c02;

    [
        (c00 * v[0] + c01 * v[1] + c02 * v[2]) / det,
        (c01 * v[0] + c11 * v[1] + c12 * v[2]) / det,
        (c02 * v[0] + c12 * v[1] + c22 * v[2]) / det,
    ]
}

/// Interpolates working-resolution coefficients to full resolution and
/// evaluates `eval(coefficients, guide_pixel)` per pixel.
fn apply<const N: usize, F>(
    guide: &RgbImage,
    coefficients: &[[f32; N]],
    sub_width: usize,
    sub_height: usize,
    eval: F,
) -> ScalarMap
where
    F: Fn(&[f32; N], &[f32; 3]) -> f32 + Send + Sync,
{
    let (width, height) = guide.size();
    let xs = AxisTaps::new(sub_width, width);
    let ys = AxisTaps::new(sub_height, height);

    let mut output = vec![0.0f32; width * height];
    par_for_each_row(&mut output, width, |y, row| {
        let guide_row = guide.row(y);
        for (x, out) in row.iter_mut().enumerate() {
            let a = bilinear_at(coefficients, sub_width, &xs, &ys, x, y);
            *out = eval(&a, &guide_row[x]);
        }
    });

    Buffer2::new(width, height, output)
}
