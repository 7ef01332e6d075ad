//! Coarse transmission estimate from the airlight-normalized dark channel.

use crate::atmospheric_light::AtmosphericLight;
use crate::dark_channel::dark_channel;
use crate::image::{RgbImage, ScalarMap};

/// `t_raw = 1 - omega * dark_channel(I / A)`.
///
/// Values lie in `[1 - omega, 1]` whenever `I / A` stays within `[0, 1]`.
/// No clamping is applied here; the reconstruction floors `t` at `t0`.
pub fn estimate_transmission(
    image: &RgbImage,
    airlight: &AtmosphericLight,
    omega: f32,
    patch_radius: usize,
) -> ScalarMap {
    let a = airlight.rgb();
    let scaled = image.map(|p| [p[0] / a[0], p[1] / a[1], p[2] / a[2]]);

    let mut transmission = dark_channel(&scaled, patch_radius);
    for t in transmission.iter_mut() {
        *t = 1.0 - omega * *t;
    }
    transmission
}
