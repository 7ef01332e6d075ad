//! Synthetic images for tests and benchmarks.

use common::Buffer2;

use crate::image::{ByteImage, RgbImage};

/// Small deterministic xorshift generator so tests need no RNG crate.
#[derive(Debug, Clone)]
pub struct XorShift(u64);

impl XorShift {
    pub fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }
}

/// Normalized image with independent pseudo-random samples in `[0, 1)`.
pub fn noise_image(width: usize, height: usize, seed: u64) -> RgbImage {
    let mut rng = XorShift::new(seed);
    Buffer2::from_fn(width, height, |_, _| {
        [rng.next_f32(), rng.next_f32(), rng.next_f32()]
    })
}

/// Airlight used by [`hazy_scene`].
pub const SCENE_AIRLIGHT: [f32; 3] = [0.85, 0.88, 0.92];

/// Synthetic hazy photograph: a textured scene whose transmission falls off
/// from the bottom row (near, `t ≈ 0.9`) to the top row (far, `t ≈ 0.2`),
/// composited with [`SCENE_AIRLIGHT`] through `I = J·t + A·(1 − t)`.
pub fn hazy_scene(width: usize, height: usize, seed: u64) -> ByteImage {
    let mut rng = XorShift::new(seed);
    ByteImage::from_fn_rgb(width, height, |x, y| {
        let depth = 1.0 - y as f32 / height.max(2).saturating_sub(1) as f32;
        let t = 0.9 - 0.7 * depth;
        // Blocky texture with one dark channel per block, like foliage or shadows.
        let block = (x / 8 + y / 8) % 3;
        let mut radiance = [0.0f32; 3];
        for (c, r) in radiance.iter_mut().enumerate() {
            let base = if c == block { 0.05 } else { 0.6 };
            *r = base + 0.3 * rng.next_f32();
        }
        let mut out = [0u8; 3];
        for c in 0..3 {
            let i = radiance[c] * t + SCENE_AIRLIGHT[c] * (1.0 - t);
            out[c] = (i * 255.0).round().clamp(0.0, 255.0) as u8;
        }
        out
    })
}

/// Two flat halves split vertically at `width / 2`.
pub fn split_image(width: usize, height: usize, left: [f32; 3], right: [f32; 3]) -> RgbImage {
    Buffer2::from_fn(width, height, |x, _| if x < width / 2 { left } else { right })
}
