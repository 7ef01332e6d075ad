//! Image containers passed between pipeline stages.

use common::Buffer2;

use crate::error::{Error, Result};

/// Normalized color image, channel values nominally in `[0, 1]`.
pub type RgbImage = Buffer2<[f32; 3]>;

/// Per-pixel scalar map (dark channel, transmission) with the image's dimensions.
pub type ScalarMap = Buffer2<f32>;

/// 8-bit interleaved image, the input/output boundary of the pipeline.
///
/// The channel count is carried explicitly so that images with the wrong
/// layout can be represented and rejected by [`ByteImage::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteImage {
    width: usize,
    height: usize,
    channels: usize,
    pixels: Vec<u8>,
}

impl ByteImage {
    pub fn new(width: usize, height: usize, channels: usize, pixels: Vec<u8>) -> Self {
        assert_eq!(
            pixels.len(),
            width * height * channels,
            "pixels length must equal width * height * channels"
        );
        Self {
            width,
            height,
            channels,
            pixels,
        }
    }

    /// Zero-sized RGB image.
    pub fn empty() -> Self {
        Self::new(0, 0, 3, Vec::new())
    }

    /// RGB image with every pixel set to `color`.
    pub fn filled_rgb(width: usize, height: usize, color: [u8; 3]) -> Self {
        Self::from_fn_rgb(width, height, |_, _| color)
    }

    /// RGB image built from `f(x, y)` in row-major order.
    pub fn from_fn_rgb<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> [u8; 3],
    {
        let mut pixels = Vec::with_capacity(width * height * 3);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&f(x, y));
            }
        }
        Self::new(width, height, 3, pixels)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Color at `(x, y)` of a 3-channel image.
    #[inline]
    pub fn rgb(&self, x: usize, y: usize) -> [u8; 3] {
        debug_assert_eq!(self.channels, 3, "Image must have 3 channels");
        debug_assert!(x < self.width && y < self.height);
        let idx = (y * self.width + x) * 3;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }

    /// Checks that the image can enter the pipeline: non-empty, exactly 3 channels.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidInput(format!(
                "image is empty ({}x{})",
                self.width, self.height
            )));
        }
        if self.channels != 3 {
            return Err(Error::InvalidInput(format!(
                "expected 3 channels, got {}",
                self.channels
            )));
        }
        Ok(())
    }
}
