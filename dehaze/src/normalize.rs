//! 8-bit to floating-point conversion at the pipeline input.

use common::Buffer2;

use crate::error::Result;
use crate::image::{ByteImage, RgbImage};

/// Converts a 3-channel 8-bit image to channel values in `[0, 1]`.
pub fn normalize(image: &ByteImage) -> Result<RgbImage> {
    image.validate()?;

    let pixels = image
        .pixels()
        .chunks_exact(3)
        .map(|px| {
            [
                px[0] as f32 / 255.0,
                px[1] as f32 / 255.0,
                px[2] as f32 / 255.0,
            ]
        })
        .collect();

    Ok(Buffer2::new(image.width(), image.height(), pixels))
}
