//! Image file adapter over the `image` crate.
//!
//! Any format the `image` crate decodes is accepted and converted to 8-bit
//! RGB. The output format is chosen from the file extension.

use std::path::{Path, PathBuf};

use ::image as image_lib;
use thiserror::Error;

use crate::image::ByteImage;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("Failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: image_lib::ImageError,
    },

    #[error("Failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        source: image_lib::ImageError,
    },

    #[error("Cannot save image: {0}")]
    InvalidImage(String),
}

/// Loads `path` as 8-bit RGB, dropping alpha and widening grayscale.
pub fn load_image(path: impl AsRef<Path>) -> Result<ByteImage, IoError> {
    let path = path.as_ref();
    let decoded = image_lib::open(path).map_err(|source| IoError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        ?path,
        width = decoded.width(),
        height = decoded.height(),
        color = ?decoded.color(),
        "Loaded image"
    );

    let rgb = decoded.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    Ok(ByteImage::new(width, height, 3, rgb.into_raw()))
}

/// Saves a 3-channel image; the format follows the extension of `path`.
pub fn save_image(image: &ByteImage, path: impl AsRef<Path>) -> Result<(), IoError> {
    let path = path.as_ref();
    image
        .validate()
        .map_err(|e| IoError::InvalidImage(e.to_string()))?;

    image_lib::save_buffer(
        path,
        image.pixels(),
        image.width() as u32,
        image.height() as u32,
        image_lib::ExtendedColorType::Rgb8,
    )
    .map_err(|source| IoError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(?path, "Saved image");
    Ok(())
}

/// `<dir>/dehazed_<file name>` for an input at `<dir>/<file name>`.
pub fn dehazed_output_path(input: impl AsRef<Path>) -> PathBuf {
    let input = input.as_ref();
    let name = match input.file_name() {
        Some(name) => format!("dehazed_{}", name.to_string_lossy()),
        None => "dehazed".to_string(),
    };
    input.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use common::test_utils::test_output_path;

    use super::*;

    #[test]
    fn test_png_roundtrip_is_lossless() {
        let image = ByteImage::from_fn_rgb(7, 5, |x, y| [(x * 30) as u8, (y * 50) as u8, 200]);
        let path = test_output_path("dehaze/io_roundtrip.png");

        save_image(&image, &path).unwrap();
        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded, image);
    }

    #[test]
    fn test_rgba_file_loads_as_rgb() {
        let path = test_output_path("dehaze/io_rgba.png");
        let rgba = image_lib::RgbaImage::from_pixel(3, 2, image_lib::Rgba([10, 20, 30, 40]));
        rgba.save(&path).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.channels(), 3);
        assert_eq!((loaded.width(), loaded.height()), (3, 2));
        assert_eq!(loaded.rgb(2, 1), [10, 20, 30]);
    }

    #[test]
    fn test_missing_file_is_decode_error() {
        let path = test_output_path("dehaze/does_not_exist.png");
        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, IoError::Decode { .. }));
        assert!(err.to_string().contains("does_not_exist.png"));
    }

    #[test]
    fn test_save_rejects_wrong_channel_count() {
        let image = ByteImage::new(2, 2, 1, vec![0; 4]);
        let path = test_output_path("dehaze/io_gray.png");
        let err = save_image(&image, &path).unwrap_err();
        assert!(matches!(err, IoError::InvalidImage(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_unknown_extension_is_encode_error() {
        let image = ByteImage::filled_rgb(2, 2, [1, 2, 3]);
        let path = test_output_path("dehaze/io_output.unknownext");
        let err = save_image(&image, &path).unwrap_err();
        assert!(matches!(err, IoError::Encode { .. }));
    }

    #[test]
    fn test_dehazed_output_path() {
        assert_eq!(
            dehazed_output_path("photos/forest.jpg"),
            PathBuf::from("photos/dehazed_forest.jpg")
        );
        assert_eq!(
            dehazed_output_path("city.png"),
            PathBuf::from("dehazed_city.png")
        );
    }
}
