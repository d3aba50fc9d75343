//! PNG and JPEG encoding for saving session buffers.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{expected_len, RasterImage};
use crate::session::SessionSlot;

/// Errors that can occur while encoding or saving an image.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The requested session slot holds no image.
    #[error("No {0} image available to save")]
    MissingImage(SessionSlot),

    /// The destination extension is not a supported output format.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// The codec rejected the image.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// Writing the encoded bytes failed.
    #[error("I/O error: {0}")]
    Io(String),
}

/// Output container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SaveFormat {
    #[default]
    Png,
    Jpeg,
}

impl SaveFormat {
    /// Pick the format from a path's extension.
    ///
    /// `png` and `jpg`/`jpeg` are recognized case-insensitively. A path with
    /// no extension is saved as PNG.
    ///
    /// # Errors
    ///
    /// Returns `SaveError::UnsupportedFormat` for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, SaveError> {
        let Some(ext) = path.extension() else {
            return Ok(SaveFormat::Png);
        };
        let ext = ext.to_string_lossy().to_ascii_lowercase();
        match ext.as_str() {
            "png" => Ok(SaveFormat::Png),
            "jpg" | "jpeg" => Ok(SaveFormat::Jpeg),
            _ => Err(SaveError::UnsupportedFormat(ext)),
        }
    }

    /// MIME type of the encoded bytes.
    pub fn mime_type(self) -> &'static str {
        match self {
            SaveFormat::Png => "image/png",
            SaveFormat::Jpeg => "image/jpeg",
        }
    }
}

/// Encode RGB pixel data to PNG bytes.
///
/// # Errors
///
/// Returns an error if the dimensions are zero, the buffer length is wrong,
/// or the encoder fails.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, SaveError> {
    validate(pixels, width, height)?;

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| SaveError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode RGB pixel data to JPEG bytes.
///
/// `quality` is clamped to 1-100.
///
/// # Errors
///
/// Returns an error if the dimensions are zero, the buffer length is wrong,
/// or the encoder fails.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, SaveError> {
    validate(pixels, width, height)?;

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| SaveError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode a raster in the given format.
///
/// The buffer is already in canonical RGB order, which is what both codecs
/// expect, so no channel conversion happens here.
pub fn encode_image(
    image: &RasterImage,
    format: SaveFormat,
    jpeg_quality: u8,
) -> Result<Vec<u8>, SaveError> {
    match format {
        SaveFormat::Png => encode_png(&image.pixels, image.width, image.height),
        SaveFormat::Jpeg => encode_jpeg(&image.pixels, image.width, image.height, jpeg_quality),
    }
}

/// Encode a raster and write it to `path`, choosing the format by extension.
///
/// # Errors
///
/// Returns `SaveError::UnsupportedFormat` for unknown extensions, encoder
/// errors, or `SaveError::Io` if the file cannot be written.
pub fn save_image(image: &RasterImage, path: &Path, jpeg_quality: u8) -> Result<(), SaveError> {
    let format = SaveFormat::from_path(path)?;
    let bytes = encode_image(image, format, jpeg_quality)?;
    std::fs::write(path, bytes).map_err(|e| SaveError::Io(format!("{}: {e}", path.display())))
}

fn validate(pixels: &[u8], width: u32, height: u32) -> Result<(), SaveError> {
    if width == 0 || height == 0 {
        return Err(SaveError::InvalidDimensions { width, height });
    }
    let expected = expected_len(width, height);
    if pixels.len() != expected {
        return Err(SaveError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_image;

    fn gradient(width: u32, height: u32) -> RasterImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 255 / width) as u8);
                pixels.push((y * 255 / height) as u8);
                pixels.push(128);
            }
        }
        RasterImage::new(width, height, pixels)
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(SaveFormat::from_path(Path::new("a.png")).unwrap(), SaveFormat::Png);
        assert_eq!(SaveFormat::from_path(Path::new("a.JPG")).unwrap(), SaveFormat::Jpeg);
        assert_eq!(SaveFormat::from_path(Path::new("a.jpeg")).unwrap(), SaveFormat::Jpeg);
        assert_eq!(SaveFormat::from_path(Path::new("cropped")).unwrap(), SaveFormat::Png);
        assert!(matches!(
            SaveFormat::from_path(Path::new("a.gif")),
            Err(SaveError::UnsupportedFormat(ext)) if ext == "gif"
        ));
    }

    #[test]
    fn test_png_roundtrip_is_lossless() {
        let img = gradient(33, 17);
        let bytes = encode_image(&img, SaveFormat::Png, 95).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        assert_eq!(decode_image(&bytes).unwrap(), img);
    }

    #[test]
    fn test_jpeg_has_markers() {
        let img = gradient(40, 30);
        let bytes = encode_image(&img, SaveFormat::Jpeg, 90).unwrap();
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
        assert_eq!(&bytes[bytes.len() - 2..], &[0xFF, 0xD9]);

        let decoded = decode_image(&bytes).unwrap();
        assert_eq!((decoded.width, decoded.height), (40, 30));
    }

    #[test]
    fn test_jpeg_quality_clamping() {
        let pixels = vec![128u8; 10 * 10 * 3];
        assert!(encode_jpeg(&pixels, 10, 10, 0).is_ok());
        assert!(encode_jpeg(&pixels, 10, 10, 255).is_ok());
    }

    #[test]
    fn test_invalid_pixel_data() {
        let pixels = vec![128u8; 99 * 100 * 3];
        assert!(matches!(
            encode_png(&pixels, 100, 100),
            Err(SaveError::InvalidPixelData { .. })
        ));
        assert!(matches!(
            encode_jpeg(&pixels, 100, 100, 90),
            Err(SaveError::InvalidPixelData { .. })
        ));
    }

    #[test]
    fn test_zero_dimensions() {
        assert!(matches!(
            encode_png(&[], 0, 10),
            Err(SaveError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_save_image_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let img = gradient(12, 9);

        save_image(&img, &path, 95).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(decode_image(&bytes).unwrap(), img);
    }

    #[test]
    fn test_save_image_bad_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");
        let result = save_image(&gradient(4, 4), &path, 95);
        assert!(matches!(result, Err(SaveError::Io(_))));
    }

    #[test]
    fn test_save_image_unknown_extension_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.webp");
        let result = save_image(&gradient(4, 4), &path, 95);
        assert!(matches!(result, Err(SaveError::UnsupportedFormat(_))));
        assert!(!path.exists());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Valid input always produces a decodable image of the same size.
        #[test]
        fn prop_encoded_output_decodes(
            (width, height) in (1u32..=40, 1u32..=40),
            jpeg in any::<bool>(),
            seed in any::<u8>(),
        ) {
            let pixels: Vec<u8> = (0..(width * height * 3) as usize)
                .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
                .collect();
            let img = RasterImage::new(width, height, pixels);
            let format = if jpeg { SaveFormat::Jpeg } else { SaveFormat::Png };

            let bytes = encode_image(&img, format, 90).unwrap();
            let decoded = crate::decode::decode_image(&bytes).unwrap();
            prop_assert_eq!((decoded.width, decoded.height), (width, height));
        }

        /// Property: Mismatched pixel data length is always rejected.
        #[test]
        fn prop_invalid_pixel_length_returns_error(
            (width, height) in (1u32..=30, 1u32..=30),
            delta in prop_oneof![-10i64..=-1, 1i64..=10],
        ) {
            let expected = (width * height * 3) as i64;
            let len = (expected + delta).max(0) as usize;
            prop_assume!(len as i64 != expected);

            let result = encode_png(&vec![0u8; len], width, height);
            prop_assert!(
                matches!(result, Err(SaveError::InvalidPixelData { .. })),
                "mismatched length should be rejected"
            );
        }
    }
}
