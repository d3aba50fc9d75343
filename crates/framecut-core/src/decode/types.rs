//! Core types for raster buffers and loading.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of interleaved channels in every [`RasterImage`].
pub const CHANNELS: usize = 3;

/// Channel order of every in-memory [`RasterImage`].
///
/// Buffers arriving in any other order are converted exactly once, at the
/// boundary where they enter (see [`RasterImage::from_channels`]), and
/// converted back only on the way out ([`RasterImage::to_channels`]).
pub const CANONICAL_CHANNEL_ORDER: ChannelOrder = ChannelOrder::Rgb;

/// Error types for loading an image into a session.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be read.
    #[error("I/O error: {0}")]
    Io(String),

    /// The bytes are not a decodable image (corrupt data or unsupported format).
    #[error("Could not decode image: {0}")]
    Decode(String),

    /// The decoded image has no pixels.
    #[error("Image has zero area: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    /// A raw pixel buffer does not match its stated dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },
}

/// Interleaved order of the three color channels in a raw buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChannelOrder {
    /// Red, green, blue.
    #[default]
    Rgb,
    /// Blue, green, red (common for capture APIs and OpenCV-style buffers).
    Bgr,
}

/// Resampling filter used when producing a derived image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResampleFilter {
    /// Box/area averaging. Each output pixel is the mean of the source pixels
    /// it covers, which suppresses aliasing when shrinking.
    Area,
    /// Catmull-Rom cubic interpolation for smooth enlargement.
    Cubic,
    /// Lanczos3, used for the scaled-to-fit display preview.
    Lanczos3,
}

impl ResampleFilter {
    /// Pick the filter for a given scale factor.
    ///
    /// Enlarging (`scale > 1.0`) uses [`ResampleFilter::Cubic`]; identity and
    /// shrinking use [`ResampleFilter::Area`].
    pub fn for_scale(scale: f64) -> Self {
        if scale > 1.0 {
            ResampleFilter::Cubic
        } else {
            ResampleFilter::Area
        }
    }
}

/// A 3-channel raster in [`CANONICAL_CHANNEL_ORDER`].
///
/// Equality is by content: two images are equal when their dimensions and
/// bytes match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// Create a new RasterImage with the given dimensions and RGB pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            expected_len(width, height),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Build an image from a host buffer in any channel order.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::EmptyImage` for zero dimensions and
    /// `LoadError::InvalidPixelData` if the buffer length is wrong.
    pub fn from_channels(
        width: u32,
        height: u32,
        mut pixels: Vec<u8>,
        order: ChannelOrder,
    ) -> Result<Self, LoadError> {
        if width == 0 || height == 0 {
            return Err(LoadError::EmptyImage { width, height });
        }
        let expected = expected_len(width, height);
        if pixels.len() != expected {
            return Err(LoadError::InvalidPixelData {
                expected,
                actual: pixels.len(),
            });
        }
        if order != CANONICAL_CHANNEL_ORDER {
            swap_red_blue(&mut pixels);
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Copy the pixels out in the requested channel order.
    pub fn to_channels(&self, order: ChannelOrder) -> Vec<u8> {
        let mut out = self.pixels.clone();
        if order != CANONICAL_CHANNEL_ORDER {
            swap_red_blue(&mut out);
        }
        out
    }

    /// Copy the pixels out as opaque RGBA, the layout of a canvas `ImageData`.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixel_count() as usize * 4);
        for px in self.pixels.chunks_exact(CHANNELS) {
            out.extend_from_slice(px);
            out.push(255);
        }
        out
    }

    /// Create a RasterImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbImage for codec or resampling work.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Human-readable size for status display, e.g. `"640x480 pixels"`.
    pub fn dimension_label(&self) -> String {
        format!("{}x{} pixels", self.width, self.height)
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Check that the buffer holds exactly `width * height * 3` bytes.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::InvalidPixelData` on a length mismatch.
    pub fn validate(&self) -> Result<(), LoadError> {
        let expected = expected_len(self.width, self.height);
        if self.pixels.len() != expected {
            return Err(LoadError::InvalidPixelData {
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }
}

pub(crate) fn expected_len(width: u32, height: u32) -> usize {
    (width as usize) * (height as usize) * CHANNELS
}

fn swap_red_blue(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(CHANNELS) {
        px.swap(0, 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_for_scale() {
        assert_eq!(ResampleFilter::for_scale(3.0), ResampleFilter::Cubic);
        assert_eq!(ResampleFilter::for_scale(1.01), ResampleFilter::Cubic);
        assert_eq!(ResampleFilter::for_scale(1.0), ResampleFilter::Area);
        assert_eq!(ResampleFilter::for_scale(0.1), ResampleFilter::Area);
    }

    #[test]
    fn test_canonical_order_is_rgb() {
        assert_eq!(CANONICAL_CHANNEL_ORDER, ChannelOrder::Rgb);
    }

    #[test]
    fn test_from_bgr_converts_to_rgb() {
        // One pure-blue pixel in BGR order
        let img = RasterImage::from_channels(1, 1, vec![255, 0, 0], ChannelOrder::Bgr).unwrap();
        assert_eq!(img.pixels, vec![0, 0, 255]);
        assert_eq!(img.to_channels(ChannelOrder::Bgr), vec![255, 0, 0]);
        assert_eq!(img.to_channels(ChannelOrder::Rgb), vec![0, 0, 255]);
    }

    #[test]
    fn test_from_channels_rejects_bad_length() {
        let result = RasterImage::from_channels(2, 2, vec![0u8; 11], ChannelOrder::Rgb);
        assert!(matches!(
            result,
            Err(LoadError::InvalidPixelData {
                expected: 12,
                actual: 11
            })
        ));
    }

    #[test]
    fn test_validate_checks_buffer_length() {
        assert!(RasterImage::new(2, 2, vec![0u8; 12]).validate().is_ok());
        assert!(matches!(
            RasterImage::new(10, 10, vec![0u8; 3]).validate(),
            Err(LoadError::InvalidPixelData {
                expected: 300,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_from_channels_rejects_zero_area() {
        let result = RasterImage::from_channels(0, 5, vec![], ChannelOrder::Rgb);
        assert!(matches!(result, Err(LoadError::EmptyImage { .. })));
    }

    #[test]
    fn test_to_rgba_adds_opaque_alpha() {
        let img = RasterImage::new(2, 1, vec![10, 20, 30, 40, 50, 60]);
        assert_eq!(img.to_rgba(), vec![10, 20, 30, 255, 40, 50, 60, 255]);
    }

    #[test]
    fn test_raster_image_creation() {
        let pixels = vec![0u8; 100 * 50 * 3];
        let img = RasterImage::new(100, 50, pixels);

        assert_eq!(img.width, 100);
        assert_eq!(img.height, 50);
        assert_eq!(img.pixel_count(), 5000);
        assert_eq!(img.dimension_label(), "100x50 pixels");
        assert!(!img.is_empty());
    }

    #[test]
    fn test_equality_is_by_content() {
        let a = RasterImage::new(1, 1, vec![1, 2, 3]);
        let b = RasterImage::new(1, 1, vec![1, 2, 3]);
        let c = RasterImage::new(1, 1, vec![3, 2, 1]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_load_error_display() {
        let err = LoadError::EmptyImage {
            width: 0,
            height: 4,
        };
        assert_eq!(err.to_string(), "Image has zero area: 0x4");

        let err = LoadError::Decode("bad header".to_string());
        assert_eq!(err.to_string(), "Could not decode image: bad header");
    }
}
