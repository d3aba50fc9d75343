//! Scale-dependent resampling.
//!
//! All functions return new `RasterImage` instances without modifying the input.

use image::imageops::{self, FilterType};

use super::{expected_len, LoadError, RasterImage, ResampleFilter};
use crate::transform::DisplayTransform;

/// Output dimensions for a scale factor: `round(dim * scale)`, at least 1.
pub fn scaled_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    let w = (width as f64 * scale).round().max(1.0) as u32;
    let h = (height as f64 * scale).round().max(1.0) as u32;
    (w, h)
}

/// Resample an image by a scale factor.
///
/// The filter is chosen by [`ResampleFilter::for_scale`]: cubic when
/// enlarging, area averaging when shrinking. The output is never smaller
/// than 1x1.
///
/// # Errors
///
/// Returns `LoadError::InvalidPixelData` if the buffer disagrees with the
/// image dimensions.
pub fn resize_pixels(image: &RasterImage, scale: f64) -> Result<RasterImage, LoadError> {
    let (width, height) = scaled_dimensions(image.width, image.height, scale);
    resample(image, width, height, ResampleFilter::for_scale(scale))
}

/// Render the scaled-to-fit copy that the UI draws at the transform's offset.
///
/// Dimensions are `floor(dim * scale)`, at least 1. Lanczos3 keeps the
/// preview sharp.
pub fn render_preview(
    image: &RasterImage,
    transform: &DisplayTransform,
) -> Result<RasterImage, LoadError> {
    let (width, height) = transform.scaled_size(image.width, image.height);
    resample(image, width, height, ResampleFilter::Lanczos3)
}

/// Resample to exact dimensions with an explicit filter.
///
/// # Errors
///
/// Returns `LoadError::InvalidPixelData` if the buffer disagrees with the
/// image dimensions.
pub fn resample(
    image: &RasterImage,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> Result<RasterImage, LoadError> {
    image.validate()?;
    let width = width.max(1);
    let height = height.max(1);

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb = image.to_rgb_image().ok_or(LoadError::InvalidPixelData {
        expected: expected_len(image.width, image.height),
        actual: image.pixels.len(),
    })?;

    let out = match filter {
        ResampleFilter::Area => imageops::thumbnail(&rgb, width, height),
        ResampleFilter::Cubic => imageops::resize(&rgb, width, height, FilterType::CatmullRom),
        ResampleFilter::Lanczos3 => imageops::resize(&rgb, width, height, FilterType::Lanczos3),
    };
    Ok(RasterImage::from_rgb_image(out))
}
