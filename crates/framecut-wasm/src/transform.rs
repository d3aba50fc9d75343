//! Stateless WASM bindings for display mapping, crop and resize.
//!
//! These mirror the core functions for hosts that keep their own state instead
//! of using `JsSession`.

use crate::types::JsRasterImage;
use framecut_core::{
    compute_display_transform as core_transform, crop_pixels, display_to_image_coords,
    normalize_crop_region, resize_pixels, DisplayPoint, DisplayTransform, LoadError,
};
use wasm_bindgen::prelude::*;

/// Place an image of `image_width` x `image_height` in a viewport.
///
/// Returns `{ scale, offset_x, offset_y, canvas_width, canvas_height }`.
/// A viewport side of 1 or less falls back to 400x300.
#[wasm_bindgen]
pub fn compute_display_transform(
    image_width: u32,
    image_height: u32,
    viewport_width: u32,
    viewport_height: u32,
) -> Result<JsValue, JsValue> {
    let t = core_transform(image_width, image_height, viewport_width, viewport_height);
    Ok(serde_wasm_bindgen::to_value(&t)?)
}

/// Crop an image to the rectangle between two display points.
///
/// `transform` is the object returned by [`compute_display_transform`].
/// Returns `undefined` when the rectangle misses the image entirely, and an
/// error if the pixel buffer does not match the image dimensions.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const t = compute_display_transform(img.width, img.height, 500, 300);
/// const cropped = crop_display_rect(img, t, 100, 50, 300, 250);
/// ```
#[wasm_bindgen]
pub fn crop_display_rect(
    image: &JsRasterImage,
    transform: JsValue,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
) -> Result<Option<JsRasterImage>, JsValue> {
    let transform: DisplayTransform = serde_wasm_bindgen::from_value(transform)?;
    crop_between(image, &transform, (x1, y1), (x2, y2))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resample an image by `scale`. The result is at least 1x1.
#[wasm_bindgen]
pub fn resize_image(image: &JsRasterImage, scale: f64) -> Result<JsRasterImage, JsValue> {
    resize_raster(image, scale).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn crop_between(
    image: &JsRasterImage,
    transform: &DisplayTransform,
    a: (i32, i32),
    b: (i32, i32),
) -> Result<Option<JsRasterImage>, LoadError> {
    let raster = image.to_raster()?;
    let p1 = display_to_image_coords(DisplayPoint::new(a.0, a.1), transform);
    let p2 = display_to_image_coords(DisplayPoint::new(b.0, b.1), transform);
    let region = normalize_crop_region(p1.x, p1.y, p2.x, p2.y, raster.width, raster.height);
    if region.is_empty() {
        return Ok(None);
    }
    Ok(Some(JsRasterImage::from_raster(&crop_pixels(raster, &region))))
}

fn resize_raster(image: &JsRasterImage, scale: f64) -> Result<JsRasterImage, LoadError> {
    let resized = resize_pixels(image.to_raster()?, scale)?;
    Ok(JsRasterImage::from_raster(&resized))
}
