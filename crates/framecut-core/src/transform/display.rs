//! Mapping between display space and image space.
//!
//! An image is shown shrunk-to-fit (never enlarged) and centered inside a
//! viewport. [`DisplayTransform`] captures that placement; the functions here
//! convert points between the two spaces.

use serde::{Deserialize, Serialize};

/// Viewport substituted when the host reports a degenerate size (not laid out yet).
pub const FALLBACK_VIEWPORT: (u32, u32) = (400, 300);

/// A point in display space (viewport pixels). May lie outside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayPoint {
    pub x: i32,
    pub y: i32,
}

impl DisplayPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A point in image space (source pixels). Not clamped to the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImagePoint {
    pub x: i32,
    pub y: i32,
}

impl ImagePoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Placement of a scaled, centered image inside a viewport.
///
/// Invariants: `0 < scale <= 1.0`, `offset_x >= 0`, `offset_y >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayTransform {
    /// Display pixels per image pixel.
    pub scale: f64,
    /// Left edge of the drawn image in the viewport.
    pub offset_x: i32,
    /// Top edge of the drawn image in the viewport.
    pub offset_y: i32,
    /// Viewport width actually used (after fallback substitution).
    pub canvas_width: u32,
    /// Viewport height actually used (after fallback substitution).
    pub canvas_height: u32,
}

impl DisplayTransform {
    /// Size of an image of the given dimensions once drawn, `floor(dim * scale)`.
    pub fn scaled_size(&self, img_width: u32, img_height: u32) -> (u32, u32) {
        (
            scaled_dim(img_width, self.scale),
            scaled_dim(img_height, self.scale),
        )
    }

    /// Whether a display point falls on the drawn image.
    pub fn contains(&self, point: DisplayPoint, img_width: u32, img_height: u32) -> bool {
        let (w, h) = self.scaled_size(img_width, img_height);
        let dx = i64::from(point.x) - i64::from(self.offset_x);
        let dy = i64::from(point.y) - i64::from(self.offset_y);
        (0..i64::from(w)).contains(&dx) && (0..i64::from(h)).contains(&dy)
    }
}

/// Compute how an image is placed in a viewport.
///
/// `scale = min(vw / iw, vh / ih, 1.0)` and the scaled image is centered.
/// Viewports with either side `<= 1` are replaced by [`FALLBACK_VIEWPORT`].
pub fn compute_display_transform(
    img_width: u32,
    img_height: u32,
    viewport_width: u32,
    viewport_height: u32,
) -> DisplayTransform {
    compute_display_transform_with_fallback(
        img_width,
        img_height,
        viewport_width,
        viewport_height,
        FALLBACK_VIEWPORT,
    )
}

/// [`compute_display_transform`] with an explicit fallback viewport.
pub fn compute_display_transform_with_fallback(
    img_width: u32,
    img_height: u32,
    viewport_width: u32,
    viewport_height: u32,
    fallback: (u32, u32),
) -> DisplayTransform {
    let (canvas_width, canvas_height) = if viewport_width <= 1 || viewport_height <= 1 {
        fallback
    } else {
        (viewport_width, viewport_height)
    };

    let img_w = img_width.max(1);
    let img_h = img_height.max(1);

    let scale_x = canvas_width as f64 / img_w as f64;
    let scale_y = canvas_height as f64 / img_h as f64;
    let scale = scale_x.min(scale_y).min(1.0);

    let offset_x = (canvas_width as i64 - scaled_dim(img_w, scale) as i64) / 2;
    let offset_y = (canvas_height as i64 - scaled_dim(img_h, scale) as i64) / 2;

    DisplayTransform {
        scale,
        offset_x: offset_x.max(0) as i32,
        offset_y: offset_y.max(0) as i32,
        canvas_width,
        canvas_height,
    }
}

/// Map a display point to image space: `round((d - offset) / scale)`.
///
/// No clamping to the image; points outside the drawn image map outside it.
/// Results beyond the `i32` range saturate.
pub fn display_to_image_coords(point: DisplayPoint, transform: &DisplayTransform) -> ImagePoint {
    let x = (f64::from(point.x) - f64::from(transform.offset_x)) / transform.scale;
    let y = (f64::from(point.y) - f64::from(transform.offset_y)) / transform.scale;
    // `as` saturates for floats
    ImagePoint::new(x.round() as i32, y.round() as i32)
}

/// Map an image point to display space: `round(i * scale) + offset`.
///
/// Results beyond the `i32` range saturate.
pub fn image_to_display_coords(point: ImagePoint, transform: &DisplayTransform) -> DisplayPoint {
    let x = (f64::from(point.x) * transform.scale).round() + f64::from(transform.offset_x);
    let y = (f64::from(point.y) * transform.scale).round() + f64::from(transform.offset_y);
    DisplayPoint::new(x as i32, y as i32)
}

fn scaled_dim(dim: u32, scale: f64) -> u32 {
    ((dim as f64 * scale) as u32).max(1)
}
