//! Crop regions in image space.
//!
//! A [`CropRegion`] is a half-open pixel rectangle `[x1, x2) x [y1, y2)`.
//! [`normalize_crop_region`] turns arbitrary corner coordinates into a region
//! that is always within bounds; [`crop_pixels`] copies that block out.

use serde::{Deserialize, Serialize};

use crate::decode::{RasterImage, CHANNELS};

/// Rectangle in image space with `0 <= x1 <= x2 <= width` and
/// `0 <= y1 <= y2 <= height` once normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CropRegion {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl CropRegion {
    pub fn width(&self) -> u32 {
        self.x2.saturating_sub(self.x1)
    }

    pub fn height(&self) -> u32 {
        self.y2.saturating_sub(self.y1)
    }

    /// True when the region covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// True when the region lies inside an image of the given size.
    pub fn fits_within(&self, img_width: u32, img_height: u32) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2 && self.x2 <= img_width && self.y2 <= img_height
    }
}

/// Clamp corner coordinates into the image and order them.
///
/// Each coordinate is clamped into `[0, width]` or `[0, height]`, then each
/// pair is swapped so that `x1 <= x2` and `y1 <= y2`. Never fails; a zero-area
/// result tells the caller to reject the crop.
pub fn normalize_crop_region(
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    img_width: u32,
    img_height: u32,
) -> CropRegion {
    let cx1 = clamp_axis(x1, img_width);
    let cx2 = clamp_axis(x2, img_width);
    let cy1 = clamp_axis(y1, img_height);
    let cy2 = clamp_axis(y2, img_height);

    CropRegion {
        x1: cx1.min(cx2),
        y1: cy1.min(cy2),
        x2: cx1.max(cx2),
        y2: cy1.max(cy2),
    }
}

/// Copy the block `[y1, y2) x [x1, x2)` out of `image`.
///
/// `region` must already be normalized against `image`. The result owns a
/// fresh buffer; nothing is shared with the source.
pub fn crop_pixels(image: &RasterImage, region: &CropRegion) -> RasterImage {
    debug_assert!(
        region.fits_within(image.width, image.height),
        "crop region {region:?} outside {}x{}",
        image.width,
        image.height
    );

    let out_width = region.width();
    let out_height = region.height();
    let src_stride = image.width as usize * CHANNELS;
    let row_len = out_width as usize * CHANNELS;

    let mut pixels = Vec::with_capacity(row_len * out_height as usize);
    for y in region.y1..region.y2 {
        let start = y as usize * src_stride + region.x1 as usize * CHANNELS;
        pixels.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    RasterImage {
        width: out_width,
        height: out_height,
        pixels,
    }
}

fn clamp_axis(value: i32, limit: u32) -> u32 {
    // limit fits in i64 for every u32
    (value as i64).clamp(0, limit as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image where each pixel has a unique value based on position.
    fn test_image(width: u32, height: u32) -> RasterImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.push(v); // R
                pixels.push(v); // G
                pixels.push(v); // B
            }
        }
        RasterImage::new(width, height, pixels)
    }

    #[test]
    fn test_normalize_in_range() {
        let r = normalize_crop_region(10, 20, 30, 40, 100, 100);
        assert_eq!(
            r,
            CropRegion {
                x1: 10,
                y1: 20,
                x2: 30,
                y2: 40
            }
        );
    }

    #[test]
    fn test_normalize_swaps_reversed_drag() {
        let r = normalize_crop_region(30, 40, 10, 20, 100, 100);
        assert_eq!((r.x1, r.y1, r.x2, r.y2), (10, 20, 30, 40));
    }

    #[test]
    fn test_normalize_clamps_out_of_range() {
        let r = normalize_crop_region(-50, -5, 150, 120, 100, 80);
        assert_eq!((r.x1, r.y1, r.x2, r.y2), (0, 0, 100, 80));
    }

    #[test]
    fn test_normalize_fully_outside_is_empty() {
        let r = normalize_crop_region(120, 10, 180, 50, 100, 100);
        assert_eq!((r.x1, r.x2), (100, 100));
        assert!(r.is_empty());
    }

    #[test]
    fn test_normalize_extreme_values() {
        let r = normalize_crop_region(i32::MIN, i32::MAX, i32::MAX, i32::MIN, 640, 480);
        assert_eq!((r.x1, r.y1, r.x2, r.y2), (0, 0, 640, 480));
    }

    #[test]
    fn test_crop_size() {
        let img = test_image(100, 100);
        let r = normalize_crop_region(10, 20, 60, 45, 100, 100);
        let out = crop_pixels(&img, &r);
        assert_eq!((out.width, out.height), (50, 25));
        assert_eq!(out.pixels.len(), 50 * 25 * 3);
    }

    #[test]
    fn test_crop_pixel_values_preserved() {
        let img = test_image(10, 10);
        let r = normalize_crop_region(3, 3, 7, 7, 10, 10);
        let out = crop_pixels(&img, &r);

        // First pixel comes from (3, 3): (3 * 10 + 3) % 256 = 33
        assert_eq!(&out.pixels[0..3], &[33, 33, 33]);
        // Last pixel comes from (6, 6): 66
        let last = out.pixels.len() - 3;
        assert_eq!(&out.pixels[last..], &[66, 66, 66]);
    }

    #[test]
    fn test_full_crop_equals_source() {
        let img = test_image(50, 40);
        let out = crop_pixels(&img, &normalize_crop_region(0, 0, 50, 40, 50, 40));
        assert_eq!(out, img);
    }

    #[test]
    fn test_crop_does_not_alias_source() {
        let img = test_image(20, 20);
        let mut out = crop_pixels(&img, &normalize_crop_region(0, 0, 10, 10, 20, 20));
        out.pixels[0] = 200;
        assert_eq!(img.pixels[0], 0);
    }

    #[test]
    fn test_empty_region_yields_empty_image() {
        let img = test_image(20, 20);
        let out = crop_pixels(&img, &normalize_crop_region(5, 5, 5, 15, 20, 20));
        assert!(out.is_empty());
    }

    #[test]
    fn test_region_helpers() {
        let r = CropRegion {
            x1: 2,
            y1: 4,
            x2: 12,
            y2: 9,
        };
        assert_eq!(r.width(), 10);
        assert_eq!(r.height(), 5);
        assert!(!r.is_empty());
        assert!(r.fits_within(12, 9));
        assert!(!r.fits_within(11, 9));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
