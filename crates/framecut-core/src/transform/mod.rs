//! The transform engine: display mapping and cropping.
//!
//! Every function here is pure and total. Display-space values only ever
//! reach image space through [`display_to_image_coords`].
//!
//! # Coordinate System
//!
//! - Display space: viewport pixels, origin top-left, image drawn shrunk-to-fit
//!   and centered
//! - Image space: source pixels, origin top-left
//! - Crop regions are half-open: `[x1, x2) x [y1, y2)`

mod crop;
mod display;

pub use crop::{crop_pixels, normalize_crop_region, CropRegion};
pub use display::{
    compute_display_transform, compute_display_transform_with_fallback, display_to_image_coords,
    image_to_display_coords, DisplayPoint, DisplayTransform, ImagePoint, FALLBACK_VIEWPORT,
};
