//! Framecut Core - display mapping, crop and resample pipeline
//!
//! This crate provides the core of Framecut: mapping a scaled-to-fit display
//! back to image pixels, turning a dragged rectangle into a valid crop,
//! resampling the crop, and the session that owns the resulting buffers.
//!
//! # Data flow
//!
//! 1. [`Session::load_bytes`] decodes the original image
//! 2. [`Session::display_transform`] places it in the host's viewport
//! 3. [`SelectionTracker`] collects press / drag / release into a [`SelectionRect`]
//! 4. [`Session::apply_selection`] maps, normalizes and crops
//! 5. [`Session::set_scale_factor`] resamples the crop
//! 6. [`Session::save`] writes any of the three buffers as PNG or JPEG
//!
//! The library emits `tracing` events and never installs a subscriber.

pub mod config;
pub mod decode;
pub mod encode;
pub mod selection;
pub mod session;
pub mod transform;

pub use config::SessionConfig;
pub use decode::{
    render_preview, resize_pixels, ChannelOrder, LoadError, RasterImage, ResampleFilter,
    CANONICAL_CHANNEL_ORDER,
};
pub use encode::{SaveError, SaveFormat};
pub use selection::{DragState, SelectionRect, SelectionTracker};
pub use session::{ScaleFactor, Session, SessionSlot};
pub use transform::{
    compute_display_transform, crop_pixels, display_to_image_coords, image_to_display_coords,
    normalize_crop_region, CropRegion, DisplayPoint, DisplayTransform, ImagePoint,
};
