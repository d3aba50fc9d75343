//! Image decoding and resampling for Framecut.
//!
//! This module provides functionality for:
//! - Decoding PNG, JPEG, BMP and TIFF sources into an RGB [`RasterImage`]
//! - Converting host buffers between channel orders at the boundary
//! - Scale-dependent resampling of derived images
//!
//! # Channel order
//!
//! Every `RasterImage` is stored in [`CANONICAL_CHANNEL_ORDER`] (RGB). The
//! decoders here and the encoders in [`crate::encode`] are the only places
//! where pixels cross into or out of that order.

mod reader;
mod resize;
mod types;

pub use reader::{decode_file, decode_image, get_orientation, Orientation};
pub use resize::{render_preview, resample, resize_pixels, scaled_dimensions};
pub use types::{
    ChannelOrder, LoadError, RasterImage, ResampleFilter, CANONICAL_CHANNEL_ORDER, CHANNELS,
};
pub(crate) use types::expected_len;
