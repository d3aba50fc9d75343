//! Image encoding for saving session buffers.
//!
//! This module provides functionality for:
//! - Encoding RGB rasters to PNG or JPEG bytes
//! - Choosing the output format from a destination path
//! - Writing encoded bytes to disk
//!
//! Buffers are always canonical RGB, which is what both codecs consume, so the
//! encoders pass pixels through unchanged.

mod format;

pub use format::{encode_image, encode_jpeg, encode_png, save_image, SaveError, SaveFormat};
