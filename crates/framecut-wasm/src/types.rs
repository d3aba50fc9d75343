//! WASM-compatible wrapper types for image data.
//!
//! These types wrap the core Framecut types and handle conversion between
//! Rust and JavaScript data representations.

use framecut_core::{ChannelOrder, LoadError, RasterImage, SaveFormat, SessionSlot};
use wasm_bindgen::prelude::*;

/// A raster image handed to JavaScript.
///
/// # Memory Management
///
/// The pixel data lives in WASM memory. `pixels()` and `rgba_pixels()` copy it
/// out to JavaScript. Call `free()` to release a large image early; otherwise
/// wasm-bindgen's finalizer cleans up.
///
/// The constructor accepts any buffer; its length is checked when the image is
/// used.
#[wasm_bindgen]
pub struct JsRasterImage {
    inner: RasterImage,
}

#[wasm_bindgen]
impl JsRasterImage {
    /// Create a new JsRasterImage from dimensions and RGB pixel data.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRasterImage {
        JsRasterImage {
            inner: RasterImage::new(width, height, pixels),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Status text such as `"640x480 pixels"`.
    #[wasm_bindgen(getter)]
    pub fn label(&self) -> String {
        self.inner.dimension_label()
    }

    /// Returns RGB pixel data (3 bytes per pixel) as a Uint8Array copy.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Returns opaque RGBA pixels ready for `new ImageData(data, width, height)`.
    pub fn rgba_pixels(&self) -> Result<js_sys::Uint8ClampedArray, JsValue> {
        let raster = self
            .to_raster()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(js_sys::Uint8ClampedArray::from(raster.to_rgba().as_slice()))
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsRasterImage {
    pub(crate) fn from_raster(img: &RasterImage) -> Self {
        Self { inner: img.clone() }
    }

    /// The wrapped raster, once its buffer is known to match its dimensions.
    pub(crate) fn to_raster(&self) -> Result<&RasterImage, LoadError> {
        if self.inner.is_empty() {
            return Err(LoadError::EmptyImage {
                width: self.inner.width,
                height: self.inner.height,
            });
        }
        self.inner.validate()?;
        Ok(&self.inner)
    }
}

/// Convert a u8 slot value from JavaScript.
///
/// Values: 0 = original, 1 = cropped, 2 = resized. Anything else is `None`.
pub(crate) fn slot_from_u8(value: u8) -> Option<SessionSlot> {
    match value {
        0 => Some(SessionSlot::Original),
        1 => Some(SessionSlot::Cropped),
        2 => Some(SessionSlot::Resized),
        _ => None,
    }
}

/// Channel order of a host buffer: `true` for BGR, `false` for RGB.
pub(crate) fn channel_order(bgr: bool) -> ChannelOrder {
    if bgr {
        ChannelOrder::Bgr
    } else {
        ChannelOrder::Rgb
    }
}

/// Output format from a JavaScript flag: `true` for JPEG, `false` for PNG.
pub(crate) fn save_format(jpeg: bool) -> SaveFormat {
    if jpeg {
        SaveFormat::Jpeg
    } else {
        SaveFormat::Png
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_raster_image_creation() {
        let img = JsRasterImage::new(100, 50, vec![0u8; 100 * 50 * 3]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.label(), "100x50 pixels");
    }

    #[test]
    fn test_raster_roundtrip() {
        let raster = RasterImage::new(2, 1, vec![255, 128, 64, 32, 16, 8]);
        let js = JsRasterImage::from_raster(&raster);
        assert_eq!(js.pixels(), raster.pixels);
        assert_eq!(js.to_raster().unwrap(), &raster);
    }

    #[test]
    fn test_to_raster_rejects_bad_buffers() {
        let short = JsRasterImage::new(10, 10, vec![0u8; 3]);
        assert!(matches!(
            short.to_raster(),
            Err(LoadError::InvalidPixelData {
                expected: 300,
                actual: 3
            })
        ));

        let empty = JsRasterImage::new(0, 4, vec![]);
        assert!(matches!(
            empty.to_raster(),
            Err(LoadError::EmptyImage { .. })
        ));
    }

    #[test]
    fn test_slot_from_u8() {
        assert_eq!(slot_from_u8(0), Some(SessionSlot::Original));
        assert_eq!(slot_from_u8(1), Some(SessionSlot::Cropped));
        assert_eq!(slot_from_u8(2), Some(SessionSlot::Resized));
        assert_eq!(slot_from_u8(3), None);
    }

    #[test]
    fn test_flag_conversions() {
        assert_eq!(channel_order(true), ChannelOrder::Bgr);
        assert_eq!(channel_order(false), ChannelOrder::Rgb);
        assert_eq!(save_format(true), SaveFormat::Jpeg);
        assert_eq!(save_format(false), SaveFormat::Png);
    }
}
