//! WASM bindings for the interactive session.
//!
//! `JsSession` pairs a core `Session` with a `SelectionTracker` and the
//! transform last used to draw the original, so the UI can forward raw pointer
//! events without doing any coordinate math itself.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const session = new JsSession();
//! session.load(new Uint8Array(await file.arrayBuffer()));
//!
//! const t = session.layout(canvas.width, canvas.height);
//! const preview = session.preview(0, canvas.width, canvas.height);
//! ctx.putImageData(new ImageData(preview.rgba_pixels(), preview.width), t.offset_x, t.offset_y);
//!
//! canvas.onpointerdown = (e) => session.pointer_down(e.offsetX, e.offsetY);
//! canvas.onpointermove = (e) => drawOverlay(session.pointer_move(e.offsetX, e.offsetY));
//! canvas.onpointerup = (e) => {
//!   if (session.pointer_up(e.offsetX, e.offsetY)) redrawCrop(session.cropped());
//! };
//! slider.oninput = () => session.set_scale_factor(slider.valueAsNumber);
//! ```

use framecut_core::{
    render_preview, DisplayPoint, DisplayTransform, RasterImage, SelectionRect,
    SelectionTracker, Session, SessionConfig, SessionSlot,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::types::{channel_order, save_format, slot_from_u8, JsRasterImage};

/// Rectangle for the UI to draw while dragging, in display pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Overlay {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl From<SelectionRect> for Overlay {
    fn from(rect: SelectionRect) -> Self {
        let (min, max) = rect.bounds();
        Self {
            left: min.x,
            top: min.y,
            width: max.x.abs_diff(min.x),
            height: max.y.abs_diff(min.y),
        }
    }
}

/// Session handle exported to JavaScript.
#[wasm_bindgen]
pub struct JsSession {
    session: Session,
    tracker: SelectionTracker,
    transform: Option<DisplayTransform>,
}

impl Default for JsSession {
    fn default() -> Self {
        Self::with_config(SessionConfig::default())
    }
}

#[wasm_bindgen]
impl JsSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsSession {
        JsSession::default()
    }

    /// Create a session from a (possibly partial) config object, e.g.
    /// `{ min_selection_extent: 10, jpeg_quality: 95 }`.
    pub fn with_js_config(config: JsValue) -> Result<JsSession, JsValue> {
        let config: SessionConfig = if config.is_undefined() || config.is_null() {
            SessionConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(JsSession::with_config(config))
    }

    /// Decode PNG/JPEG/BMP/TIFF bytes as the new original.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.session
            .load_bytes(bytes)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.clear_interaction();
        Ok(())
    }

    /// Load a raw 3-channel buffer, in BGR order when `bgr` is set.
    pub fn load_pixels(
        &mut self,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
        bgr: bool,
    ) -> Result<(), JsValue> {
        let raster = RasterImage::from_channels(width, height, pixels, channel_order(bgr))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.session
            .load_image(raster)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.clear_interaction();
        Ok(())
    }

    /// Place the original in a viewport and remember the placement for pointer
    /// mapping. Returns `{ scale, offset_x, offset_y, canvas_width, canvas_height }`,
    /// or `undefined` when nothing is loaded.
    pub fn layout(&mut self, viewport_width: u32, viewport_height: u32) -> Result<JsValue, JsValue> {
        self.transform = self.original_transform(viewport_width, viewport_height);
        match &self.transform {
            Some(t) => Ok(serde_wasm_bindgen::to_value(t)?),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Scaled-to-fit copy of a slot for drawing in a viewport.
    pub fn preview(
        &self,
        slot: u8,
        viewport_width: u32,
        viewport_height: u32,
    ) -> Option<JsRasterImage> {
        let slot = slot_from_u8(slot)?;
        let image = self.session.image(slot)?;
        let transform = self
            .session
            .display_transform(slot, viewport_width, viewport_height)?;
        let preview = render_preview(image, &transform).ok()?;
        Some(JsRasterImage::from_raster(&preview))
    }

    pub fn pointer_down(&mut self, x: i32, y: i32) {
        self.tracker.press(DisplayPoint::new(x, y));
    }

    /// Returns the overlay rectangle to draw, or `undefined` when not dragging.
    pub fn pointer_move(&mut self, x: i32, y: i32) -> Result<JsValue, JsValue> {
        match self.tracker.drag(DisplayPoint::new(x, y)) {
            Some(rect) => Ok(serde_wasm_bindgen::to_value(&Overlay::from(rect))?),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Finish a drag. Returns `true` if it produced a new crop; small or
    /// off-image drags are ignored and return `false`.
    pub fn pointer_up(&mut self, x: i32, y: i32) -> bool {
        let Some(rect) = self.tracker.release(DisplayPoint::new(x, y)) else {
            return false;
        };
        let Some(transform) = self.transform else {
            return false;
        };
        self.session.apply_selection(&rect, &transform).is_some()
    }

    /// Abandon the drag in progress.
    pub fn clear_selection(&mut self) {
        self.tracker.cancel();
    }

    pub fn set_scale_factor(&mut self, value: f64) {
        self.session.set_scale_factor(value);
    }

    #[wasm_bindgen(getter)]
    pub fn scale_factor(&self) -> f64 {
        self.session.scale_factor().get()
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.clear_interaction();
    }

    pub fn original(&self) -> Option<JsRasterImage> {
        self.session.original().map(JsRasterImage::from_raster)
    }

    pub fn cropped(&self) -> Option<JsRasterImage> {
        self.session.cropped().map(JsRasterImage::from_raster)
    }

    pub fn resized(&self) -> Option<JsRasterImage> {
        self.session.resized().map(JsRasterImage::from_raster)
    }

    /// Encode a slot (0 = original, 1 = cropped, 2 = resized) as PNG, or JPEG
    /// when `jpeg` is set, for the UI to write to disk.
    pub fn encode(&self, slot: u8, jpeg: bool) -> Result<Vec<u8>, JsValue> {
        let slot = slot_from_u8(slot).ok_or_else(|| JsValue::from_str("Unknown image slot"))?;
        self.session
            .encode(slot, save_format(jpeg))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Suggested file name for saving a slot.
    pub fn default_file_name(&self, slot: u8) -> Option<String> {
        slot_from_u8(slot).map(|s| s.default_file_name().to_string())
    }

    #[wasm_bindgen(getter)]
    pub fn status_text(&self) -> String {
        self.session.status_text()
    }
}

impl JsSession {
    pub(crate) fn with_config(config: SessionConfig) -> Self {
        Self {
            session: Session::with_config(config),
            tracker: SelectionTracker::new(),
            transform: None,
        }
    }

    fn original_transform(&self, width: u32, height: u32) -> Option<DisplayTransform> {
        self.session
            .display_transform(SessionSlot::Original, width, height)
    }

    fn clear_interaction(&mut self) {
        self.tracker.cancel();
        self.transform = None;
    }
}
