//! Framecut WASM - WebAssembly bindings for Framecut
//!
//! This crate exposes framecut-core to a browser UI. The UI owns the canvas
//! and pointer events; everything from coordinate mapping to encoding happens
//! here.
//!
//! # Module Structure
//!
//! - `session` - `JsSession`, the stateful load / select / resize / save handle
//! - `transform` - Stateless display mapping, crop and resize functions
//! - `types` - WASM-compatible wrapper types for image data
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsSession } from '@framecut/wasm';
//!
//! await init();
//!
//! const session = new JsSession();
//! session.load(new Uint8Array(await file.arrayBuffer()));
//! console.log(session.status_text);
//! ```

use wasm_bindgen::prelude::*;

mod session;
mod transform;
mod types;

pub use session::{JsSession, Overlay};
pub use transform::{compute_display_transform, crop_display_rect, resize_image};
pub use types::JsRasterImage;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
