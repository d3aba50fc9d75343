//! Session state: the single owner of the loaded, cropped and resized buffers.
//!
//! The session never sees pointer devices or widgets. Display-space input
//! reaches it only as a [`SelectionRect`] plus the [`DisplayTransform`] it was
//! drawn against, and is converted through the transform engine.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::decode::{decode_file, decode_image, resize_pixels, LoadError, RasterImage};
use crate::encode::{encode_image, save_image, SaveError, SaveFormat};
use crate::selection::SelectionRect;
use crate::transform::{
    compute_display_transform_with_fallback, crop_pixels, display_to_image_coords,
    normalize_crop_region, CropRegion, DisplayTransform,
};

/// Resampling factor for the resized buffer, always within
/// [`ScaleFactor::MIN`]..=[`ScaleFactor::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    pub const MIN: f64 = 0.1;
    pub const MAX: f64 = 3.0;
    pub const IDENTITY: ScaleFactor = ScaleFactor(1.0);

    /// Clamp a value into range. Returns `None` for NaN or infinities.
    pub fn new(value: f64) -> Option<Self> {
        value
            .is_finite()
            .then(|| ScaleFactor(value.clamp(Self::MIN, Self::MAX)))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for ScaleFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}x", self.0)
    }
}

/// Names one of the session's three buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionSlot {
    Original,
    Cropped,
    Resized,
}

impl SessionSlot {
    pub const ALL: [SessionSlot; 3] = [
        SessionSlot::Original,
        SessionSlot::Cropped,
        SessionSlot::Resized,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SessionSlot::Original => "original",
            SessionSlot::Cropped => "cropped",
            SessionSlot::Resized => "resized",
        }
    }

    /// File name offered when saving this slot.
    pub fn default_file_name(self) -> &'static str {
        match self {
            SessionSlot::Original => "original_image.png",
            SessionSlot::Cropped => "cropped_image.png",
            SessionSlot::Resized => "resized_image.png",
        }
    }
}

impl fmt::Display for SessionSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loaded image plus the buffers derived from it.
///
/// `cropped` only exists while `original` does, and `resized` only while
/// `cropped` does.
#[derive(Debug, Default)]
pub struct Session {
    config: SessionConfig,
    original: Option<RasterImage>,
    cropped: Option<RasterImage>,
    resized: Option<RasterImage>,
    scale: ScaleFactor,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn original(&self) -> Option<&RasterImage> {
        self.original.as_ref()
    }

    pub fn cropped(&self) -> Option<&RasterImage> {
        self.cropped.as_ref()
    }

    pub fn resized(&self) -> Option<&RasterImage> {
        self.resized.as_ref()
    }

    pub fn image(&self, slot: SessionSlot) -> Option<&RasterImage> {
        match slot {
            SessionSlot::Original => self.original(),
            SessionSlot::Cropped => self.cropped(),
            SessionSlot::Resized => self.resized(),
        }
    }

    pub fn scale_factor(&self) -> ScaleFactor {
        self.scale
    }

    /// True when nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.original.is_none()
    }

    /// Decode encoded bytes and make them the new original.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the bytes are not a decodable image. The session
    /// is left exactly as it was.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), LoadError> {
        let image = decode_image(bytes).inspect_err(|e| warn!(error = %e, "Load failed"))?;
        self.replace_original(image);
        Ok(())
    }

    /// Read and decode a file and make it the new original.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the file is missing or not a decodable image.
    /// The session is left exactly as it was.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref();
        let image = decode_file(path)
            .inspect_err(|e| warn!(path = %path.display(), error = %e, "Load failed"))?;
        self.replace_original(image);
        Ok(())
    }

    /// Make an already-decoded raster the new original.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::EmptyImage` for a zero-area raster and
    /// `LoadError::InvalidPixelData` if the buffer disagrees with the
    /// dimensions.
    pub fn load_image(&mut self, image: RasterImage) -> Result<(), LoadError> {
        if image.is_empty() {
            let err = LoadError::EmptyImage {
                width: image.width,
                height: image.height,
            };
            warn!(error = %err, "Load failed");
            return Err(err);
        }
        image
            .validate()
            .inspect_err(|e| warn!(error = %e, "Load failed"))?;
        self.replace_original(image);
        Ok(())
    }

    fn replace_original(&mut self, image: RasterImage) {
        info!(width = image.width, height = image.height, "Image loaded");
        self.original = Some(image);
        self.cropped = None;
        self.resized = None;
        self.scale = ScaleFactor::IDENTITY;
    }

    /// Placement of a slot's image inside a viewport of the given size.
    ///
    /// Computed fresh on every call; `None` if the slot is empty.
    pub fn display_transform(
        &self,
        slot: SessionSlot,
        viewport_width: u32,
        viewport_height: u32,
    ) -> Option<DisplayTransform> {
        let image = self.image(slot)?;
        let transform = compute_display_transform_with_fallback(
            image.width,
            image.height,
            viewport_width,
            viewport_height,
            self.config.fallback_viewport,
        );
        debug!(
            %slot,
            scale = transform.scale,
            offset_x = transform.offset_x,
            offset_y = transform.offset_y,
            "Display transform computed"
        );
        Some(transform)
    }

    /// Crop the original to a selection drawn over its display.
    ///
    /// Returns the committed region, or `None` (leaving the session untouched)
    /// when nothing is loaded, when either display-space extent is at most
    /// `min_selection_extent`, or when the selection misses the image.
    ///
    /// On success `cropped` is replaced, the scale resets to 1.0 and
    /// `resized` becomes a copy of `cropped`.
    pub fn apply_selection(
        &mut self,
        rect: &SelectionRect,
        transform: &DisplayTransform,
    ) -> Option<CropRegion> {
        let original = self.original.as_ref()?;

        let (dx, dy) = rect.extent();
        let min = i64::from(self.config.min_selection_extent);
        if i64::from(dx) <= min || i64::from(dy) <= min {
            debug!(dx, dy, "Selection below minimum extent ignored");
            return None;
        }

        let start = display_to_image_coords(rect.start, transform);
        let end = display_to_image_coords(rect.end, transform);
        let region = normalize_crop_region(
            start.x,
            start.y,
            end.x,
            end.y,
            original.width,
            original.height,
        );
        if region.is_empty() {
            debug!(?region, "Selection outside image ignored");
            return None;
        }

        let cropped = crop_pixels(original, &region);
        info!(
            x1 = region.x1,
            y1 = region.y1,
            x2 = region.x2,
            y2 = region.y2,
            "Cropped to {}",
            cropped.dimension_label()
        );
        self.resized = Some(cropped.clone());
        self.cropped = Some(cropped);
        self.scale = ScaleFactor::IDENTITY;
        Some(region)
    }

    /// Set the resize factor and regenerate `resized` from `cropped`.
    ///
    /// The value is clamped into range; NaN and infinities are ignored. With
    /// no cropped image only the stored factor changes.
    pub fn set_scale_factor(&mut self, value: f64) {
        let Some(scale) = ScaleFactor::new(value) else {
            debug!(value, "Non-finite scale factor ignored");
            return;
        };
        self.scale = scale;

        if let Some(cropped) = &self.cropped {
            match resize_pixels(cropped, scale.get()) {
                Ok(resized) => {
                    debug!(%scale, "Resized to {}", resized.dimension_label());
                    self.resized = Some(resized);
                }
                Err(e) => warn!(%scale, error = %e, "Resize failed"),
            }
        }
    }

    /// Drop every buffer and restore the identity scale.
    pub fn reset(&mut self) {
        self.original = None;
        self.cropped = None;
        self.resized = None;
        self.scale = ScaleFactor::IDENTITY;
        info!("Session reset");
    }

    /// Encode a slot's image in memory.
    ///
    /// # Errors
    ///
    /// Returns `SaveError::MissingImage` if the slot is empty, or an encoder error.
    pub fn encode(&self, slot: SessionSlot, format: SaveFormat) -> Result<Vec<u8>, SaveError> {
        let image = self.image(slot).ok_or(SaveError::MissingImage(slot))?;
        encode_image(image, format, self.config.jpeg_quality)
    }

    /// Write a slot's image to `path`, choosing PNG or JPEG by extension.
    ///
    /// # Errors
    ///
    /// Returns `SaveError` if the slot is empty, the extension is unsupported,
    /// or the file cannot be written. The buffer itself is never modified.
    pub fn save(&self, slot: SessionSlot, path: impl AsRef<Path>) -> Result<(), SaveError> {
        let path = path.as_ref();
        let image = self.image(slot).ok_or(SaveError::MissingImage(slot))?;
        save_image(image, path, self.config.jpeg_quality)
            .inspect_err(|e| warn!(%slot, path = %path.display(), error = %e, "Save failed"))?;
        info!(%slot, path = %path.display(), "Image saved");
        Ok(())
    }

    /// One-line summary of the session for a status bar.
    pub fn status_text(&self) -> String {
        match (&self.original, &self.cropped, &self.resized) {
            (None, _, _) => "No image loaded".to_string(),
            (Some(original), None, _) => format!("Loaded {}", original.dimension_label()),
            (Some(_), Some(cropped), Some(resized)) if self.scale != ScaleFactor::IDENTITY => {
                format!(
                    "Cropped to {}, resized to {} (scale: {})",
                    cropped.dimension_label(),
                    resized.dimension_label(),
                    self.scale
                )
            }
            (Some(_), Some(cropped), _) => format!("Cropped to {}", cropped.dimension_label()),
        }
    }
}
