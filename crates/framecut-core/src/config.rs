//! Session tuning knobs.

use serde::{Deserialize, Serialize};

use crate::transform::FALLBACK_VIEWPORT;

/// Settings for a [`crate::Session`].
///
/// Every field has a default, so hosts may pass a partial object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// A drag must exceed this many display pixels on both axes to crop.
    pub min_selection_extent: i32,
    /// JPEG quality used when saving (1-100).
    pub jpeg_quality: u8,
    /// Viewport used while the host reports a size of 1px or less.
    pub fallback_viewport: (u32, u32),
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_selection_extent: 10,
            jpeg_quality: 95,
            fallback_viewport: FALLBACK_VIEWPORT,
        }
    }
}
