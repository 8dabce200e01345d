// THEORY:
// The `pipeline` module is the top-level API of the marker engine. It wraps the
// two passes over a caller-owned RGBA frame into one call:
//
// - Stage 0: dimension check. A buffer that is not `width * height * 4` bytes is
//   rejected before anything is read or written.
// - Stage 1: cluster scan + reduce (read only), producing the `MarkerMap`.
// - Stage 2: binarize in place.
//
// The stages stay separate on purpose: they classify pixels with different
// tests, and the scan must observe the original colors before stage 2 rewrites
// them.

use crate::core_modules::binarizer::binarize;
use crate::core_modules::frame::FrameView;
use crate::core_modules::marker::MarkerMap;
use crate::core_modules::marker_detector::marker_detector;
use crate::error::Result;
use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// A channel at or below this value is dark.
pub const MAX_CHANNEL_FOR_MARKER: u8 = 50;
/// Minimum pixel count for a color, checked before and after spatial filtering.
pub const MIN_SUPPORT: usize = 40;
/// Half-width of the acceptance window around a centroid.
pub const TOLERANCE_X: u32 = 30_000;
/// Half-height of the acceptance window around a centroid.
pub const TOLERANCE_Y: u32 = 300_000;

/// Tunables for marker detection. `Default` gives the standard constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Highest channel value still considered dark.
    pub max_channel_for_marker: u8,
    /// Pixels a color needs to become a marker.
    pub min_support: usize,
    /// Largest accepted |x - cx| for a marker point.
    pub tolerance_x: u32,
    /// Largest accepted |y - cy| for a marker point.
    pub tolerance_y: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_channel_for_marker: MAX_CHANNEL_FOR_MARKER,
            min_support: MIN_SUPPORT,
            tolerance_x: TOLERANCE_X,
            tolerance_y: TOLERANCE_Y,
        }
    }
}

/// Synchronous, in-place marker detector.
#[derive(Debug, Clone, Default)]
pub struct MarkerDetector {
    config: DetectorConfig,
}

impl MarkerDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Finds the markers in `buffer` and then binarizes it in place.
    ///
    /// Fails with `InvalidDimensions` when `buffer.len() != width * height * 4`;
    /// the buffer is not modified in that case.
    pub fn detect_markers(&self, buffer: &mut [u8], width: u32, height: u32) -> Result<MarkerMap> {
        let markers = {
            let frame = FrameView::new(buffer, width, height)?;
            marker_detector::find_markers(&frame, &self.config)
        };
        binarize(buffer, self.config.max_channel_for_marker);
        Ok(markers)
    }

    /// Runs `detect_markers` on a decoded image, binarizing it in place.
    pub fn detect_in_image(&self, image: &mut RgbaImage) -> Result<MarkerMap> {
        let (width, height) = image.dimensions();
        self.detect_markers(image, width, height)
    }
}

/// Detects markers with the default configuration.
pub fn detect_markers(buffer: &mut [u8], width: u32, height: u32) -> Result<MarkerMap> {
    MarkerDetector::default().detect_markers(buffer, width, height)
}
