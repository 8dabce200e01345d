// THEORY:
// This file is the main entry point for the `marker_vision` library crate.
// It defines the public API exposed to callers that own an RGBA frame (a decoded
// image, a captured canvas) and want two things back from it: the map of
// color-coded markers found in the frame, and the frame rewritten as a
// black/white mask.
//
// The high-level interface is `MarkerDetector` (synchronous, in place) and
// `ParallelMarkerDetector` (async, row bands on worker tasks). The scanning,
// clustering and binarizing building blocks live in `core_modules` and are
// public for callers that want to run a single pass on its own.

#![doc = include_str!("../README.md")]

pub mod core_modules;
pub mod error;
pub mod parallel_pipeline;
pub mod pipeline;

pub use crate::core_modules::binarizer::binarize;
pub use crate::core_modules::color_key::{ColorKey, ParseColorKeyError};
pub use crate::core_modules::marker::{Marker, MarkerMap, Point, RowSpan};
pub use crate::error::{DetectError, Result};
pub use crate::parallel_pipeline::{Detection, ParallelMarkerDetector};
pub use crate::pipeline::{
    DetectorConfig, MarkerDetector, MAX_CHANNEL_FOR_MARKER, MIN_SUPPORT, TOLERANCE_X,
    TOLERANCE_Y, detect_markers,
};
