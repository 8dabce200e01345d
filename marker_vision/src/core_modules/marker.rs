// THEORY:
// The `Marker` module holds the durable output of the detector. A `Marker` is a
// colored region of the frame summarized by its color, its centroid, and the
// pixels that support it. Like the other data containers in this crate it is
// "dumb": it is built once by the detector and never mutated afterwards.
//
// Key properties:
// 1.  **Coordinate-wise centroid**: `cx` and `cy` are medians taken over the full
//     color cluster, each axis sorted on its own. The centroid need not be one of
//     the marker's own points.
// 2.  **Tolerance invariant**: every point of a marker lies inside the detector's
//     rectangular tolerance window around `(cx, cy)`.
// 3.  **Scan order**: `points` keep the row-major order in which the frame was
//     scanned, which is what `row_spans` relies on to compress them.

use crate::core_modules::color_key::ColorKey;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Detected markers keyed by their `#RRGGBB` color.
pub type MarkerMap = HashMap<String, Marker>;

/// An integer pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

/// A horizontal run of marker pixels, one row tall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSpan {
    pub x: u32,
    pub y: u32,
    pub width: u32,
}

impl RowSpan {
    /// The `[x, y, width, height]` rectangle form used by marker index files.
    pub fn as_rect(&self) -> [u32; 4] {
        [self.x, self.y, self.width, 1]
    }
}

/// A single detected marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// The color shared by every pixel of this marker.
    pub color: ColorKey,
    /// Median x of the full color cluster.
    pub cx: u32,
    /// Median y of the full color cluster.
    pub cy: u32,
    /// The cluster's points that survived the tolerance filter, in scan order.
    pub points: Vec<Point>,
}

impl Marker {
    pub fn centroid(&self) -> Point {
        Point {
            x: self.cx,
            y: self.cy,
        }
    }

    /// Number of pixels supporting this marker.
    pub fn support(&self) -> usize {
        self.points.len()
    }

    /// Top-left and bottom-right corners enclosing all points, or `None` for a
    /// marker without points.
    pub fn bounding_box(&self) -> Option<(Point, Point)> {
        let first = self.points.first()?;
        let (mut min, mut max) = (*first, *first);
        for p in &self.points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some((min, max))
    }

    /// Compresses the points into horizontal runs.
    ///
    /// A run ends when the row changes or the next point is not directly to the
    /// right of the previous one.
    pub fn row_spans(&self) -> Vec<RowSpan> {
        let mut spans: Vec<RowSpan> = Vec::new();
        for p in &self.points {
            match spans.last_mut() {
                Some(span) if span.y == p.y && span.x + span.width == p.x => span.width += 1,
                _ => spans.push(RowSpan {
                    x: p.x,
                    y: p.y,
                    width: 1,
                }),
            }
        }
        spans
    }
}
