// THEORY:
// A `ColorCluster` is the transient grouping built during the scan pass: every
// eligible pixel of one exact color, kept as three parallel lists (all x values,
// all y values, all points). It exists only inside a single detection call and
// is consumed when the reduce step decides whether it becomes a `Marker`.
//
// The reduce step, in order:
// 1.  Support check on the full cluster.
// 2.  Centroid: index `len / 2` of the x list and of the y list, each ordered on
//     its own. Selection (`select_nth_unstable`) yields the same element as a
//     full sort.
// 3.  Tolerance filter of the original point list around the centroid.
// 4.  Support check on the filtered points.
//
// The centroid is always taken from the full cluster, never recomputed from the
// filtered subset.

use crate::core_modules::color_key::ColorKey;
use crate::core_modules::marker::{Marker, Point};
use crate::pipeline::DetectorConfig;
use log::trace;

/// All pixels of one color seen by a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorCluster {
    xs: Vec<u32>,
    ys: Vec<u32>,
    points: Vec<Point>,
}

impl ColorCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: Point) {
        self.xs.push(point.x);
        self.ys.push(point.y);
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Appends another cluster of the same color. Merging bands in row order
    /// reproduces the point order of a single full-frame scan.
    pub fn merge(&mut self, other: ColorCluster) {
        self.xs.extend(other.xs);
        self.ys.extend(other.ys);
        self.points.extend(other.points);
    }

    /// Coordinate-wise median at index `len / 2`, or `None` when empty.
    ///
    /// Reorders the internal coordinate lists; the point list is untouched.
    pub fn median_center(&mut self) -> Option<Point> {
        if self.is_empty() {
            return None;
        }
        let mid = self.len() / 2;
        let (_, x, _) = self.xs.select_nth_unstable(mid);
        let x = *x;
        let (_, y, _) = self.ys.select_nth_unstable(mid);
        Some(Point { x, y: *y })
    }

    /// Runs the support, centroid and tolerance rules, producing a `Marker`
    /// when the cluster qualifies.
    pub fn into_marker(mut self, color: ColorKey, config: &DetectorConfig) -> Option<Marker> {
        if self.len() < config.min_support {
            trace!("{color}: {} pixels, below support {}", self.len(), config.min_support);
            return None;
        }

        let center = self.median_center()?;
        let points: Vec<Point> = self
            .points
            .into_iter()
            .filter(|p| {
                p.x.abs_diff(center.x) <= config.tolerance_x
                    && p.y.abs_diff(center.y) <= config.tolerance_y
            })
            .collect();

        if points.len() < config.min_support {
            trace!(
                "{color}: {} pixels inside tolerance of ({}, {}), below support {}",
                points.len(),
                center.x,
                center.y,
                config.min_support
            );
            return None;
        }

        Some(Marker {
            color,
            cx: center.x,
            cy: center.y,
            points,
        })
    }
}
