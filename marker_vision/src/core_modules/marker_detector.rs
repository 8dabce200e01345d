// THEORY:
// The marker detector is the engine of the clustering side of the system. It
// turns a frame into a set of `Marker`s in two stateless steps:
//
// 1.  **Scan**: walk the frame in row-major order and append every
//     marker-eligible pixel (all channels in `[1, max_channel]`) to the cluster
//     of its exact color. Colors are keyed by their packed 24-bit value.
// 2.  **Reduce**: hand each cluster to `ColorCluster::into_marker`, which applies
//     the support, centroid and tolerance rules, and collect the survivors under
//     their `#RRGGBB` key.
//
// The scan only reads the frame. Binarization is a separate pass that runs after
// the scan and uses a different per-pixel test (see `pixel`), so the two passes
// must never be fused.
//
// Scanning accepts any band of rows. Clusters from several bands are merged in
// band order before reduction, which gives the same result as one full scan.

use crate::core_modules::color_cluster::ColorCluster;
use crate::core_modules::color_key::ColorKey;
use crate::core_modules::frame::FrameView;
use crate::core_modules::marker::MarkerMap;
use crate::pipeline::DetectorConfig;
use std::collections::HashMap;

/// Per-color clusters built by a scan.
pub type ClusterMap = HashMap<ColorKey, ColorCluster>;

pub mod marker_detector {
    use super::*; // Make types from the parent module available.
    use log::debug;

    /// Groups the eligible pixels of `frame` by color.
    pub fn scan_clusters(frame: &FrameView<'_>, max_channel: u8) -> ClusterMap {
        let mut clusters = ClusterMap::new();
        for (point, pixel) in frame.pixels() {
            if !pixel.is_marker_eligible(max_channel) {
                continue;
            }
            clusters.entry(pixel.color_key()).or_default().push(point);
        }
        clusters
    }

    /// Folds band clusters into `into`. Call in band (row) order.
    pub fn merge_clusters(into: &mut ClusterMap, band: ClusterMap) {
        for (color, cluster) in band {
            match into.get_mut(&color) {
                Some(existing) => existing.merge(cluster),
                None => {
                    into.insert(color, cluster);
                }
            }
        }
    }

    /// Turns clusters into markers, dropping colors that fail the support or
    /// tolerance rules.
    pub fn reduce_clusters(clusters: ClusterMap, config: &DetectorConfig) -> MarkerMap {
        let candidates = clusters.len();
        let eligible: usize = clusters.values().map(ColorCluster::len).sum();

        let markers: MarkerMap = clusters
            .into_iter()
            .filter_map(|(color, cluster)| cluster.into_marker(color, config))
            .map(|marker| (marker.color.to_hex(), marker))
            .collect();

        debug!(
            "{} eligible pixels in {} colors, {} markers",
            eligible,
            candidates,
            markers.len()
        );
        markers
    }

    /// Scan followed by reduce over a whole frame.
    pub fn find_markers(frame: &FrameView<'_>, config: &DetectorConfig) -> MarkerMap {
        reduce_clusters(scan_clusters(frame, config.max_channel_for_marker), config)
    }
}

#[cfg(test)]
mod tests {
    use super::marker_detector::*;
    use super::*;
    use crate::core_modules::marker::Point;

    fn frame_bytes(width: u32, height: u32, paint: impl Fn(u32, u32) -> [u8; 4]) -> Vec<u8> {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&paint(x, y));
            }
        }
        data
    }

    #[test]
    fn scan_skips_ineligible_pixels() {
        let data = frame_bytes(4, 1, |x, _| match x {
            0 => [10, 10, 10, 255],
            1 => [0, 10, 10, 255],
            2 => [60, 10, 10, 255],
            _ => [10, 10, 10, 0],
        });
        let view = FrameView::new(&data, 4, 1).expect("valid frame");
        let clusters = scan_clusters(&view, 50);

        assert_eq!(clusters.len(), 1);
        let cluster = &clusters[&ColorKey::from_rgb(10, 10, 10)];
        assert_eq!(cluster.points(), &[Point { x: 0, y: 0 }, Point { x: 3, y: 0 }]);
    }

    #[test]
    fn banded_scan_matches_full_scan() {
        let data = frame_bytes(7, 9, |x, y| {
            if (x + y) % 3 == 0 {
                [10, 20, 30, 255]
            } else if x % 2 == 0 {
                [40, 40, 1, 255]
            } else {
                [200, 200, 200, 255]
            }
        });
        let view = FrameView::new(&data, 7, 9).expect("valid frame");
        let full = scan_clusters(&view, 50);

        let mut merged = ClusterMap::new();
        for rows in [0..2, 2..5, 5..9] {
            merge_clusters(&mut merged, scan_clusters(&view.band(rows), 50));
        }
        assert_eq!(merged, full);
    }

    #[test]
    fn reduce_keys_markers_by_hex() {
        let data = frame_bytes(10, 1, |_, _| [10, 20, 30, 255]);
        let view = FrameView::new(&data, 10, 1).expect("valid frame");
        let config = DetectorConfig {
            min_support: 10,
            ..DetectorConfig::default()
        };
        let markers = find_markers(&view, &config);

        assert_eq!(markers.len(), 1);
        let marker = &markers["#0A141E"];
        assert_eq!(marker.color, ColorKey::from_rgb(10, 20, 30));
        assert_eq!((marker.cx, marker.cy), (5, 0));
    }
}
