// THEORY:
// The parallel pipeline runs the same two passes as `MarkerDetector` across
// tokio blocking workers:
//
// 1.  The frame is split into horizontal row bands, one per worker.
// 2.  Each band is scanned on its own task; the per-color clusters are merged in
//     band order, so point order matches a sequential scan.
// 3.  The merged clusters are reduced on one task while the bands are binarized
//     on the others. Medians are only taken after the merge.
//
// The caller hands over an owned frame and gets it back binarized inside the
// `Detection`. Results are identical to the sequential detector.

use crate::core_modules::binarizer::binarize;
use crate::core_modules::frame::{FrameView, check_dimensions, row_bands};
use crate::core_modules::marker::MarkerMap;
use crate::core_modules::marker_detector::{ClusterMap, marker_detector};
use crate::core_modules::pixel::pixel::CHANNELS;
use crate::error::Result;
use crate::pipeline::DetectorConfig;
use futures::future::join_all;
use log::debug;
use std::sync::Arc;
use tokio::task::spawn_blocking;

/// Markers and binarized frame of one parallel detection.
#[derive(Debug, Clone)]
pub struct Detection {
    pub markers: MarkerMap,
    pub frame: Vec<u8>,
}

/// Async detector that spreads both passes over worker tasks.
#[derive(Debug, Clone)]
pub struct ParallelMarkerDetector {
    config: DetectorConfig,
    workers: usize,
}

impl ParallelMarkerDetector {
    /// One worker per logical CPU.
    pub fn new(config: DetectorConfig) -> Self {
        Self::with_workers(config, num_cpus::get())
    }

    pub fn with_workers(config: DetectorConfig, workers: usize) -> Self {
        Self {
            config,
            workers: workers.max(1),
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub async fn detect(&self, frame: Vec<u8>, width: u32, height: u32) -> Result<Detection> {
        check_dimensions(frame.len(), width, height)?;
        let bands = row_bands(height, self.workers);
        let max_channel = self.config.max_channel_for_marker;
        debug!("detecting on {}x{} frame in {} bands", width, height, bands.len());

        // --- Scan ---
        let shared = Arc::new(frame);
        let scans = bands.iter().cloned().map(|rows| {
            let shared = Arc::clone(&shared);
            spawn_blocking(move || -> Result<ClusterMap> {
                let view = FrameView::new(&shared, width, height)?;
                Ok(marker_detector::scan_clusters(&view.band(rows), max_channel))
            })
        });

        let mut clusters = ClusterMap::new();
        for band in join_all(scans).await {
            marker_detector::merge_clusters(&mut clusters, band??);
        }

        // --- Reduce and binarize ---
        let config = self.config.clone();
        let reduce = spawn_blocking(move || marker_detector::reduce_clusters(clusters, &config));

        let frame = Arc::try_unwrap(shared).unwrap_or_else(|shared| shared.as_ref().clone());
        let binarized = join_all(split_bands(frame, width, &bands).into_iter().map(|mut part| {
            spawn_blocking(move || {
                binarize(&mut part, max_channel);
                part
            })
        }))
        .await;

        let mut frame = Vec::with_capacity(width as usize * height as usize * CHANNELS);
        for part in binarized {
            frame.extend_from_slice(&part?);
        }

        Ok(Detection {
            markers: reduce.await?,
            frame,
        })
    }
}

/// Cuts an owned frame into one buffer per row band, in band order.
fn split_bands(mut frame: Vec<u8>, width: u32, bands: &[std::ops::Range<u32>]) -> Vec<Vec<u8>> {
    let row_bytes = width as usize * CHANNELS;
    let mut parts: Vec<Vec<u8>> = bands
        .iter()
        .rev()
        .map(|rows| frame.split_off(rows.start as usize * row_bytes))
        .collect();
    parts.reverse();
    parts
}
