use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use marker_vision::{DetectorConfig, Marker, MarkerDetector, ParallelMarkerDetector};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Detect color markers in an image and write its black/white mask.
#[derive(Debug, Parser)]
#[command(name = "marker_tester", version)]
struct Cli {
    /// Image to analyze (any format the `image` crate decodes).
    input: PathBuf,

    /// Where to write the binarized image; the format follows the extension.
    output: PathBuf,

    /// Write the marker index (JSON) to this path.
    #[arg(long)]
    index: Option<PathBuf>,

    /// JSON file with detector settings; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Highest channel value treated as dark.
    #[arg(long)]
    max_channel: Option<u8>,

    /// Pixels a color needs to count as a marker.
    #[arg(long)]
    min_support: Option<usize>,

    #[arg(long)]
    tolerance_x: Option<u32>,

    #[arg(long)]
    tolerance_y: Option<u32>,

    /// Scan and binarize row bands on worker tasks.
    #[arg(long)]
    parallel: bool,
}

/// One entry of the marker index file.
#[derive(Debug, Serialize)]
struct IndexEntry {
    cx: u32,
    cy: u32,
    support: usize,
    rects: Vec<[u32; 4]>,
}

impl From<&Marker> for IndexEntry {
    fn from(marker: &Marker) -> Self {
        Self {
            cx: marker.cx,
            cy: marker.cy,
            support: marker.support(),
            rects: marker.row_spans().iter().map(|span| span.as_rect()).collect(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // --- 1. Argument Parsing & Setup ---
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    info!("detector config: {:?}", config);

    // --- 2. Image Decoding ---
    let mut image = image::open(&cli.input)
        .with_context(|| format!("failed to open {}", cli.input.display()))?
        .to_rgba8();
    let (width, height) = image.dimensions();
    info!("loaded {} ({}x{})", cli.input.display(), width, height);

    // --- 3. Detection ---
    let markers = if cli.parallel {
        let detector = ParallelMarkerDetector::new(config);
        info!("running on {} workers", detector.workers());
        let detection = detector.detect(image.into_raw(), width, height).await?;
        image = image::RgbaImage::from_raw(width, height, detection.frame)
            .context("binarized frame has the wrong size")?;
        detection.markers
    } else {
        MarkerDetector::new(config).detect_in_image(&mut image)?
    };

    if markers.is_empty() {
        warn!("no markers found");
    }
    let mut colors: Vec<&String> = markers.keys().collect();
    colors.sort();
    for color in colors {
        let marker = &markers[color];
        info!("{} at ({}, {}) with {} pixels", color, marker.cx, marker.cy, marker.support());
    }

    // --- 4. Output ---
    image
        .save(&cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    info!("binarized image saved to {}", cli.output.display());

    if let Some(path) = &cli.index {
        let index: BTreeMap<&str, IndexEntry> = markers
            .iter()
            .map(|(color, marker)| (color.as_str(), IndexEntry::from(marker)))
            .collect();
        write_json(path, &index)?;
        info!("marker index with {} entries saved to {}", index.len(), path.display());
    }

    Ok(())
}

/// Config file first, then individual flags on top.
fn load_config(cli: &Cli) -> Result<DetectorConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid detector config in {}", path.display()))?
        }
        None => DetectorConfig::default(),
    };

    if let Some(value) = cli.max_channel {
        config.max_channel_for_marker = value;
    }
    if let Some(value) = cli.min_support {
        config.min_support = value;
    }
    if let Some(value) = cli.tolerance_x {
        config.tolerance_x = value;
    }
    if let Some(value) = cli.tolerance_y {
        config.tolerance_y = value;
    }
    Ok(config)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use marker_vision::{ColorKey, Point};

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from(["marker_tester", "in.png", "out.png", "--min-support", "3"]);
        let config = load_config(&cli).expect("no config file to read");
        assert_eq!(config.min_support, 3);
        assert_eq!(config.max_channel_for_marker, 50);
        assert!(!cli.parallel);
    }

    #[test]
    fn index_entry_lists_row_rects() {
        let marker = Marker {
            color: ColorKey::from_rgb(1, 1, 1),
            cx: 1,
            cy: 0,
            points: vec![
                Point { x: 0, y: 0 },
                Point { x: 1, y: 0 },
                Point { x: 2, y: 0 },
                Point { x: 0, y: 1 },
            ],
        };
        let entry = IndexEntry::from(&marker);
        assert_eq!(entry.support, 4);
        assert_eq!(entry.rects, vec![[0, 0, 3, 1], [0, 1, 1, 1]]);
    }
}
