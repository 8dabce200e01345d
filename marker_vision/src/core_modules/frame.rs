// THEORY:
// The `frame` module is the bridge between a caller's flat RGBA byte buffer and
// the pixel-level passes. It owns the only place where the buffer length is
// checked against the declared dimensions, so every pass downstream can index
// without re-validating.
//
// A `FrameView` can also describe a horizontal band of rows. Bands keep the
// absolute row index of their first row, which lets the parallel detector scan
// bands independently and still report image coordinates.

use crate::core_modules::marker::Point;
use crate::core_modules::pixel::pixel::{CHANNELS, Pixel};
use crate::error::{DetectError, Result};
use std::ops::Range;

/// Number of bytes a `width` x `height` RGBA frame occupies, or `None` when a
/// dimension is zero or the product overflows.
pub fn expected_len(width: u32, height: u32) -> Option<usize> {
    if width == 0 || height == 0 {
        return None;
    }
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(CHANNELS)
}

/// Rejects a buffer that is not exactly `width * height * 4` bytes long.
pub fn check_dimensions(len: usize, width: u32, height: u32) -> Result<()> {
    match expected_len(width, height) {
        Some(expected) if expected == len => Ok(()),
        _ => Err(DetectError::InvalidDimensions { width, height, len }),
    }
}

/// Splits `height` rows into at most `bands` contiguous, non-empty ranges.
pub fn row_bands(height: u32, bands: usize) -> Vec<Range<u32>> {
    let bands = bands.clamp(1, height.max(1) as usize) as u32;
    let base = height / bands;
    let extra = height % bands;

    let mut ranges = Vec::with_capacity(bands as usize);
    let mut start = 0;
    for i in 0..bands {
        let rows = base + u32::from(i < extra);
        if rows == 0 {
            continue;
        }
        ranges.push(start..start + rows);
        start += rows;
    }
    ranges
}

/// A read-only, dimension-checked view over RGBA bytes.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    width: u32,
    first_row: u32,
    rows: u32,
    data: &'a [u8],
}

impl<'a> FrameView<'a> {
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Result<Self> {
        check_dimensions(data.len(), width, height)?;
        Ok(Self {
            width,
            first_row: 0,
            rows: height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows covered by this view.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Absolute row index of the first row in this view.
    pub fn first_row(&self) -> u32 {
        self.first_row
    }

    /// Narrows the view to `rows`, given relative to this view. The range is
    /// clamped to the rows available.
    pub fn band(&self, rows: Range<u32>) -> FrameView<'a> {
        let end = rows.end.min(self.rows);
        let start = rows.start.min(end);
        let row_bytes = self.width as usize * CHANNELS;
        FrameView {
            width: self.width,
            first_row: self.first_row + start,
            rows: end - start,
            data: &self.data[start as usize * row_bytes..end as usize * row_bytes],
        }
    }

    /// Every pixel in row-major order with its absolute image coordinate.
    pub fn pixels(self) -> impl Iterator<Item = (Point, Pixel)> + 'a {
        let width = self.width as usize;
        let first_row = self.first_row;
        self.data
            .chunks_exact(CHANNELS)
            .enumerate()
            .map(move |(i, bytes)| {
                let point = Point {
                    x: (i % width) as u32,
                    y: first_row + (i / width) as u32,
                };
                (point, Pixel::from(bytes))
            })
    }
}
