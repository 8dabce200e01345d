// THEORY:
// The binarizer is the second pass: it rewrites a frame as a black/white mask.
// Every pixel whose color channels are all at or below the threshold becomes
// black (0, 0, 0), every other pixel white (255, 255, 255). Alpha is left as is.
// This uses `Pixel::is_dark`, not the clustering eligibility test, so pixels
// with a zero channel turn black here even though they never form markers.

use crate::core_modules::pixel::pixel::{CHANNELS, Pixel};

pub const BLACK: u8 = 0;
pub const WHITE: u8 = 255;

/// Binarizes RGBA bytes in place. Trailing bytes that do not form a whole
/// pixel are left untouched.
pub fn binarize(buffer: &mut [u8], max_channel: u8) {
    for bytes in buffer.chunks_exact_mut(CHANNELS) {
        let value = if Pixel::from(&*bytes).is_dark(max_channel) {
            BLACK
        } else {
            WHITE
        };
        bytes[..3].fill(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_pixels_turn_black_and_others_white() {
        let mut buffer = vec![
            10, 10, 10, 255, // eligible marker color
            0, 10, 10, 7, // zero channel, still dark
            60, 10, 10, 128, // one bright channel
            50, 50, 50, 0, // exactly on the threshold
        ];
        binarize(&mut buffer, 50);
        assert_eq!(
            buffer,
            vec![0, 0, 0, 255, 0, 0, 0, 7, 255, 255, 255, 128, 0, 0, 0, 0]
        );
    }

    #[test]
    fn binarize_is_idempotent() {
        let mut buffer: Vec<u8> = (0..=255u8).flat_map(|v| [v, v / 2, 255 - v, v]).collect();
        binarize(&mut buffer, 50);
        let once = buffer.clone();
        binarize(&mut buffer, 50);
        assert_eq!(buffer, once);
        assert!(buffer
            .chunks_exact(4)
            .all(|p| p[..3].iter().all(|&c| c == BLACK || c == WHITE)));
    }

    #[test]
    fn alpha_is_preserved() {
        let mut buffer: Vec<u8> = (0..64u8).flat_map(|a| [a * 4, 0, 0, a]).collect();
        binarize(&mut buffer, 50);
        let alphas: Vec<u8> = buffer.chunks_exact(4).map(|p| p[3]).collect();
        assert_eq!(alphas, (0..64u8).collect::<Vec<_>>());
    }
}
