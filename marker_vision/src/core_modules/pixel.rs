// THEORY (Single-Pixel Tests):
// The `Pixel` module is the most fundamental unit of the marker system. It is a
// "dumb" data container for a single RGBA pixel plus the two per-pixel tests the
// detector is built on. Both tests look at this pixel alone, never at neighbors.
//
// The two tests are deliberately different:
// - `is_dark`: every color channel is at or below the threshold. Zero channels
//   count as dark. This drives binarization.
// - `is_marker_eligible`: every color channel is inside `[1, threshold]`. A zero
//   channel disqualifies the pixel. This drives color clustering.
// A pixel like (0, 10, 10) is therefore dark (black after binarization) while
// never joining a color cluster. Keep the two tests separate.
//
// Alpha is carried along but never participates in either test.

pub mod pixel {
    use crate::core_modules::color_key::ColorKey;

    pub type Byte = u8;
    pub type Channel = Byte;

    /// Number of bytes per pixel in the frames this crate consumes (R, G, B, A).
    pub const CHANNELS: usize = 4;

    /// A "dumb" data container representing a single RGBA pixel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Pixel {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
        /// The alpha (transparency) channel value (0-255).
        pub alpha: Channel,
    }

    impl Pixel {
        pub fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
            Pixel {
                red,
                green,
                blue,
                alpha,
            }
        }

        /// True when no color channel exceeds `max_channel`.
        ///
        /// - Zero channels are dark like any other low value.
        /// - Used by the binarize pass.
        #[inline]
        pub fn is_dark(&self, max_channel: Channel) -> bool {
            self.red <= max_channel && self.green <= max_channel && self.blue <= max_channel
        }

        /// True when every color channel lies in `[1, max_channel]`.
        ///
        /// - Stricter than `is_dark`: a single zero channel excludes the pixel.
        /// - Used by the cluster scan.
        #[inline]
        pub fn is_marker_eligible(&self, max_channel: Channel) -> bool {
            self.red > 0 && self.green > 0 && self.blue > 0 && self.is_dark(max_channel)
        }

        /// Packs R, G, B into the 24-bit grouping key.
        #[inline]
        pub fn color_key(&self) -> ColorKey {
            ColorKey::from_rgb(self.red, self.green, self.blue)
        }
    }

    impl From<&[Byte]> for Pixel {
        fn from(bytes: &[Byte]) -> Self {
            if bytes.len() != CHANNELS {
                panic!("Cannot convert {} bytes into pixel.", bytes.len());
            }
            Pixel::new(bytes[0], bytes[1], bytes[2], bytes[3])
        }
    }

    impl From<Pixel> for [Byte; CHANNELS] {
        fn from(pixel: Pixel) -> Self {
            [pixel.red, pixel.green, pixel.blue, pixel.alpha]
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn zero_channel_is_dark_but_not_eligible() {
            let pixel = Pixel::new(0, 10, 10, 255);
            assert!(pixel.is_dark(50));
            assert!(!pixel.is_marker_eligible(50));
        }

        #[test]
        fn bright_channel_is_neither_dark_nor_eligible() {
            let pixel = Pixel::new(60, 10, 10, 255);
            assert!(!pixel.is_dark(50));
            assert!(!pixel.is_marker_eligible(50));
        }

        #[test]
        fn threshold_is_inclusive() {
            let pixel = Pixel::new(50, 1, 50, 0);
            assert!(pixel.is_dark(50));
            assert!(pixel.is_marker_eligible(50));
            assert!(!Pixel::new(51, 1, 1, 0).is_marker_eligible(50));
        }

        #[test]
        fn alpha_is_ignored() {
            assert!(Pixel::new(10, 10, 10, 0).is_marker_eligible(50));
            assert!(Pixel::new(10, 10, 10, 255).is_marker_eligible(50));
        }

        #[test]
        fn converts_from_rgba_bytes() {
            let bytes: &[u8] = &[10, 20, 30, 40];
            let pixel = Pixel::from(bytes);
            assert_eq!(pixel, Pixel::new(10, 20, 30, 40));
            assert_eq!(<[u8; 4]>::from(pixel), [10, 20, 30, 40]);
        }
    }
}
