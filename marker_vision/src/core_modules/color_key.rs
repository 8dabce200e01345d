// THEORY:
// Pixels are grouped by their exact color. The `ColorKey` packs R, G, B into one
// 24-bit value for hashing, and renders as the uppercase `#RRGGBB` string that
// keys the marker map. The same string form is used for serde.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A pixel's R, G, B packed as `R * 65536 + G * 256 + B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorKey(u32);

impl ColorKey {
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        ColorKey(((red as u32) << 16) | ((green as u32) << 8) | blue as u32)
    }

    pub const fn packed(self) -> u32 {
        self.0
    }

    pub const fn rgb(self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }

    /// Uppercase, zero padded `#RRGGBB`.
    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.rgb();
        write!(f, "#{:02X}{:02X}{:02X}", r, g, b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color key {0:?}, expected #RRGGBB")]
pub struct ParseColorKeyError(String);

impl FromStr for ColorKey {
    type Err = ParseColorKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| ParseColorKeyError(s.to_string()))?;
        u32::from_str_radix(digits, 16)
            .map(ColorKey)
            .map_err(|_| ParseColorKeyError(s.to_string()))
    }
}

impl Serialize for ColorKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ColorKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
