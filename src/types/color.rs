//! Display colors and contrasting text colors

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 24-bit color, written as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Relative luminance on normalized channels (0.0..=1.0)
    pub fn luminance(self) -> f64 {
        0.2126 * (self.r as f64 / 255.0)
            + 0.7152 * (self.g as f64 / 255.0)
            + 0.0722 * (self.b as f64 / 255.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid hex color {0:?} (expected #RRGGBB)")]
pub struct ColorParseError(pub String);

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let hex = raw.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError(raw.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ColorParseError(raw.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Cell styling: background plus a contrasting text color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPair {
    pub background: Rgb,
    pub foreground: Rgb,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!("#AEC6CF".parse::<Rgb>().unwrap(), Rgb::new(0xAE, 0xC6, 0xCF));
        assert_eq!("ff6b6b".parse::<Rgb>().unwrap(), Rgb::new(0xFF, 0x6B, 0x6B));
        assert!("#fff".parse::<Rgb>().is_err());
        assert!("#GGGGGG".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_display_uppercase_hex() {
        assert_eq!(Rgb::new(0x0a, 0xbc, 0xff).to_string(), "#0ABCFF");
    }

    #[test]
    fn test_luminance_bounds() {
        assert!((Rgb::BLACK.luminance() - 0.0).abs() < f64::EPSILON);
        assert!((Rgb::WHITE.luminance() - 1.0).abs() < 1e-9);
    }
}
