use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{LIGHTNESS_MAX, LIGHTNESS_MIN};
use crate::error::InvalidColorError;

// D65 reference white, sRGB primaries (Y row of the RGB -> XYZ matrix)
const LUMINANCE_R: f64 = 0.2126729;
const LUMINANCE_G: f64 = 0.7151522;
const LUMINANCE_B: f64 = 0.0721750;

// CIE constants: (6/29)^3 and 3 * (6/29)^2
const LAB_EPSILON: f64 = 0.008856452;
const LAB_KAPPA: f64 = 0.128418549;
const LAB_T0: f64 = 4.0 / 29.0;

/// An sRGB color with 8-bit channels.
///
/// Serialized as its hex string so style files and marker snapshots stay readable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Alpha as a 0.0-1.0 fraction.
    pub fn opacity(self) -> f64 {
        self.a as f64 / 255.0
    }

    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    pub fn into_rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn into_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Relative luminance (CIE Y), 0.0 for black and 1.0 for white. Alpha is ignored.
    pub fn relative_luminance(self) -> f64 {
        fn decode(channel: u8) -> f64 {
            let c = channel as f64 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }

        LUMINANCE_R * decode(self.r) + LUMINANCE_G * decode(self.g) + LUMINANCE_B * decode(self.b)
    }

    /// Perceptual lightness: the L* channel of CIE L*a*b*, in 0..=100.
    pub fn lightness(self) -> f64 {
        let y = self.relative_luminance();
        let f = if y > LAB_EPSILON {
            y.cbrt()
        } else {
            y / LAB_KAPPA + LAB_T0
        };
        (116.0 * f - 16.0).clamp(LIGHTNESS_MIN, LIGHTNESS_MAX)
    }

    /// `#rrggbb` when opaque, `#rrggbbaa` otherwise.
    pub fn to_hex(self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// CSS `rgba()` notation, alpha rounded to two decimals.
    pub fn to_css_rgba(self) -> String {
        let alpha = (self.opacity() * 100.0).round() / 100.0;
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

impl From<[u8; 3]> for Color {
    fn from(rgb: [u8; 3]) -> Self {
        Self::rgb(rgb[0], rgb[1], rgb[2])
    }
}

impl From<[u8; 4]> for Color {
    fn from(rgba: [u8; 4]) -> Self {
        Self::rgba(rgba[0], rgba[1], rgba[2], rgba[3])
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl TryFrom<String> for Color {
    type Error = InvalidColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        super::parse::parse_color(&value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lightness_extremes() {
        assert!((Color::WHITE.lightness() - 100.0).abs() < 0.01);
        assert!(Color::BLACK.lightness().abs() < 0.01);
    }

    #[test]
    fn test_lightness_mid_gray() {
        // #777777 sits near the middle of L*
        let gray = Color::rgb(0x77, 0x77, 0x77);
        assert!((gray.lightness() - 50.03).abs() < 0.05);
    }

    #[test]
    fn test_lightness_saturated_hues() {
        assert!((Color::rgb(255, 255, 0).lightness() - 97.14).abs() < 0.05);
        assert!((Color::rgb(0, 0, 255).lightness() - 32.30).abs() < 0.05);
        assert!((Color::rgb(255, 0, 0).lightness() - 53.24).abs() < 0.05);
    }

    #[test]
    fn test_lightness_ignores_alpha() {
        let opaque = Color::rgb(0xcc, 0xcc, 0xcc);
        assert_eq!(opaque.lightness(), opaque.with_alpha(10).lightness());
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Color::BLACK.to_hex(), "#000000");
        assert_eq!(Color::WHITE.to_hex(), "#ffffff");
        assert_eq!(Color::rgb(0xf9, 0x73, 0x16).to_hex(), "#f97316");
        assert_eq!(Color::rgba(0, 0, 0, 102).to_hex(), "#00000066");
    }

    #[test]
    fn test_to_css_rgba() {
        assert_eq!(Color::rgba(0, 0, 0, 102).to_css_rgba(), "rgba(0, 0, 0, 0.4)");
        assert_eq!(Color::WHITE.to_css_rgba(), "rgba(255, 255, 255, 1)");
    }

    #[test]
    fn test_serializes_as_hex_string() {
        let json = serde_json::to_string(&Color::rgb(0x3b, 0x82, 0xf6)).unwrap();
        assert_eq!(json, "\"#3b82f6\"");
        let parsed: Color = serde_json::from_str("\"orange\"").unwrap();
        assert_eq!(parsed, Color::rgb(0xff, 0xa5, 0x00));
        assert!(serde_json::from_str::<Color>("\"not-a-color\"").is_err());
    }

    #[test]
    fn test_from_triples() {
        assert_eq!(Color::from([1, 2, 3]), Color::rgb(1, 2, 3));
        assert_eq!(Color::from((1, 2, 3)), Color::rgb(1, 2, 3));
        assert_eq!(Color::from([1, 2, 3, 4]).a, 4);
    }
}
