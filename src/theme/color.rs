use std::{fmt, str::FromStr, sync::LazyLock};

use gpui::Rgba;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

static HEX_COLOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("hex color pattern is valid"));

/// Luminance above which black text reads better than white.
pub const CONTRAST_THRESHOLD: f32 = 0.179;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HexColorError {
    #[error("\"{0}\" is not a color of the form #RRGGBB")]
    Malformed(String),
}

/// An opaque sRGB color written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const BLACK: HexColor = HexColor::from_u32(0x000000);
    pub const WHITE: HexColor = HexColor::from_u32(0xFFFFFF);

    pub const fn from_u32(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Returns true when `text` would be accepted as a custom color.
    pub fn is_valid(text: &str) -> bool {
        HEX_COLOR_PATTERN.is_match(text)
    }

    pub fn parse(text: &str) -> Result<Self, HexColorError> {
        if !Self::is_valid(text) {
            return Err(HexColorError::Malformed(text.to_string()));
        }

        u32::from_str_radix(&text[1..], 16)
            .map(Self::from_u32)
            .map_err(|_| HexColorError::Malformed(text.to_string()))
    }

    pub fn to_u32(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    pub fn to_rgba(self) -> Rgba {
        Rgba {
            r: self.r as f32 / 255.,
            g: self.g as f32 / 255.,
            b: self.b as f32 / 255.,
            a: 1.,
        }
    }

    /// WCAG relative luminance in `[0, 1]`.
    pub fn relative_luminance(self) -> f32 {
        fn linearize(channel: u8) -> f32 {
            let c = channel as f32 / 255.;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }

        0.2126 * linearize(self.r) + 0.7152 * linearize(self.g) + 0.0722 * linearize(self.b)
    }

    /// Black or white, whichever is more legible on top of `self`.
    pub fn contrast_color(self) -> HexColor {
        if self.relative_luminance() > CONTRAST_THRESHOLD {
            HexColor::BLACK
        } else {
            HexColor::WHITE
        }
    }

    /// Scales every channel by `factor`, truncating toward zero.
    ///
    /// The factor is clamped to `(0, 1]`, so the result is never brighter than `self`.
    pub fn darken(self, factor: f32) -> HexColor {
        let factor = factor.clamp(f32::MIN_POSITIVE, 1.);
        let scale = |channel: u8| (channel as f32 * factor).clamp(0., 255.) as u8;

        HexColor {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = HexColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<HexColor> for Rgba {
    fn from(color: HexColor) -> Self {
        color.to_rgba()
    }
}

impl From<HexColor> for gpui::Hsla {
    fn from(color: HexColor) -> Self {
        color.to_rgba().into()
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        HexColor::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Free-function form of [`HexColor::contrast_color`].
pub fn contrast_color(background: HexColor) -> HexColor {
    background.contrast_color()
}

/// Free-function form of [`HexColor::darken`].
pub fn darken(color: HexColor, factor: f32) -> HexColor {
    color.darken(factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn hex(text: &str) -> HexColor {
        HexColor::parse(text).expect("valid test color")
    }

    #[test]
    fn contrast_picks_black_on_light_backgrounds() {
        assert_eq!(contrast_color(hex("#FFFFFF")), HexColor::BLACK);
        assert_eq!(contrast_color(hex("#F9FAFB")), HexColor::BLACK);
    }

    #[test]
    fn contrast_picks_white_on_dark_backgrounds() {
        assert_eq!(contrast_color(hex("#000000")), HexColor::WHITE);
        assert_eq!(contrast_color(hex("#1E40AF")), HexColor::WHITE);
    }

    #[test]
    fn mid_gray_accent_gets_white_text() {
        let accent = hex("#4A4A4A");
        let luminance = accent.relative_luminance();
        assert!((luminance - 0.0685).abs() < 0.002, "luminance was {luminance}");
        assert_eq!(contrast_color(accent), HexColor::WHITE);
    }

    #[test]
    fn darken_truncates_each_channel() {
        assert_eq!(darken(hex("#3B82F6"), 0.8), hex("#2F68C4"));
        assert_eq!(darken(hex("#3B82F6"), 1.0), hex("#3B82F6"));
        assert_eq!(darken(hex("#FFFFFF"), 0.5), hex("#7F7F7F"));
    }

    #[test]
    fn darken_clamps_out_of_range_factors() {
        assert_eq!(darken(hex("#102030"), 3.0), hex("#102030"));
        assert_eq!(darken(hex("#102030"), -1.0), HexColor::BLACK);
    }

    #[test]
    fn darken_never_brightens_random_colors() {
        let mut rng = rand::rng();

        for _ in 0..256 {
            let color = HexColor::from_u32(rng.random_range(0..=0xFFFFFF));
            let factor: f32 = rng.random_range(0.05..=1.0);
            let darker = darken(color, factor);

            assert!(darker.r <= color.r && darker.g <= color.g && darker.b <= color.b);
            assert!(darker.relative_luminance() <= color.relative_luminance() + f32::EPSILON);
        }
    }

    #[test]
    fn contrast_is_always_black_or_white() {
        let mut rng = rand::rng();

        for _ in 0..256 {
            let color = HexColor::from_u32(rng.random_range(0..=0xFFFFFF));
            let expected = if color.relative_luminance() > CONTRAST_THRESHOLD {
                HexColor::BLACK
            } else {
                HexColor::WHITE
            };
            assert_eq!(contrast_color(color), expected);
        }
    }

    #[test]
    fn parses_only_full_hex_triplets() {
        assert_eq!(hex("#a1B2c3"), HexColor::from_u32(0xA1B2C3));
        assert!(HexColor::parse("123456").is_err());
        assert!(HexColor::parse("#12345").is_err());
        assert!(HexColor::parse("#1234567").is_err());
        assert!(HexColor::parse("#GGGGGG").is_err());
        assert_eq!(
            HexColor::parse("blue"),
            Err(HexColorError::Malformed("blue".into()))
        );
    }

    #[test]
    fn displays_upper_case() {
        assert_eq!(hex("#a1b2c3").to_string(), "#A1B2C3");
    }

    #[test]
    fn converts_to_rgba() {
        let rgba = hex("#FF0000").to_rgba();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (1., 0., 0., 1.));
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&hex("#3b82f6")).expect("serializes");
        assert_eq!(json, "\"#3B82F6\"");

        let parsed: HexColor = serde_json::from_str("\"#10B981\"").expect("deserializes");
        assert_eq!(parsed, HexColor::from_u32(0x10B981));
        assert!(serde_json::from_str::<HexColor>("\"#10B98\"").is_err());
    }
}
