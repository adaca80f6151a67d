#![allow(missing_docs)] // Derive macros generate undocumented methods.

use enum_assoc::Assoc;
use gpui::{FontWeight, Pixels, Rgba, SharedString, px};
use serde::{Deserialize, Serialize};

use super::HexColor;

/// The user-adjustable look of the gallery.
///
/// Settings are plain values. Editors build a new value and hand it to the
/// [`ThemeStore`](super::ThemeStore) instead of mutating the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeSettings {
    pub header_font: FontPreset,
    pub body_font: FontPreset,
    pub button_style: ButtonStyle,
    pub background_color: HexColor,
    pub button_color: HexColor,
    pub accent_color: HexColor,
}

impl ThemeSettings {
    pub const DEFAULT: ThemeSettings = ThemeSettings {
        header_font: FontPreset::Sans,
        body_font: FontPreset::Sans,
        button_style: ButtonStyle::Rounded,
        background_color: HexColor::from_u32(0xFFFFFF),
        button_color: HexColor::from_u32(0x000000),
        accent_color: HexColor::from_u32(0x4A4A4A),
    };

    pub fn with_header_font(self, header_font: FontPreset) -> Self {
        Self {
            header_font,
            ..self
        }
    }

    pub fn with_body_font(self, body_font: FontPreset) -> Self {
        Self { body_font, ..self }
    }

    pub fn with_button_style(self, button_style: ButtonStyle) -> Self {
        Self {
            button_style,
            ..self
        }
    }

    pub fn with_color(self, slot: ColorSlot, color: HexColor) -> Self {
        match slot {
            ColorSlot::Background => Self {
                background_color: color,
                ..self
            },
            ColorSlot::Button => Self {
                button_color: color,
                ..self
            },
            ColorSlot::Accent => Self {
                accent_color: color,
                ..self
            },
        }
    }

    pub fn color(&self, slot: ColorSlot) -> HexColor {
        match slot {
            ColorSlot::Background => self.background_color,
            ColorSlot::Button => self.button_color,
            ColorSlot::Accent => self.accent_color,
        }
    }

    /// Resting background of primary buttons.
    pub fn button_bg(&self) -> Rgba {
        self.button_color.to_rgba()
    }

    /// Hovered primary buttons are 20% darker.
    pub fn button_hover_bg(&self) -> Rgba {
        self.button_color.darken(0.8).to_rgba()
    }

    pub fn button_pressed_bg(&self) -> Rgba {
        self.button_color.darken(0.7).to_rgba()
    }

    pub fn button_text(&self) -> Rgba {
        self.button_color.contrast_color().to_rgba()
    }

    pub fn accent_text(&self) -> Rgba {
        self.accent_color.contrast_color().to_rgba()
    }

    pub fn button_radius(&self) -> Pixels {
        self.button_style.corner_radius()
    }
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Which color of the settings an editor is targeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSlot {
    Background,
    Button,
    Accent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Assoc)]
#[serde(rename_all = "kebab-case")]
#[func(pub fn corner_radius(&self) -> Pixels)]
#[func(pub fn label(&self) -> &'static str)]
pub enum ButtonStyle {
    #[assoc(corner_radius = px(6.))]
    #[assoc(label = "Rounded")]
    Rounded,
    #[assoc(corner_radius = px(9999.))]
    #[assoc(label = "Pill")]
    Pill,
}

impl ButtonStyle {
    pub const ALL: [ButtonStyle; 2] = [ButtonStyle::Rounded, ButtonStyle::Pill];
}

/// A font family plus an optional weight override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Assoc)]
#[serde(rename_all = "kebab-case")]
#[func(pub fn family(&self) -> &'static str)]
#[func(pub fn weight(&self) -> Option<FontWeight>)]
#[func(pub fn label(&self) -> &'static str)]
pub enum FontPreset {
    #[assoc(family = "Figtree")]
    #[assoc(weight = None)]
    #[assoc(label = "Sans Serif")]
    Sans,
    #[assoc(family = "Figtree")]
    #[assoc(weight = Some(FontWeight::SEMIBOLD))]
    #[assoc(label = "Heavy Sans")]
    HeavySans,
    #[assoc(family = "Libre Baskerville")]
    #[assoc(weight = None)]
    #[assoc(label = "Serif")]
    Serif,
    #[assoc(family = "DM Mono")]
    #[assoc(weight = None)]
    #[assoc(label = "Monospace")]
    Mono,
    #[assoc(family = "Roboto Slab")]
    #[assoc(weight = None)]
    #[assoc(label = "Slab Serif")]
    Slab,
    #[assoc(family = ".SystemUIFont")]
    #[assoc(weight = None)]
    #[assoc(label = "System")]
    System,
}

impl FontPreset {
    /// Presets offered by the header font picker.
    pub const HEADER: [FontPreset; 5] = [
        FontPreset::Sans,
        FontPreset::Serif,
        FontPreset::HeavySans,
        FontPreset::Mono,
        FontPreset::Slab,
    ];

    /// Presets offered by the body font picker.
    pub const BODY: [FontPreset; 4] = [
        FontPreset::Sans,
        FontPreset::Serif,
        FontPreset::System,
        FontPreset::Mono,
    ];

    pub fn family_name(&self) -> SharedString {
        SharedString::new_static(self.family())
    }

    pub fn weight_or(&self, fallback: FontWeight) -> FontWeight {
        self.weight().unwrap_or(fallback)
    }
}

/// A named color shown in the customization panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub name: &'static str,
    pub color: HexColor,
}

const fn swatch(name: &'static str, hex: u32) -> Swatch {
    Swatch {
        name,
        color: HexColor::from_u32(hex),
    }
}

pub const BACKGROUND_SWATCHES: [Swatch; 8] = [
    swatch("White", 0xFFFFFF),
    swatch("Light Gray", 0xF9FAFB),
    swatch("Warm Gray", 0xFAFAF9),
    swatch("Cool Gray", 0xF8FAFC),
    swatch("Blue Tint", 0xF0F9FF),
    swatch("Green Tint", 0xF0FDF4),
    swatch("Purple Tint", 0xFAF5FF),
    swatch("Pink Tint", 0xFDF2F8),
];

pub const BUTTON_SWATCHES: [Swatch; 12] = [
    swatch("Blue", 0x3B82F6),
    swatch("Indigo", 0x6366F1),
    swatch("Purple", 0xA855F7),
    swatch("Pink", 0xEC4899),
    swatch("Red", 0xEF4444),
    swatch("Orange", 0xF97316),
    swatch("Green", 0x10B981),
    swatch("Teal", 0x14B8A6),
    swatch("Slate", 0x64748B),
    swatch("Dark Blue", 0x1E40AF),
    swatch("Dark Purple", 0x7C3AED),
    swatch("Dark Green", 0x059669),
];

pub const ACCENT_SWATCHES: [Swatch; 8] = [
    swatch("Black", 0x000000),
    swatch("Charcoal", 0x1F2937),
    swatch("Slate", 0x334155),
    swatch("Gray", 0x475569),
    swatch("Navy", 0x1E3A8A),
    swatch("Plum", 0x6B21A8),
    swatch("Indigo", 0x3730A3),
    swatch("Teal", 0x115E59),
];

impl ColorSlot {
    pub const ALL: [ColorSlot; 3] = [ColorSlot::Background, ColorSlot::Button, ColorSlot::Accent];

    pub fn label(&self) -> &'static str {
        match self {
            ColorSlot::Background => "Background",
            ColorSlot::Button => "Buttons",
            ColorSlot::Accent => "Text",
        }
    }

    pub fn swatches(&self) -> &'static [Swatch] {
        match self {
            ColorSlot::Background => &BACKGROUND_SWATCHES,
            ColorSlot::Button => &BUTTON_SWATCHES,
            ColorSlot::Accent => &ACCENT_SWATCHES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_gallery_look() {
        let settings = ThemeSettings::default();
        assert_eq!(settings.header_font, FontPreset::Sans);
        assert_eq!(settings.button_style, ButtonStyle::Rounded);
        assert_eq!(settings.background_color.to_string(), "#FFFFFF");
        assert_eq!(settings.button_color.to_string(), "#000000");
        assert_eq!(settings.accent_color.to_string(), "#4A4A4A");
    }

    #[test]
    fn builders_replace_one_field() {
        let base = ThemeSettings::default();
        let blue = HexColor::from_u32(0x3B82F6);
        let edited = base.with_color(ColorSlot::Button, blue);

        assert_eq!(edited.button_color, blue);
        assert_eq!(edited.background_color, base.background_color);
        assert_eq!(edited.color(ColorSlot::Button), blue);
        assert_eq!(base.button_color, HexColor::BLACK, "original value is untouched");

        let pill = base.with_button_style(ButtonStyle::Pill);
        assert_eq!(pill.button_radius(), px(9999.));
        assert_eq!(base.button_radius(), px(6.));
    }

    #[test]
    fn derived_button_colors() {
        let settings =
            ThemeSettings::default().with_color(ColorSlot::Button, HexColor::from_u32(0x3B82F6));
        assert_eq!(settings.button_hover_bg(), HexColor::from_u32(0x2F68C4).to_rgba());
        assert_eq!(settings.button_text(), HexColor::WHITE.to_rgba());

        let light = settings.with_color(ColorSlot::Button, HexColor::from_u32(0xF9FAFB));
        assert_eq!(light.button_text(), HexColor::BLACK.to_rgba());
    }

    #[test]
    fn heavy_sans_is_semibold() {
        assert_eq!(FontPreset::HeavySans.weight(), Some(FontWeight::SEMIBOLD));
        assert_eq!(FontPreset::Sans.weight(), None);
        assert_eq!(FontPreset::Sans.family(), FontPreset::HeavySans.family());
        assert_eq!(FontPreset::Serif.weight_or(FontWeight::NORMAL), FontWeight::NORMAL);
    }

    #[test]
    fn pickers_offer_the_documented_presets() {
        assert!(FontPreset::HEADER.contains(&FontPreset::Slab));
        assert!(!FontPreset::HEADER.contains(&FontPreset::System));
        assert!(FontPreset::BODY.contains(&FontPreset::System));
        assert!(!FontPreset::BODY.contains(&FontPreset::HeavySans));
    }

    #[test]
    fn swatch_catalogs() {
        assert_eq!(ColorSlot::Background.swatches().len(), 8);
        assert_eq!(ColorSlot::Button.swatches().len(), 12);
        assert_eq!(ColorSlot::Accent.swatches().len(), 8);
        assert_eq!(BUTTON_SWATCHES[0].color.to_string(), "#3B82F6");
    }

    #[test]
    fn settings_round_trip_through_json_names() {
        let json = r##"{
            "headerFont": "heavy-sans",
            "buttonStyle": "pill",
            "buttonColor": "#3B82F6"
        }"##;
        let settings: ThemeSettings = serde_json::from_str(json).expect("valid settings");

        assert_eq!(settings.header_font, FontPreset::HeavySans);
        assert_eq!(settings.body_font, FontPreset::Sans, "missing fields use defaults");
        assert_eq!(settings.button_style, ButtonStyle::Pill);
        assert_eq!(settings.button_color, HexColor::from_u32(0x3B82F6));

        let invalid = r##"{ "accentColor": "#4A4A4" }"##;
        assert!(serde_json::from_str::<ThemeSettings>(invalid).is_err());
    }
}
