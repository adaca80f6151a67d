use std::{
    ops::{Deref, DerefMut},
    path::Path,
    sync::LazyLock,
};

use gpui::{AbsoluteLength, DefiniteLength, Global, Pixels, Rgba, SharedString};
use serde::Deserialize;
use smallvec::SmallVec;

use super::deserializers::{de_abs_length, de_def_length, de_pixels, de_string_or_non_empty_list};

/// Fixed design tokens the components are laid out with.
///
/// These never change at runtime. The user-adjustable part of the look lives in
/// [`ThemeSettings`](super::ThemeSettings), which is held by the [`ThemeStore`](super::ThemeStore).
#[derive(Debug, Deserialize, Clone)]
pub struct Theme {
    pub name: SharedString,
    pub layout: ThemeLayout,
    pub colors: ThemeColors,
}

macro_rules! generate_builtin_themes {
    ( $( [$path:literal, $name:ident] ),+ ) => {
        $(
            pub const $name: LazyLockTheme = LazyLockTheme::new(|| {
                Theme::from_string(include_str!($path))
                    .unwrap_or_else(|err| panic!("builtin theme {} is malformed: {err}", $path))
            });
        )+
    };
}

pub struct LazyLockTheme(LazyLock<Theme>);

impl LazyLockTheme {
    #[inline(always)]
    const fn new(f: fn() -> Theme) -> Self {
        Self(LazyLock::new(f))
    }
}

impl Deref for LazyLockTheme {
    type Target = Theme;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for LazyLockTheme {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl AsRef<Theme> for LazyLockTheme {
    fn as_ref(&self) -> &Theme {
        &self.0
    }
}

impl AsRef<Theme> for Theme {
    fn as_ref(&self) -> &Theme {
        self
    }
}

impl Theme {
    generate_builtin_themes!(["../../themes/default.json", DEFAULT]);

    pub fn from_string<S: AsRef<str>>(str: S) -> Result<Theme, serde_json::Error> {
        serde_json::from_str(str.as_ref())
    }

    /// Reads a design-token file with the same schema as the builtin theme.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Theme, crate::config::ConfigError> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|source| crate::config::ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        Theme::from_string(contents).map_err(|source| crate::config::ConfigError::Theme {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Global for Theme {}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeLayout {
    pub text: ThemeText,
    pub corner_radii: ThemeCornerRadii,
    pub size: ThemeSize,
    pub padding: ThemePadding,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeText {
    #[serde(deserialize_with = "de_pixels")]
    pub base_size: Pixels,
    pub default_font: ThemeFont,
    pub mono_font: ThemeFont,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeFont {
    #[serde(deserialize_with = "de_string_or_non_empty_list")]
    pub family: SmallVec<[SharedString; 1]>,
    #[serde(deserialize_with = "de_def_length")]
    pub line_height: DefiniteLength,
    pub sizes: ThemeTextSizes,
    pub weights: ThemeTextWeights,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeTextSizes {
    #[serde(deserialize_with = "de_abs_length")]
    pub heading_xl: AbsoluteLength,
    #[serde(deserialize_with = "de_abs_length")]
    pub heading_lg: AbsoluteLength,
    #[serde(deserialize_with = "de_abs_length")]
    pub heading_md: AbsoluteLength,
    #[serde(deserialize_with = "de_abs_length")]
    pub heading_sm: AbsoluteLength,
    #[serde(deserialize_with = "de_abs_length")]
    pub body: AbsoluteLength,
    #[serde(deserialize_with = "de_abs_length")]
    pub caption: AbsoluteLength,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeTextWeights {
    pub heading_xl: f32,
    pub heading_lg: f32,
    pub heading_md: f32,
    pub heading_sm: f32,
    pub body: f32,
    pub caption: f32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeCornerRadii {
    #[serde(deserialize_with = "de_pixels")]
    pub xl: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub lg: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub md: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub sm: Pixels,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeSize {
    #[serde(deserialize_with = "de_pixels")]
    pub xl: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub lg: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub md: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub sm: Pixels,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemePadding {
    #[serde(deserialize_with = "de_pixels")]
    pub xl: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub lg: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub md: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub sm: Pixels,
}

/// Neutral palette shared by every component. Brand colors come from the settings.
#[derive(Debug, Deserialize, Clone)]
pub struct ThemeColors {
    pub surface: ThemeSurfaceColors,
    pub border: ThemeBorderColors,
    pub text: ThemeTextColors,
    pub status: ThemeStatusColors,
    pub selection: Rgba,
    pub focus_ring: Rgba,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeSurfaceColors {
    pub primary: Rgba,
    pub secondary: Rgba,
    pub tertiary: Rgba,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeBorderColors {
    pub primary: Rgba,
    pub input: Rgba,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeTextColors {
    pub primary: Rgba,
    pub secondary: Rgba,
    pub placeholder: Rgba,
}

impl ThemeTextColors {
    pub fn all(&self) -> (Rgba, Rgba) {
        (self.primary, self.secondary)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeStatusColors {
    pub destructive: Rgba,
    pub required: Rgba,
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpui::px;

    #[test]
    fn builtin_theme_parses() {
        let theme = Theme::DEFAULT;
        assert_eq!(theme.name.to_string(), "formsflow");
        assert_eq!(theme.layout.text.base_size, px(16.));
        assert_eq!(theme.layout.text.default_font.family[0].to_string(), "Figtree");
        assert_eq!(theme.layout.text.mono_font.family.len(), 1);
    }

    #[test]
    fn builtin_palette_is_opaque() {
        let theme = Theme::DEFAULT;
        let colors = &theme.colors;
        let (primary, secondary) = colors.text.all();
        assert_eq!(primary.a, 1.);
        assert_eq!(secondary.a, 1.);
        assert!(colors.selection.a < 1., "selection should be translucent");
    }

    #[test]
    fn rejects_empty_font_family_list() {
        let json = include_str!("../../themes/default.json")
            .replacen(r#"["Figtree", ".SystemUIFont"]"#, "[]", 1);
        assert!(Theme::from_string(json).is_err());
    }
}
