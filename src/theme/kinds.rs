#![allow(missing_docs)] // Derive macros generate undocumented methods.

use enum_assoc::Assoc;
use gpui::App;

use crate::theme::ThemeExt;

/// Text size variants that resolve to design-token values.
#[derive(Assoc, Clone, Copy, Debug, PartialEq, Eq)]
#[func(pub fn resolve(&self, cx: &App) -> gpui::AbsoluteLength)]
#[func(pub fn weight(&self, cx: &App) -> gpui::FontWeight)]
pub enum ThemeTextSizeKind {
    /// Page title.
    #[assoc(resolve = cx.get_theme().layout.text.default_font.sizes.heading_xl)]
    #[assoc(weight = gpui::FontWeight(cx.get_theme().layout.text.default_font.weights.heading_xl))]
    Xl,
    /// Card titles.
    #[assoc(resolve = cx.get_theme().layout.text.default_font.sizes.heading_lg)]
    #[assoc(weight = gpui::FontWeight(cx.get_theme().layout.text.default_font.weights.heading_lg))]
    Lg,
    /// Section headings.
    #[assoc(resolve = cx.get_theme().layout.text.default_font.sizes.heading_md)]
    #[assoc(weight = gpui::FontWeight(cx.get_theme().layout.text.default_font.weights.heading_md))]
    Md,
    /// Field labels.
    #[assoc(resolve = cx.get_theme().layout.text.default_font.sizes.heading_sm)]
    #[assoc(weight = gpui::FontWeight(cx.get_theme().layout.text.default_font.weights.heading_sm))]
    Sm,
    #[assoc(resolve = cx.get_theme().layout.text.default_font.sizes.body)]
    #[assoc(weight = gpui::FontWeight(cx.get_theme().layout.text.default_font.weights.body))]
    Body,
    /// Descriptions and inline messages.
    #[assoc(resolve = cx.get_theme().layout.text.default_font.sizes.caption)]
    #[assoc(weight = gpui::FontWeight(cx.get_theme().layout.text.default_font.weights.caption))]
    Caption,
}

/// Control heights.
#[derive(Assoc, Clone, Copy, Debug, PartialEq, Eq)]
#[func(pub fn resolve(&self, cx: &App) -> gpui::Pixels)]
#[func(pub fn corner_radii(&self) -> ThemeLayoutCornerRadiiKind)]
pub enum ThemeLayoutSizeKind {
    #[assoc(resolve = cx.get_theme().layout.size.xl)]
    #[assoc(corner_radii = ThemeLayoutCornerRadiiKind::Xl)]
    Xl,
    #[assoc(resolve = cx.get_theme().layout.size.lg)]
    #[assoc(corner_radii = ThemeLayoutCornerRadiiKind::Lg)]
    Lg,
    #[assoc(resolve = cx.get_theme().layout.size.md)]
    #[assoc(corner_radii = ThemeLayoutCornerRadiiKind::Md)]
    Md,
    #[assoc(resolve = cx.get_theme().layout.size.sm)]
    #[assoc(corner_radii = ThemeLayoutCornerRadiiKind::Sm)]
    Sm,
}

#[derive(Assoc, Clone, Copy, Debug, PartialEq, Eq)]
#[func(pub fn resolve(&self, cx: &App) -> gpui::Pixels)]
pub enum ThemeLayoutPaddingKind {
    #[assoc(resolve = cx.get_theme().layout.padding.xl)]
    Xl,
    #[assoc(resolve = cx.get_theme().layout.padding.lg)]
    Lg,
    #[assoc(resolve = cx.get_theme().layout.padding.md)]
    Md,
    #[assoc(resolve = cx.get_theme().layout.padding.sm)]
    Sm,
}

#[derive(Assoc, Clone, Copy, Debug, PartialEq, Eq)]
#[func(pub fn resolve(&self, cx: &App) -> gpui::Pixels)]
pub enum ThemeLayoutCornerRadiiKind {
    #[assoc(resolve = cx.get_theme().layout.corner_radii.xl)]
    Xl,
    #[assoc(resolve = cx.get_theme().layout.corner_radii.lg)]
    Lg,
    #[assoc(resolve = cx.get_theme().layout.corner_radii.md)]
    Md,
    #[assoc(resolve = cx.get_theme().layout.corner_radii.sm)]
    Sm,
}

/// Stacked neutral surfaces, from the page card down to hovered rows.
#[derive(Assoc, Clone, Copy, Debug, PartialEq, Eq)]
#[func(pub fn resolve(&self, cx: &App) -> gpui::Rgba)]
#[func(pub fn next(&self) -> ThemeSurfaceKind)]
pub enum ThemeSurfaceKind {
    #[assoc(resolve = cx.get_theme().colors.surface.primary)]
    #[assoc(next = ThemeSurfaceKind::Secondary)]
    Primary,
    #[assoc(resolve = cx.get_theme().colors.surface.secondary)]
    #[assoc(next = ThemeSurfaceKind::Tertiary)]
    Secondary,
    #[assoc(resolve = cx.get_theme().colors.surface.tertiary)]
    #[assoc(next = ThemeSurfaceKind::Tertiary)]
    Tertiary,
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use gpui::TestAppContext;

    #[gpui::test]
    fn sizes_shrink_down_the_scale(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            assert!(ThemeLayoutSizeKind::Xl.resolve(cx) > ThemeLayoutSizeKind::Lg.resolve(cx));
            assert!(ThemeLayoutSizeKind::Md.resolve(cx) > ThemeLayoutSizeKind::Sm.resolve(cx));
            assert!(
                ThemeLayoutPaddingKind::Lg.resolve(cx) > ThemeLayoutPaddingKind::Sm.resolve(cx)
            );
            assert_eq!(
                ThemeLayoutSizeKind::Lg.corner_radii(),
                ThemeLayoutCornerRadiiKind::Lg
            );
        });
    }

    #[gpui::test]
    fn label_weight_comes_from_tokens(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            assert_eq!(ThemeTextSizeKind::Sm.weight(cx), gpui::FontWeight(600.));
            assert_eq!(ThemeTextSizeKind::Body.weight(cx), gpui::FontWeight(400.));
        });
    }

    #[gpui::test]
    fn surfaces_stack(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            assert_eq!(ThemeSurfaceKind::Primary.next(), ThemeSurfaceKind::Secondary);
            assert_eq!(ThemeSurfaceKind::Tertiary.next(), ThemeSurfaceKind::Tertiary);
            assert_ne!(
                ThemeSurfaceKind::Primary.resolve(cx),
                ThemeSurfaceKind::Secondary.resolve(cx)
            );
        });
    }
}
