use gpui::{
    AnyElement, App, FontWeight, IntoElement, ParentElement, RenderOnce, SharedString, Styled,
    Window, div, px,
};
use smallvec::SmallVec;

use crate::theme::{ThemeExt, ThemeSettings};

/// Bordered box grouping fields under a legend.
#[derive(IntoElement)]
pub struct FieldSetField {
    settings: ThemeSettings,
    legend: SharedString,
    children: SmallVec<[AnyElement; 2]>,
}

impl FieldSetField {
    pub fn new(settings: ThemeSettings, legend: impl Into<SharedString>) -> Self {
        Self {
            settings,
            legend: legend.into(),
            children: SmallVec::new(),
        }
    }
}

impl ParentElement for FieldSetField {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl RenderOnce for FieldSetField {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.get_theme();
        let border_color = theme.colors.border.primary;
        let legend_size = theme.layout.text.default_font.sizes.body;
        let corner_radius = theme.layout.corner_radii.lg;
        let padding = theme.layout.padding.lg;

        div()
            .w_full()
            .flex()
            .flex_col()
            .gap(px(12.))
            .p(padding)
            .border_1()
            .border_color(border_color)
            .rounded(corner_radius)
            .child(
                div()
                    .font_family(self.settings.header_font.family_name())
                    .font_weight(self.settings.header_font.weight_or(FontWeight::SEMIBOLD))
                    .text_size(legend_size)
                    .text_color(self.settings.accent_color.to_rgba())
                    .child(self.legend),
            )
            .children(self.children)
    }
}
