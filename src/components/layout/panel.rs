use gpui::{
    AnyElement, App, FontWeight, IntoElement, ParentElement, RenderOnce, SharedString, Styled,
    Window, div, prelude::FluentBuilder, px,
};
use smallvec::SmallVec;

use crate::theme::{ThemeExt, ThemeSettings};

/// Card with an accent-tinted heading bar above its body.
#[derive(IntoElement)]
pub struct PanelField {
    settings: ThemeSettings,
    title: SharedString,
    description: Option<SharedString>,
    children: SmallVec<[AnyElement; 2]>,
}

impl PanelField {
    pub fn new(settings: ThemeSettings, title: impl Into<SharedString>) -> Self {
        Self {
            settings,
            title: title.into(),
            description: None,
            children: SmallVec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<SharedString>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl ParentElement for PanelField {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl RenderOnce for PanelField {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.get_theme();
        let border_color = theme.colors.border.primary;
        let card_color = theme.colors.surface.primary;
        let title_size = theme.layout.text.default_font.sizes.heading_sm;
        let caption_size = theme.layout.text.default_font.sizes.caption;
        let corner_radius = theme.layout.corner_radii.lg;
        let padding = theme.layout.padding.lg;
        let accent = self.settings.accent_color;

        div()
            .w_full()
            .flex()
            .flex_col()
            .bg(card_color)
            .border_1()
            .border_color(border_color)
            .rounded(corner_radius)
            .overflow_hidden()
            .child(
                div()
                    .w_full()
                    .px(padding)
                    .py(px(12.))
                    .bg(accent.to_rgba())
                    .flex()
                    .flex_col()
                    .gap(px(2.))
                    .text_color(accent.contrast_color().to_rgba())
                    .child(
                        div()
                            .font_family(self.settings.header_font.family_name())
                            .font_weight(self.settings.header_font.weight_or(FontWeight::SEMIBOLD))
                            .text_size(title_size)
                            .child(self.title),
                    )
                    .when_some(self.description, |this, description| {
                        this.child(
                            div()
                                .font_family(self.settings.body_font.family_name())
                                .text_size(caption_size)
                                .opacity(0.85)
                                .child(description),
                        )
                    }),
            )
            .child(
                div()
                    .w_full()
                    .p(padding)
                    .flex()
                    .flex_col()
                    .gap(px(16.))
                    .children(self.children),
            )
    }
}
