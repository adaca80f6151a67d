use gpui::{App, FontWeight, IntoElement, ParentElement, RenderOnce, Styled, Window, div, px};

use crate::theme::{ThemeExt, ThemeSettings};

/// The "Powered by formsflow" line closing both pages.
#[derive(IntoElement)]
pub struct Branding {
    settings: ThemeSettings,
}

impl Branding {
    pub fn new(settings: ThemeSettings) -> Self {
        Self { settings }
    }
}

impl RenderOnce for Branding {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.get_theme();
        let caption_size = theme.layout.text.default_font.sizes.caption;
        let muted = theme.colors.text.secondary;
        let border_color = theme.colors.border.primary;

        div()
            .w_full()
            .mt(px(24.))
            .pt(px(16.))
            .border_t_1()
            .border_color(border_color)
            .flex()
            .justify_center()
            .items_center()
            .gap(px(4.))
            .text_size(caption_size)
            .text_color(muted)
            .child("Powered by")
            .child(
                div()
                    .font_family(self.settings.header_font.family_name())
                    .font_weight(FontWeight::SEMIBOLD)
                    .text_color(self.settings.accent_color.to_rgba())
                    .child("formsflow"),
            )
    }
}
