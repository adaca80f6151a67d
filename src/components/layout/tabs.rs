use std::time::Duration;

use gpui::{
    AnyElement, App, CursorStyle, ElementId, FontWeight, InteractiveElement, IntoElement,
    ParentElement, RenderOnce, SharedString, StatefulInteractiveElement, Styled, Window, div,
    px,
};

use crate::{
    ElementIdExt, conitional_transition,
    theme::{ThemeExt, ThemeSettings},
};

/// The tab to show for a stored index once the tab count is known.
pub fn active_tab(stored: usize, tab_count: usize) -> Option<usize> {
    (tab_count > 0).then(|| stored.min(tab_count - 1))
}

/// A tab strip with the active tab's content below. The first tab starts active.
#[derive(IntoElement)]
pub struct TabsField {
    id: ElementId,
    settings: ThemeSettings,
    tabs: Vec<(SharedString, AnyElement)>,
}

impl TabsField {
    pub fn new(id: impl Into<ElementId>, settings: ThemeSettings) -> Self {
        Self {
            id: id.into(),
            settings,
            tabs: Vec::new(),
        }
    }

    pub fn tab(mut self, label: impl Into<SharedString>, content: impl IntoElement) -> Self {
        self.tabs.push((label.into(), content.into_any_element()));
        self
    }
}

impl RenderOnce for TabsField {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let active_state =
            window.use_keyed_state(self.id.with_suffix("state:active"), cx, |_window, _cx| 0usize);
        let active = active_tab(*active_state.read(cx), self.tabs.len());

        let theme = cx.get_theme();
        let text_size = theme.layout.text.default_font.sizes.body;
        let active_color = theme.colors.text.primary;
        let inactive_color = theme.colors.text.secondary;
        let border_color = theme.colors.border.primary;
        let accent = self.settings.accent_color.to_rgba();

        let mut triggers = Vec::with_capacity(self.tabs.len());
        let mut content = None;
        for (ix, (label, body)) in self.tabs.into_iter().enumerate() {
            let is_active = active == Some(ix);
            if is_active {
                content = Some(body);
            }

            let underline = conitional_transition!(
                self.id.with_index("state:transition:underline", ix),
                window,
                cx,
                Duration::from_millis(150),
                {
                    is_active => 1.,
                    _ => 0.
                }
            );
            let underline_opacity: f32 = *underline.evaluate(window, cx);
            let active_state = active_state.clone();

            triggers.push(
                div()
                    .id(self.id.with_index("tab", ix))
                    .relative()
                    .px(px(14.))
                    .py(px(10.))
                    .cursor(CursorStyle::PointingHand)
                    .text_size(text_size)
                    .font_weight(FontWeight::MEDIUM)
                    .text_color(if is_active { active_color } else { inactive_color })
                    .child(label)
                    .child(
                        div()
                            .absolute()
                            .left_0()
                            .right_0()
                            .bottom_0()
                            .h(px(2.))
                            .bg(accent)
                            .opacity(underline_opacity),
                    )
                    .on_click(move |_, _window, cx| {
                        active_state.update(cx, |active, cx| {
                            if *active != ix {
                                log::debug!("switching to tab {ix}");
                                *active = ix;
                                cx.notify();
                            }
                        });
                    }),
            );
        }

        div()
            .w_full()
            .flex()
            .flex_col()
            .font_family(self.settings.body_font.family_name())
            .child(
                div()
                    .w_full()
                    .flex()
                    .border_b_1()
                    .border_color(border_color)
                    .children(triggers),
            )
            .child(div().w_full().pt(px(16.)).children(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tab_is_active_and_indices_clamp() {
        assert_eq!(active_tab(0, 4), Some(0));
        assert_eq!(active_tab(7, 4), Some(3));
        assert_eq!(active_tab(0, 0), None);
    }
}

#[cfg(all(test, feature = "test-support"))]
mod render_tests {
    use super::*;
    use crate::theme::Theme;
    use gpui::{TestAppContext, VisualTestContext};

    struct TabsView;

    impl gpui::Render for TabsView {
        fn render(
            &mut self,
            _window: &mut Window,
            _cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            div().size_full().child(
                TabsField::new("tabs", ThemeSettings::DEFAULT)
                    .tab("Basic", div().child("basic"))
                    .tab("Advanced", div().child("advanced")),
            )
        }
    }

    #[gpui::test]
    fn renders_tab_strip(cx: &mut TestAppContext) {
        cx.update(|cx| cx.set_theme(Theme::DEFAULT));
        let window = cx.add_window(|_window, _cx| TabsView);
        let mut cx = VisualTestContext::from_window(window.into(), cx);
        cx.run_until_parked();
    }
}
