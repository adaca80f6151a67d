use std::time::Duration;

use gpui::{
    App, CursorStyle, ElementId, InteractiveElement, IntoElement, MouseButton, ParentElement,
    RenderOnce, StatefulInteractiveElement, Styled, Window, div, prelude::FluentBuilder, px,
};

use crate::{
    primitives::FocusRing,
    theme::{ThemeExt, ThemeSettings},
    utils::{
        ElementIdExt, FieldInteraction, RgbaExt, checked_transition, disabled_transition,
        field_border_color_transition,
    },
};

type SelectHandler = Box<dyn Fn(&mut Window, &mut App) + 'static>;

/// A single round option of a radio group.
#[derive(IntoElement)]
pub struct Radio {
    id: ElementId,
    settings: ThemeSettings,
    selected: bool,
    disabled: bool,
    on_select: Option<SelectHandler>,
}

impl Radio {
    pub fn new(id: impl Into<ElementId>, settings: ThemeSettings) -> Self {
        Self {
            id: id.into(),
            settings,
            selected: false,
            disabled: false,
            on_select: None,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Called when an unselected radio is clicked.
    pub fn on_select(mut self, on_select: impl Fn(&mut Window, &mut App) + 'static) -> Self {
        self.on_select = Some(Box::new(on_select));
        self
    }
}

impl RenderOnce for Radio {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let size = cx.get_theme().layout.size.md;
        let background_color = cx.get_theme().colors.surface.primary;
        let dot_color = self.settings.button_bg();

        let is_hover_state =
            window.use_keyed_state(self.id.with_suffix("state:hover"), cx, |_window, _cx| false);
        let is_hover = *is_hover_state.read(cx);

        let focus_handle = window
            .use_keyed_state(
                self.id.with_suffix("state:focus_handle"),
                cx,
                |_window, cx| cx.focus_handle().tab_stop(true),
            )
            .read(cx)
            .clone();
        let is_focus = focus_handle.is_focused(window);
        let is_disabled = self.disabled;

        let selected_transition = checked_transition(
            self.id.clone(),
            window,
            cx,
            Duration::from_millis(220),
            self.selected,
        );
        let disabled_transition = disabled_transition(self.id.clone(), window, cx, is_disabled);

        let border_color_transition = field_border_color_transition(
            &self.id,
            window,
            cx,
            FieldInteraction {
                invalid: false,
                focused: is_focus,
                hovered: is_hover,
            },
        );

        let selected_delta: f32 = *selected_transition.evaluate(window, cx);
        let border_color = (*border_color_transition.evaluate(window, cx))
            .mix(dot_color, selected_delta);

        div()
            .id(self.id.clone())
            .cursor(if is_disabled {
                CursorStyle::OperationNotAllowed
            } else {
                CursorStyle::PointingHand
            })
            .size(size)
            .flex()
            .flex_none()
            .items_center()
            .justify_center()
            .rounded_full()
            .bg(background_color)
            .border_1()
            .border_color(border_color)
            .opacity(*disabled_transition.evaluate(window, cx))
            .child(
                FocusRing::new(self.id.with_suffix("focus_ring"), focus_handle.clone())
                    .rounded(size),
            )
            .child(
                div()
                    .size(size * 0.5 * selected_delta)
                    .rounded_full()
                    .bg(dot_color),
            )
            .when(!is_disabled, |this| {
                let selected = self.selected;
                let is_hover_state_on_hover = is_hover_state.clone();

                this.on_hover(move |hover, _window, cx| {
                    is_hover_state_on_hover.update(cx, |this, _cx| *this = *hover);
                    cx.notify(is_hover_state_on_hover.entity_id());
                })
                .on_mouse_down(MouseButton::Left, |_, window, _cx| window.prevent_default())
                .on_click(move |_, window, cx| {
                    if selected {
                        return;
                    }
                    if let Some(on_select) = self.on_select.as_ref() {
                        on_select(window, cx);
                    }
                })
                .on_mouse_up_out(MouseButton::Left, move |_event, _window, cx| {
                    is_hover_state.update(cx, |this, _cx| *this = false);
                    cx.notify(is_hover_state.entity_id());
                })
                .track_focus(&focus_handle)
            })
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use gpui::TestAppContext;

    #[gpui::test]
    fn builder_sets_selection(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let radio = Radio::new("radio", ThemeSettings::DEFAULT);
            assert!(!radio.selected);
            assert!(radio.on_select.is_none());

            let radio = radio.selected(true).on_select(|_window, _cx| {});
            assert!(radio.selected);
            assert!(radio.on_select.is_some());
        });
    }
}
