use std::time::Duration;

use gpui::{
    App, CursorStyle, ElementId, InteractiveElement, IntoElement, MouseButton, ParentElement,
    RenderOnce, SharedString, StatefulInteractiveElement, Styled, Window, div,
    prelude::FluentBuilder, px, relative, svg,
};
use gpui_squircle::{SquircleStyled, squircle};

use crate::{
    IconKind,
    primitives::FocusRing,
    theme::{ThemeExt, ThemeSettings},
    utils::{
        ElementIdExt, FieldInteraction, RgbaExt, checked_transition, disabled_transition,
        field_border_color_transition,
    },
};

type CheckedHandler = Box<dyn Fn(&bool, &mut Window, &mut App) + 'static>;

/// Square check box. The checked fill is the button color from the settings.
#[derive(IntoElement)]
pub struct Checkbox {
    id: ElementId,
    settings: ThemeSettings,
    icon: SharedString,
    checked: bool,
    disabled: bool,
    on_click: Option<CheckedHandler>,
}

impl Checkbox {
    pub fn new(id: impl Into<ElementId>, settings: ThemeSettings) -> Self {
        Self {
            id: id.into(),
            settings,
            icon: IconKind::Check.into(),
            checked: false,
            disabled: false,
            on_click: None,
        }
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Called with the new checked value.
    pub fn on_click(mut self, on_click: impl Fn(&bool, &mut Window, &mut App) + 'static) -> Self {
        self.on_click = Some(Box::new(on_click));
        self
    }
}

impl RenderOnce for Checkbox {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let size = cx.get_theme().layout.size.md;
        let corner_radius = cx.get_theme().layout.corner_radii.sm;
        let background_color = cx.get_theme().colors.surface.primary;
        let fill_color = self.settings.button_bg();
        let check_color = self.settings.button_text();

        let checked_transition = checked_transition(
            self.id.clone(),
            window,
            cx,
            Duration::from_millis(285),
            self.checked,
        );

        let is_disabled = self.disabled;

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

        let disabled_transition = disabled_transition(self.id.clone(), window, cx, is_disabled);

        if is_focus && is_disabled {
            window.blur();
        }

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

        let checked_delta: f32 = *checked_transition.evaluate(window, cx);

        div()
            .id(self.id.clone())
            .cursor(if is_disabled {
                CursorStyle::OperationNotAllowed
            } else {
                CursorStyle::PointingHand
            })
            .size(size)
            .min_w(size)
            .min_h(size)
            .flex()
            .flex_none()
            .items_center()
            .justify_center()
            .opacity(*disabled_transition.evaluate(window, cx))
            .child(
                FocusRing::new(self.id.with_suffix("focus_ring"), focus_handle.clone())
                    .rounded(corner_radius),
            )
            .child(
                squircle()
                    .absolute_expand()
                    .rounded(corner_radius)
                    .bg(background_color)
                    .border(px(1.))
                    .border_inside()
                    .border_color(*border_color_transition.evaluate(window, cx)),
            )
            .child(
                squircle()
                    .absolute_expand()
                    .rounded(corner_radius)
                    .bg(fill_color.alpha(checked_delta)),
            )
            .child(
                svg()
                    .map(|mut this| {
                        this.style().aspect_ratio = Some(1.);
                        this
                    })
                    .size(relative(0.7))
                    .text_color(check_color.alpha(checked_delta))
                    .path(self.icon.clone()),
            )
            .when(!is_disabled, |this| {
                let is_hover_state_on_hover = is_hover_state.clone();
                let checked = self.checked;

                this.on_hover(move |hover, _window, cx| {
                    is_hover_state_on_hover.update(cx, |this, _cx| *this = *hover);
                    cx.notify(is_hover_state_on_hover.entity_id());
                })
                .on_mouse_down(MouseButton::Left, |_, window, _cx| {
                    // Keeps the focus ring for keyboard focus only.
                    window.prevent_default();
                })
                .on_click(move |_, window, cx| {
                    window.prevent_default();

                    if !is_focus {
                        window.blur();
                    }

                    if let Some(on_click) = self.on_click.as_ref() {
                        on_click(&!checked, window, cx);
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
    use crate::theme::Theme;
    use gpui::{TestAppContext, VisualTestContext};

    #[gpui::test]
    fn builder_defaults(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let checkbox = Checkbox::new("test-checkbox", ThemeSettings::DEFAULT);
            assert!(!checkbox.checked, "Checkbox should start unchecked");
            assert!(!checkbox.disabled, "Checkbox should start enabled");
            assert_eq!(checkbox.icon, SharedString::from(IconKind::Check));

            let checkbox = checkbox.checked(true).disabled(true);
            assert!(checkbox.checked && checkbox.disabled);
        });
    }

    struct CheckboxTestView {
        checked: bool,
    }

    impl gpui::Render for CheckboxTestView {
        fn render(
            &mut self,
            _window: &mut Window,
            cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            div().size_full().child(
                Checkbox::new("test-checkbox", ThemeSettings::DEFAULT)
                    .checked(self.checked)
                    .on_click(cx.listener(|view, checked, _window, cx| {
                        view.checked = *checked;
                        cx.notify();
                    })),
            )
        }
    }

    #[gpui::test]
    fn renders_in_window(cx: &mut TestAppContext) {
        cx.update(|cx| cx.set_theme(Theme::DEFAULT));
        let window = cx.add_window(|_window, _cx| CheckboxTestView { checked: true });
        let view = window.root(cx).expect("window root");
        let mut cx = VisualTestContext::from_window(window.into(), cx);
        cx.run_until_parked();

        view.read_with(&cx, |view, _| assert!(view.checked));
    }
}
