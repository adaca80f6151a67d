use std::rc::Rc;

use gpui::{
    AnyElement, App, ElementId, Entity, FocusHandle, Focusable, InteractiveElement, IntoElement,
    ParentElement, RenderOnce, SharedString, StatefulInteractiveElement, Styled, Window, div,
    prelude::FluentBuilder, px,
};
use gpui_squircle::{SquircleStyled, squircle};
use smallvec::SmallVec;

use crate::{
    primitives::{
        FocusRing,
        input::{Input, InputState},
    },
    theme::{ThemeExt, ThemeSettings},
    utils::{
        ElementIdExt, FieldInteraction, PixelsExt, disabled_transition,
        field_border_color_transition,
    },
};

/// Outlined text control shared by every text-like field.
///
/// Wraps the [`Input`] primitive with the field outline, focus ring and optional
/// prefix and suffix content (a currency sign, a visibility toggle).
#[derive(IntoElement)]
pub struct TextInput {
    id: ElementId,
    settings: ThemeSettings,
    invalid: bool,
    disabled: bool,
    prefix: SmallVec<[AnyElement; 1]>,
    suffix: SmallVec<[AnyElement; 1]>,
    base: Input,
    state: Entity<InputState>,
}

impl TextInput {
    pub fn new(
        id: impl Into<ElementId>,
        settings: ThemeSettings,
        state: Entity<InputState>,
    ) -> Self {
        let id = id.into();
        Self {
            base: Input::new(id.with_suffix("input"), state.clone()),
            id,
            settings,
            invalid: false,
            disabled: false,
            prefix: SmallVec::new(),
            suffix: SmallVec::new(),
            state,
        }
    }

    pub fn invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn placeholder(mut self, text: impl Into<SharedString>) -> Self {
        self.base = self.base.placeholder(text);
        self
    }

    pub fn transform_text(mut self, transform: impl Fn(char) -> char + 'static) -> Self {
        self.base = self.base.transform_text(transform);
        self
    }

    /// Visible lines for multi-line states.
    pub fn rows(mut self, rows: usize) -> Self {
        self.base = self.base.rows(rows);
        self
    }

    pub fn on_change(
        mut self,
        on_change: impl Fn(&SharedString, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.base = self.base.on_change(on_change);
        self
    }

    pub(crate) fn maybe_on_change(
        self,
        on_change: Option<Rc<dyn Fn(&SharedString, &mut Window, &mut App) + 'static>>,
    ) -> Self {
        match on_change {
            Some(on_change) => {
                self.on_change(move |value, window, cx| on_change(value, window, cx))
            }
            None => self,
        }
    }

    pub fn prefix(mut self, element: impl IntoElement) -> Self {
        self.prefix.push(element.into_any_element());
        self
    }

    pub fn suffix(mut self, element: impl IntoElement) -> Self {
        self.suffix.push(element.into_any_element());
        self
    }
}

impl RenderOnce for TextInput {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.get_theme();
        let primary_text_color = theme.colors.text.primary;
        let placeholder_color = theme.colors.text.placeholder;
        let selection_color = theme.colors.selection;
        let background_color = theme.colors.surface.primary;
        let destructive_color = theme.colors.status.destructive;
        let line_height = theme.layout.text.default_font.line_height;
        let text_size = theme.layout.text.default_font.sizes.body;
        let corner_radius = theme.layout.corner_radii.md;
        let horizontal_padding = theme.layout.padding.md;
        let vertical_padding =
            theme
                .layout
                .size
                .lg
                .padding_needed_for_height(window, text_size, line_height);
        let font_family = self.settings.body_font.family_name();

        let is_hover_state =
            window.use_keyed_state(self.id.with_suffix("state:hover"), cx, |_window, _cx| false);
        let is_hover = *is_hover_state.read(cx);

        let focus_handle = self.state.read(cx).focus_handle.clone();
        let is_focus = focus_handle.is_focused(window);

        let is_disabled = self.disabled;
        let disabled_transition = disabled_transition(self.id.clone(), window, cx, is_disabled);

        if is_focus && is_disabled {
            window.blur();
        }

        let border_color_transition = field_border_color_transition(
            &self.id,
            window,
            cx,
            FieldInteraction {
                invalid: self.invalid,
                focused: is_focus,
                hovered: is_hover,
            },
        );

        div()
            .id(self.id.clone())
            .w_full()
            .min_h_auto()
            .px(horizontal_padding)
            .py(vertical_padding)
            .gap(px(8.))
            .flex()
            .items_start()
            .opacity(*disabled_transition.evaluate(window, cx))
            .child(
                FocusRing::new(self.id.with_suffix("focus_ring"), focus_handle)
                    .rounded(corner_radius)
                    .when(self.invalid, |this| this.color(destructive_color)),
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
            .children(self.prefix)
            .child(
                self.base
                    .flex_1()
                    .min_w_0()
                    .text_size(text_size)
                    .font_family(font_family)
                    .text_color(primary_text_color)
                    .placeholder_text_color(placeholder_color)
                    .selection_color(selection_color)
                    .line_height(line_height)
                    .disabled(is_disabled),
            )
            .children(self.suffix)
            .when(!is_disabled, |this| {
                this.on_hover(move |hover, _window, cx| {
                    is_hover_state.update(cx, |this, cx| {
                        *this = *hover;
                        cx.notify();
                    });
                })
            })
    }
}

impl Focusable for TextInput {
    fn focus_handle(&self, cx: &App) -> FocusHandle {
        self.state.read(cx).focus_handle.clone()
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use gpui::{AppContext, TestAppContext, VisualTestContext};

    struct TextInputTestView {
        state: Entity<InputState>,
    }

    impl gpui::Render for TextInputTestView {
        fn render(
            &mut self,
            _window: &mut Window,
            _cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            div().size_full().child(
                TextInput::new("test-input", ThemeSettings::DEFAULT, self.state.clone())
                    .placeholder("Enter text")
                    .invalid(true),
            )
        }
    }

    #[gpui::test]
    fn renders_with_state(cx: &mut TestAppContext) {
        cx.update(|cx| cx.set_theme(Theme::DEFAULT));
        let window = cx.add_window(|window, cx| TextInputTestView {
            state: cx.new(|cx| InputState::new(window, cx).with_value("hello")),
        });
        let view = window.root(cx).expect("window root");
        let mut cx = VisualTestContext::from_window(window.into(), cx);
        cx.run_until_parked();

        let state = view.read_with(&cx, |view, _| view.state.clone());
        state.read_with(&cx, |state, _| assert_eq!(state.text(), "hello"));
    }
}
