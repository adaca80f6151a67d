use std::{f32::consts::PI, rc::Rc, time::Duration};

use gpui::{
    App, CursorStyle, ElementId, InteractiveElement, IntoElement, MouseButton, ParentElement,
    RenderOnce, SharedString, StatefulInteractiveElement, Styled, Window, div,
    prelude::FluentBuilder, px, radians,
};
use gpui_squircle::{SquircleStyled, squircle};

use super::{Field, FieldProps, LabeledField, ValueChangeHandler};
use crate::{
    ElementIdExt, IconKind, conitional_transition,
    components::Icon,
    primitives::{FocusRing, Popover},
    theme::{ThemeExt, ThemeSettings},
    utils::{FieldInteraction, PixelsExt, disabled_transition, field_border_color_transition},
};

pub const SELECT_PLACEHOLDER: &str = "Select an option";

/// One choice of a select or radio group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: SharedString,
    pub label: SharedString,
}

impl SelectOption {
    pub fn new(value: impl Into<SharedString>, label: impl Into<SharedString>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl<V: Into<SharedString>, L: Into<SharedString>> From<(V, L)> for SelectOption {
    fn from((value, label): (V, L)) -> Self {
        SelectOption::new(value, label)
    }
}

/// Label of the option holding `value`, if any.
pub fn option_label<'a>(options: &'a [SelectOption], value: &str) -> Option<&'a SharedString> {
    options
        .iter()
        .find(|option| option.value.as_ref() == value)
        .map(|option| &option.label)
}

/// Dropdown of options.
#[derive(IntoElement)]
pub struct SelectField {
    id: ElementId,
    settings: ThemeSettings,
    props: FieldProps,
    options: Vec<SelectOption>,
    default_value: Option<SharedString>,
    on_change: Option<ValueChangeHandler<SharedString>>,
}

impl SelectField {
    pub fn new(id: impl Into<ElementId>, settings: ThemeSettings) -> Self {
        Self {
            id: id.into(),
            settings,
            props: FieldProps::default(),
            options: Vec::new(),
            default_value: None,
            on_change: None,
        }
    }

    pub fn options<O: Into<SelectOption>>(mut self, options: impl IntoIterator<Item = O>) -> Self {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn default_value(mut self, value: impl Into<SharedString>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Called with the value of the picked option.
    pub fn on_change(
        mut self,
        on_change: impl Fn(&SharedString, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }
}

impl LabeledField for SelectField {
    fn props_mut(&mut self) -> &mut FieldProps {
        &mut self.props
    }
}

impl RenderOnce for SelectField {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.get_theme();
        let text_color = theme.colors.text.primary;
        let placeholder_color = theme.colors.text.placeholder;
        let icon_color = theme.colors.text.secondary;
        let background_color = theme.colors.surface.primary;
        let hover_color = theme.colors.surface.tertiary;
        let text_size = theme.layout.text.default_font.sizes.body;
        let line_height = theme.layout.text.default_font.line_height;
        let corner_radius = theme.layout.corner_radii.md;
        let horizontal_padding = theme.layout.padding.md;
        let vertical_padding =
            theme
                .layout
                .size
                .lg
                .padding_needed_for_height(window, text_size, line_height);

        let default_value = self.default_value.clone();
        let selected_state = window.use_keyed_state(
            self.id.with_suffix("state:selected"),
            cx,
            move |_window, _cx| default_value,
        );
        let selected = selected_state.read(cx).clone();

        let open_state =
            window.use_keyed_state(self.id.with_suffix("state:open"), cx, |_window, _cx| false);
        let is_open = *open_state.read(cx);

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

        let is_disabled = self.props.disabled;
        let disabled_transition = disabled_transition(self.id.clone(), window, cx, is_disabled);
        let border_color_transition = field_border_color_transition(
            &self.id,
            window,
            cx,
            FieldInteraction {
                invalid: false,
                focused: is_focus || is_open,
                hovered: is_hover,
            },
        );
        let chevron_transition = conitional_transition!(
            self.id.with_suffix("state:transition:chevron"),
            window,
            cx,
            Duration::from_millis(200),
            {
                is_open => 1.,
                _ => 0.
            }
        );
        let chevron_delta: f32 = *chevron_transition.evaluate(window, cx);

        let selected_label = selected
            .as_ref()
            .and_then(|value| option_label(&self.options, value))
            .cloned();
        let placeholder = self
            .props
            .placeholder
            .clone()
            .unwrap_or_else(|| SELECT_PLACEHOLDER.into());

        let menu = Popover::new(self.id.with_suffix("menu"))
            .open(is_open)
            .on_dismiss({
                let open_state = open_state.clone();
                move |_window, cx| {
                    open_state.update(cx, |open, cx| {
                        *open = false;
                        cx.notify();
                    })
                }
            })
            .children(self.options.iter().enumerate().map(|(ix, option)| {
                let is_selected = selected.as_ref() == Some(&option.value);
                let value = option.value.clone();
                let selected_state = selected_state.clone();
                let open_state = open_state.clone();
                let on_change = self.on_change.clone();

                div()
                    .id(self.id.with_index("option", ix))
                    .w_full()
                    .px(px(8.))
                    .py(px(6.))
                    .rounded(px(4.))
                    .flex()
                    .items_center()
                    .justify_between()
                    .cursor(CursorStyle::PointingHand)
                    .text_size(text_size)
                    .text_color(text_color)
                    .hover(move |this| this.bg(hover_color))
                    .child(option.label.clone())
                    .when(is_selected, |this| {
                        this.child(Icon::new(IconKind::Check).size(px(14.)).color(text_color))
                    })
                    .on_click(move |_, window, cx| {
                        selected_state.update(cx, |selected, cx| {
                            *selected = Some(value.clone());
                            cx.notify();
                        });
                        open_state.update(cx, |open, cx| {
                            *open = false;
                            cx.notify();
                        });
                        if let Some(on_change) = on_change.as_ref() {
                            on_change(&value, window, cx);
                        }
                    })
            }));

        let trigger = div()
            .id(self.id.clone())
            .w_full()
            .px(horizontal_padding)
            .py(vertical_padding)
            .flex()
            .items_center()
            .justify_between()
            .gap(px(8.))
            .cursor(if is_disabled {
                CursorStyle::OperationNotAllowed
            } else {
                CursorStyle::PointingHand
            })
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
            .text_size(text_size)
            .map(|this| match selected_label {
                Some(label) => this.child(div().text_color(text_color).child(label)),
                None => this.child(div().text_color(placeholder_color).child(placeholder)),
            })
            .child(
                Icon::new(IconKind::ChevronDown)
                    .size(px(14.))
                    .color(icon_color)
                    .rotate(radians(chevron_delta * PI)),
            )
            .child(menu)
            .when(!is_disabled, |this| {
                let open_state = open_state.clone();
                this.on_hover(move |hover, _window, cx| {
                    is_hover_state.update(cx, |this, cx| {
                        *this = *hover;
                        cx.notify();
                    });
                })
                .on_mouse_down(MouseButton::Left, |_, window, _cx| window.prevent_default())
                .on_click(move |_, _window, cx| {
                    open_state.update(cx, |open, cx| {
                        *open = !*open;
                        cx.notify();
                    });
                })
                .track_focus(&focus_handle)
            });

        Field::new(self.settings, self.props).child(trigger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_labels_by_value() {
        let options: Vec<SelectOption> =
            vec![("ca", "Canada").into(), ("us", "United States").into()];
        assert_eq!(
            option_label(&options, "us").map(|l| l.to_string()),
            Some("United States".into())
        );
        assert!(option_label(&options, "mx").is_none());
    }
}

#[cfg(all(test, feature = "test-support"))]
mod render_tests {
    use super::*;
    use crate::theme::Theme;
    use gpui::{TestAppContext, VisualTestContext};

    struct SelectView;

    impl gpui::Render for SelectView {
        fn render(
            &mut self,
            _window: &mut Window,
            _cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            div().size_full().child(
                SelectField::new("country", ThemeSettings::DEFAULT)
                    .label("Country")
                    .options([("ca", "Canada"), ("us", "United States")])
                    .default_value("ca"),
            )
        }
    }

    #[gpui::test]
    fn renders_with_default_selection(cx: &mut TestAppContext) {
        cx.update(|cx| cx.set_theme(Theme::DEFAULT));
        let window = cx.add_window(|_window, _cx| SelectView);
        let mut cx = VisualTestContext::from_window(window.into(), cx);
        cx.run_until_parked();
    }
}
