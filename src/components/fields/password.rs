use std::rc::Rc;

use gpui::{
    App, CursorStyle, ElementId, InteractiveElement, IntoElement, MouseButton, ParentElement,
    RenderOnce, SharedString, StatefulInteractiveElement, Styled, Window, div, px,
};

use super::{Field, FieldProps, LabeledField, ValueChangeHandler, use_input_state};
use crate::{
    ElementIdExt, IconKind,
    components::{Icon, TextInput},
    theme::{ThemeExt, ThemeSettings},
};

pub const MASK_CHAR: char = '•';

/// Text field that masks its value until revealed with the eye toggle.
#[derive(IntoElement)]
pub struct PasswordField {
    id: ElementId,
    settings: ThemeSettings,
    props: FieldProps,
    on_change: Option<ValueChangeHandler<SharedString>>,
}

impl PasswordField {
    pub fn new(id: impl Into<ElementId>, settings: ThemeSettings) -> Self {
        Self {
            id: id.into(),
            settings,
            props: FieldProps::default(),
            on_change: None,
        }
    }

    pub fn on_change(
        mut self,
        on_change: impl Fn(&SharedString, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }
}

impl LabeledField for PasswordField {
    fn props_mut(&mut self) -> &mut FieldProps {
        &mut self.props
    }
}

impl RenderOnce for PasswordField {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let state = use_input_state(&self.id, "password", None, false, window, cx);
        let revealed_state = window.use_keyed_state(
            self.id.with_suffix("state:revealed"),
            cx,
            |_window, _cx| false,
        );
        let revealed = *revealed_state.read(cx);
        let icon_color = cx.get_theme().colors.text.secondary;
        let placeholder = self.props.placeholder.clone().unwrap_or_default();

        let toggle = div()
            .id(self.id.with_suffix("toggle"))
            .cursor(CursorStyle::PointingHand)
            .flex_none()
            .child(
                Icon::new(if revealed {
                    IconKind::EyeOff
                } else {
                    IconKind::Eye
                })
                .size(px(16.))
                .color(icon_color),
            )
            .on_mouse_down(MouseButton::Left, |_, window, _cx| window.prevent_default())
            .on_click(move |_, _window, cx| {
                revealed_state.update(cx, |revealed, cx| {
                    *revealed = !*revealed;
                    cx.notify();
                });
            });

        let input = TextInput::new(self.id.clone(), self.settings, state)
            .placeholder(placeholder)
            .disabled(self.props.disabled)
            .maybe_on_change(self.on_change)
            .suffix(toggle);

        let input = if revealed {
            input
        } else {
            input.transform_text(|_| MASK_CHAR)
        };

        Field::new(self.settings, self.props).child(input)
    }
}
