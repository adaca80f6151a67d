use std::rc::Rc;

use gpui::{
    App, ElementId, FontWeight, InteractiveElement, IntoElement, ParentElement, RenderOnce,
    SharedString, StatefulInteractiveElement, Styled, Window, div, prelude::FluentBuilder, px,
};

use super::{FieldProps, LabeledField, ValueChangeHandler};
use crate::{
    ElementIdExt,
    components::Checkbox,
    theme::{ThemeExt, ThemeSettings},
};

/// A checkbox with its label beside it.
#[derive(IntoElement)]
pub struct CheckboxField {
    id: ElementId,
    settings: ThemeSettings,
    props: FieldProps,
    default_checked: bool,
    on_change: Option<ValueChangeHandler<bool>>,
}

impl CheckboxField {
    pub fn new(id: impl Into<ElementId>, settings: ThemeSettings) -> Self {
        Self {
            id: id.into(),
            settings,
            props: FieldProps::default(),
            default_checked: false,
            on_change: None,
        }
    }

    pub fn default_checked(mut self, checked: bool) -> Self {
        self.default_checked = checked;
        self
    }

    pub fn on_change(mut self, on_change: impl Fn(&bool, &mut Window, &mut App) + 'static) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }
}

impl LabeledField for CheckboxField {
    fn props_mut(&mut self) -> &mut FieldProps {
        &mut self.props
    }
}

impl RenderOnce for CheckboxField {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let default_checked = self.default_checked;
        let checked_state = window.use_keyed_state(
            self.id.with_suffix("state:checked"),
            cx,
            move |_window, _cx| default_checked,
        );
        let checked = *checked_state.read(cx);

        let theme = cx.get_theme();
        let text_size = theme.layout.text.default_font.sizes.body;
        let caption_size = theme.layout.text.default_font.sizes.caption;
        let text_color = theme.colors.text.primary;
        let description_color = theme.colors.text.secondary;
        let required_color = theme.colors.status.required;

        let toggle = {
            let checked_state = checked_state.clone();
            let on_change = self.on_change.clone();
            move |value: bool, window: &mut Window, cx: &mut App| {
                checked_state.update(cx, |checked, cx| {
                    *checked = value;
                    cx.notify();
                });
                if let Some(on_change) = on_change.as_ref() {
                    on_change(&value, window, cx);
                }
            }
        };
        let toggle = Rc::new(toggle);
        let toggle_from_label = toggle.clone();
        let disabled = self.props.disabled;

        div()
            .flex()
            .flex_col()
            .gap(px(4.))
            .font_family(self.settings.body_font.family_name())
            .child(
                div()
                    .id(self.id.with_suffix("row"))
                    .flex()
                    .items_center()
                    .gap(px(8.))
                    .child(
                        Checkbox::new(self.id.clone(), self.settings)
                            .checked(checked)
                            .disabled(disabled)
                            .on_click(move |value, window, cx| toggle(*value, window, cx)),
                    )
                    .when_some(self.props.label, |this, label: SharedString| {
                        this.child(
                            div()
                                .id(self.id.with_suffix("label"))
                                .flex()
                                .gap(px(2.))
                                .text_size(text_size)
                                .font_weight(FontWeight::MEDIUM)
                                .text_color(text_color)
                                .child(label)
                                .when(self.props.required, |this| {
                                    this.child(div().text_color(required_color).child("*"))
                                })
                                .when(!disabled, |this| {
                                    this.cursor_pointer().on_click(move |_, window, cx| {
                                        toggle_from_label(!checked, window, cx)
                                    })
                                }),
                        )
                    }),
            )
            .when_some(self.props.description, |this, description| {
                this.child(
                    div()
                        .pl(px(24.))
                        .text_size(caption_size)
                        .text_color(description_color)
                        .child(description),
                )
            })
    }
}
