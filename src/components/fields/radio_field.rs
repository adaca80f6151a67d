use std::rc::Rc;

use gpui::{
    App, ElementId, InteractiveElement, IntoElement, ParentElement, RenderOnce, SharedString,
    StatefulInteractiveElement, Styled, Window, div, prelude::FluentBuilder, px,
};

use super::{Field, FieldProps, LabeledField, SelectOption, ValueChangeHandler};
use crate::{
    ElementIdExt,
    components::Radio,
    theme::{ThemeExt, ThemeSettings},
};

/// Vertical group of radio options.
#[derive(IntoElement)]
pub struct RadioField {
    id: ElementId,
    settings: ThemeSettings,
    props: FieldProps,
    options: Vec<SelectOption>,
    default_value: Option<SharedString>,
    on_change: Option<ValueChangeHandler<SharedString>>,
}

impl RadioField {
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

    pub fn on_change(
        mut self,
        on_change: impl Fn(&SharedString, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }
}

impl LabeledField for RadioField {
    fn props_mut(&mut self) -> &mut FieldProps {
        &mut self.props
    }
}

impl RenderOnce for RadioField {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let default_value = self.default_value.clone();
        let selected_state = window.use_keyed_state(
            self.id.with_suffix("state:selected"),
            cx,
            move |_window, _cx| default_value,
        );
        let selected = selected_state.read(cx).clone();
        let text_size = cx.get_theme().layout.text.default_font.sizes.body;
        let text_color = cx.get_theme().colors.text.primary;
        let disabled = self.props.disabled;

        let group = div().flex().flex_col().gap(px(10.)).children(
            self.options.iter().enumerate().map(|(ix, option)| {
                let is_selected = selected.as_ref() == Some(&option.value);
                let select = {
                    let selected_state = selected_state.clone();
                    let value = option.value.clone();
                    let on_change = self.on_change.clone();
                    Rc::new(move |window: &mut Window, cx: &mut App| {
                        selected_state.update(cx, |selected, cx| {
                            *selected = Some(value.clone());
                            cx.notify();
                        });
                        if let Some(on_change) = on_change.as_ref() {
                            on_change(&value, window, cx);
                        }
                    })
                };
                let select_from_label = select.clone();

                div()
                    .id(self.id.with_index("row", ix))
                    .flex()
                    .items_center()
                    .gap(px(8.))
                    .child(
                        Radio::new(self.id.with_index("option", ix), self.settings)
                            .selected(is_selected)
                            .disabled(disabled)
                            .on_select(move |window, cx| select(window, cx)),
                    )
                    .child(
                        div()
                            .text_size(text_size)
                            .text_color(text_color)
                            .child(option.label.clone()),
                    )
                    .when(!disabled && !is_selected, |this| {
                        this.cursor_pointer()
                            .on_click(move |_, window, cx| select_from_label(window, cx))
                    })
            }),
        );

        Field::new(self.settings, self.props).child(group)
    }
}
