use std::rc::Rc;

use gpui::{App, ElementId, IntoElement, ParentElement, RenderOnce, SharedString, Window};

use super::{Field, FieldProps, LabeledField, ValueChangeHandler, use_input_state};
use crate::{components::TextInput, theme::ThemeSettings};

/// Single-line text field.
#[derive(IntoElement)]
pub struct TextField {
    id: ElementId,
    settings: ThemeSettings,
    props: FieldProps,
    default_value: Option<SharedString>,
    on_change: Option<ValueChangeHandler<SharedString>>,
}

impl TextField {
    pub fn new(id: impl Into<ElementId>, settings: ThemeSettings) -> Self {
        Self {
            id: id.into(),
            settings,
            props: FieldProps::default(),
            default_value: None,
            on_change: None,
        }
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

impl LabeledField for TextField {
    fn props_mut(&mut self) -> &mut FieldProps {
        &mut self.props
    }
}

impl RenderOnce for TextField {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let state = use_input_state(
            &self.id,
            "text",
            self.default_value.as_ref(),
            false,
            window,
            cx,
        );
        let placeholder = self.props.placeholder.clone().unwrap_or_default();

        Field::new(self.settings, self.props.clone()).child(
            TextInput::new(self.id, self.settings, state)
                .placeholder(placeholder)
                .disabled(self.props.disabled)
                .maybe_on_change(self.on_change),
        )
    }
}

/// Multi-line text field. Shows `rows` lines (4 unless set) and grows with its content.
#[derive(IntoElement)]
pub struct TextAreaField {
    id: ElementId,
    settings: ThemeSettings,
    props: FieldProps,
    rows: usize,
    default_value: Option<SharedString>,
    on_change: Option<ValueChangeHandler<SharedString>>,
}

impl TextAreaField {
    pub const DEFAULT_ROWS: usize = 4;

    pub fn new(id: impl Into<ElementId>, settings: ThemeSettings) -> Self {
        Self {
            id: id.into(),
            settings,
            props: FieldProps::default(),
            rows: Self::DEFAULT_ROWS,
            default_value: None,
            on_change: None,
        }
    }

    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = rows.max(1);
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

impl LabeledField for TextAreaField {
    fn props_mut(&mut self) -> &mut FieldProps {
        &mut self.props
    }
}

impl RenderOnce for TextAreaField {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let state = use_input_state(
            &self.id,
            "textarea",
            self.default_value.as_ref(),
            true,
            window,
            cx,
        );
        let placeholder = self.props.placeholder.clone().unwrap_or_default();

        Field::new(self.settings, self.props.clone()).child(
            TextInput::new(self.id, self.settings, state)
                .rows(self.rows)
                .placeholder(placeholder)
                .disabled(self.props.disabled)
                .maybe_on_change(self.on_change),
        )
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::theme::{Theme, ThemeExt};
    use gpui::{TestAppContext, VisualTestContext, div, prelude::*};

    struct TextFieldsView {
        last: Option<SharedString>,
    }

    impl gpui::Render for TextFieldsView {
        fn render(
            &mut self,
            _window: &mut Window,
            cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            div()
                .size_full()
                .child(
                    TextField::new("name", ThemeSettings::DEFAULT)
                        .label("Full Name")
                        .placeholder("Enter your name")
                        .required(true)
                        .default_value("Ada")
                        .on_change(cx.listener(|view, value: &SharedString, _window, cx| {
                            view.last = Some(value.clone());
                            cx.notify();
                        })),
                )
                .child(
                    TextAreaField::new("bio", ThemeSettings::DEFAULT)
                        .label("Bio")
                        .description("A few sentences"),
                )
        }
    }

    #[gpui::test]
    fn text_fields_render(cx: &mut TestAppContext) {
        cx.update(|cx| cx.set_theme(Theme::DEFAULT));
        let window = cx.add_window(|_window, _cx| TextFieldsView { last: None });
        let view = window.root(cx).expect("window root");
        let mut cx = VisualTestContext::from_window(window.into(), cx);
        cx.run_until_parked();

        view.read_with(&cx, |view, _| assert!(view.last.is_none()));
    }

    #[test]
    fn textarea_defaults_to_four_rows() {
        let field = TextAreaField::new("bio", ThemeSettings::DEFAULT);
        assert_eq!(field.rows, 4);
        assert_eq!(field.rows(0).rows, 1);
    }
}
