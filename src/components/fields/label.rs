use gpui::{
    AnyElement, App, FontWeight, IntoElement, ParentElement, RenderOnce, SharedString, Styled,
    Window, div, prelude::FluentBuilder, px,
};
use smallvec::SmallVec;

use crate::theme::{ThemeExt, ThemeSettings};

/// Props every labelled field shares.
#[derive(Debug, Clone, Default)]
pub struct FieldProps {
    pub label: Option<SharedString>,
    pub placeholder: Option<SharedString>,
    pub description: Option<SharedString>,
    pub required: bool,
    pub disabled: bool,
}

/// Builder methods for the shared [`FieldProps`].
pub trait LabeledField: Sized {
    fn props_mut(&mut self) -> &mut FieldProps;

    fn label(mut self, label: impl Into<SharedString>) -> Self {
        self.props_mut().label = Some(label.into());
        self
    }

    fn placeholder(mut self, placeholder: impl Into<SharedString>) -> Self {
        self.props_mut().placeholder = Some(placeholder.into());
        self
    }

    /// Grey helper line under the control.
    fn description(mut self, description: impl Into<SharedString>) -> Self {
        self.props_mut().description = Some(description.into());
        self
    }

    /// Marks the label with a red `*`.
    fn required(mut self, required: bool) -> Self {
        self.props_mut().required = required;
        self
    }

    fn disabled(mut self, disabled: bool) -> Self {
        self.props_mut().disabled = disabled;
        self
    }
}

/// Label, control, description and inline message, stacked.
#[derive(IntoElement)]
pub struct Field {
    settings: ThemeSettings,
    props: FieldProps,
    error: Option<SharedString>,
    children: SmallVec<[AnyElement; 1]>,
}

impl Field {
    pub fn new(settings: ThemeSettings, props: FieldProps) -> Self {
        Self {
            settings,
            props,
            error: None,
            children: SmallVec::new(),
        }
    }

    pub fn error(mut self, error: Option<SharedString>) -> Self {
        self.error = error;
        self
    }
}

impl ParentElement for Field {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl RenderOnce for Field {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.get_theme();
        let label_size = theme.layout.text.default_font.sizes.body;
        let caption_size = theme.layout.text.default_font.sizes.caption;
        let text_color = theme.colors.text.primary;
        let description_color = theme.colors.text.secondary;
        let required_color = theme.colors.status.required;
        let error_color = theme.colors.status.destructive;
        let font_family = self.settings.body_font.family_name();

        div()
            .w_full()
            .flex()
            .flex_col()
            .gap(px(6.))
            .font_family(font_family)
            .when_some(self.props.label, |this, label| {
                this.child(
                    div()
                        .flex()
                        .gap(px(2.))
                        .text_size(label_size)
                        .font_weight(FontWeight::MEDIUM)
                        .text_color(text_color)
                        .child(label)
                        .when(self.props.required, |this| {
                            this.child(div().text_color(required_color).child("*"))
                        }),
                )
            })
            .children(self.children)
            .when_some(self.props.description, |this, description| {
                this.child(
                    div()
                        .text_size(caption_size)
                        .text_color(description_color)
                        .child(description),
                )
            })
            .when_some(self.error, |this, error| {
                this.child(div().text_size(caption_size).text_color(error_color).child(error))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe(FieldProps);

    impl LabeledField for Probe {
        fn props_mut(&mut self) -> &mut FieldProps {
            &mut self.0
        }
    }

    #[test]
    fn builder_methods_fill_props() {
        let Probe(props) = Probe(FieldProps::default())
            .label("Email")
            .placeholder("example@email.com")
            .description("We never share it")
            .required(true);

        assert_eq!(props.label.as_ref().map(|l| l.to_string()), Some("Email".into()));
        assert_eq!(
            props.placeholder.as_ref().map(|p| p.to_string()),
            Some("example@email.com".into())
        );
        assert!(props.description.is_some());
        assert!(props.required);
        assert!(!props.disabled);
    }
}
