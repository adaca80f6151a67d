use std::rc::Rc;

use gpui::{
    App, ElementId, IntoElement, ParentElement, RenderOnce, SharedString, Styled, Window, div, px,
};

use super::{Field, FieldProps, LabeledField, ValueChangeHandler, use_input_state};
use crate::{
    ElementIdExt,
    components::TextInput,
    theme::ThemeSettings,
};

/// The parts of a postal address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressPart {
    Street,
    City,
    State,
    Zip,
    Country,
}

impl AddressPart {
    pub const ALL: [AddressPart; 5] = [
        AddressPart::Street,
        AddressPart::City,
        AddressPart::State,
        AddressPart::Zip,
        AddressPart::Country,
    ];

    pub fn placeholder(&self) -> &'static str {
        match self {
            AddressPart::Street => "123 Main St",
            AddressPart::City => "City",
            AddressPart::State => "State",
            AddressPart::Zip => "12345",
            AddressPart::Country => "Country",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            AddressPart::Street => "street",
            AddressPart::City => "city",
            AddressPart::State => "state",
            AddressPart::Zip => "zip",
            AddressPart::Country => "country",
        }
    }
}

/// Street, city, state, zip and country inputs. `on_change` reports which part
/// changed and its new text.
#[derive(IntoElement)]
pub struct AddressField {
    id: ElementId,
    settings: ThemeSettings,
    props: FieldProps,
    on_change: Option<ValueChangeHandler<(AddressPart, SharedString)>>,
}

impl AddressField {
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
        on_change: impl Fn(&(AddressPart, SharedString), &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }

    fn input(&self, part: AddressPart, window: &mut Window, cx: &mut App) -> TextInput {
        let state = use_input_state(&self.id, part.key(), None, false, window, cx);
        let on_change = self.on_change.clone();

        TextInput::new(self.id.with_suffix(part.key()), self.settings, state)
            .placeholder(part.placeholder())
            .disabled(self.props.disabled)
            .on_change(move |text, window, cx| {
                if let Some(on_change) = on_change.as_ref() {
                    on_change(&(part, text.clone()), window, cx);
                }
            })
    }
}

impl LabeledField for AddressField {
    fn props_mut(&mut self) -> &mut FieldProps {
        &mut self.props
    }
}

impl RenderOnce for AddressField {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let [street, city, state, zip, country] =
            AddressPart::ALL.map(|part| self.input(part, window, cx));

        let body = div()
            .flex()
            .flex_col()
            .gap(px(8.))
            .child(street)
            .child(
                div()
                    .flex()
                    .gap(px(8.))
                    .child(div().flex_1().child(city))
                    .child(div().flex_1().child(state)),
            )
            .child(
                div()
                    .flex()
                    .gap(px(8.))
                    .child(div().flex_1().child(zip))
                    .child(div().flex_1().child(country)),
            );

        Field::new(self.settings, self.props).child(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_follow_postal_order() {
        let placeholders = AddressPart::ALL.map(|part| part.placeholder());
        assert_eq!(placeholders, ["123 Main St", "City", "State", "12345", "Country"]);
    }
}
