use std::rc::Rc;

use gpui::{
    App, ElementId, IntoElement, ParentElement, RenderOnce, SharedString, Styled, Window, div,
};

use super::{
    Field, FieldProps, LabeledField, NumberRange, ValueChangeHandler, parse_number,
    use_input_state,
};
use crate::{
    components::TextInput,
    theme::{ThemeExt, ThemeSettings},
};

pub const CURRENCY_PLACEHOLDER: &str = "0.00";

/// Amount input with a currency symbol in front.
#[derive(IntoElement)]
pub struct CurrencyField {
    id: ElementId,
    settings: ThemeSettings,
    props: FieldProps,
    currency: SharedString,
    range: NumberRange,
    on_change: Option<ValueChangeHandler<f64>>,
}

impl CurrencyField {
    pub fn new(id: impl Into<ElementId>, settings: ThemeSettings) -> Self {
        Self {
            id: id.into(),
            settings,
            props: FieldProps::default(),
            currency: "$".into(),
            range: NumberRange {
                min: None,
                max: None,
                step: 0.01,
            },
            on_change: None,
        }
    }

    pub fn currency(mut self, symbol: impl Into<SharedString>) -> Self {
        self.currency = symbol.into();
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.range.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.range.max = Some(max);
        self
    }

    pub fn on_change(mut self, on_change: impl Fn(&f64, &mut Window, &mut App) + 'static) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }
}

impl LabeledField for CurrencyField {
    fn props_mut(&mut self) -> &mut FieldProps {
        &mut self.props
    }
}

impl RenderOnce for CurrencyField {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let state = use_input_state(&self.id, "amount", None, false, window, cx);
        let symbol_color = cx.get_theme().colors.text.secondary;
        let placeholder = self
            .props
            .placeholder
            .clone()
            .unwrap_or_else(|| CURRENCY_PLACEHOLDER.into());
        let range = self.range;
        let on_change = self.on_change.clone();

        Field::new(self.settings, self.props.clone()).child(
            TextInput::new(self.id, self.settings, state)
                .placeholder(placeholder)
                .disabled(self.props.disabled)
                .prefix(div().text_color(symbol_color).child(self.currency))
                .on_change(move |text, window, cx| {
                    let Some(amount) = parse_number(text) else {
                        return;
                    };
                    if let Some(on_change) = on_change.as_ref() {
                        on_change(&range.clamp(amount), window, cx);
                    }
                }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeSettings;

    #[test]
    fn defaults_to_dollars_in_cents() {
        let field = CurrencyField::new("amount", ThemeSettings::DEFAULT);
        assert_eq!(field.currency.as_ref(), "$");
        assert_eq!(field.range.decimals(), 2);
        assert_eq!(field.range.format(5.), "5.00");
    }

    #[test]
    fn symbol_is_configurable() {
        let field = CurrencyField::new("amount", ThemeSettings::DEFAULT).currency("€");
        assert_eq!(field.currency.as_ref(), "€");
    }
}
