use std::rc::Rc;

use gpui::{
    App, ElementId, IntoElement, ParentElement, RenderOnce, SharedString, Styled, Window, div, px,
};

use super::{Field, FieldProps, LabeledField, ValueChangeHandler, use_input_state};
use crate::{
    ElementIdExt, IconKind,
    components::{Button, ButtonSize, ButtonVariant, Icon, TextInput},
    theme::{ThemeExt, ThemeSettings},
};

/// Bounds and increment of a numeric input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: f64,
}

impl Default for NumberRange {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            step: 1.,
        }
    }
}

impl NumberRange {
    pub fn clamp(&self, value: f64) -> f64 {
        let value = self.min.map_or(value, |min| value.max(min));
        self.max.map_or(value, |max| value.min(max))
    }

    /// Moves `current` by one step in `direction` (`1` or `-1`). An empty or
    /// unparsable input starts from the minimum, or zero.
    pub fn step_from(&self, current: Option<f64>, direction: i8) -> f64 {
        let base = current.unwrap_or_else(|| self.min.unwrap_or(0.));
        let stepped = base + self.step * f64::from(direction.signum());
        // Snap to the step's precision so 0.1 + 0.2 shows as 0.3.
        let scale = 10f64.powi(self.decimals() as i32);
        self.clamp((stepped * scale).round() / scale)
    }

    /// Decimal places of the step, e.g. 2 for `0.01`.
    pub fn decimals(&self) -> usize {
        let text = format!("{}", self.step);
        text.split_once('.').map_or(0, |(_, fraction)| fraction.len())
    }

    pub fn format(&self, value: f64) -> String {
        format!("{:.*}", self.decimals(), value)
    }
}

/// Parses user input, ignoring surrounding whitespace and thousands separators.
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Numeric field with − / + steppers clamped to the range.
#[derive(IntoElement)]
pub struct NumberField {
    id: ElementId,
    settings: ThemeSettings,
    props: FieldProps,
    range: NumberRange,
    default_value: Option<f64>,
    on_change: Option<ValueChangeHandler<f64>>,
}

impl NumberField {
    pub fn new(id: impl Into<ElementId>, settings: ThemeSettings) -> Self {
        Self {
            id: id.into(),
            settings,
            props: FieldProps::default(),
            range: NumberRange::default(),
            default_value: None,
            on_change: None,
        }
    }

    pub fn min(mut self, min: f64) -> Self {
        self.range.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.range.max = Some(max);
        self
    }

    pub fn step(mut self, step: f64) -> Self {
        if step > 0. {
            self.range.step = step;
        }
        self
    }

    pub fn default_value(mut self, value: f64) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Called with every parsable value the user enters or steps to.
    pub fn on_change(mut self, on_change: impl Fn(&f64, &mut Window, &mut App) + 'static) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }
}

impl LabeledField for NumberField {
    fn props_mut(&mut self) -> &mut FieldProps {
        &mut self.props
    }
}

impl RenderOnce for NumberField {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let range = self.range;
        let initial = self
            .default_value
            .map(|value| SharedString::from(range.format(value)));
        let state = use_input_state(&self.id, "number", initial.as_ref(), false, window, cx);
        let placeholder = self.props.placeholder.clone().unwrap_or_default();
        let icon_color = cx.get_theme().colors.text.secondary;
        let disabled = self.props.disabled;

        let stepper = |direction: i8| {
            let state = state.clone();
            let on_change = self.on_change.clone();
            move |_: &gpui::ClickEvent, window: &mut Window, cx: &mut App| {
                let current = parse_number(state.read(cx).text());
                let next = range.step_from(current, direction);
                state.update(cx, |state, cx| state.set_value(range.format(next), cx));
                if let Some(on_change) = on_change.as_ref() {
                    on_change(&next, window, cx);
                }
            }
        };

        let decrement = Button::new(self.id.with_suffix("decrement"), self.settings)
            .variant(ButtonVariant::Ghost)
            .size(ButtonSize::Icon)
            .disabled(disabled)
            .on_click(stepper(-1))
            .child(Icon::new(IconKind::Minus).size(px(14.)).color(icon_color));
        let increment = Button::new(self.id.with_suffix("increment"), self.settings)
            .variant(ButtonVariant::Ghost)
            .size(ButtonSize::Icon)
            .disabled(disabled)
            .on_click(stepper(1))
            .child(Icon::new(IconKind::Plus).size(px(14.)).color(icon_color));

        let on_change = self.on_change.clone();

        Field::new(self.settings, self.props.clone()).child(
            div()
                .w_full()
                .flex()
                .items_center()
                .gap(px(4.))
                .child(decrement)
                .child(
                    TextInput::new(self.id.clone(), self.settings, state.clone())
                        .placeholder(placeholder)
                        .disabled(disabled)
                        .on_change(move |text, window, cx| {
                            let Some(value) = parse_number(text) else {
                                return;
                            };
                            if let Some(on_change) = on_change.as_ref() {
                                on_change(&range.clamp(value), window, cx);
                            }
                        }),
                )
                .child(increment),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_clamp_to_range() {
        let range = NumberRange {
            min: Some(0.),
            max: Some(10.),
            step: 1.,
        };
        assert_eq!(range.step_from(Some(9.), 1), 10.);
        assert_eq!(range.step_from(Some(10.), 1), 10.);
        assert_eq!(range.step_from(Some(0.), -1), 0.);
        assert_eq!(range.step_from(None, 1), 1.);
    }

    #[test]
    fn fractional_steps_snap_to_precision() {
        let range = NumberRange {
            step: 0.1,
            ..NumberRange::default()
        };
        assert_eq!(range.decimals(), 1);
        assert_eq!(range.format(range.step_from(Some(0.2), 1)), "0.3");

        let cents = NumberRange {
            step: 0.01,
            ..NumberRange::default()
        };
        assert_eq!(cents.format(12.5), "12.50");
    }

    #[test]
    fn parses_loose_numbers() {
        assert_eq!(parse_number(" 1,250.5 "), Some(1250.5));
        assert_eq!(parse_number("-3"), Some(-3.));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("inf"), None);
    }
}
