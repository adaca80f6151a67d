use std::rc::Rc;

use chrono::NaiveTime;
use gpui::{App, ElementId, IntoElement, ParentElement, RenderOnce, SharedString, Window};

use super::{Field, FieldProps, LabeledField, ValueChangeHandler, use_input_state};
use crate::{components::TextInput, theme::ThemeSettings};

pub const TIME_PLACEHOLDER: &str = "HH:MM";
const TIME_MESSAGE: &str = "Please enter a valid time (HH:MM, 24-hour)";

/// Parses a 24-hour `H:MM` or `HH:MM` time.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let (hours, minutes) = value.trim().split_once(':')?;
    let digits = |part: &str, max_len: usize| {
        !part.is_empty() && part.len() <= max_len && part.chars().all(|c| c.is_ascii_digit())
    };
    if !digits(hours, 2) || !digits(minutes, 2) || minutes.len() != 2 {
        return None;
    }
    NaiveTime::from_hms_opt(hours.parse().ok()?, minutes.parse().ok()?, 0)
}

/// `HH:MM` input, checked once the user has left it.
#[derive(IntoElement)]
pub struct TimeField {
    id: ElementId,
    settings: ThemeSettings,
    props: FieldProps,
    default_value: Option<SharedString>,
    on_change: Option<ValueChangeHandler<SharedString>>,
}

impl TimeField {
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

impl LabeledField for TimeField {
    fn props_mut(&mut self) -> &mut FieldProps {
        &mut self.props
    }
}

impl RenderOnce for TimeField {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let state =
            use_input_state(&self.id, "time", self.default_value.as_ref(), false, window, cx);
        let invalid = {
            let state = state.read(cx);
            state.touched() && !state.is_empty() && parse_time(state.text()).is_none()
        };
        let placeholder = self
            .props
            .placeholder
            .clone()
            .unwrap_or_else(|| TIME_PLACEHOLDER.into());

        Field::new(self.settings, self.props.clone())
            .error(invalid.then(|| TIME_MESSAGE.into()))
            .child(
                TextInput::new(self.id, self.settings, state)
                    .placeholder(placeholder)
                    .invalid(invalid)
                    .disabled(self.props.disabled)
                    .maybe_on_change(self.on_change),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_24_hour_times() {
        assert_eq!(parse_time("09:30"), NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(parse_time("9:05"), NaiveTime::from_hms_opt(9, 5, 0));
        assert_eq!(parse_time("23:59"), NaiveTime::from_hms_opt(23, 59, 0));
        assert_eq!(parse_time(" 00:00 "), NaiveTime::from_hms_opt(0, 0, 0));
    }

    #[test]
    fn rejects_out_of_range_and_malformed() {
        for value in ["24:00", "12:60", "12:5", "1230", "ab:cd", "123:00", ":30", ""] {
            assert_eq!(parse_time(value), None, "{value:?}");
        }
    }
}
