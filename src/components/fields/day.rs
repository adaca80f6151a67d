use std::rc::Rc;

use chrono::NaiveDate;
use gpui::{
    App, ElementId, Entity, IntoElement, ParentElement, RenderOnce, SharedString, Styled, Window,
    div, px,
};

use super::{Field, FieldProps, LabeledField, ValueChangeHandler, use_input_state};
use crate::{
    ElementIdExt,
    components::TextInput,
    primitives::input::InputState,
    theme::{ThemeExt, ThemeSettings},
};

/// The three parts of a [`DayField`], as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayParts {
    pub month: SharedString,
    pub day: SharedString,
    pub year: SharedString,
}

impl DayParts {
    /// The calendar date, when all three parts name a real one.
    pub fn to_date(&self) -> Option<NaiveDate> {
        let month = self.month.trim().parse().ok()?;
        let day = self.day.trim().parse().ok()?;
        let year = self.year.trim().parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// Month, day and year inputs side by side.
#[derive(IntoElement)]
pub struct DayField {
    id: ElementId,
    settings: ThemeSettings,
    props: FieldProps,
    on_change: Option<ValueChangeHandler<DayParts>>,
}

impl DayField {
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
        on_change: impl Fn(&DayParts, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }
}

impl LabeledField for DayField {
    fn props_mut(&mut self) -> &mut FieldProps {
        &mut self.props
    }
}

impl RenderOnce for DayField {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let month = use_input_state(&self.id, "month", None, false, window, cx);
        let day = use_input_state(&self.id, "day", None, false, window, cx);
        let year = use_input_state(&self.id, "year", None, false, window, cx);

        let caption_size = cx.get_theme().layout.text.default_font.sizes.caption;
        let caption_color = cx.get_theme().colors.text.secondary;

        let report = {
            let (month, day, year) = (month.clone(), day.clone(), year.clone());
            let on_change = self.on_change.clone();
            Rc::new(move |window: &mut Window, cx: &mut App| {
                let Some(on_change) = on_change.as_ref() else {
                    return;
                };
                let parts = DayParts {
                    month: month.read(cx).value(),
                    day: day.read(cx).value(),
                    year: year.read(cx).value(),
                };
                on_change(&parts, window, cx);
            })
        };

        let part = |suffix: &'static str,
                    caption: &'static str,
                    placeholder: &'static str,
                    state: Entity<InputState>,
                    width: f32| {
            let report = report.clone();
            div()
                .w(px(width))
                .flex()
                .flex_col()
                .gap(px(4.))
                .child(
                    div()
                        .text_size(caption_size)
                        .text_color(caption_color)
                        .child(caption),
                )
                .child(
                    TextInput::new(self.id.with_suffix(suffix), self.settings, state)
                    .placeholder(placeholder)
                    .disabled(self.props.disabled)
                    .on_change(move |_, window, cx| report(window, cx)),
                )
        };

        let row = div()
            .flex()
            .gap(px(8.))
            .child(part("month", "Month", "MM", month, 72.))
            .child(part("day", "Day", "DD", day, 72.))
            .child(part("year", "Year", "YYYY", year, 96.));

        Field::new(self.settings, self.props.clone()).child(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(month: &str, day: &str, year: &str) -> DayParts {
        DayParts {
            month: month.to_string().into(),
            day: day.to_string().into(),
            year: year.to_string().into(),
        }
    }

    #[test]
    fn assembles_real_dates_only() {
        assert_eq!(
            parts("10", "17", "2026").to_date(),
            NaiveDate::from_ymd_opt(2026, 10, 17)
        );
        assert_eq!(parts(" 2 ", "29", "2024").to_date(), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(parts("2", "29", "2026").to_date(), None);
        assert_eq!(parts("", "1", "2026").to_date(), None);
        assert_eq!(parts("13", "1", "2026").to_date(), None);
    }
}
