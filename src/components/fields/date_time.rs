use std::rc::Rc;

use chrono::{Datelike, Months, NaiveDate};
use gpui::{
    App, CursorStyle, ElementId, FontWeight, InteractiveElement, IntoElement, MouseButton,
    ParentElement, RenderOnce, SharedString, StatefulInteractiveElement, Styled, Window, div,
    prelude::FluentBuilder, px,
};
use gpui_squircle::{SquircleStyled, squircle};

use super::{Field, FieldProps, LabeledField, ValueChangeHandler};
use crate::{
    ElementIdExt, IconKind,
    components::{Button, ButtonSize, ButtonVariant, Icon},
    primitives::{FocusRing, Popover},
    theme::{ThemeExt, ThemeSettings},
    utils::{FieldInteraction, PixelsExt, field_border_color_transition},
};

pub const DATE_PLACEHOLDER: &str = "Pick a date";

const WEEKDAY_LABELS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// English ordinal suffix of a day of month.
pub fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Long date, e.g. `October 17th, 2026`.
pub fn format_ppp(date: NaiveDate) -> String {
    format!(
        "{} {}{}, {}",
        date.format("%B"),
        date.day(),
        ordinal_suffix(date.day()),
        date.year()
    )
}

/// First day of the month holding `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Days of the month starting at `first`, laid out in Sunday-first weeks.
/// Cells outside the month are `None`.
pub fn month_grid(first: NaiveDate) -> Vec<[Option<NaiveDate>; 7]> {
    let first = month_start(first);
    let leading = first.weekday().num_days_from_sunday() as usize;

    let mut cells: Vec<Option<NaiveDate>> = vec![None; leading];
    cells.extend(
        first
            .iter_days()
            .take_while(|day| day.month() == first.month())
            .map(Some),
    );
    while cells.len() % 7 != 0 {
        cells.push(None);
    }

    cells
        .chunks(7)
        .map(|week| {
            let mut row = [None; 7];
            row.copy_from_slice(week);
            row
        })
        .collect()
}

fn shift_month(month: NaiveDate, forward: bool) -> NaiveDate {
    let shifted = if forward {
        month.checked_add_months(Months::new(1))
    } else {
        month.checked_sub_months(Months::new(1))
    };
    shifted.unwrap_or(month)
}

#[derive(Debug, Clone, Copy)]
struct CalendarState {
    selected: Option<NaiveDate>,
    visible_month: NaiveDate,
    open: bool,
}

/// Date picker with a month calendar popover.
#[derive(IntoElement)]
pub struct DateTimeField {
    id: ElementId,
    settings: ThemeSettings,
    props: FieldProps,
    default_value: Option<NaiveDate>,
    on_change: Option<ValueChangeHandler<NaiveDate>>,
}

impl DateTimeField {
    pub fn new(id: impl Into<ElementId>, settings: ThemeSettings) -> Self {
        Self {
            id: id.into(),
            settings,
            props: FieldProps::default(),
            default_value: None,
            on_change: None,
        }
    }

    pub fn default_value(mut self, date: NaiveDate) -> Self {
        self.default_value = Some(date);
        self
    }

    pub fn on_change(
        mut self,
        on_change: impl Fn(&NaiveDate, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }
}

impl LabeledField for DateTimeField {
    fn props_mut(&mut self) -> &mut FieldProps {
        &mut self.props
    }
}

impl RenderOnce for DateTimeField {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let default_value = self.default_value;
        let calendar_state = window.use_keyed_state(
            self.id.with_suffix("state:calendar"),
            cx,
            move |_window, _cx| CalendarState {
                selected: default_value,
                visible_month: month_start(
                    default_value.unwrap_or_else(|| chrono::Local::now().date_naive()),
                ),
                open: false,
            },
        );
        let state = *calendar_state.read(cx);

        let is_hover_state =
            window.use_keyed_state(self.id.with_suffix("state:hover"), cx, |_window, _cx| false);
        let is_hover = *is_hover_state.read(cx);

        let focus_handle = window
            .use_keyed_state(
                self.id.with_suffix("state:focus_handle"),
                cx,
                |_window, cx| cx.focus_handle().tab_stop(true),
            )
            .read(cx)
            .clone();

        let theme = cx.get_theme();
        let text_color = theme.colors.text.primary;
        let muted_color = theme.colors.text.secondary;
        let background_color = theme.colors.surface.primary;
        let hover_color = theme.colors.surface.tertiary;
        let text_size = theme.layout.text.default_font.sizes.body;
        let caption_size = theme.layout.text.default_font.sizes.caption;
        let line_height = theme.layout.text.default_font.line_height;
        let corner_radius = theme.layout.corner_radii.md;
        let horizontal_padding = theme.layout.padding.md;
        let vertical_padding =
            theme
                .layout
                .size
                .lg
                .padding_needed_for_height(window, text_size, line_height);

        let is_disabled = self.props.disabled;
        let border_color_transition = field_border_color_transition(
            &self.id,
            window,
            cx,
            FieldInteraction {
                invalid: false,
                focused: focus_handle.is_focused(window) || state.open,
                hovered: is_hover,
            },
        );

        let selected_bg = self.settings.button_bg();
        let selected_text = self.settings.button_text();
        let today = chrono::Local::now().date_naive();

        let navigate = |forward: bool| {
            let calendar_state = calendar_state.clone();
            move |_: &gpui::ClickEvent, _window: &mut Window, cx: &mut App| {
                calendar_state.update(cx, |state, cx| {
                    state.visible_month = shift_month(state.visible_month, forward);
                    cx.notify();
                });
            }
        };

        let header = div()
            .flex()
            .items_center()
            .justify_between()
            .pb(px(8.))
            .child(
                Button::new(self.id.with_suffix("prev_month"), self.settings)
                    .variant(ButtonVariant::Ghost)
                    .size(ButtonSize::Icon)
                    .child(Icon::new(IconKind::ChevronLeft).size(px(14.)).color(text_color))
                    .on_click(navigate(false)),
            )
            .child(
                div()
                    .text_size(text_size)
                    .font_weight(FontWeight::MEDIUM)
                    .text_color(text_color)
                    .child(state.visible_month.format("%B %Y").to_string()),
            )
            .child(
                Button::new(self.id.with_suffix("next_month"), self.settings)
                    .variant(ButtonVariant::Ghost)
                    .size(ButtonSize::Icon)
                    .child(Icon::new(IconKind::ChevronRight).size(px(14.)).color(text_color))
                    .on_click(navigate(true)),
            );

        let weekday_row = div().flex().children(WEEKDAY_LABELS.iter().map(|label| {
            div()
                .size(px(32.))
                .flex()
                .items_center()
                .justify_center()
                .text_size(caption_size)
                .text_color(muted_color)
                .child(*label)
        }));

        let weeks = month_grid(state.visible_month)
            .into_iter()
            .enumerate()
            .map(|(week_ix, week)| {
                div().flex().children(week.into_iter().enumerate().map(|(day_ix, day)| {
                    let cell = div()
                        .id(self.id.with_index("day", week_ix * 7 + day_ix))
                        .size(px(32.))
                        .flex()
                        .items_center()
                        .justify_center();
                    let Some(day) = day else {
                        return cell;
                    };
                    let is_selected = state.selected == Some(day);
                    let calendar_state = calendar_state.clone();
                    let on_change = self.on_change.clone();

                    cell.rounded(px(6.))
                        .text_size(text_size)
                        .cursor(CursorStyle::PointingHand)
                        .map(|this| {
                            if is_selected {
                                this.bg(selected_bg).text_color(selected_text)
                            } else {
                                this.text_color(text_color)
                                    .when(day == today, |this| this.bg(hover_color))
                                    .hover(move |this| this.bg(hover_color))
                            }
                        })
                        .child(day.day().to_string())
                        .on_click(move |_, window, cx| {
                            calendar_state.update(cx, |state, cx| {
                                state.selected = Some(day);
                                state.open = false;
                                cx.notify();
                            });
                            if let Some(on_change) = on_change.as_ref() {
                                on_change(&day, window, cx);
                            }
                        })
                }))
            });

        let calendar = Popover::new(self.id.with_suffix("calendar"))
            .open(state.open)
            .width(px(252.))
            .on_dismiss({
                let calendar_state = calendar_state.clone();
                move |_window, cx| {
                    calendar_state.update(cx, |state, cx| {
                        state.open = false;
                        cx.notify();
                    })
                }
            })
            .child(header)
            .child(weekday_row)
            .children(weeks);

        let trigger_text: SharedString = match state.selected {
            Some(date) => format_ppp(date).into(),
            None => self
                .props
                .placeholder
                .clone()
                .unwrap_or_else(|| DATE_PLACEHOLDER.into()),
        };

        let trigger = div()
            .id(self.id.clone())
            .w_full()
            .px(horizontal_padding)
            .py(vertical_padding)
            .flex()
            .items_center()
            .gap(px(8.))
            .text_size(text_size)
            .cursor(if is_disabled {
                CursorStyle::OperationNotAllowed
            } else {
                CursorStyle::PointingHand
            })
            .when(is_disabled, |this| this.opacity(0.5))
            .child(
                FocusRing::new(self.id.with_suffix("focus_ring"), focus_handle.clone())
                    .rounded(corner_radius),
            )
            .child(
                squircle()
                    .absolute_expand()
                    .rounded(corner_radius)
                    .bg(background_color)
                    .border(px(1.))
                    .border_inside()
                    .border_color(*border_color_transition.evaluate(window, cx)),
            )
            .child(Icon::new(IconKind::Calendar).size(px(16.)).color(muted_color))
            .child(
                div()
                    .text_color(if state.selected.is_some() {
                        text_color
                    } else {
                        muted_color
                    })
                    .child(trigger_text),
            )
            .child(calendar)
            .when(!is_disabled, |this| {
                let calendar_state = calendar_state.clone();
                this.on_hover(move |hover, _window, cx| {
                    is_hover_state.update(cx, |this, cx| {
                        *this = *hover;
                        cx.notify();
                    });
                })
                .on_mouse_down(MouseButton::Left, |_, window, _cx| window.prevent_default())
                .on_click(move |_, _window, cx| {
                    calendar_state.update(cx, |state, cx| {
                        state.open = !state.open;
                        cx.notify();
                    });
                })
                .track_focus(&focus_handle)
            });

        Field::new(self.settings, self.props).child(trigger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn formats_long_dates() {
        assert_eq!(format_ppp(date(2026, 10, 17)), "October 17th, 2026");
        assert_eq!(format_ppp(date(2026, 1, 1)), "January 1st, 2026");
    }

    #[test]
    fn ordinal_suffixes() {
        let cases = [
            (1, "st"),
            (2, "nd"),
            (3, "rd"),
            (4, "th"),
            (11, "th"),
            (12, "th"),
            (13, "th"),
            (21, "st"),
            (22, "nd"),
            (23, "rd"),
            (31, "st"),
        ];
        for (day, suffix) in cases {
            assert_eq!(ordinal_suffix(day), suffix, "day {day}");
        }
    }

    #[test]
    fn october_2026_grid_starts_on_thursday() {
        let grid = month_grid(date(2026, 10, 17));
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0][..4], [None, None, None, None]);
        assert_eq!(grid[0][4], Some(date(2026, 10, 1)));
        let days = grid.iter().flatten().flatten().count();
        assert_eq!(days, 31);
    }

    #[test]
    fn month_navigation_wraps_years() {
        assert_eq!(shift_month(date(2026, 12, 1), true), date(2027, 1, 1));
        assert_eq!(shift_month(date(2026, 1, 1), false), date(2025, 12, 1));
    }
}
