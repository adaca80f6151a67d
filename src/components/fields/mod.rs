//! Form fields of the gallery.
//!
//! Every field takes the current [`ThemeSettings`](crate::theme::ThemeSettings) in its
//! constructor and keeps its own value in keyed state, reporting edits through an
//! optional `on_change` callback.

use gpui::{App, ElementId, Entity, SharedString, Window};

use crate::{ElementIdExt, primitives::input::InputState};

mod label;
pub use label::*;

mod text;
pub use text::*;

mod number;
pub use number::*;

mod password;
pub use password::*;

mod checkbox_field;
pub use checkbox_field::*;

mod select;
pub use select::*;

mod radio_field;
pub use radio_field::*;

mod button_field;
pub use button_field::*;

mod validated;
pub use validated::*;

mod date_time;
pub use date_time::*;

mod day;
pub use day::*;

mod time;
pub use time::*;

mod currency;
pub use currency::*;

mod tags;
pub use tags::*;

mod address;
pub use address::*;

mod signature;
pub use signature::*;

mod survey;
pub use survey::*;

mod file;
pub use file::*;

mod hidden;
pub use hidden::*;

mod data_grid;
pub use data_grid::*;

mod content;
pub use content::*;

pub(crate) type ValueChangeHandler<T> = std::rc::Rc<dyn Fn(&T, &mut Window, &mut App) + 'static>;

/// The text state of a field control, created on first render with `initial`.
pub(crate) fn use_input_state(
    id: &ElementId,
    suffix: &str,
    initial: Option<&SharedString>,
    multiline: bool,
    window: &mut Window,
    cx: &mut App,
) -> Entity<InputState> {
    let initial = initial.map(|value| value.to_string()).unwrap_or_default();
    window.use_keyed_state(
        id.with_suffix(format!("state:input:{suffix}")),
        cx,
        move |window, cx| {
            InputState::new(window, cx)
                .multiline(multiline)
                .with_value(initial)
        },
    )
}
