use gpui::{App, KeyBinding, Window, actions};

use crate::{primitives::input, theme::ThemeExt};

actions!(formsflow, [FocusNext, FocusPrevious]);

/// Registers the key bindings of the text input and tab navigation between fields.
pub fn init(cx: &mut App) {
    input::init(cx);

    cx.on_action(|_: &FocusNext, cx| {
        cx.defer(|cx| {
            let Some(window) = cx.active_window() else {
                return;
            };
            let _ = window.update(cx, |_, window, cx| window.focus_next(cx));
        })
    });
    cx.on_action(|_: &FocusPrevious, cx| {
        cx.defer(|cx| {
            let Some(window) = cx.active_window() else {
                return;
            };
            let _ = window.update(cx, |_, window, cx| window.focus_prev(cx));
        })
    });

    cx.bind_keys([
        KeyBinding::new("tab", FocusNext, None),
        KeyBinding::new("shift-tab", FocusPrevious, None),
    ]);
}

/// Applies the design tokens' base text size to `window`. Call at the top of the root
/// view's render.
pub fn init_for_window(window: &mut Window, cx: &mut App) {
    window.set_rem_size(cx.get_theme().layout.text.base_size);
}
