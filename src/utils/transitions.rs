use std::time::Duration;

use gpui::{App, ElementId, Window, ease_out_quint};
use gpui_transitions::{Transition, WindowUseTransition};

use crate::ElementIdExt;

/// Keyed transition towards the first matching branch.
///
/// ```ignore
/// conitional_transition!(id, window, cx, Duration::from_millis(300), {
///     is_focus => focus_color,
///     is_hover => hover_color,
///     _ => color
/// })
/// ```
#[macro_export]
macro_rules! conitional_transition {
    (
        $id:expr, $window:expr, $cx:expr, $duration:expr, $($rest:tt)+
    ) => {{
        use gpui_transitions::{WindowUseTransition};

        let value = $crate::conditional_transition_branches!(@condition [ $($rest)+ ]);

        let transition = $window.use_keyed_transition(
            $id,
            $cx,
            $duration,
            |_window, _cx| value,
        )
        .with_easing(gpui::ease_out_quint());

        let value = value.into();

        if transition.read_goal($cx) != &value {
            transition.update($cx, |this, _cx| *this = value);
            $cx.notify(transition.entity_id());
        }

        transition
    }};
}

#[macro_export]
macro_rules! conditional_transition_branches {
    // Default branch wasn't last.
    (@branch_list [ _ => $value:expr, $($rest:tt)+ ]) => {{
        compile_error!("`_ => value` is only allowed on the last branch.");
    }};

    // Entry point.
    (@condition [ { $cond:expr => $value:expr, $($rest:tt)+ } ]) => {{
        if $cond {
            $value
        } else {
            $crate::conditional_transition_branches!(@branch_list [ $($rest)+ ])
        }
    }};

    (@branch_list [ $cond:expr => $value:expr, $($rest:tt)+ ]) => {{
        if $cond {
            $value
        } else {
            $crate::conditional_transition_branches!(@branch_list [ $($rest)+ ])
        }
    }};

    // Last branch.
    (@branch_list [ _ => $value:expr ]) => {{
        $value
    }};

    // Last branch wasn't default.
    (@branch_list [ $cond:expr => $value:expr ]) => {{
        compile_error!("The last branch must be `_ => value`");
    }};

    // A plain value.
    (@condition [ $($rest:tt)+ ]) => {{
        $($rest)+
    }};
}

/// Opacity of a control, dimmed to 0.5 while disabled.
pub fn disabled_transition(
    base_id: impl Into<ElementId>,
    window: &mut Window,
    cx: &mut App,
    is_disabled: bool,
) -> Transition<f32> {
    conitional_transition!(
        base_id.into().with_suffix("state:transition:disabled"),
        window,
        cx,
        Duration::from_millis(250),
        {
            is_disabled => 0.5,
            _ => 1.
        }
    )
}

/// 0 when unchecked, 1 when checked.
pub fn checked_transition(
    base_id: impl Into<ElementId>,
    window: &mut Window,
    cx: &mut App,
    duration: Duration,
    is_checked: bool,
) -> Transition<f32> {
    let goal = is_checked as u8 as f32;

    let transition = window
        .use_keyed_transition(
            base_id.into().with_suffix("state:transition:checked"),
            cx,
            duration,
            |_window, _cx| goal,
        )
        .with_easing(ease_out_quint());

    transition.update(cx, |this, cx| {
        if *this != goal {
            *this = goal;
            cx.notify();
        }
    });

    transition
}
