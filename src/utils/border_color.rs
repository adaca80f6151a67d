use std::time::Duration;

use gpui::{App, ElementId, Rgba, Window};
use gpui_transitions::Transition;

use crate::{ElementIdExt, conitional_transition, theme::ThemeExt, utils::RgbaExt};

/// What a field control is doing right now, as far as its outline cares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldInteraction {
    pub invalid: bool,
    pub focused: bool,
    pub hovered: bool,
}

impl FieldInteraction {
    /// Outline color for this state, from the design tokens.
    pub fn border_color(&self, cx: &App) -> Rgba {
        let colors = &cx.get_theme().colors;

        if self.invalid {
            colors.status.destructive
        } else if self.focused {
            colors.focus_ring
        } else if self.hovered {
            colors.border.input.mix(colors.text.secondary, 0.35)
        } else {
            colors.border.input
        }
    }
}

/// Animated outline of a field control.
pub fn field_border_color_transition(
    id: &ElementId,
    window: &mut Window,
    cx: &mut App,
    interaction: FieldInteraction,
) -> Transition<Rgba> {
    let color = interaction.border_color(cx);

    conitional_transition!(
        id.with_suffix("state:transition:border_color"),
        window,
        cx,
        Duration::from_millis(300),
        color
    )
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use gpui::TestAppContext;

    #[gpui::test]
    fn invalid_wins_over_focus(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            let colors = cx.get_theme().colors.clone();

            let idle = FieldInteraction::default();
            assert_eq!(idle.border_color(cx), colors.border.input);

            let focused = FieldInteraction {
                focused: true,
                hovered: true,
                ..idle
            };
            assert_eq!(focused.border_color(cx), colors.focus_ring);

            let invalid = FieldInteraction {
                invalid: true,
                ..focused
            };
            assert_eq!(invalid.border_color(cx), colors.status.destructive);
        });
    }
}
