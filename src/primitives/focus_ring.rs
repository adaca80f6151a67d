use std::time::Duration;

use gpui::{
    App, CornersRefinement, ElementId, FocusHandle, IntoElement, Pixels, RenderOnce, Rgba,
    Window, prelude::*, px,
};
use gpui_squircle::{SquircleStyleRefinement, SquircleStyled, squircle};

use crate::{conitional_transition, theme::ThemeExt, utils::RgbaExt};

const SIZE_SCALE_FACTOR: f32 = 6.;

/// Keyboard focus halo drawn around a control.
///
/// The ring grows in from a larger inset and fades in while the handle is focused.
/// Mouse presses on the owning control should call `window.prevent_default()` so
/// that only keyboard focus shows it.
#[derive(IntoElement)]
pub struct FocusRing {
    id: ElementId,
    focus_handle: FocusHandle,
    color: Option<Rgba>,
    style: SquircleStyleRefinement,
}

impl FocusRing {
    pub fn new(id: impl Into<ElementId>, focus_handle: FocusHandle) -> Self {
        Self {
            id: id.into(),
            focus_handle,
            color: None,
            style: SquircleStyleRefinement::default(),
        }
    }

    /// Overrides the design-token focus color, e.g. with the destructive color on
    /// invalid fields.
    pub fn color(mut self, color: impl Into<Rgba>) -> Self {
        self.color = Some(color.into());
        self
    }
}

impl SquircleStyled for FocusRing {
    fn style(&mut self) -> &mut gpui::StyleRefinement {
        &mut self.style.inner
    }

    fn outer_style(&mut self) -> &mut SquircleStyleRefinement {
        &mut self.style
    }
}

impl RenderOnce for FocusRing {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let color = self
            .color
            .unwrap_or_else(|| cx.get_theme().colors.focus_ring);
        let is_focused = self.focus_handle.is_focused(window);

        let progress = conitional_transition!(
            self.id.clone(),
            window,
            cx,
            Duration::from_millis(365),
            {
                is_focused => 1.,
                _ => 0.
            }
        );
        let delta: f32 = *progress.evaluate(window, cx);
        let size_factor = (1. - delta) * SIZE_SCALE_FACTOR;

        squircle()
            .absolute()
            .top_0()
            .bottom_0()
            .left_0()
            .right_0()
            .border(px(3.))
            .border_outside()
            .inset(px(-size_factor))
            .border_color(color.alpha(delta * 0.35))
            .map(|mut this| {
                this.outer_style().corner_radii =
                    grow_corner_radii(&self.style.corner_radii, px(6.), px(size_factor + 1.));
                this
            })
    }
}

fn grow_corner_radii(
    corner_radii: &CornersRefinement<Pixels>,
    default: Pixels,
    by: Pixels,
) -> CornersRefinement<Pixels> {
    CornersRefinement {
        top_left: Some(corner_radii.top_left.unwrap_or(default) + by),
        top_right: Some(corner_radii.top_right.unwrap_or(default) + by),
        bottom_right: Some(corner_radii.bottom_right.unwrap_or(default) + by),
        bottom_left: Some(corner_radii.bottom_left.unwrap_or(default) + by),
    }
}
