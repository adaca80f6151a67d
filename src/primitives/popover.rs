use std::time::Duration;

use gpui::{
    AnyElement, App, ElementId, InteractiveElement, IntoElement, MouseButton, ParentElement,
    Pixels, RenderOnce, Styled, Window, deferred, div, prelude::FluentBuilder, px,
};
use gpui_squircle::{SquircleStyled, squircle};
use smallvec::SmallVec;

use crate::{ElementIdExt, conitional_transition, theme::ThemeExt};

/// Configuration for deferred rendering.
#[derive(Clone, Copy, Debug)]
pub struct DeferredConfig {
    pub enabled: bool,
    /// Higher priority elements are painted later.
    pub priority: Option<usize>,
}

impl Default for DeferredConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            priority: None,
        }
    }
}

/// Components that paint above their siblings, like dropdowns and calendars.
pub trait Deferrable: Sized {
    const DEFAULT_PRIORITY: usize = 0;

    fn deferred_config(&self) -> &DeferredConfig;

    fn deferred_config_mut(&mut self) -> &mut DeferredConfig;

    fn deferred(mut self, enabled: bool) -> Self {
        self.deferred_config_mut().enabled = enabled;
        self
    }

    fn priority(mut self, priority: usize) -> Self {
        self.deferred_config_mut().priority = Some(priority);
        self
    }

    fn apply_deferred(&self, element: impl IntoElement) -> AnyElement {
        let config = self.deferred_config();
        if config.enabled {
            let priority = config.priority.unwrap_or(Self::DEFAULT_PRIORITY);
            deferred(element).priority(priority).into_any_element()
        } else {
            element.into_any_element()
        }
    }
}

type DismissHandler = Box<dyn Fn(&mut Window, &mut App) + 'static>;

/// A floating card anchored below its parent.
///
/// The parent must be `relative` (the default for GPUI divs with children positioned
/// absolutely). Pressing the mouse anywhere outside the card calls `on_dismiss`.
#[derive(IntoElement)]
pub struct Popover {
    id: ElementId,
    open: bool,
    width: Option<Pixels>,
    align_right: bool,
    on_dismiss: Option<DismissHandler>,
    children: SmallVec<[AnyElement; 2]>,
    deferred_config: DeferredConfig,
}

impl Popover {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            open: false,
            width: None,
            align_right: false,
            on_dismiss: None,
            children: SmallVec::new(),
            deferred_config: DeferredConfig::default(),
        }
    }

    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    /// Fixed card width. Without one the card matches its anchor.
    pub fn width(mut self, width: impl Into<Pixels>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn align_right(mut self) -> Self {
        self.align_right = true;
        self
    }

    pub fn on_dismiss(mut self, on_dismiss: impl Fn(&mut Window, &mut App) + 'static) -> Self {
        self.on_dismiss = Some(Box::new(on_dismiss));
        self
    }
}

impl ParentElement for Popover {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl Deferrable for Popover {
    const DEFAULT_PRIORITY: usize = 1;

    fn deferred_config(&self) -> &DeferredConfig {
        &self.deferred_config
    }

    fn deferred_config_mut(&mut self) -> &mut DeferredConfig {
        &mut self.deferred_config
    }
}

impl RenderOnce for Popover {
    fn render(mut self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let children = std::mem::take(&mut self.children);
        let on_dismiss = self.on_dismiss.take();

        let theme = cx.get_theme();
        let background_color = theme.colors.surface.primary;
        let border_color = theme.colors.border.primary;
        let corner_radius = theme.layout.corner_radii.lg;
        let padding = theme.layout.padding.sm;
        let is_open = self.open;

        let visible_transition = conitional_transition!(
            self.id.with_suffix("state:transition:visible"),
            window,
            cx,
            Duration::from_millis(200),
            {
                is_open => 1.,
                _ => 0.
            }
        );
        let visible_delta: f32 = *visible_transition.evaluate(window, cx);

        if !is_open && visible_delta == 0. {
            return div().into_any_element();
        }

        let card = div()
            .id(self.id.clone())
            .absolute()
            .top_full()
            .map(|this| {
                if self.align_right {
                    this.right_0()
                } else {
                    this.left_0()
                }
            })
            .map(|this| match self.width {
                Some(width) => this.w(width),
                None => this.w_full(),
            })
            .mt(px(4.) + px(4.) * (1. - visible_delta))
            .opacity(visible_delta)
            .p(padding)
            .flex()
            .flex_col()
            .occlude()
            .child(
                squircle()
                    .absolute_expand()
                    .rounded(corner_radius)
                    .bg(background_color)
                    .border(px(1.))
                    .border_inside()
                    .border_color(border_color),
            )
            .children(children)
            .when_some(on_dismiss.filter(|_| is_open), |this, on_dismiss| {
                this.on_mouse_down_out(move |_event, window, cx| on_dismiss(window, cx))
            })
            .on_mouse_down(MouseButton::Left, |_event, _window, cx| {
                cx.stop_propagation();
            });

        self.apply_deferred(card)
    }
}
