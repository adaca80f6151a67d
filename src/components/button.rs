use std::time::Duration;

use gpui::{
    AnyElement, App, ClickEvent, CursorStyle, ElementId, FontWeight, InteractiveElement,
    IntoElement, MouseButton, ParentElement, Pixels, RenderOnce, Rgba, SharedString,
    StatefulInteractiveElement, Styled, Window, div, prelude::FluentBuilder, px, rgba,
};
use gpui_squircle::{SquircleStyled, squircle};
use smallvec::SmallVec;

use crate::{
    conitional_transition,
    primitives::FocusRing,
    theme::{ThemeColors, ThemeExt, ThemeSettings},
    utils::{ElementIdExt, RgbaExt, disabled_transition},
};

type ClickHandler = Box<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    /// Filled with the button color from the settings.
    #[default]
    Default,
    Destructive,
    Outline,
    Secondary,
    Ghost,
    Link,
}

impl ButtonVariant {
    pub const ALL: [ButtonVariant; 6] = [
        ButtonVariant::Default,
        ButtonVariant::Destructive,
        ButtonVariant::Outline,
        ButtonVariant::Secondary,
        ButtonVariant::Ghost,
        ButtonVariant::Link,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ButtonVariant::Default => "Default",
            ButtonVariant::Destructive => "Destructive",
            ButtonVariant::Outline => "Outline",
            ButtonVariant::Secondary => "Secondary",
            ButtonVariant::Ghost => "Ghost",
            ButtonVariant::Link => "Link",
        }
    }

    /// Resolves the variant against the current settings and design tokens.
    pub fn colors(&self, settings: &ThemeSettings, tokens: &ThemeColors) -> ButtonColors {
        let transparent = rgba(0x00000000);
        let black = rgba(0x000000ff);

        match self {
            ButtonVariant::Default => ButtonColors {
                bg: settings.button_bg(),
                hover_bg: settings.button_hover_bg(),
                pressed_bg: settings.button_pressed_bg(),
                text: settings.button_text(),
                border: None,
                underline_on_hover: false,
            },
            ButtonVariant::Destructive => ButtonColors {
                bg: tokens.status.destructive,
                hover_bg: tokens.status.destructive.mix(black, 0.2),
                pressed_bg: tokens.status.destructive.mix(black, 0.3),
                text: rgba(0xffffffff),
                border: None,
                underline_on_hover: false,
            },
            ButtonVariant::Outline => ButtonColors {
                bg: tokens.surface.primary,
                hover_bg: tokens.surface.secondary,
                pressed_bg: tokens.surface.tertiary,
                text: tokens.text.primary,
                border: Some(tokens.border.input),
                underline_on_hover: false,
            },
            ButtonVariant::Secondary => ButtonColors {
                bg: tokens.surface.tertiary,
                hover_bg: tokens.surface.tertiary.mix(black, 0.04),
                pressed_bg: tokens.surface.tertiary.mix(black, 0.08),
                text: tokens.text.primary,
                border: None,
                underline_on_hover: false,
            },
            ButtonVariant::Ghost => ButtonColors {
                bg: transparent,
                hover_bg: tokens.surface.tertiary,
                pressed_bg: tokens.surface.tertiary.mix(black, 0.04),
                text: tokens.text.primary,
                border: None,
                underline_on_hover: false,
            },
            ButtonVariant::Link => ButtonColors {
                bg: transparent,
                hover_bg: transparent,
                pressed_bg: transparent,
                text: settings.button_bg(),
                border: None,
                underline_on_hover: true,
            },
        }
    }
}

/// Concrete colors of a button variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonColors {
    pub bg: Rgba,
    pub hover_bg: Rgba,
    pub pressed_bg: Rgba,
    pub text: Rgba,
    pub border: Option<Rgba>,
    pub underline_on_hover: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonSize {
    #[default]
    Default,
    Sm,
    Lg,
    /// Square, for a lone icon.
    Icon,
}

impl ButtonSize {
    pub const ALL: [ButtonSize; 4] = [
        ButtonSize::Default,
        ButtonSize::Sm,
        ButtonSize::Lg,
        ButtonSize::Icon,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ButtonSize::Default => "Default",
            ButtonSize::Sm => "Small",
            ButtonSize::Lg => "Large",
            ButtonSize::Icon => "Icon",
        }
    }

    /// Height and horizontal padding.
    fn metrics(&self) -> (Pixels, Pixels) {
        match self {
            ButtonSize::Default => (px(36.), px(16.)),
            ButtonSize::Sm => (px(32.), px(12.)),
            ButtonSize::Lg => (px(40.), px(32.)),
            ButtonSize::Icon => (px(36.), px(0.)),
        }
    }
}

/// A clickable button styled from the customization settings.
#[derive(IntoElement)]
pub struct Button {
    id: ElementId,
    settings: ThemeSettings,
    label: Option<SharedString>,
    variant: ButtonVariant,
    size: ButtonSize,
    disabled: bool,
    full_width: bool,
    on_click: Option<ClickHandler>,
    children: SmallVec<[AnyElement; 2]>,
}

impl Button {
    pub fn new(id: impl Into<ElementId>, settings: ThemeSettings) -> Self {
        Self {
            id: id.into(),
            settings,
            label: None,
            variant: ButtonVariant::Default,
            size: ButtonSize::Default,
            disabled: false,
            full_width: false,
            on_click: None,
            children: SmallVec::new(),
        }
    }

    pub fn label(mut self, label: impl Into<SharedString>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn full_width(mut self) -> Self {
        self.full_width = true;
        self
    }

    pub fn on_click(
        mut self,
        on_click: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_click = Some(Box::new(on_click));
        self
    }
}

impl ParentElement for Button {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl RenderOnce for Button {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.get_theme();
        let colors = self.variant.colors(&self.settings, &theme.colors);
        let text_size = theme.layout.text.default_font.sizes.body;
        let corner_radius = self.settings.button_radius();
        let (height, horizontal_padding) = self.size.metrics();
        let font_family = self.settings.body_font.family_name();

        let is_hover_state =
            window.use_keyed_state(self.id.with_suffix("state:hover"), cx, |_window, _cx| false);
        let is_hover = *is_hover_state.read(cx);

        let is_click_down_state = window.use_keyed_state(
            self.id.with_suffix("state:click_down"),
            cx,
            |_window, _cx| false,
        );
        let is_click_down = *is_click_down_state.read(cx);

        let focus_handle = window
            .use_keyed_state(
                self.id.with_suffix("state:focus_handle"),
                cx,
                |_window, cx| cx.focus_handle().tab_stop(true),
            )
            .read(cx)
            .clone();
        let is_focus = focus_handle.is_focused(window);

        let is_disabled = self.disabled;
        let disabled_transition = disabled_transition(self.id.clone(), window, cx, is_disabled);

        if is_focus && is_disabled {
            window.blur();
        }

        let bg_color_transition = conitional_transition!(
            self.id.with_suffix("state:transition:bg_color"),
            window,
            cx,
            Duration::from_millis(250),
            {
                is_click_down => colors.pressed_bg,
                is_hover => colors.hover_bg,
                _ => colors.bg
            }
        );

        div()
            .id(self.id.clone())
            .cursor(if is_disabled {
                CursorStyle::OperationNotAllowed
            } else {
                CursorStyle::PointingHand
            })
            .h(height)
            .map(|this| match self.size {
                ButtonSize::Icon => this.w(height),
                _ => this.px(horizontal_padding),
            })
            .when(self.full_width, |this| this.w_full())
            .flex()
            .flex_none()
            .items_center()
            .justify_center()
            .gap(px(8.))
            .opacity(*disabled_transition.evaluate(window, cx))
            .child(
                FocusRing::new(self.id.with_suffix("focus_ring"), focus_handle.clone())
                    .rounded(corner_radius),
            )
            .child(
                squircle()
                    .absolute_expand()
                    .rounded(corner_radius)
                    .bg(*bg_color_transition.evaluate(window, cx))
                    .when_some(colors.border, |this, border| {
                        this.border(px(1.)).border_inside().border_color(border)
                    }),
            )
            .font_family(font_family)
            .font_weight(FontWeight::MEDIUM)
            .text_size(text_size)
            .text_color(colors.text)
            .when(colors.underline_on_hover && is_hover, |this| this.underline())
            .children(self.children)
            .when_some(self.label, |this, label| this.child(label))
            .when(!is_disabled, |this| {
                let is_click_down_state_on_mouse_down = is_click_down_state.clone();
                let is_click_down_state_on_click = is_click_down_state.clone();
                let is_hover_state_on_hover = is_hover_state.clone();

                this.on_hover(move |hover, _window, cx| {
                    is_hover_state_on_hover.update(cx, |this, _cx| *this = *hover);
                    cx.notify(is_hover_state_on_hover.entity_id());
                })
                .on_mouse_down(MouseButton::Left, move |_, window, cx| {
                    // Keeps the focus ring for keyboard focus only.
                    window.prevent_default();

                    is_click_down_state_on_mouse_down.update(cx, |this, _cx| *this = true);
                    cx.notify(is_click_down_state_on_mouse_down.entity_id());
                })
                .on_click(move |event, window, cx| {
                    window.prevent_default();

                    is_click_down_state_on_click.update(cx, |this, _cx| *this = false);
                    cx.notify(is_click_down_state_on_click.entity_id());

                    if let Some(on_click) = self.on_click.as_ref() {
                        on_click(event, window, cx);
                    }
                })
                .on_mouse_up_out(MouseButton::Left, move |_event, _window, cx| {
                    is_hover_state.update(cx, |this, _cx| *this = false);
                    cx.notify(is_hover_state.entity_id());

                    is_click_down_state.update(cx, |this, _cx| *this = false);
                    cx.notify(is_click_down_state.entity_id());
                })
                .track_focus(&focus_handle)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{ColorSlot, HexColor, Theme};

    #[test]
    fn default_variant_follows_button_color() {
        let theme = Theme::DEFAULT;
        let settings = ThemeSettings::DEFAULT
            .with_color(ColorSlot::Button, HexColor::from_u32(0x3B82F6));
        let colors = ButtonVariant::Default.colors(&settings, &theme.colors);

        assert_eq!(colors.bg, HexColor::from_u32(0x3B82F6).to_rgba());
        assert_eq!(colors.hover_bg, HexColor::from_u32(0x2F68C4).to_rgba());
        assert_eq!(colors.text, HexColor::BLACK.to_rgba());
        assert!(colors.border.is_none());
    }

    #[test]
    fn dark_button_gets_white_text() {
        let theme = Theme::DEFAULT;
        let colors = ButtonVariant::Default.colors(&ThemeSettings::DEFAULT, &theme.colors);
        assert_eq!(colors.text, HexColor::WHITE.to_rgba());
    }

    #[test]
    fn only_outline_has_a_border_and_only_link_underlines() {
        let theme = Theme::DEFAULT;
        for variant in ButtonVariant::ALL {
            let colors = variant.colors(&ThemeSettings::DEFAULT, &theme.colors);
            assert_eq!(colors.border.is_some(), variant == ButtonVariant::Outline);
            assert_eq!(colors.underline_on_hover, variant == ButtonVariant::Link);
        }
    }

    #[test]
    fn icon_size_is_square() {
        let (height, padding) = ButtonSize::Icon.metrics();
        assert_eq!(height, px(36.));
        assert_eq!(padding, px(0.));
        assert!(ButtonSize::Lg.metrics().0 > ButtonSize::Sm.metrics().0);
    }
}

#[cfg(all(test, feature = "test-support"))]
mod render_tests {
    use super::*;
    use crate::theme::Theme;
    use gpui::{TestAppContext, VisualTestContext};

    struct ButtonTestView {
        clicks: usize,
    }

    impl gpui::Render for ButtonTestView {
        fn render(
            &mut self,
            _window: &mut Window,
            cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            div().size_full().children(ButtonVariant::ALL.map(|variant| {
                Button::new(variant.label(), ThemeSettings::DEFAULT)
                    .label(variant.label())
                    .variant(variant)
                    .on_click(cx.listener(|view, _event, _window, cx| {
                        view.clicks += 1;
                        cx.notify();
                    }))
            }))
        }
    }

    #[gpui::test]
    fn every_variant_renders(cx: &mut TestAppContext) {
        cx.update(|cx| cx.set_theme(Theme::DEFAULT));
        let window = cx.add_window(|_window, _cx| ButtonTestView { clicks: 0 });
        let view = window.root(cx).expect("window root");
        let mut cx = VisualTestContext::from_window(window.into(), cx);
        cx.run_until_parked();

        view.read_with(&cx, |view, _| assert_eq!(view.clicks, 0));
    }
}
