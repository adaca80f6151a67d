use std::rc::Rc;

use gpui::{
    App, AppContext, Context, ElementId, Entity, EventEmitter, FontWeight, InteractiveElement,
    IntoElement, ParentElement, Render, SharedString, StatefulInteractiveElement, Styled,
    Subscription, Window, div, prelude::FluentBuilder, px,
};

use crate::{
    ElementIdExt, IconKind,
    components::{
        Button, ButtonSize, ButtonVariant, Icon, Radio, TextInput,
        layout::{TabsField, into_rows},
    },
    primitives::input::{InputEvent, InputState},
    theme::{
        ButtonStyle, ColorSlot, FontPreset, HexColor, ThemeChanged, ThemeExt, ThemeSettings,
        ThemeStore,
    },
};

/// Width of the side panel.
pub const PANEL_WIDTH: f32 = 320.;

const SWATCH_COLUMNS: usize = 4;

/// Emitted when the viewer closes the panel from its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseRequested;

/// Placeholder of the custom color input of `slot`: the default color of that slot.
pub fn hex_placeholder(slot: ColorSlot) -> &'static str {
    match slot {
        ColorSlot::Background => "#FFFFFF",
        ColorSlot::Button => "#3B82F6",
        ColorSlot::Accent => "#000000",
    }
}

fn slot_index(slot: ColorSlot) -> usize {
    match slot {
        ColorSlot::Background => 0,
        ColorSlot::Button => 1,
        ColorSlot::Accent => 2,
    }
}

fn edit_settings(
    store: &Entity<ThemeStore>,
    cx: &mut App,
    edit: impl FnOnce(ThemeSettings) -> ThemeSettings,
) {
    store.update(cx, |store, cx| {
        let next = edit(store.read());
        store.replace(next, cx);
    });
}

/// Commits the custom color typed into `input` to `slot` and clears the input.
/// Returns false, changing nothing, while the text is not a `#RRGGBB` color.
pub fn apply_custom_color(
    store: &Entity<ThemeStore>,
    input: &Entity<InputState>,
    slot: ColorSlot,
    cx: &mut App,
) -> bool {
    let text = input.read(cx).value();
    let color = match HexColor::parse(&text) {
        Ok(color) => color,
        Err(err) => {
            log::debug!("custom {} color rejected: {err}", slot.label());
            return false;
        }
    };

    edit_settings(store, cx, |settings| settings.with_color(slot, color));
    input.update(cx, |input, cx| input.clear(cx));
    true
}

/// Side panel editing the [`ThemeSettings`] held by a [`ThemeStore`].
pub struct CustomizationPanel {
    store: Entity<ThemeStore>,
    settings: ThemeSettings,
    hex_inputs: [Entity<InputState>; 3],
    _subscriptions: Vec<Subscription>,
}

impl EventEmitter<CloseRequested> for CustomizationPanel {}

impl CustomizationPanel {
    pub fn new(store: Entity<ThemeStore>, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let settings = store.read(cx).read();
        let hex_inputs =
            ColorSlot::ALL.map(|_| cx.new(|cx| InputState::new(window, cx).max_length(7)));

        let mut subscriptions = vec![cx.subscribe(
            &store,
            |this, _store, event: &ThemeChanged, cx| {
                this.settings = event.current;
                cx.notify();
            },
        )];
        // Apply is enabled from the input text, so every edit re-renders the panel.
        subscriptions.extend(hex_inputs.iter().map(|input| {
            cx.subscribe(input, |_this, _input, event: &InputEvent, cx| {
                if let InputEvent::Changed(_) = event {
                    cx.notify();
                }
            })
        }));

        Self {
            store,
            settings,
            hex_inputs,
            _subscriptions: subscriptions,
        }
    }

    pub fn settings(&self) -> ThemeSettings {
        self.settings
    }

    pub fn hex_input(&self, slot: ColorSlot) -> &Entity<InputState> {
        &self.hex_inputs[slot_index(slot)]
    }

    fn font_group(
        &self,
        id: &'static str,
        title: &'static str,
        fonts: &[FontPreset],
        current: FontPreset,
        apply: fn(ThemeSettings, FontPreset) -> ThemeSettings,
        cx: &App,
    ) -> impl IntoElement {
        let theme = cx.get_theme();
        let text_size = theme.layout.text.default_font.sizes.body;
        let text_color = theme.colors.text.primary;
        let id = ElementId::from(id);

        div()
            .flex()
            .flex_col()
            .gap(px(8.))
            .child(label(title, cx))
            .children(fonts.iter().enumerate().map(|(ix, font)| {
                let font = *font;
                let is_selected = font == current;
                let select = {
                    let store = self.store.clone();
                    Rc::new(move |_window: &mut Window, cx: &mut App| {
                        edit_settings(&store, cx, |settings| apply(settings, font));
                    })
                };
                let select_from_label = select.clone();

                div()
                    .id(id.with_index("row", ix))
                    .flex()
                    .items_center()
                    .gap(px(8.))
                    .child(
                        Radio::new(id.with_index("option", ix), self.settings)
                            .selected(is_selected)
                            .on_select(move |window, cx| select(window, cx)),
                    )
                    .child(
                        div()
                            .text_size(text_size)
                            .text_color(text_color)
                            .font_family(font.family_name())
                            .font_weight(font.weight_or(FontWeight::NORMAL))
                            .child(font.label()),
                    )
                    .when(!is_selected, |this| {
                        this.cursor_pointer()
                            .on_click(move |_, window, cx| select_from_label(window, cx))
                    })
            }))
    }

    fn button_styles(&self, cx: &App) -> impl IntoElement {
        let theme = cx.get_theme();
        let text_size = theme.layout.text.default_font.sizes.body;
        let text_color = theme.colors.text.primary;
        let id = ElementId::from("customize-button-style");

        div()
            .flex()
            .flex_col()
            .gap(px(12.))
            .children(ButtonStyle::ALL.into_iter().enumerate().map(|(ix, style)| {
                let is_selected = self.settings.button_style == style;
                let select = {
                    let store = self.store.clone();
                    Rc::new(move |_window: &mut Window, cx: &mut App| {
                        edit_settings(&store, cx, |settings| settings.with_button_style(style));
                    })
                };
                let select_from_label = select.clone();

                div()
                    .id(id.with_index("row", ix))
                    .flex()
                    .items_center()
                    .gap(px(8.))
                    .child(
                        Radio::new(id.with_index("option", ix), self.settings)
                            .selected(is_selected)
                            .on_select(move |window, cx| select(window, cx)),
                    )
                    .child(
                        div()
                            .flex_1()
                            .flex()
                            .items_center()
                            .justify_between()
                            .text_size(text_size)
                            .text_color(text_color)
                            .child(style.label())
                            .child(
                                Button::new(
                                    id.with_index("example", ix),
                                    self.settings.with_button_style(style),
                                )
                                .size(ButtonSize::Sm)
                                .label("Example"),
                            ),
                    )
                    .when(!is_selected, |this| {
                        this.cursor_pointer()
                            .on_click(move |_, window, cx| select_from_label(window, cx))
                    })
            }))
    }

    fn swatch_grid(&self, slot: ColorSlot, cx: &App) -> impl IntoElement {
        let theme = cx.get_theme();
        let border_color = theme.colors.border.primary;
        let selected_border = theme.colors.text.primary;
        let corner_radius = theme.layout.corner_radii.md;
        let current = self.settings.color(slot);
        let id =
            ElementId::from(SharedString::from(format!("customize-swatches:{}", slot.label())));

        let cells = slot.swatches().iter().enumerate().map(|(ix, swatch)| {
            let color = swatch.color;
            let is_selected = color == current;
            let store = self.store.clone();

            div()
                .id(id.with_index("swatch", ix))
                .flex_1()
                .h(px(40.))
                .flex()
                .items_center()
                .justify_center()
                .rounded(corner_radius)
                .border_2()
                .border_color(if is_selected { selected_border } else { border_color })
                .bg(color.to_rgba())
                .cursor_pointer()
                .when(is_selected, |this| {
                    this.child(
                        Icon::new(IconKind::Check)
                            .size(px(16.))
                            .color(color.contrast_color().to_rgba()),
                    )
                })
                .on_click(move |_, _window, cx| {
                    edit_settings(&store, cx, |settings| settings.with_color(slot, color));
                })
                .into_any_element()
        });

        let rows = into_rows(cells.collect::<Vec<_>>(), SWATCH_COLUMNS);
        div().flex().flex_col().gap(px(8.)).children(rows.into_iter().map(|row| {
            div().flex().gap(px(8.)).children(
                row.into_iter()
                    .map(|cell| cell.unwrap_or_else(|| div().flex_1().into_any_element())),
            )
        }))
    }

    fn custom_color(&self, slot: ColorSlot, cx: &App) -> impl IntoElement {
        let theme = cx.get_theme();
        let border_color = theme.colors.border.primary;
        let corner_radius = theme.layout.corner_radii.md;
        let input = self.hex_input(slot).clone();
        let text = input.read(cx).value();
        let parsed = HexColor::parse(&text).ok();
        let id = ElementId::from(SharedString::from(format!("customize-hex:{}", slot.label())));

        let preview = div()
            .size(px(36.))
            .flex_none()
            .rounded(corner_radius)
            .border_1()
            .border_color(border_color)
            .when_some(parsed, |this, color| this.bg(color.to_rgba()));

        let apply = {
            let store = self.store.clone();
            let input = input.clone();
            Button::new(id.with_suffix("apply"), self.settings)
                .size(ButtonSize::Sm)
                .label("Apply")
                .disabled(parsed.is_none())
                .on_click(move |_, _window, cx| {
                    apply_custom_color(&store, &input, slot, cx);
                })
        };

        div()
            .flex()
            .flex_col()
            .gap(px(8.))
            .pt(px(8.))
            .child(label("Custom HEX", cx))
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap(px(8.))
                    .child(preview)
                    .child(
                        div().flex_1().child(
                            TextInput::new(id.with_suffix("input"), self.settings, input)
                                .placeholder(hex_placeholder(slot)),
                        ),
                    )
                    .child(apply),
            )
    }

    fn color_tab(&self, slot: ColorSlot, cx: &App) -> impl IntoElement {
        let title = match slot {
            ColorSlot::Background => "Background Color",
            ColorSlot::Button => "Button Color",
            ColorSlot::Accent => "Header Text Color",
        };

        div()
            .flex()
            .flex_col()
            .gap(px(12.))
            .child(label(title, cx))
            .child(self.swatch_grid(slot, cx))
            .child(self.custom_color(slot, cx))
    }
}

fn label(text: &'static str, cx: &App) -> impl IntoElement {
    let theme = cx.get_theme();
    div()
        .text_size(theme.layout.text.default_font.sizes.caption)
        .font_weight(FontWeight::MEDIUM)
        .text_color(theme.colors.text.primary)
        .child(text)
}

fn card(
    title: &'static str,
    description: &'static str,
    cx: &App,
    body: impl IntoElement,
) -> impl IntoElement {
    let theme = cx.get_theme();

    div()
        .w_full()
        .flex()
        .flex_col()
        .gap(px(16.))
        .p(px(16.))
        .rounded(theme.layout.corner_radii.lg)
        .border_1()
        .border_color(theme.colors.border.primary)
        .child(
            div()
                .flex()
                .flex_col()
                .gap(px(2.))
                .child(
                    div()
                        .text_size(theme.layout.text.default_font.sizes.body)
                        .font_weight(FontWeight::SEMIBOLD)
                        .text_color(theme.colors.text.primary)
                        .child(title),
                )
                .child(
                    div()
                        .text_size(theme.layout.text.default_font.sizes.caption)
                        .text_color(theme.colors.text.secondary)
                        .child(description),
                ),
        )
        .child(body)
}

impl Render for CustomizationPanel {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.get_theme();
        let border_color = theme.colors.border.primary;
        let surface = theme.colors.surface.primary;
        let text_color = theme.colors.text.primary;
        let heading_size = theme.layout.text.default_font.sizes.heading_sm;
        let settings = self.settings;

        let header = div()
            .w_full()
            .flex()
            .items_center()
            .justify_between()
            .p(px(16.))
            .border_b_1()
            .border_color(border_color)
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap(px(8.))
                    .child(Icon::new(IconKind::Settings).size(px(18.)).color(text_color))
                    .child(
                        div()
                            .text_size(heading_size)
                            .font_weight(FontWeight::SEMIBOLD)
                            .child("Customize"),
                    ),
            )
            .child(
                Button::new("customize-close", settings)
                    .variant(ButtonVariant::Ghost)
                    .size(ButtonSize::Icon)
                    .child(Icon::new(IconKind::X).size(px(16.)).color(text_color))
                    .on_click(cx.listener(|_this, _, _window, cx| cx.emit(CloseRequested))),
            );

        let typography = card(
            "Typography",
            "Choose fonts for headers and body text",
            cx,
            div()
                .flex()
                .flex_col()
                .gap(px(16.))
                .child(self.font_group(
                    "customize-header-font",
                    "Header Font",
                    &FontPreset::HEADER,
                    settings.header_font,
                    ThemeSettings::with_header_font,
                    cx,
                ))
                .child(self.font_group(
                    "customize-body-font",
                    "Body Font",
                    &FontPreset::BODY,
                    settings.body_font,
                    ThemeSettings::with_body_font,
                    cx,
                )),
        );

        let button_style = card(
            "Button Style",
            "Choose the button corner style",
            cx,
            self.button_styles(cx),
        );

        let colors = card(
            "Colors",
            "Customize the color scheme",
            cx,
            ColorSlot::ALL.into_iter().fold(
                TabsField::new("customize-color-tabs", settings),
                |tabs, slot| tabs.tab(slot.label(), self.color_tab(slot, cx)),
            ),
        );

        let reset = Button::new("customize-reset", settings)
            .variant(ButtonVariant::Outline)
            .full_width()
            .label("Reset to Defaults")
            .on_click(cx.listener(|this, _, _window, cx| {
                this.store.update(cx, |store, cx| store.reset(cx));
            }));

        div()
            .w(px(PANEL_WIDTH))
            .h_full()
            .flex_none()
            .flex()
            .flex_col()
            .bg(surface)
            .border_l_1()
            .border_color(border_color)
            .font_family(settings.body_font.family_name())
            .text_color(text_color)
            .child(header)
            .child(
                div()
                    .id("customize-scroll")
                    .flex_1()
                    .overflow_y_scroll()
                    .p(px(16.))
                    .flex()
                    .flex_col()
                    .gap(px(24.))
                    .child(typography)
                    .child(button_style)
                    .child(colors)
                    .child(reset),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_name_each_slot_default() {
        for slot in ColorSlot::ALL {
            assert!(HexColor::is_valid(hex_placeholder(slot)));
        }
        assert_eq!(slot_index(ColorSlot::Accent), 2);
    }
}

#[cfg(all(test, feature = "test-support"))]
mod gpui_tests {
    use super::*;
    use crate::theme::Theme;
    use gpui::TestAppContext;

    fn panel(cx: &mut TestAppContext) -> (Entity<ThemeStore>, Entity<CustomizationPanel>) {
        cx.update(|cx| cx.set_theme(Theme::DEFAULT));
        let store = cx.update(|cx| ThemeStore::build(ThemeSettings::default(), cx));
        let (panel, _cx) = cx.add_window_view({
            let store = store.clone();
            move |window, cx| CustomizationPanel::new(store, window, cx)
        });
        (store, panel)
    }

    #[gpui::test]
    fn applying_a_valid_hex_commits_and_clears(cx: &mut TestAppContext) {
        let (store, panel) = panel(cx);
        let input = panel.read_with(cx, |panel, _| panel.hex_input(ColorSlot::Button).clone());

        input.update(cx, |input, cx| input.set_value("#3b82f6", cx));
        let applied = cx.update(|cx| apply_custom_color(&store, &input, ColorSlot::Button, cx));

        assert!(applied);
        store.read_with(cx, |store, _| {
            assert_eq!(store.read().button_color, HexColor::from_u32(0x3B82F6));
        });
        input.read_with(cx, |input, _| assert!(input.is_empty()));
        cx.run_until_parked();
        panel.read_with(cx, |panel, _| {
            assert_eq!(panel.settings().button_color, HexColor::from_u32(0x3B82F6));
        });
    }

    #[gpui::test]
    fn malformed_hex_changes_nothing(cx: &mut TestAppContext) {
        let (store, panel) = panel(cx);
        let input = panel.read_with(cx, |panel, _| panel.hex_input(ColorSlot::Background).clone());

        input.update(cx, |input, cx| input.set_value("#12345", cx));
        let applied = cx.update(|cx| apply_custom_color(&store, &input, ColorSlot::Background, cx));

        assert!(!applied);
        store.read_with(cx, |store, _| {
            assert_eq!(store.read(), ThemeSettings::default());
            assert_eq!(store.revision(), 0);
        });
        input.read_with(cx, |input, _| assert_eq!(input.text(), "#12345"));
    }
}
