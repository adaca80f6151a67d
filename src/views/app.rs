use gpui::{
    AppContext, ClickEvent, Context, Entity, FocusHandle, InteractiveElement, IntoElement,
    ParentElement, Render, StatefulInteractiveElement, Styled, Subscription, Window, div,
    prelude::FluentBuilder, px,
};

use super::{CloseRequested, CustomizationPanel, Gallery, SampleForm};
use crate::theme::{ThemeChanged, ThemeExt, ThemeSettings, ThemeStore};

/// The two pages of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Gallery,
    SampleForm,
}

/// Root view: the current page on the left, the customization panel on the right.
///
/// The view keeps a copy of the store's settings, refreshed from [`ThemeChanged`], and
/// hands it to every page it renders.
pub struct FormsflowApp {
    store: Entity<ThemeStore>,
    settings: ThemeSettings,
    page: Page,
    show_customization: bool,
    customization: Entity<CustomizationPanel>,
    focus_handle: FocusHandle,
    _subscriptions: Vec<Subscription>,
}

impl FormsflowApp {
    pub fn new(store: Entity<ThemeStore>, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let settings = store.read(cx).read();
        let customization = cx.new(|cx| CustomizationPanel::new(store.clone(), window, cx));

        let subscriptions = vec![
            cx.subscribe(&store, |this, _store, event: &ThemeChanged, cx| {
                this.settings = event.current;
                cx.notify();
            }),
            cx.subscribe(&customization, |this, _panel, _: &CloseRequested, cx| {
                this.set_customization_visible(false, cx);
            }),
        ];

        Self {
            store,
            settings,
            page: Page::default(),
            show_customization: false,
            customization,
            focus_handle: cx.focus_handle(),
            _subscriptions: subscriptions,
        }
    }

    pub fn store(&self) -> &Entity<ThemeStore> {
        &self.store
    }

    pub fn settings(&self) -> ThemeSettings {
        self.settings
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn customization_visible(&self) -> bool {
        self.show_customization
    }

    pub fn show_page(&mut self, page: Page, cx: &mut Context<Self>) {
        if self.page == page {
            return;
        }
        log::debug!("navigating from {:?} to {page:?}", self.page);
        self.page = page;
        cx.notify();
    }

    pub fn set_customization_visible(&mut self, visible: bool, cx: &mut Context<Self>) {
        if self.show_customization == visible {
            return;
        }
        log::debug!("customization panel {}", if visible { "shown" } else { "hidden" });
        self.show_customization = visible;
        cx.notify();
    }

    pub fn toggle_customization(&mut self, cx: &mut Context<Self>) {
        self.set_customization_visible(!self.show_customization, cx);
    }
}

impl Render for FormsflowApp {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        crate::init_for_window(window, cx);

        let settings = self.settings;
        let theme = cx.get_theme();
        let text_size = theme.layout.text.default_font.sizes.body;
        let text_color = theme.colors.text.primary;

        let page = match self.page {
            Page::Gallery => Gallery::new(settings)
                .customization_visible(self.show_customization)
                .on_open_samples(cx.listener(|this, _: &ClickEvent, _window, cx| {
                    this.show_page(Page::SampleForm, cx)
                }))
                .on_toggle_customization(cx.listener(|this, _: &ClickEvent, _window, cx| {
                    this.toggle_customization(cx)
                }))
                .into_any_element(),
            Page::SampleForm => SampleForm::new(settings)
                .on_back(cx.listener(|this, _: &ClickEvent, _window, cx| {
                    this.show_page(Page::Gallery, cx)
                }))
                .on_customize(cx.listener(|this, _: &ClickEvent, _window, cx| {
                    this.toggle_customization(cx)
                }))
                .into_any_element(),
        };

        div()
            .tab_group()
            .track_focus(&self.focus_handle)
            .size_full()
            .flex()
            .text_size(text_size)
            .text_color(text_color)
            .font_family(settings.body_font.family_name())
            .child(
                div()
                    .id("content")
                    .flex_1()
                    .h_full()
                    .overflow_y_scroll()
                    .p(px(24.))
                    .bg(settings.background_color.to_rgba())
                    .child(page),
            )
            .when(self.show_customization, |this| {
                this.child(self.customization.clone())
            })
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::theme::{ButtonStyle, Theme};
    use gpui::TestAppContext;

    fn app(cx: &mut TestAppContext) -> Entity<FormsflowApp> {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            crate::init(cx);
        });
        let store = cx.update(|cx| ThemeStore::build(ThemeSettings::default(), cx));
        let (app, _cx) = cx.add_window_view(move |window, cx| FormsflowApp::new(store, window, cx));
        app
    }

    #[gpui::test]
    fn navigates_between_pages(cx: &mut TestAppContext) {
        let app = app(cx);
        app.read_with(cx, |app, _| assert_eq!(app.page(), Page::Gallery));

        app.update(cx, |app, cx| app.show_page(Page::SampleForm, cx));
        cx.run_until_parked();
        app.read_with(cx, |app, _| assert_eq!(app.page(), Page::SampleForm));

        app.update(cx, |app, cx| app.show_page(Page::Gallery, cx));
        app.read_with(cx, |app, _| assert_eq!(app.page(), Page::Gallery));
    }

    #[gpui::test]
    fn panel_close_request_hides_it(cx: &mut TestAppContext) {
        let app = app(cx);
        app.update(cx, |app, cx| app.toggle_customization(cx));
        cx.run_until_parked();
        app.read_with(cx, |app, _| assert!(app.customization_visible()));

        let panel = app.read_with(cx, |app, _| app.customization.clone());
        panel.update(cx, |_panel, cx| cx.emit(CloseRequested));
        cx.run_until_parked();

        app.read_with(cx, |app, _| assert!(!app.customization_visible()));
    }

    #[gpui::test]
    fn follows_store_replacements(cx: &mut TestAppContext) {
        let app = app(cx);
        let store = app.read_with(cx, |app, _| app.store().clone());
        let pill = ThemeSettings::default().with_button_style(ButtonStyle::Pill);

        store.update(cx, |store, cx| store.replace(pill, cx));
        cx.run_until_parked();

        app.read_with(cx, |app, _| assert_eq!(app.settings(), pill));
    }
}
