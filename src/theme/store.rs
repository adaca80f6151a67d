use gpui::{App, AppContext, Context, Entity, EventEmitter};

use super::ThemeSettings;

/// Emitted by [`ThemeStore`] whenever the settings are effectively replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeChanged {
    pub previous: ThemeSettings,
    pub current: ThemeSettings,
}

/// Owner of the current [`ThemeSettings`].
///
/// The store lives in an entity that views hold explicitly. Dependents subscribe
/// with `cx.subscribe(&store, ..)` and read the new value from the event or through
/// [`ThemeStore::read`]. Nothing is reachable through an app global.
pub struct ThemeStore {
    settings: ThemeSettings,
    revision: usize,
}

impl EventEmitter<ThemeChanged> for ThemeStore {}

impl ThemeStore {
    pub fn new(settings: ThemeSettings) -> Self {
        Self {
            settings,
            revision: 0,
        }
    }

    pub fn build(settings: ThemeSettings, cx: &mut App) -> Entity<Self> {
        cx.new(|_cx| Self::new(settings))
    }

    pub fn read(&self) -> ThemeSettings {
        self.settings
    }

    /// Number of effective replacements since creation.
    pub fn revision(&self) -> usize {
        self.revision
    }

    /// Swaps in `settings`. Replacing with an identical value is a no-op.
    pub fn replace(&mut self, settings: ThemeSettings, cx: &mut Context<Self>) {
        if settings == self.settings {
            return;
        }

        let previous = std::mem::replace(&mut self.settings, settings);
        self.revision += 1;

        log::debug!("theme settings replaced: {previous:?} -> {settings:?}");

        cx.emit(ThemeChanged {
            previous,
            current: settings,
        });
        cx.notify();
    }

    pub fn reset(&mut self, cx: &mut Context<Self>) {
        log::info!("theme settings reset to defaults");
        self.replace(ThemeSettings::default(), cx);
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::theme::{ButtonStyle, ColorSlot, HexColor};
    use gpui::TestAppContext;

    #[gpui::test]
    fn replace_notifies_each_subscriber_once(cx: &mut TestAppContext) {
        let store = cx.update(|cx| ThemeStore::build(ThemeSettings::default(), cx));
        let seen: Rc<RefCell<Vec<ThemeChanged>>> = Rc::default();

        let _subscriptions = cx.update(|cx| {
            (0..2)
                .map(|_| {
                    let seen = seen.clone();
                    cx.subscribe(&store, move |_store, event: &ThemeChanged, _cx| {
                        seen.borrow_mut().push(*event)
                    })
                })
                .collect::<Vec<_>>()
        });

        let pill = ThemeSettings::default().with_button_style(ButtonStyle::Pill);
        store.update(cx, |store, cx| store.replace(pill, cx));

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2, "one event per subscriber");
        assert_eq!(seen[0].previous, ThemeSettings::default());
        assert_eq!(seen[0].current, pill);
        store.read_with(cx, |store, _| {
            assert_eq!(store.read(), pill);
            assert_eq!(store.revision(), 1);
        });
    }

    #[gpui::test]
    fn identical_replace_is_silent(cx: &mut TestAppContext) {
        let store = cx.update(|cx| ThemeStore::build(ThemeSettings::default(), cx));
        let count = Rc::new(RefCell::new(0));

        let _subscription = cx.update(|cx| {
            let count = count.clone();
            cx.subscribe(&store, move |_store, _event: &ThemeChanged, _cx| {
                *count.borrow_mut() += 1
            })
        });

        store.update(cx, |store, cx| store.replace(ThemeSettings::default(), cx));

        assert_eq!(*count.borrow(), 0);
        store.read_with(cx, |store, _| assert_eq!(store.revision(), 0));
    }

    #[gpui::test]
    fn reset_restores_defaults(cx: &mut TestAppContext) {
        let edited = ThemeSettings::default()
            .with_color(ColorSlot::Background, HexColor::from_u32(0xF0F9FF))
            .with_button_style(ButtonStyle::Pill);
        let store = cx.update(|cx| ThemeStore::build(edited, cx));

        store.update(cx, |store, cx| store.reset(cx));

        store.read_with(cx, |store, _| {
            assert_eq!(store.read(), ThemeSettings::default());
        });
    }
}
