use gpui::App;

use crate::theme::Theme;

/// Access to the design tokens installed on the app.
///
/// Tokens are set once at startup and read by every component. They are not the
/// user-adjustable settings; those flow through [`ThemeStore`](super::ThemeStore).
pub trait ThemeExt {
    /// Installs the design tokens.
    fn set_theme<T: AsRef<Theme>>(&mut self, theme: T);

    /// Gets an immutable reference to the design tokens.
    fn get_theme(&self) -> &Theme;
}

impl ThemeExt for App {
    fn set_theme<T: AsRef<Theme>>(&mut self, theme: T) {
        let theme = theme.as_ref();
        log::debug!("installing design tokens \"{}\"", theme.name);
        self.set_global::<Theme>(theme.clone())
    }

    fn get_theme(&self) -> &Theme {
        self.global()
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use gpui::{TestAppContext, px};

    #[gpui::test]
    fn installs_builtin_tokens(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            let theme = cx.get_theme();

            assert!(!theme.name.is_empty());
            assert!(theme.layout.size.lg > theme.layout.size.md);
            assert!(theme.layout.padding.sm >= px(0.));
            assert!(theme.layout.corner_radii.md > px(0.));
        });
    }

    #[gpui::test]
    fn replacing_tokens_overrides_previous(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            let mut compact = Theme::DEFAULT.clone();
            compact.name = "compact".into();
            compact.layout.padding.lg = px(10.);
            cx.set_theme(&compact);

            assert_eq!(cx.get_theme().name.to_string(), "compact");
            assert_eq!(cx.get_theme().layout.padding.lg, px(10.));
        });
    }
}
