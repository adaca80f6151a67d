use std::{rc::Rc, sync::LazyLock};

use gpui::{App, ElementId, IntoElement, ParentElement, RenderOnce, SharedString, Window};
use regex::Regex;

use super::{Field, FieldProps, LabeledField, ValueChangeHandler, use_input_state};
use crate::{components::TextInput, theme::ThemeSettings};

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("valid url pattern"));

const MIN_PHONE_DIGITS: usize = 7;

/// The formats a validated field checks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    Email,
    Phone,
    Url,
}

impl ValidationKind {
    pub fn is_valid(&self, value: &str) -> bool {
        match self {
            ValidationKind::Email => is_valid_email(value),
            ValidationKind::Phone => is_valid_phone(value),
            ValidationKind::Url => is_valid_url(value),
        }
    }

    pub fn default_placeholder(&self) -> &'static str {
        match self {
            ValidationKind::Email => "example@email.com",
            ValidationKind::Phone => "(555) 555-5555",
            ValidationKind::Url => "https://example.com",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ValidationKind::Email => "Please enter a valid email address",
            ValidationKind::Phone => "Please enter a valid phone number",
            ValidationKind::Url => "Please enter a valid URL (starting with http:// or https://)",
        }
    }

    fn id_suffix(&self) -> &'static str {
        match self {
            ValidationKind::Email => "email",
            ValidationKind::Phone => "phone",
            ValidationKind::Url => "url",
        }
    }

    /// Inline message to show, if any. Nothing is reported before the control
    /// was left once, nor for an empty value.
    pub fn message_for(&self, value: &str, touched: bool) -> Option<&'static str> {
        if !touched || value.is_empty() || self.is_valid(value) {
            None
        } else {
            Some(self.message())
        }
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Digits, spaces and `+ - ( ) .` only, with at least seven digits.
pub fn is_valid_phone(value: &str) -> bool {
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')' | '.'));
    let digits = value.chars().filter(char::is_ascii_digit).count();
    allowed && digits >= MIN_PHONE_DIGITS
}

pub fn is_valid_url(value: &str) -> bool {
    URL_PATTERN.is_match(value)
}

/// Text field that checks its format once the user has moved on.
#[derive(IntoElement)]
pub struct ValidatedField {
    id: ElementId,
    kind: ValidationKind,
    settings: ThemeSettings,
    props: FieldProps,
    on_change: Option<ValueChangeHandler<SharedString>>,
}

impl ValidatedField {
    pub fn new(id: impl Into<ElementId>, kind: ValidationKind, settings: ThemeSettings) -> Self {
        Self {
            id: id.into(),
            kind,
            settings,
            props: FieldProps::default(),
            on_change: None,
        }
    }

    pub fn on_change(
        mut self,
        on_change: impl Fn(&SharedString, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }
}

impl LabeledField for ValidatedField {
    fn props_mut(&mut self) -> &mut FieldProps {
        &mut self.props
    }
}

impl RenderOnce for ValidatedField {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let state = use_input_state(&self.id, self.kind.id_suffix(), None, false, window, cx);
        let message = {
            let state = state.read(cx);
            self.kind.message_for(state.text(), state.touched())
        };
        let placeholder = self
            .props
            .placeholder
            .clone()
            .unwrap_or_else(|| self.kind.default_placeholder().into());

        Field::new(self.settings, self.props.clone())
            .error(message.map(SharedString::new_static))
            .child(
                TextInput::new(self.id, self.settings, state)
                    .placeholder(placeholder)
                    .invalid(message.is_some())
                    .disabled(self.props.disabled)
                    .maybe_on_change(self.on_change),
            )
    }
}

/// Shorthand for [`ValidatedField`] of [`ValidationKind::Email`].
pub struct EmailField;

impl EmailField {
    #[allow(clippy::new_ret_no_self)]
    pub fn new(id: impl Into<ElementId>, settings: ThemeSettings) -> ValidatedField {
        ValidatedField::new(id, ValidationKind::Email, settings)
    }
}

/// Shorthand for [`ValidatedField`] of [`ValidationKind::Phone`].
pub struct PhoneField;

impl PhoneField {
    #[allow(clippy::new_ret_no_self)]
    pub fn new(id: impl Into<ElementId>, settings: ThemeSettings) -> ValidatedField {
        ValidatedField::new(id, ValidationKind::Phone, settings)
    }
}

/// Shorthand for [`ValidatedField`] of [`ValidationKind::Url`].
pub struct UrlField;

impl UrlField {
    #[allow(clippy::new_ret_no_self)]
    pub fn new(id: impl Into<ElementId>, settings: ThemeSettings) -> ValidatedField {
        ValidatedField::new(id, ValidationKind::Url, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_needs_at_and_domain() {
        assert!(is_valid_email("ada@example.com"));
        assert!(!is_valid_email("ada.example.com"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada @example.com"));
    }

    #[test]
    fn phone_allows_punctuation_but_needs_seven_digits() {
        assert!(is_valid_phone("(555) 555-5555"));
        assert!(is_valid_phone("+1 555.555.5555"));
        assert!(!is_valid_phone("555-55"));
        assert!(!is_valid_phone("555-555-5555 ext"));
    }

    #[test]
    fn url_needs_scheme_and_host() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("http://example.com/path?q=1"));
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url("ftp://example.com"));
        assert!(!is_valid_url("https://"));
    }

    #[test]
    fn messages_wait_for_blur_and_skip_empty_values() {
        let email = ValidationKind::Email;
        assert_eq!(email.message_for("not-an-email", false), None);
        assert_eq!(
            email.message_for("not-an-email", true),
            Some(email.message())
        );
        assert_eq!(email.message_for("", true), None);
        assert_eq!(email.message_for("ada@example.com", true), None);
    }
}

#[cfg(all(test, feature = "test-support"))]
mod render_tests {
    use super::*;
    use crate::theme::{Theme, ThemeExt};
    use gpui::{TestAppContext, VisualTestContext, div, prelude::*};

    struct ContactView;

    impl gpui::Render for ContactView {
        fn render(
            &mut self,
            _window: &mut Window,
            _cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            div()
                .size_full()
                .child(EmailField::new("email", ThemeSettings::DEFAULT).label("Email"))
                .child(PhoneField::new("phone", ThemeSettings::DEFAULT).label("Phone"))
                .child(UrlField::new("website", ThemeSettings::DEFAULT).label("Website"))
        }
    }

    #[gpui::test]
    fn renders_each_kind(cx: &mut TestAppContext) {
        cx.update(|cx| cx.set_theme(Theme::DEFAULT));
        let window = cx.add_window(|_window, _cx| ContactView);
        let mut cx = VisualTestContext::from_window(window.into(), cx);
        cx.run_until_parked();
    }
}
