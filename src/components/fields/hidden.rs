use gpui::{App, Empty, IntoElement, RenderOnce, SharedString, Window};

/// Carries a named value through a form without drawing anything.
#[derive(IntoElement, Debug, Clone, PartialEq, Eq)]
pub struct HiddenField {
    name: SharedString,
    value: SharedString,
}

impl HiddenField {
    pub fn new(name: impl Into<SharedString>) -> Self {
        Self {
            name: name.into(),
            value: SharedString::default(),
        }
    }

    pub fn value(mut self, value: impl Into<SharedString>) -> Self {
        self.value = value.into();
        self
    }

    pub fn name(&self) -> &SharedString {
        &self.name
    }

    pub fn current_value(&self) -> &SharedString {
        &self.value
    }
}

impl RenderOnce for HiddenField {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_its_value() {
        let field = HiddenField::new("session").value("abc123");
        assert_eq!(field.name().as_ref(), "session");
        assert_eq!(field.current_value().as_ref(), "abc123");
        assert_eq!(HiddenField::new("empty").current_value().as_ref(), "");
    }
}
