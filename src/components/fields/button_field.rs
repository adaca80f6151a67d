use gpui::{App, ClickEvent, ElementId, IntoElement, RenderOnce, SharedString, Window};

use crate::{
    components::{Button, ButtonSize, ButtonVariant},
    theme::ThemeSettings,
};

/// A form button, the field counterpart of [`Button`].
#[derive(IntoElement)]
pub struct ButtonField {
    id: ElementId,
    settings: ThemeSettings,
    text: SharedString,
    variant: ButtonVariant,
    size: ButtonSize,
    disabled: bool,
    on_click: Option<Box<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>>,
}

impl ButtonField {
    pub fn new(id: impl Into<ElementId>, settings: ThemeSettings) -> Self {
        Self {
            id: id.into(),
            settings,
            text: "Button".into(),
            variant: ButtonVariant::Default,
            size: ButtonSize::Default,
            disabled: false,
            on_click: None,
        }
    }

    pub fn text(mut self, text: impl Into<SharedString>) -> Self {
        self.text = text.into();
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

    pub fn on_click(
        mut self,
        on_click: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_click = Some(Box::new(on_click));
        self
    }
}

impl RenderOnce for ButtonField {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        let button = Button::new(self.id, self.settings)
            .label(self.text)
            .variant(self.variant)
            .size(self.size)
            .disabled(self.disabled);

        match self.on_click {
            Some(on_click) => button.on_click(move |event, window, cx| on_click(event, window, cx)),
            None => button,
        }
    }
}
