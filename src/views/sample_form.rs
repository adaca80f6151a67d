use std::rc::Rc;

use gpui::{
    App, ClickEvent, ElementId, FontWeight, IntoElement, ParentElement, RenderOnce, Styled,
    Window, div, prelude::FluentBuilder, px,
};

use super::{Branding, ClickHandler};
use crate::{
    ElementIdExt, IconKind,
    components::{
        Button, ButtonSize, ButtonVariant, Icon,
        fields::{ButtonField, DateTimeField, LabeledField, PhoneField, SelectField, TextField},
        layout::{ColumnsField, PanelField},
    },
    theme::{ThemeExt, ThemeSettings},
};

const MARITAL_STATUSES: [(&str, &str); 6] = [
    ("single", "Single"),
    ("married", "Married"),
    ("common-law", "Common-law"),
    ("separated", "Separated"),
    ("divorced", "Divorced"),
    ("widowed", "Widowed"),
];

/// Which person a section of the intake form describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Applicant {
    Primary,
    Partner,
}

impl Applicant {
    fn title(&self) -> &'static str {
        match self {
            Applicant::Primary => "Section 1: Applicant Information",
            Applicant::Partner => "Section 2: Spouse or Common-law Partner's Information",
        }
    }

    fn id(&self) -> ElementId {
        match self {
            Applicant::Primary => "intake-applicant".into(),
            Applicant::Partner => "intake-partner".into(),
        }
    }
}

/// A healthcare intake form assembled from the gallery's fields.
#[derive(IntoElement)]
pub struct SampleForm {
    settings: ThemeSettings,
    on_back: Option<ClickHandler>,
    on_customize: Option<ClickHandler>,
}

impl SampleForm {
    pub fn new(settings: ThemeSettings) -> Self {
        Self {
            settings,
            on_back: None,
            on_customize: None,
        }
    }

    pub fn on_back(
        mut self,
        handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_back = Some(Rc::new(handler));
        self
    }

    pub fn on_customize(
        mut self,
        handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_customize = Some(Rc::new(handler));
        self
    }
}

fn text(
    id: &ElementId,
    suffix: &'static str,
    settings: ThemeSettings,
    label: &'static str,
) -> TextField {
    TextField::new(id.with_suffix(suffix), settings).label(label)
}

fn applicant_section(applicant: Applicant, settings: ThemeSettings) -> PanelField {
    let id = applicant.id();

    let phone = PhoneField::new(id.with_suffix("phone"), settings)
        .label("Primary Phone Number")
        .placeholder("(___) ___-____")
        .required(true);

    let contact_row = match applicant {
        Applicant::Primary => ColumnsField::new()
            .columns(2)
            .child(phone)
            .child(
                SelectField::new(id.with_suffix("marital_status"), settings)
                    .label("Marital Status")
                    .required(true)
                    .options(MARITAL_STATUSES),
            )
            .into_any_element(),
        Applicant::Partner => phone.into_any_element(),
    };

    PanelField::new(settings, applicant.title())
        .child(
            ColumnsField::new().columns(3).group([
                text(&id, "first_name", settings, "First Name").required(true),
                text(&id, "middle_name", settings, "Middle Name"),
                text(&id, "last_name", settings, "Last Name").required(true),
            ]),
        )
        .child(
            ColumnsField::new()
                .columns(2)
                .child(
                    text(&id, "sin", settings, "Social Insurance Number (SIN)")
                        .placeholder("___-___-___")
                        .required(true),
                )
                .child(
                    DateTimeField::new(id.with_suffix("birth_date"), settings)
                        .label("Date of Birth")
                        .required(true),
                ),
        )
        .child(
            text(&id, "street", settings, "Mailing Address (Street, Apt)")
                .placeholder("e.g., 123 Maple Street, Apt 4B")
                .required(true),
        )
        .child(
            ColumnsField::new().columns(3).group([
                text(&id, "city", settings, "City").required(true),
                text(&id, "province", settings, "Province").required(true),
                text(&id, "postal_code", settings, "Postal Code")
                    .placeholder("__ ___")
                    .required(true),
            ]),
        )
        .child(contact_row)
}

impl RenderOnce for SampleForm {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let settings = self.settings;
        let theme = cx.get_theme();
        let text_color = theme.colors.text.primary;
        let muted = theme.colors.text.secondary;
        let border_color = theme.colors.border.primary;
        let title_size = theme.layout.text.default_font.sizes.heading_lg;
        let body_size = theme.layout.text.default_font.sizes.body;
        let corner_radius = theme.layout.corner_radii.xl;

        let toolbar = div()
            .w_full()
            .flex()
            .justify_between()
            .items_center()
            .child(
                Button::new("sample-back", settings)
                    .variant(ButtonVariant::Ghost)
                    .size(ButtonSize::Sm)
                    .child(Icon::new(IconKind::ArrowLeft).size(px(16.)).color(text_color))
                    .label("Back to Components")
                    .when_some(self.on_back, |this, handler| {
                        this.on_click(move |event, window, cx| handler(event, window, cx))
                    }),
            )
            .child(
                Button::new("sample-customize", settings)
                    .variant(ButtonVariant::Outline)
                    .child(Icon::new(IconKind::Settings).size(px(16.)).color(text_color))
                    .label("Customize")
                    .when_some(self.on_customize, |this, handler| {
                        this.on_click(move |event, window, cx| handler(event, window, cx))
                    }),
            );

        // The form card stays white whatever background the viewer picks.
        let form = div()
            .w_full()
            .flex()
            .flex_col()
            .gap(px(24.))
            .p(px(32.))
            .bg(gpui::white())
            .border_1()
            .border_color(border_color)
            .rounded(corner_radius)
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap(px(4.))
                    .child(
                        div()
                            .font_family(settings.header_font.family_name())
                            .font_weight(settings.header_font.weight_or(FontWeight::MEDIUM))
                            .text_size(title_size)
                            .text_color(text_color)
                            .child("Patient Intake Form"),
                    )
                    .child(div().text_size(body_size).text_color(muted).child("Healthcare Form")),
            )
            .child(applicant_section(Applicant::Primary, settings))
            .child(applicant_section(Applicant::Partner, settings))
            .child(
                div().child(
                    ButtonField::new("intake-submit", settings)
                        .text("Submit")
                        .on_click(|_, _window, _cx| log::info!("intake form submitted")),
                ),
            );

        div()
            .w_full()
            .max_w(px(960.))
            .mx_auto()
            .flex()
            .flex_col()
            .gap(px(24.))
            .child(toolbar)
            .child(form)
            .child(Branding::new(settings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_are_keyed_apart() {
        assert_ne!(Applicant::Primary.id(), Applicant::Partner.id());
        assert!(Applicant::Partner.title().starts_with("Section 2"));
    }
}
