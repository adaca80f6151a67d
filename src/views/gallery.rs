use std::rc::Rc;

use gpui::{
    AnyElement, App, FontWeight, IntoElement, ParentElement, RenderOnce, SharedString, Styled,
    Window, div, prelude::FluentBuilder, px,
};

use super::{Branding, ClickHandler};
use crate::{
    IconKind,
    components::{
        Button, ButtonVariant, Icon,
        fields::{
            AddressField, ButtonField, CheckboxField, ContentField, CurrencyField, DataGridField,
            DateTimeField, DayField, EmailField, FileField, HiddenField, LabeledField,
            NumberField, PasswordField, PhoneField, RadioField, SelectField, SignatureField,
            SurveyField, TagsField, TextAreaField, TextField, TimeField, UrlField,
        },
        layout::{ColumnsField, FieldSetField, PanelField, TabsField},
    },
    theme::{ThemeExt, ThemeSettings},
};

const TERMS_HTML: &str = "<h4>Terms and Conditions</h4><p>Please read these terms carefully \
    before proceeding. By submitting this form, you agree to our <strong>privacy \
    policy</strong> and <strong>terms of service</strong>.</p>";

const SURVEY_QUESTIONS: [(&str, &str); 3] = [
    ("service", "How satisfied are you with our service?"),
    ("recommend", "Would you recommend us to others?"),
    ("ease", "How easy was it to use our platform?"),
];

const SURVEY_OPTIONS: [(&str, &str); 4] = [
    ("poor", "Poor"),
    ("fair", "Fair"),
    ("good", "Good"),
    ("excellent", "Excellent"),
];

/// The component gallery page: a header, four tabs of demo cards and the footer.
#[derive(IntoElement)]
pub struct Gallery {
    settings: ThemeSettings,
    customization_visible: bool,
    on_open_samples: Option<ClickHandler>,
    on_toggle_customization: Option<ClickHandler>,
}

impl Gallery {
    pub fn new(settings: ThemeSettings) -> Self {
        Self {
            settings,
            customization_visible: false,
            on_open_samples: None,
            on_toggle_customization: None,
        }
    }

    pub fn customization_visible(mut self, visible: bool) -> Self {
        self.customization_visible = visible;
        self
    }

    pub fn on_open_samples(
        mut self,
        handler: impl Fn(&gpui::ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_open_samples = Some(Rc::new(handler));
        self
    }

    pub fn on_toggle_customization(
        mut self,
        handler: impl Fn(&gpui::ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_toggle_customization = Some(Rc::new(handler));
        self
    }
}

/// A titled demo block inside a card.
fn section(title: &'static str, cx: &App, body: impl IntoElement) -> impl IntoElement {
    let size = cx.get_theme().layout.text.default_font.sizes.heading_sm;

    div()
        .w_full()
        .flex()
        .flex_col()
        .gap(px(12.))
        .child(div().text_size(size).font_weight(FontWeight::MEDIUM).child(title))
        .child(body)
}

fn card(
    settings: ThemeSettings,
    title: &'static str,
    description: &'static str,
    cx: &App,
    sections: Vec<AnyElement>,
) -> impl IntoElement {
    let theme = cx.get_theme();

    div()
        .w_full()
        .flex()
        .flex_col()
        .gap(px(24.))
        .p(px(24.))
        .bg(theme.colors.surface.primary)
        .border_1()
        .border_color(theme.colors.border.primary)
        .rounded(theme.layout.corner_radii.xl)
        .child(
            div()
                .flex()
                .flex_col()
                .gap(px(4.))
                .child(
                    div()
                        .font_family(settings.header_font.family_name())
                        .font_weight(settings.header_font.weight_or(FontWeight::SEMIBOLD))
                        .text_size(theme.layout.text.default_font.sizes.heading_md)
                        .text_color(theme.colors.text.primary)
                        .child(title),
                )
                .child(
                    div()
                        .text_size(theme.layout.text.default_font.sizes.body)
                        .text_color(theme.colors.text.secondary)
                        .child(description),
                ),
        )
        .children(sections)
}

/// Grey explanatory box used by the data tab.
fn note(text: impl Into<SharedString>, cx: &App) -> impl IntoElement {
    let theme = cx.get_theme();

    div()
        .w_full()
        .p(px(16.))
        .rounded(theme.layout.corner_radii.md)
        .border_1()
        .border_color(theme.colors.border.primary)
        .bg(theme.colors.surface.secondary)
        .text_size(theme.layout.text.default_font.sizes.caption)
        .text_color(theme.colors.text.secondary)
        .child(text.into())
}

fn stack() -> gpui::Div {
    div().w_full().flex().flex_col().gap(px(16.))
}

fn basic_tab(settings: ThemeSettings, cx: &App) -> impl IntoElement {
    card(
        settings,
        "Basic Components",
        "Fundamental form elements for building forms",
        cx,
        vec![
            section(
                "Text Field",
                cx,
                TextField::new("basic-full-name", settings)
                    .label("Full Name")
                    .placeholder("Enter your full name")
                    .required(true)
                    .description("Your first and last name")
                    .on_change(|value, _window, _cx| log::debug!("full name: {value}")),
            )
            .into_any_element(),
            section(
                "Text Area",
                cx,
                TextAreaField::new("basic-comments", settings)
                    .label("Comments")
                    .placeholder("Enter your comments")
                    .description("Share your thoughts with us")
                    .rows(4),
            )
            .into_any_element(),
            section(
                "Number Field",
                cx,
                NumberField::new("basic-age", settings)
                    .label("Age")
                    .placeholder("Enter your age")
                    .required(true)
                    .description("Must be 18 or older")
                    .min(18.)
                    .max(100.),
            )
            .into_any_element(),
            section(
                "Password Field",
                cx,
                PasswordField::new("basic-password", settings)
                    .label("Password")
                    .placeholder("Enter your password")
                    .required(true)
                    .description("Must be at least 8 characters"),
            )
            .into_any_element(),
            section(
                "Checkbox",
                cx,
                CheckboxField::new("basic-terms", settings)
                    .label("I agree to the terms and conditions")
                    .description("Please read our terms before agreeing")
                    .on_change(|checked, _window, _cx| log::debug!("terms accepted: {checked}")),
            )
            .into_any_element(),
            section(
                "Select Box",
                cx,
                SelectField::new("basic-country", settings)
                    .label("Country")
                    .placeholder("Select your country")
                    .required(true)
                    .description("Choose your country of residence")
                    .options([
                        ("us", "United States"),
                        ("uk", "United Kingdom"),
                        ("ca", "Canada"),
                        ("au", "Australia"),
                    ])
                    .on_change(|value, _window, _cx| log::debug!("country: {value}")),
            )
            .into_any_element(),
            section(
                "Radio Buttons",
                cx,
                RadioField::new("basic-contact-method", settings)
                    .label("Preferred Contact Method")
                    .required(true)
                    .description("How would you like us to contact you?")
                    .options([("email", "Email"), ("phone", "Phone"), ("sms", "SMS")]),
            )
            .into_any_element(),
            section(
                "Button",
                cx,
                div().child(
                    ButtonField::new("basic-submit", settings)
                        .text("Submit Form")
                        .on_click(|_, _window, _cx| log::info!("form submitted")),
                ),
            )
            .into_any_element(),
        ],
    )
}

fn advanced_tab(settings: ThemeSettings, cx: &App) -> impl IntoElement {
    card(
        settings,
        "Advanced Components",
        "Specialized form components with advanced functionality",
        cx,
        vec![
            section(
                "Email Field",
                cx,
                EmailField::new("advanced-email", settings)
                    .label("Email Address")
                    .placeholder("example@email.com")
                    .required(true)
                    .description("We'll never share your email"),
            )
            .into_any_element(),
            section(
                "Phone Number",
                cx,
                PhoneField::new("advanced-phone", settings)
                    .label("Phone Number")
                    .placeholder("(555) 555-5555")
                    .description("Include area code"),
            )
            .into_any_element(),
            section(
                "Date/Time",
                cx,
                DateTimeField::new("advanced-birth-date", settings)
                    .label("Date of Birth")
                    .description("Select your date of birth")
                    .on_change(|date, _window, _cx| log::debug!("date of birth: {date}")),
            )
            .into_any_element(),
            section(
                "Day",
                cx,
                DayField::new("advanced-day", settings)
                    .label("Day")
                    .description("Enter month, day, and year"),
            )
            .into_any_element(),
            section(
                "Time",
                cx,
                TimeField::new("advanced-time", settings)
                    .label("Preferred Time")
                    .description("Select your preferred appointment time"),
            )
            .into_any_element(),
            section(
                "Currency",
                cx,
                CurrencyField::new("advanced-budget", settings)
                    .label("Budget")
                    .placeholder("0.00")
                    .description("Enter your budget amount")
                    .currency("$"),
            )
            .into_any_element(),
            section(
                "URL",
                cx,
                UrlField::new("advanced-website", settings)
                    .label("Website")
                    .placeholder("https://example.com")
                    .description("Enter your website URL"),
            )
            .into_any_element(),
            section(
                "Tags",
                cx,
                TagsField::new("advanced-skills", settings)
                    .label("Skills")
                    .placeholder("Type and press Enter")
                    .description("Add your technical skills")
                    .default_tags(["React", "Form.io"])
                    .on_change(|tags, _window, _cx| log::debug!("skills: {tags:?}")),
            )
            .into_any_element(),
            section(
                "Address",
                cx,
                AddressField::new("advanced-address", settings)
                    .label("Mailing Address")
                    .required(true)
                    .description("Enter your complete mailing address"),
            )
            .into_any_element(),
            section(
                "Signature",
                cx,
                SignatureField::new("advanced-signature", settings)
                    .label("Digital Signature")
                    .required(true)
                    .on_change(|data_url, _window, _cx| {
                        log::debug!("signature captured ({} bytes)", data_url.len())
                    }),
            )
            .into_any_element(),
            section(
                "Survey",
                cx,
                SurveyField::new("advanced-survey", settings)
                    .label("Customer Satisfaction Survey")
                    .required(true)
                    .description("Please rate the following aspects")
                    .questions(SURVEY_QUESTIONS)
                    .options(SURVEY_OPTIONS),
            )
            .into_any_element(),
            section(
                "File Upload",
                cx,
                FileField::new("advanced-documents", settings)
                    .label("Upload Documents")
                    .required(true)
                    .description("Upload PDF or Word documents")
                    .accept(".pdf,.doc,.docx")
                    .multiple(true),
            )
            .into_any_element(),
        ],
    )
}

fn layout_tab(settings: ThemeSettings, cx: &App) -> impl IntoElement {
    card(
        settings,
        "Layout Components",
        "Organize and structure your forms with layout components",
        cx,
        vec![
            section(
                "Panel",
                cx,
                PanelField::new(settings, "Personal Information")
                    .description("Please provide your personal details")
                    .child(
                        TextField::new("layout-panel-first", settings)
                            .label("First Name")
                            .placeholder("John"),
                    )
                    .child(
                        TextField::new("layout-panel-last", settings)
                            .label("Last Name")
                            .placeholder("Doe"),
                    )
                    .child(
                        EmailField::new("layout-panel-email", settings)
                            .label("Email")
                            .placeholder("john@example.com"),
                    ),
            )
            .into_any_element(),
            section(
                "Columns",
                cx,
                ColumnsField::new().columns(2).group([
                    TextField::new("layout-columns-first", settings)
                        .label("First Name")
                        .placeholder("John"),
                    TextField::new("layout-columns-last", settings)
                        .label("Last Name")
                        .placeholder("Doe"),
                ]),
            )
            .into_any_element(),
            section(
                "Fieldset",
                cx,
                FieldSetField::new(settings, "Contact Information")
                    .child(
                        EmailField::new("layout-fieldset-email", settings)
                            .label("Email")
                            .placeholder("email@example.com"),
                    )
                    .child(
                        PhoneField::new("layout-fieldset-phone", settings)
                            .label("Phone")
                            .placeholder("(555) 555-5555"),
                    ),
            )
            .into_any_element(),
            section(
                "Tabs",
                cx,
                TabsField::new("layout-tabs", settings)
                    .tab(
                        "Personal",
                        stack()
                            .child(
                                TextField::new("layout-tabs-name", settings)
                                    .label("Name")
                                    .placeholder("Enter name"),
                            )
                            .child(
                                EmailField::new("layout-tabs-email", settings)
                                    .label("Email")
                                    .placeholder("Enter email"),
                            ),
                    )
                    .tab(
                        "Work",
                        stack()
                            .child(
                                TextField::new("layout-tabs-company", settings)
                                    .label("Company")
                                    .placeholder("Enter company"),
                            )
                            .child(
                                TextField::new("layout-tabs-position", settings)
                                    .label("Position")
                                    .placeholder("Enter position"),
                            ),
                    ),
            )
            .into_any_element(),
            section("HTML Content", cx, ContentField::new(settings, TERMS_HTML)).into_any_element(),
        ],
    )
}

fn data_tab(settings: ThemeSettings, cx: &App) -> impl IntoElement {
    let hidden = HiddenField::new("reference").value("hidden-value-123");
    let hidden_note = format!("Hidden field with value: \"{}\"", hidden.current_value());
    let muted = cx.get_theme().colors.text.secondary;
    let caption_size = cx.get_theme().layout.text.default_font.sizes.caption;
    let hint = |text: &'static str| div().text_size(caption_size).text_color(muted).child(text);

    card(
        settings,
        "Data Components",
        "Components for managing complex data structures",
        cx,
        vec![
            section(
                "Hidden Field",
                cx,
                stack()
                    .gap(px(8.))
                    .child(hint("Hidden fields store data without displaying it to users"))
                    .child(hidden)
                    .child(note(hidden_note, cx)),
            )
            .into_any_element(),
            section(
                "Data Grid",
                cx,
                DataGridField::new("data-team", settings)
                    .label("Team Members")
                    .required(true)
                    .description("Add team members and their information")
                    .columns([("name", "Name"), ("email", "Email"), ("age", "Age")])
                    .row([
                        ("name", "John Doe"),
                        ("email", "john@example.com"),
                        ("age", "30"),
                    ])
                    .on_change(|rows, _window, _cx| {
                        log::debug!("team members: {} rows", rows.len())
                    }),
            )
            .into_any_element(),
            section(
                "Container",
                cx,
                stack()
                    .p(px(16.))
                    .border_1()
                    .border_color(cx.get_theme().colors.border.primary)
                    .rounded(cx.get_theme().layout.corner_radii.md)
                    .child(hint("A container groups related form components together"))
                    .child(
                        TextField::new("data-username", settings)
                            .label("Username")
                            .placeholder("Enter username"),
                    )
                    .child(
                        PasswordField::new("data-password", settings)
                            .label("Password")
                            .placeholder("Enter password"),
                    )
                    .child(div().child(ButtonField::new("data-login", settings).text("Login"))),
            )
            .into_any_element(),
            section(
                "Edit Grid",
                cx,
                stack()
                    .gap(px(8.))
                    .child(hint("Similar to Data Grid but with inline editing capabilities"))
                    .child(note(
                        "The Edit Grid component allows users to add, edit, and remove rows \
                         with a more streamlined interface than Data Grid.",
                        cx,
                    )),
            )
            .into_any_element(),
        ],
    )
}

impl RenderOnce for Gallery {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let settings = self.settings;
        let theme = cx.get_theme();
        let title_size = theme.layout.text.default_font.sizes.heading_xl;
        let body_size = theme.layout.text.default_font.sizes.body;
        let text_color = theme.colors.text.primary;
        let muted = theme.colors.text.secondary;

        let toggle_variant = if self.customization_visible {
            ButtonVariant::Default
        } else {
            ButtonVariant::Outline
        };
        let toggle_icon_color = if self.customization_visible {
            settings.button_text()
        } else {
            text_color
        };

        let header = div()
            .w_full()
            .flex()
            .flex_col()
            .items_center()
            .gap(px(8.))
            .child(
                div()
                    .font_family(settings.header_font.family_name())
                    .font_weight(settings.header_font.weight_or(FontWeight::NORMAL))
                    .text_size(title_size)
                    .text_color(text_color)
                    .child("formsflow Form.io Component Library"),
            )
            .child(div().text_size(body_size).text_color(muted).child(
                "A comprehensive collection of all Form.io components built with GPUI",
            ));

        let actions = div()
            .flex()
            .justify_center()
            .gap(px(8.))
            .child(
                Button::new("gallery-open-samples", settings)
                    .variant(ButtonVariant::Outline)
                    .child(Icon::new(IconKind::FileText).size(px(16.)).color(text_color))
                    .label("Sample Forms")
                    .when_some(self.on_open_samples, |this, handler| {
                        this.on_click(move |event, window, cx| handler(event, window, cx))
                    }),
            )
            .child(
                Button::new("gallery-toggle-customization", settings)
                    .variant(toggle_variant)
                    .child(
                        Icon::new(IconKind::Settings)
                            .size(px(16.))
                            .color(toggle_icon_color),
                    )
                    .label(if self.customization_visible {
                        "Hide Customization"
                    } else {
                        "Show Customization"
                    })
                    .when_some(self.on_toggle_customization, |this, handler| {
                        this.on_click(move |event, window, cx| handler(event, window, cx))
                    }),
            );

        div()
            .w_full()
            .max_w(px(1280.))
            .mx_auto()
            .flex()
            .flex_col()
            .gap(px(24.))
            .child(header)
            .child(actions)
            .child(
                TabsField::new("gallery-tabs", settings)
                    .tab("Basic", basic_tab(settings, cx))
                    .tab("Advanced", advanced_tab(settings, cx))
                    .tab("Layout", layout_tab(settings, cx))
                    .tab("Data", data_tab(settings, cx)),
            )
            .child(Branding::new(settings))
    }
}
