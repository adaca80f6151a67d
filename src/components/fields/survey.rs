use std::rc::Rc;

use gpui::{
    App, ElementId, FontWeight, IntoElement, ParentElement, RenderOnce, SharedString, Styled,
    Window, div, prelude::FluentBuilder, px,
};
use indexmap::IndexMap;

use super::{Field, FieldProps, LabeledField, SelectOption, ValueChangeHandler};
use crate::{
    ElementIdExt,
    components::Radio,
    theme::{ThemeExt, ThemeSettings},
};

/// Answers keyed by question value, in the order questions were answered.
pub type SurveyAnswers = IndexMap<SharedString, SharedString>;

/// Records `answer` for `question`, returning whether anything changed.
pub fn record_answer(
    answers: &mut SurveyAnswers,
    question: &SharedString,
    answer: &SharedString,
) -> bool {
    if answers.get(question) == Some(answer) {
        return false;
    }
    answers.insert(question.clone(), answer.clone());
    true
}

/// A questions × options grid of radio buttons, one answer per question.
#[derive(IntoElement)]
pub struct SurveyField {
    id: ElementId,
    settings: ThemeSettings,
    props: FieldProps,
    questions: Vec<SelectOption>,
    options: Vec<SelectOption>,
    on_change: Option<ValueChangeHandler<SurveyAnswers>>,
}

impl SurveyField {
    pub fn new(id: impl Into<ElementId>, settings: ThemeSettings) -> Self {
        Self {
            id: id.into(),
            settings,
            props: FieldProps::default(),
            questions: Vec::new(),
            options: Vec::new(),
            on_change: None,
        }
    }

    pub fn questions<Q: Into<SelectOption>>(
        mut self,
        questions: impl IntoIterator<Item = Q>,
    ) -> Self {
        self.questions = questions.into_iter().map(Into::into).collect();
        self
    }

    pub fn options<O: Into<SelectOption>>(mut self, options: impl IntoIterator<Item = O>) -> Self {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Called with every answer given so far.
    pub fn on_change(
        mut self,
        on_change: impl Fn(&SurveyAnswers, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }
}

impl LabeledField for SurveyField {
    fn props_mut(&mut self) -> &mut FieldProps {
        &mut self.props
    }
}

impl RenderOnce for SurveyField {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let answers_state = window.use_keyed_state(
            self.id.with_suffix("state:answers"),
            cx,
            |_window, _cx| SurveyAnswers::new(),
        );
        let answers = answers_state.read(cx).clone();

        let theme = cx.get_theme();
        let text_size = theme.layout.text.default_font.sizes.body;
        let caption_size = theme.layout.text.default_font.sizes.caption;
        let text_color = theme.colors.text.primary;
        let header_color = theme.colors.text.secondary;
        let zebra_color = theme.colors.surface.secondary;
        let border_color = theme.colors.border.primary;
        let disabled = self.props.disabled;

        let header = div()
            .flex()
            .items_center()
            .py(px(8.))
            .border_b_1()
            .border_color(border_color)
            .child(div().flex_1())
            .children(self.options.iter().map(|option| {
                div()
                    .w(px(96.))
                    .flex()
                    .justify_center()
                    .text_size(caption_size)
                    .font_weight(FontWeight::MEDIUM)
                    .text_color(header_color)
                    .child(option.label.clone())
            }));

        let rows = self.questions.iter().enumerate().map(|(row_ix, question)| {
            let answer = answers.get(&question.value);

            div()
                .flex()
                .items_center()
                .py(px(10.))
                .px(px(8.))
                .when(row_ix % 2 == 1, |this| this.bg(zebra_color))
                .child(
                    div()
                        .flex_1()
                        .text_size(text_size)
                        .text_color(text_color)
                        .child(question.label.clone()),
                )
                .children(self.options.iter().enumerate().map(|(col_ix, option)| {
                    let answers_state = answers_state.clone();
                    let on_change = self.on_change.clone();
                    let question = question.value.clone();
                    let value = option.value.clone();

                    div().w(px(96.)).flex().justify_center().child(
                        Radio::new(
                            self.id.with_index(&format!("cell:{row_ix}"), col_ix),
                            self.settings,
                        )
                        .selected(answer == Some(&option.value))
                        .disabled(disabled)
                        .on_select(move |window, cx| {
                            let changed = answers_state.update(cx, |answers, cx| {
                                let changed = record_answer(answers, &question, &value);
                                if changed {
                                    cx.notify();
                                }
                                changed
                            });
                            if changed && let Some(on_change) = on_change.as_ref() {
                                let answers = answers_state.read(cx).clone();
                                on_change(&answers, window, cx);
                            }
                        }),
                    )
                }))
        });

        Field::new(self.settings, self.props.clone()).child(
            div()
                .w_full()
                .flex()
                .flex_col()
                .child(header)
                .children(rows),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_replace_per_question_and_keep_order() {
        let mut answers = SurveyAnswers::new();
        let (q1, q2) = (SharedString::from("service"), SharedString::from("speed"));
        assert!(record_answer(&mut answers, &q2, &"good".into()));
        assert!(record_answer(&mut answers, &q1, &"excellent".into()));
        assert!(!record_answer(&mut answers, &q2, &"good".into()));
        assert!(record_answer(&mut answers, &q2, &"poor".into()));

        let answered: Vec<(&str, &str)> = answers
            .iter()
            .map(|(q, a)| (q.as_ref(), a.as_ref()))
            .collect();
        assert_eq!(answered, [("speed", "poor"), ("service", "excellent")]);
    }
}
