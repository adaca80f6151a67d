use std::rc::Rc;

use gpui::{
    App, CursorStyle, ElementId, InteractiveElement, IntoElement, ParentElement, RenderOnce,
    SharedString, StatefulInteractiveElement, Styled, Window, div, px,
};

use super::{Field, FieldProps, LabeledField, ValueChangeHandler, use_input_state};
use crate::{
    ElementIdExt, IconKind,
    components::{Icon, TextInput},
    primitives::input::Submit,
    theme::{ThemeExt, ThemeSettings},
};

pub const TAGS_PLACEHOLDER: &str = "Type and press Enter";

/// An ordered list of distinct, non-blank tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagList {
    tags: Vec<SharedString>,
}

impl TagList {
    pub fn new<T: Into<SharedString>>(tags: impl IntoIterator<Item = T>) -> Self {
        let mut list = Self::default();
        for tag in tags {
            let tag: SharedString = tag.into();
            list.commit(&tag);
        }
        list
    }

    pub fn tags(&self) -> &[SharedString] {
        &self.tags
    }

    /// Appends the trimmed `pending` text. Returns false when it was blank or
    /// already present, leaving the list untouched.
    pub fn commit(&mut self, pending: &str) -> bool {
        let tag = pending.trim();
        if tag.is_empty() || self.tags.iter().any(|existing| existing.as_ref() == tag) {
            return false;
        }
        self.tags.push(SharedString::from(tag.to_string()));
        true
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|existing| existing.as_ref() != tag);
        self.tags.len() != before
    }
}

/// Free-form tags committed with Enter, shown as removable chips.
#[derive(IntoElement)]
pub struct TagsField {
    id: ElementId,
    settings: ThemeSettings,
    props: FieldProps,
    default_tags: Vec<SharedString>,
    on_change: Option<ValueChangeHandler<Vec<SharedString>>>,
}

impl TagsField {
    pub fn new(id: impl Into<ElementId>, settings: ThemeSettings) -> Self {
        Self {
            id: id.into(),
            settings,
            props: FieldProps::default(),
            default_tags: Vec::new(),
            on_change: None,
        }
    }

    pub fn default_tags<T: Into<SharedString>>(
        mut self,
        tags: impl IntoIterator<Item = T>,
    ) -> Self {
        self.default_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Called with the full list after every commit or removal.
    pub fn on_change(
        mut self,
        on_change: impl Fn(&Vec<SharedString>, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }
}

impl LabeledField for TagsField {
    fn props_mut(&mut self) -> &mut FieldProps {
        &mut self.props
    }
}

impl RenderOnce for TagsField {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let default_tags = self.default_tags.clone();
        let tags_state = window.use_keyed_state(
            self.id.with_suffix("state:tags"),
            cx,
            move |_window, _cx| TagList::new(default_tags),
        );
        let pending = use_input_state(&self.id, "pending", None, false, window, cx);
        let tags = tags_state.read(cx).tags().to_vec();

        let theme = cx.get_theme();
        let chip_bg = theme.colors.surface.tertiary;
        let chip_text = theme.colors.text.primary;
        let caption_size = theme.layout.text.default_font.sizes.caption;
        let remove_color = theme.colors.text.secondary;

        let commit = {
            let tags_state = tags_state.clone();
            let pending = pending.clone();
            let on_change = self.on_change.clone();
            move |_: &Submit, window: &mut Window, cx: &mut App| {
                let text = pending.read(cx).text().to_string();
                let committed = tags_state.update(cx, |tags, cx| {
                    let committed = tags.commit(&text);
                    if committed {
                        cx.notify();
                    }
                    committed
                });
                pending.update(cx, |pending, cx| pending.clear(cx));
                if committed && let Some(on_change) = on_change.as_ref() {
                    let tags = tags_state.read(cx).tags().to_vec();
                    on_change(&tags, window, cx);
                }
            }
        };

        let chips = div()
            .flex()
            .flex_wrap()
            .gap(px(6.))
            .children(tags.into_iter().enumerate().map(|(ix, tag)| {
                let tags_state = tags_state.clone();
                let on_change = self.on_change.clone();
                let removed = tag.clone();

                div()
                    .flex()
                    .items_center()
                    .gap(px(4.))
                    .px(px(8.))
                    .py(px(2.))
                    .rounded(px(9999.))
                    .bg(chip_bg)
                    .text_size(caption_size)
                    .text_color(chip_text)
                    .child(tag)
                    .child(
                        div()
                            .id(self.id.with_index("remove", ix))
                            .cursor(CursorStyle::PointingHand)
                            .child(Icon::new(IconKind::X).size(px(12.)).color(remove_color))
                            .on_click(move |_, window, cx| {
                                let removed = tags_state.update(cx, |tags, cx| {
                                    let removed = tags.remove(&removed);
                                    cx.notify();
                                    removed
                                });
                                if removed && let Some(on_change) = on_change.as_ref() {
                                    let tags = tags_state.read(cx).tags().to_vec();
                                    on_change(&tags, window, cx);
                                }
                            }),
                    )
            }));

        let placeholder = self
            .props
            .placeholder
            .clone()
            .unwrap_or_else(|| TAGS_PLACEHOLDER.into());

        Field::new(self.settings, self.props.clone())
            .child(chips)
            .child(
                div().on_action(commit).child(
                    TextInput::new(self.id.clone(), self.settings, pending)
                        .placeholder(placeholder)
                        .disabled(self.props.disabled),
                ),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(tags: &TagList) -> Vec<&str> {
        tags.tags().iter().map(|tag| tag.as_ref()).collect()
    }

    #[test]
    fn commit_trims_and_appends() {
        let mut tags = TagList::default();
        assert!(tags.commit("  React "));
        assert_eq!(names(&tags), ["React"]);
    }

    #[test]
    fn commit_skips_duplicates_and_blanks() {
        let mut tags = TagList::new(["React"]);
        assert!(!tags.commit("React"));
        assert!(!tags.commit(" React"));
        assert!(!tags.commit("   "));
        assert_eq!(names(&tags), ["React"]);
        assert!(tags.commit("Vue"));
        assert_eq!(names(&tags), ["React", "Vue"]);
    }

    #[test]
    fn remove_drops_only_that_tag() {
        let mut tags = TagList::new(["a", "b", "c"]);
        assert!(tags.remove("b"));
        assert!(!tags.remove("b"));
        assert_eq!(names(&tags), ["a", "c"]);
    }
}
