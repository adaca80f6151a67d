use std::{
    path::{Path, PathBuf},
    rc::Rc,
};

use gpui::{
    App, CursorStyle, ElementId, Entity, InteractiveElement, IntoElement, ParentElement,
    PathPromptOptions, RenderOnce, SharedString, StatefulInteractiveElement, Styled, Window, div,
    px,
};

use super::{Field, FieldProps, LabeledField, ValueChangeHandler};
use crate::{
    ElementIdExt, IconKind,
    components::{Button, ButtonVariant, Icon},
    theme::{ThemeExt, ThemeSettings},
};

/// Extensions a file input accepts, parsed from `.pdf,.doc,.docx`.
/// An empty filter accepts everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileAccept {
    extensions: Vec<String>,
}

impl FileAccept {
    pub fn parse(accept: &str) -> Self {
        let extensions = accept
            .split(',')
            .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        Self { extensions }
    }

    pub fn matches(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.extensions.iter().any(|accepted| *accepted == ext)
            })
    }
}

/// Merges picked paths into the current selection. Single-file inputs keep only
/// the first accepted pick; multi-file inputs append paths not already listed.
pub fn merge_picked(
    current: &[PathBuf],
    picked: Vec<PathBuf>,
    accept: &FileAccept,
    multiple: bool,
) -> Vec<PathBuf> {
    let accepted = picked.into_iter().filter(|path| {
        let ok = accept.matches(path);
        if !ok {
            log::warn!("ignoring {} (not an accepted file type)", path.display());
        }
        ok
    });

    if !multiple {
        return accepted.take(1).collect();
    }

    let mut files = current.to_vec();
    for path in accepted {
        if !files.contains(&path) {
            files.push(path);
        }
    }
    files
}

fn display_name(path: &Path) -> SharedString {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
        .into()
}

/// File picker backed by the native open dialog.
#[derive(IntoElement)]
pub struct FileField {
    id: ElementId,
    settings: ThemeSettings,
    props: FieldProps,
    accept: FileAccept,
    multiple: bool,
    on_change: Option<ValueChangeHandler<Vec<PathBuf>>>,
}

impl FileField {
    pub fn new(id: impl Into<ElementId>, settings: ThemeSettings) -> Self {
        Self {
            id: id.into(),
            settings,
            props: FieldProps::default(),
            accept: FileAccept::default(),
            multiple: false,
            on_change: None,
        }
    }

    /// Comma separated extensions, e.g. `.pdf,.doc,.docx`.
    pub fn accept(mut self, accept: &str) -> Self {
        self.accept = FileAccept::parse(accept);
        self
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn on_change(
        mut self,
        on_change: impl Fn(&Vec<PathBuf>, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }
}

impl LabeledField for FileField {
    fn props_mut(&mut self) -> &mut FieldProps {
        &mut self.props
    }
}

fn set_files(
    files_state: &Entity<Vec<PathBuf>>,
    files: Vec<PathBuf>,
    on_change: Option<&ValueChangeHandler<Vec<PathBuf>>>,
    window: &mut Window,
    cx: &mut App,
) {
    files_state.update(cx, |current, cx| {
        *current = files.clone();
        cx.notify();
    });
    if let Some(on_change) = on_change {
        on_change(&files, window, cx);
    }
}

impl RenderOnce for FileField {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let files_state = window.use_keyed_state(
            self.id.with_suffix("state:files"),
            cx,
            |_window, _cx| Vec::<PathBuf>::new(),
        );
        let files = files_state.read(cx).clone();

        let theme = cx.get_theme();
        let text_size = theme.layout.text.default_font.sizes.body;
        let caption_size = theme.layout.text.default_font.sizes.caption;
        let text_color = theme.colors.text.primary;
        let muted_color = theme.colors.text.secondary;
        let row_bg = theme.colors.surface.secondary;

        let choose_label = if self.multiple {
            "Choose Files"
        } else {
            "Choose File"
        };

        let choose = Button::new(self.id.with_suffix("choose"), self.settings)
            .variant(ButtonVariant::Outline)
            .disabled(self.props.disabled)
            .child(Icon::new(IconKind::Upload).size(px(14.)).color(text_color))
            .label(choose_label)
            .on_click({
                let files_state = files_state.clone();
                let on_change = self.on_change.clone();
                let accept = self.accept.clone();
                let multiple = self.multiple;
                move |_, window, cx| {
                    let picked = cx.prompt_for_paths(PathPromptOptions {
                        files: true,
                        directories: false,
                        multiple,
                        prompt: None,
                    });
                    let files_state = files_state.clone();
                    let on_change = on_change.clone();
                    let accept = accept.clone();
                    window
                        .spawn(cx, async move |cx| {
                            let picked = match picked.await {
                                Ok(Ok(Some(paths))) => paths,
                                Ok(Ok(None)) => {
                                    log::debug!("file picker dismissed");
                                    return;
                                }
                                Ok(Err(err)) => {
                                    log::error!("file picker failed: {err}");
                                    return;
                                }
                                Err(_) => {
                                    log::warn!("file picker closed without an answer");
                                    return;
                                }
                            };
                            log::info!("picked {} file(s)", picked.len());
                            let _ = cx.update(|window, cx| {
                                let current = files_state.read(cx).clone();
                                let files = merge_picked(&current, picked, &accept, multiple);
                                set_files(&files_state, files, on_change.as_ref(), window, cx);
                            });
                        })
                        .detach();
                }
            });

        let list = div().flex().flex_col().gap(px(4.)).children(
            files.iter().enumerate().map(|(ix, path)| {
                let files_state = files_state.clone();
                let on_change = self.on_change.clone();

                div()
                    .flex()
                    .items_center()
                    .justify_between()
                    .px(px(10.))
                    .py(px(6.))
                    .rounded(px(6.))
                    .bg(row_bg)
                    .child(
                        div()
                            .flex()
                            .items_center()
                            .gap(px(8.))
                            .text_size(text_size)
                            .text_color(text_color)
                            .child(Icon::new(IconKind::FileText).size(px(14.)).color(muted_color))
                            .child(display_name(path)),
                    )
                    .child(
                        div()
                            .id(self.id.with_index("remove", ix))
                            .cursor(CursorStyle::PointingHand)
                            .child(Icon::new(IconKind::X).size(px(14.)).color(muted_color))
                            .on_click(move |_, window, cx| {
                                let mut files = files_state.read(cx).clone();
                                if ix < files.len() {
                                    let removed = files.remove(ix);
                                    log::debug!("removed {}", removed.display());
                                }
                                set_files(&files_state, files, on_change.as_ref(), window, cx);
                            }),
                    )
            }),
        );

        let empty_hint = files.is_empty().then(|| {
            div()
                .text_size(caption_size)
                .text_color(muted_color)
                .child("No file chosen")
        });

        Field::new(self.settings, self.props.clone())
            .child(choose)
            .children(empty_hint)
            .child(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_filter_ignores_dots_and_case() {
        let accept = FileAccept::parse(".pdf, .DOC,.docx,");
        assert!(accept.matches(Path::new("report.PDF")));
        assert!(accept.matches(Path::new("/tmp/letter.doc")));
        assert!(!accept.matches(Path::new("image.png")));
        assert!(!accept.matches(Path::new("README")));
        assert!(FileAccept::default().matches(Path::new("anything.bin")));
    }

    #[test]
    fn single_input_keeps_first_accepted_pick() {
        let accept = FileAccept::parse(".pdf");
        let current = vec![PathBuf::from("old.pdf")];
        let picked = vec![PathBuf::from("a.png"), PathBuf::from("b.pdf"), PathBuf::from("c.pdf")];
        assert_eq!(
            merge_picked(&current, picked, &accept, false),
            [PathBuf::from("b.pdf")]
        );
    }

    #[test]
    fn multiple_input_appends_without_duplicates() {
        let accept = FileAccept::default();
        let current = vec![PathBuf::from("a.pdf")];
        let picked = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
        assert_eq!(
            merge_picked(&current, picked, &accept, true),
            [PathBuf::from("a.pdf"), PathBuf::from("b.pdf")]
        );
    }
}
