//! Text editing primitive every text-like field is built on.
//!
//! [`InputState`] owns the value and selection, [`Input`] draws it. The element
//! paints one shaped line per logical line, so single-line and multi-line inputs
//! share the same code.

use std::{ops::Range, rc::Rc};

use gpui::{
    App, Bounds, CursorStyle, DispatchPhase, Element, ElementId, ElementInputHandler, Entity,
    FocusHandle, Focusable, GlobalElementId, Hsla, InspectorElementId, InteractiveElement,
    IntoElement, KeyBinding, LayoutId, MouseButton, MouseMoveEvent, PaintQuad, ParentElement,
    Pixels, Refineable, RenderOnce, ShapedLine, SharedString, Style, StyleRefinement, Styled,
    TextAlign, TextRun, UnderlineStyle, Window, div, fill, hsla, point, prelude::FluentBuilder,
    px, relative, size,
};

mod buffer;
mod cursor_blink;
mod state;

pub use buffer::*;
pub use cursor_blink::CursorBlink;
pub use state::*;

use crate::utils::rgb_a;

const KEY_CONTEXT: &str = "TextInput";

#[derive(IntoElement)]
pub struct Input {
    id: ElementId,
    state: Entity<InputState>,
    disabled: bool,
    rows: usize,
    placeholder: SharedString,
    placeholder_text_color: Option<Hsla>,
    selection_color: Option<Hsla>,
    transform_text: Option<TransformTextFn>,
    on_change: Option<ChangeListener>,
    style: StyleRefinement,
}

impl Styled for Input {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl Input {
    pub fn new(id: impl Into<ElementId>, state: Entity<InputState>) -> Self {
        Self {
            id: id.into(),
            state,
            disabled: false,
            rows: 1,
            placeholder: SharedString::default(),
            placeholder_text_color: None,
            selection_color: None,
            transform_text: None,
            on_change: None,
            style: StyleRefinement::default(),
        }
    }

    /// Minimum number of visible lines. Only multi-line states grow past one.
    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = rows.max(1);
        self
    }

    /// Displays every char through `transform` without touching the value.
    pub fn transform_text(mut self, transform: impl Fn(char) -> char + 'static) -> Self {
        self.transform_text = Some(Rc::new(transform));
        self
    }

    /// Called after every user edit with the new value.
    pub fn on_change(
        mut self,
        on_change: impl Fn(&SharedString, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn placeholder_text_color(mut self, color: impl Into<Hsla>) -> Self {
        self.placeholder_text_color = Some(color.into());
        self
    }

    pub fn selection_color(mut self, color: impl Into<Hsla>) -> Self {
        self.selection_color = Some(color.into());
        self
    }

    pub fn placeholder(mut self, text: impl Into<SharedString>) -> Self {
        self.placeholder = text.into();
        self
    }

    pub fn read_text(&self, cx: &App) -> SharedString {
        self.state.read(cx).value()
    }
}

impl RenderOnce for Input {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let text_style = &self.style.text;
        let line_height = text_style
            .line_height
            .map(|this| {
                this.to_pixels(
                    text_style
                        .font_size
                        .unwrap_or_else(|| window.text_style().font_size),
                    window.rem_size(),
                )
            })
            .unwrap_or_else(|| window.line_height());

        let transform = self.transform_text.clone();
        let on_change = self.on_change.clone();
        self.state.update(cx, |state, _cx| {
            state.transform = transform;
            state.on_change = on_change;
        });

        let state = self.state.read(cx);
        let is_multiline = state.is_multiline();
        let rows = if is_multiline { self.rows } else { 1 };
        let focus_handle = state.focus_handle.clone();
        let cursor_visible = state.cursor_visible(cx);

        let text_color = self.style.text.color.unwrap_or_else(|| hsla(0., 0., 0.1, 1.));
        let placeholder_text_color = self
            .placeholder_text_color
            .unwrap_or_else(|| hsla(0., 0., 0., 0.4));
        let selection_color = self
            .selection_color
            .unwrap_or_else(|| rgb_a(0x488BFF, 0.3).into());

        div()
            .id(self.id.clone())
            .map(|mut this| {
                this.style().refine(&self.style);
                this
            })
            .overflow_hidden()
            .key_context(KEY_CONTEXT)
            .when(!self.disabled, |this| this.track_focus(&focus_handle))
            .cursor(if self.disabled {
                CursorStyle::OperationNotAllowed
            } else {
                CursorStyle::IBeam
            })
            .on_action(window.listener_for(&self.state, InputState::backspace))
            .on_action(window.listener_for(&self.state, InputState::delete))
            .on_action(window.listener_for(&self.state, InputState::left))
            .on_action(window.listener_for(&self.state, InputState::right))
            .on_action(window.listener_for(&self.state, InputState::select_left))
            .on_action(window.listener_for(&self.state, InputState::select_right))
            .on_action(window.listener_for(&self.state, InputState::select_all))
            .on_action(window.listener_for(&self.state, InputState::home))
            .on_action(window.listener_for(&self.state, InputState::end))
            .on_action(window.listener_for(&self.state, InputState::show_character_palette))
            .on_action(window.listener_for(&self.state, InputState::paste))
            .on_action(window.listener_for(&self.state, InputState::cut))
            .on_action(window.listener_for(&self.state, InputState::copy))
            .when(is_multiline, |this| {
                this.on_action(window.listener_for(&self.state, InputState::up))
                    .on_action(window.listener_for(&self.state, InputState::down))
                    .on_action(window.listener_for(&self.state, InputState::select_up))
                    .on_action(window.listener_for(&self.state, InputState::select_down))
                    .on_action(window.listener_for(&self.state, InputState::submit))
                    .on_action(window.listener_for(&self.state, InputState::insert_newline))
            })
            .on_mouse_down(
                MouseButton::Left,
                window.listener_for(&self.state, InputState::on_mouse_down),
            )
            .on_mouse_up(
                MouseButton::Left,
                window.listener_for(&self.state, InputState::on_mouse_up),
            )
            .on_mouse_up_out(
                MouseButton::Left,
                window.listener_for(&self.state, InputState::on_mouse_up),
            )
            .on_mouse_move(window.listener_for(&self.state, InputState::on_mouse_move))
            .child(TextElement {
                input: self.state.clone(),
                placeholder: self.placeholder,
                text_color,
                placeholder_text_color,
                selection_color,
                line_height,
                rows,
                cursor_visible,
            })
    }
}

impl Focusable for Input {
    fn focus_handle(&self, cx: &App) -> FocusHandle {
        self.state.read(cx).focus_handle.clone()
    }
}

struct TextElement {
    input: Entity<InputState>,
    placeholder: SharedString,
    text_color: Hsla,
    placeholder_text_color: Hsla,
    selection_color: Hsla,
    line_height: Pixels,
    rows: usize,
    cursor_visible: bool,
}

struct PrepaintState {
    lines: Vec<(ShapedLine, Range<usize>)>,
    selections: Vec<PaintQuad>,
    cursor: Option<PaintQuad>,
}

impl IntoElement for TextElement {
    type Element = Self;

    fn into_element(self) -> Self::Element {
        self
    }
}

impl TextElement {
    fn line_origin(&self, bounds: &Bounds<Pixels>, line: usize) -> gpui::Point<Pixels> {
        point(bounds.left(), bounds.top() + self.line_height * line as f32)
    }

    fn cursor_quad(&self, origin: gpui::Point<Pixels>, x: Pixels) -> PaintQuad {
        let height = self.line_height * 0.8;
        let inset = (self.line_height - height) / 2.;
        fill(
            Bounds::new(point(origin.x + x, origin.y + inset), size(px(1.), height)),
            self.text_color,
        )
    }
}

/// Intersection of `marked` with a line, relative to the line start.
fn local_range(marked: &Range<usize>, line: &Range<usize>) -> Option<Range<usize>> {
    let start = marked.start.max(line.start);
    let end = marked.end.min(line.end);
    (start < end).then(|| start - line.start..end - line.start)
}

impl Element for TextElement {
    type RequestLayoutState = ();
    type PrepaintState = PrepaintState;

    fn id(&self) -> Option<ElementId> {
        None
    }

    fn source_location(&self) -> Option<&'static core::panic::Location<'static>> {
        None
    }

    fn request_layout(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        window: &mut Window,
        cx: &mut App,
    ) -> (LayoutId, Self::RequestLayoutState) {
        let input = self.input.read(cx);
        let lines = if input.is_multiline() {
            input.buffer().line_count().max(self.rows)
        } else {
            1
        };

        let mut style = Style::default();
        style.size.width = relative(1.).into();
        style.size.height = (self.line_height * lines as f32).into();

        (window.request_layout(style, [], cx), ())
    }

    fn prepaint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        window: &mut Window,
        cx: &mut App,
    ) -> Self::PrepaintState {
        let input = self.input.read(cx);
        let buffer = input.buffer();
        let transform = input.transform.clone();
        let style = window.text_style();
        let font_size = style.font_size.to_pixels(window.rem_size());

        let base_run = |len: usize, color: Hsla| TextRun {
            len,
            font: style.font(),
            color,
            background_color: None,
            underline: None,
            strikethrough: None,
        };

        if buffer.is_empty() {
            let run = base_run(self.placeholder.len(), self.placeholder_text_color);
            let line = window
                .text_system()
                .shape_line(self.placeholder.clone(), font_size, &[run], None);

            return PrepaintState {
                lines: vec![(line, 0..0)],
                selections: Vec::new(),
                cursor: Some(self.cursor_quad(bounds.origin, px(0.))),
            };
        }

        let to_display = |source: &str, offset: usize| match &transform {
            Some(transform) => display_offset(source, offset, |c| transform(c)),
            None => offset,
        };

        let selected = buffer.selected_range();
        let cursor_offset = buffer.cursor_offset();
        let marked = buffer.marked_range();

        let mut lines = Vec::new();
        let mut selections = Vec::new();
        let mut cursor = None;

        for (ix, range) in buffer.line_ranges().into_iter().enumerate() {
            let origin = self.line_origin(&bounds, ix);
            let source = &buffer.text()[range.clone()];
            let display: SharedString = match &transform {
                Some(transform) => source.chars().map(|c| transform(c)).collect::<String>(),
                None => source.to_string(),
            }
            .into();

            let run = base_run(display.len(), self.text_color);
            let runs = match marked.as_ref().and_then(|marked| local_range(marked, &range)) {
                Some(local) => {
                    let start = to_display(source, local.start);
                    let end = to_display(source, local.end);
                    [
                        TextRun {
                            len: start,
                            ..run.clone()
                        },
                        TextRun {
                            len: end - start,
                            underline: Some(UnderlineStyle {
                                color: Some(run.color),
                                thickness: px(1.),
                                wavy: false,
                            }),
                            ..run.clone()
                        },
                        TextRun {
                            len: display.len() - end,
                            ..run
                        },
                    ]
                    .into_iter()
                    .filter(|run| run.len > 0)
                    .collect()
                }
                None => vec![run],
            };

            let line = window
                .text_system()
                .shape_line(display, font_size, &runs, None);

            if !selected.is_empty() && selected.start <= range.end && selected.end > range.start
            {
                let start = selected.start.max(range.start) - range.start;
                let end = selected.end.min(range.end) - range.start;
                selections.push(fill(
                    Bounds::from_corners(
                        point(origin.x + line.x_for_index(to_display(source, start)), origin.y),
                        point(
                            origin.x + line.x_for_index(to_display(source, end)),
                            origin.y + self.line_height,
                        ),
                    ),
                    self.selection_color,
                ));
            }

            if selected.is_empty() && range.start <= cursor_offset && cursor_offset <= range.end {
                let x = line.x_for_index(to_display(source, cursor_offset - range.start));
                cursor = Some(self.cursor_quad(origin, x));
            }

            lines.push((line, range));
        }

        PrepaintState {
            lines,
            selections,
            cursor,
        }
    }

    fn paint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        prepaint: &mut Self::PrepaintState,
        window: &mut Window,
        cx: &mut App,
    ) {
        let focus_handle = self.input.read(cx).focus_handle.clone();

        // Drags keep selecting after the pointer leaves the input.
        let input = self.input.clone();
        window.on_mouse_event(move |event: &MouseMoveEvent, phase, _window, cx| {
            if phase == DispatchPhase::Capture {
                return;
            }
            input.update(cx, |input, cx| input.drag_to(event.position, cx));
        });

        window.handle_input(
            &focus_handle,
            ElementInputHandler::new(bounds, self.input.clone()),
            cx,
        );

        for selection in prepaint.selections.drain(..) {
            window.paint_quad(selection)
        }

        let mut layouts = Vec::with_capacity(prepaint.lines.len());
        for (ix, (shaped, range)) in prepaint.lines.drain(..).enumerate() {
            let origin = self.line_origin(&bounds, ix);
            let painted =
                shaped.paint(origin, self.line_height, TextAlign::Left, None, window, cx);
            if let Err(err) = painted {
                log::warn!("failed to paint input line: {err}");
            }
            layouts.push(LineLayout {
                shaped,
                bounds: Bounds::new(origin, size(bounds.size.width, self.line_height)),
                range,
            });
        }

        if focus_handle.is_focused(window)
            && self.cursor_visible
            && let Some(cursor) = prepaint.cursor.take()
        {
            window.paint_quad(cursor);
        }

        self.input.update(cx, |input, _cx| input.line_layouts = layouts);
    }
}

pub fn init(cx: &mut App) {
    let context = Some(KEY_CONTEXT);

    cx.bind_keys([
        KeyBinding::new("backspace", Backspace, context),
        KeyBinding::new("delete", Delete, context),
        KeyBinding::new("left", Left, context),
        KeyBinding::new("right", Right, context),
        KeyBinding::new("up", Up, context),
        KeyBinding::new("down", Down, context),
        KeyBinding::new("shift-left", SelectLeft, context),
        KeyBinding::new("shift-right", SelectRight, context),
        KeyBinding::new("shift-up", SelectUp, context),
        KeyBinding::new("shift-down", SelectDown, context),
        KeyBinding::new("home", Home, context),
        KeyBinding::new("end", End, context),
        KeyBinding::new("enter", Submit, context),
        KeyBinding::new("shift-enter", InsertNewline, context),
    ]);

    #[cfg(target_os = "macos")]
    cx.bind_keys([
        KeyBinding::new("cmd-a", SelectAll, context),
        KeyBinding::new("cmd-v", Paste, context),
        KeyBinding::new("cmd-c", Copy, context),
        KeyBinding::new("cmd-x", Cut, context),
        KeyBinding::new("ctrl-cmd-space", ShowCharacterPalette, context),
    ]);

    #[cfg(not(target_os = "macos"))]
    cx.bind_keys([
        KeyBinding::new("ctrl-a", SelectAll, context),
        KeyBinding::new("ctrl-v", Paste, context),
        KeyBinding::new("ctrl-c", Copy, context),
        KeyBinding::new("ctrl-x", Cut, context),
    ]);

    cx.on_keyboard_layout_change(move |cx| {
        for window in cx.windows() {
            window
                .update(cx, |this, _, cx| cx.notify(this.entity_id()))
                .ok();
        }
    })
    .detach();
}

#[cfg(test)]
mod tests {
    use super::local_range;

    #[test]
    fn marked_range_is_clipped_to_the_line() {
        assert_eq!(local_range(&(2..8), &(4..10)), Some(0..4));
        assert_eq!(local_range(&(5..6), &(4..10)), Some(1..2));
        assert_eq!(local_range(&(0..4), &(4..10)), None);
    }
}
