use std::{ops::Range, rc::Rc};

use gpui::{
    App, AppContext as _, Bounds, ClipboardItem, Context, Entity, EntityInputHandler,
    EventEmitter, FocusHandle, Focusable, MouseDownEvent, MouseMoveEvent, MouseUpEvent, Pixels,
    Point, ShapedLine, SharedString, Subscription, UTF16Selection, Window, actions, point,
};

use super::{
    CursorBlink,
    buffer::{EditBuffer, display_offset, source_offset},
};

actions!(
    text_input,
    [
        Backspace,
        Delete,
        Left,
        Right,
        Up,
        Down,
        SelectLeft,
        SelectRight,
        SelectUp,
        SelectDown,
        SelectAll,
        Home,
        End,
        ShowCharacterPalette,
        Paste,
        Cut,
        Copy,
        /// Enter. Multi-line inputs insert a newline; single-line inputs let it
        /// bubble so the surrounding field can react.
        Submit,
        InsertNewline,
    ]
);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Changed(SharedString),
    Focused,
    Blurred,
}

pub(crate) type ChangeListener = Rc<dyn Fn(&SharedString, &mut Window, &mut App)>;
pub(crate) type TransformTextFn = Rc<dyn Fn(char) -> char>;

/// One painted line, kept for hit testing and IME bounds.
pub(crate) struct LineLayout {
    pub shaped: ShapedLine,
    pub bounds: Bounds<Pixels>,
    /// Byte range of the line inside the value.
    pub range: Range<usize>,
}

/// Editing state behind an [`Input`](super::Input).
///
/// Fields create one per control through keyed state and read it back every frame.
/// The state remembers whether it has ever lost focus, which validated fields use to
/// delay their messages until the user moves on.
pub struct InputState {
    pub(crate) focus_handle: FocusHandle,
    buffer: EditBuffer,
    multiline: bool,
    max_length: Option<usize>,
    touched: bool,
    is_selecting: bool,
    pub(crate) line_layouts: Vec<LineLayout>,
    pub(crate) transform: Option<TransformTextFn>,
    pub(crate) on_change: Option<ChangeListener>,
    cursor_blink: Entity<CursorBlink>,
    _subscriptions: Vec<Subscription>,
}

impl EventEmitter<InputEvent> for InputState {}

impl InputState {
    pub fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let focus_handle = cx.focus_handle().tab_stop(true);

        let subscriptions = vec![
            cx.on_focus(&focus_handle, window, Self::handle_focus),
            cx.on_blur(&focus_handle, window, Self::handle_blur),
        ];

        Self {
            focus_handle,
            buffer: EditBuffer::default(),
            multiline: false,
            max_length: None,
            touched: false,
            is_selecting: false,
            line_layouts: Vec::new(),
            transform: None,
            on_change: None,
            cursor_blink: cx.new(|_| CursorBlink::default()),
            _subscriptions: subscriptions,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.buffer.set_text(value);
        self
    }

    pub fn multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }

    /// Caps the text at `max_length` characters; longer edits are cut off.
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn value(&self) -> SharedString {
        SharedString::from(self.buffer.text().to_string())
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// Whether the input has lost focus at least once.
    pub fn touched(&self) -> bool {
        self.touched
    }

    pub fn is_focused(&self, window: &Window) -> bool {
        self.focus_handle.is_focused(window)
    }

    pub fn cursor_visible(&self, cx: &App) -> bool {
        self.cursor_blink.read(cx).visible()
    }

    /// Replaces the value programmatically. Emits [`InputEvent::Changed`] but does not
    /// call the element's `on_change` listener.
    pub fn set_value(&mut self, value: impl Into<String>, cx: &mut Context<Self>) {
        let value = value.into();
        if value == self.buffer.text() {
            return;
        }
        self.buffer.set_text(value);
        cx.emit(InputEvent::Changed(self.value()));
        cx.notify();
    }

    pub fn clear(&mut self, cx: &mut Context<Self>) {
        self.set_value("", cx);
    }

    fn handle_focus(&mut self, _window: &mut Window, cx: &mut Context<Self>) {
        self.cursor_blink.update(cx, |blink, cx| blink.restart(cx));
        cx.emit(InputEvent::Focused);
        cx.notify();
    }

    fn handle_blur(&mut self, _window: &mut Window, cx: &mut Context<Self>) {
        self.touched = true;
        self.is_selecting = false;
        let cursor = self.buffer.cursor_offset();
        self.buffer.move_to(cursor);
        self.cursor_blink.update(cx, |blink, cx| blink.stop(cx));
        cx.emit(InputEvent::Blurred);
        cx.notify();
    }

    fn selection_changed(&mut self, cx: &mut Context<Self>) {
        self.cursor_blink.update(cx, |blink, cx| blink.restart(cx));
        cx.notify();
    }

    fn text_changed(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let value = self.value();
        cx.emit(InputEvent::Changed(value.clone()));

        if let Some(on_change) = self.on_change.clone() {
            // The listener may update this entity, so it runs after the current update.
            window.defer(cx, move |window, cx| on_change(&value, window, cx));
        }

        self.selection_changed(cx);
    }

    fn edit(
        &mut self,
        window: &mut Window,
        cx: &mut Context<Self>,
        f: impl FnOnce(&mut EditBuffer),
    ) {
        let before = self.buffer.text().to_string();
        f(&mut self.buffer);
        if let Some(max_length) = self.max_length {
            if self.buffer.text().chars().count() > max_length {
                let truncated: String = self.buffer.text().chars().take(max_length).collect();
                self.buffer.set_text(truncated);
            }
        }
        let changed = before != self.buffer.text();

        if changed {
            self.text_changed(window, cx);
        } else {
            self.selection_changed(cx);
        }
    }

    pub fn left(&mut self, _: &Left, _: &mut Window, cx: &mut Context<Self>) {
        self.buffer.move_left();
        self.selection_changed(cx);
    }

    pub fn right(&mut self, _: &Right, _: &mut Window, cx: &mut Context<Self>) {
        self.buffer.move_right();
        self.selection_changed(cx);
    }

    pub fn select_left(&mut self, _: &SelectLeft, _: &mut Window, cx: &mut Context<Self>) {
        self.buffer.select_left();
        self.selection_changed(cx);
    }

    pub fn select_right(&mut self, _: &SelectRight, _: &mut Window, cx: &mut Context<Self>) {
        self.buffer.select_right();
        self.selection_changed(cx);
    }

    pub fn up(&mut self, _: &Up, _: &mut Window, cx: &mut Context<Self>) {
        if !self.buffer.move_up(false) {
            self.buffer.move_to(0);
        }
        self.selection_changed(cx);
    }

    pub fn down(&mut self, _: &Down, _: &mut Window, cx: &mut Context<Self>) {
        if !self.buffer.move_down(false) {
            self.buffer.move_to(self.buffer.text().len());
        }
        self.selection_changed(cx);
    }

    pub fn select_up(&mut self, _: &SelectUp, _: &mut Window, cx: &mut Context<Self>) {
        self.buffer.move_up(true);
        self.selection_changed(cx);
    }

    pub fn select_down(&mut self, _: &SelectDown, _: &mut Window, cx: &mut Context<Self>) {
        self.buffer.move_down(true);
        self.selection_changed(cx);
    }

    pub fn select_all(&mut self, _: &SelectAll, _: &mut Window, cx: &mut Context<Self>) {
        self.buffer.select_all();
        self.selection_changed(cx);
    }

    pub fn home(&mut self, _: &Home, _: &mut Window, cx: &mut Context<Self>) {
        self.buffer.move_home();
        self.selection_changed(cx);
    }

    pub fn end(&mut self, _: &End, _: &mut Window, cx: &mut Context<Self>) {
        self.buffer.move_end();
        self.selection_changed(cx);
    }

    pub fn backspace(&mut self, _: &Backspace, window: &mut Window, cx: &mut Context<Self>) {
        self.edit(window, cx, EditBuffer::backspace);
    }

    pub fn delete(&mut self, _: &Delete, window: &mut Window, cx: &mut Context<Self>) {
        self.edit(window, cx, EditBuffer::delete);
    }

    pub fn submit(&mut self, _: &Submit, window: &mut Window, cx: &mut Context<Self>) {
        if self.multiline {
            self.edit(window, cx, |buffer| buffer.replace_selection("\n"));
        } else {
            cx.propagate();
        }
    }

    pub fn insert_newline(
        &mut self,
        _: &InsertNewline,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if self.multiline {
            self.edit(window, cx, |buffer| buffer.replace_selection("\n"));
        }
    }

    pub fn show_character_palette(
        &mut self,
        _: &ShowCharacterPalette,
        window: &mut Window,
        _: &mut Context<Self>,
    ) {
        window.show_character_palette();
    }

    pub fn paste(&mut self, _: &Paste, window: &mut Window, cx: &mut Context<Self>) {
        let Some(text) = cx.read_from_clipboard().and_then(|item| item.text()) else {
            return;
        };
        let text = if self.multiline {
            text
        } else {
            text.replace('\n', " ")
        };
        self.edit(window, cx, |buffer| buffer.replace_selection(&text));
    }

    pub fn copy(&mut self, _: &Copy, _: &mut Window, cx: &mut Context<Self>) {
        // Masked values never leave the field.
        if self.transform.is_some() || self.buffer.selected_range().is_empty() {
            return;
        }
        cx.write_to_clipboard(ClipboardItem::new_string(
            self.buffer.selected_text().to_string(),
        ));
    }

    pub fn cut(&mut self, _: &Cut, window: &mut Window, cx: &mut Context<Self>) {
        if self.transform.is_some() || self.buffer.selected_range().is_empty() {
            return;
        }
        cx.write_to_clipboard(ClipboardItem::new_string(
            self.buffer.selected_text().to_string(),
        ));
        self.edit(window, cx, |buffer| buffer.replace_selection(""));
    }

    pub fn on_mouse_down(
        &mut self,
        event: &MouseDownEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.is_selecting = true;
        let offset = self.index_for_position(event.position);

        if event.modifiers.shift {
            self.buffer.select_to(offset);
        } else {
            self.buffer.move_to(offset);
        }
        self.selection_changed(cx);
    }

    pub fn on_mouse_up(&mut self, _: &MouseUpEvent, _window: &mut Window, _: &mut Context<Self>) {
        self.is_selecting = false;
    }

    pub fn on_mouse_move(
        &mut self,
        event: &MouseMoveEvent,
        _: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.drag_to(event.position, cx);
    }

    pub(crate) fn drag_to(&mut self, position: Point<Pixels>, cx: &mut Context<Self>) {
        if self.is_selecting {
            self.buffer.select_to(self.index_for_position(position));
            self.selection_changed(cx);
        }
    }

    fn display_to_source(&self, line: &str, display: usize) -> usize {
        match &self.transform {
            Some(transform) => source_offset(line, display, |c| transform(c)),
            None => display,
        }
    }

    fn source_to_display(&self, line: &str, offset: usize) -> usize {
        match &self.transform {
            Some(transform) => display_offset(line, offset, |c| transform(c)),
            None => offset,
        }
    }

    /// Byte offset of the character closest to `position`.
    pub fn index_for_position(&self, position: Point<Pixels>) -> usize {
        if self.buffer.is_empty() {
            return 0;
        }

        let (Some(first), Some(last)) = (self.line_layouts.first(), self.line_layouts.last())
        else {
            return 0;
        };

        if position.y < first.bounds.top() {
            return 0;
        }
        if position.y > last.bounds.bottom() {
            return self.buffer.text().len();
        }

        let layout = self
            .line_layouts
            .iter()
            .find(|layout| position.y <= layout.bounds.bottom())
            .unwrap_or(last);

        if position.x < layout.bounds.left() {
            return layout.range.start;
        }
        if position.x > layout.bounds.right() {
            return layout.range.end;
        }

        let line = &self.buffer.text()[layout.range.clone()];
        let display = layout
            .shaped
            .closest_index_for_x(position.x - layout.bounds.left());
        layout.range.start + self.display_to_source(line, display)
    }

    pub(crate) fn x_for_offset(&self, layout: &LineLayout, offset: usize) -> Pixels {
        let local = offset.saturating_sub(layout.range.start);
        let line = &self.buffer.text()[layout.range.clone()];
        layout.shaped.x_for_index(self.source_to_display(line, local))
    }

    fn layout_for_offset(&self, offset: usize) -> Option<&LineLayout> {
        self.line_layouts
            .iter()
            .find(|layout| layout.range.contains(&offset) || layout.range.end == offset)
    }
}

impl EntityInputHandler for InputState {
    fn text_for_range(
        &mut self,
        range_utf16: Range<usize>,
        actual_range: &mut Option<Range<usize>>,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<String> {
        let range = self.buffer.range_from_utf16(&range_utf16);
        actual_range.replace(self.buffer.range_to_utf16(&range));
        self.buffer.text().get(range).map(str::to_string)
    }

    fn selected_text_range(
        &mut self,
        _ignore_disabled_input: bool,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<UTF16Selection> {
        Some(UTF16Selection {
            range: self.buffer.range_to_utf16(&self.buffer.selected_range()),
            reversed: self.buffer.selection_reversed(),
        })
    }

    fn marked_text_range(
        &self,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<Range<usize>> {
        self.buffer
            .marked_range()
            .map(|range| self.buffer.range_to_utf16(&range))
    }

    fn unmark_text(&mut self, _window: &mut Window, _cx: &mut Context<Self>) {
        self.buffer.unmark();
    }

    fn replace_text_in_range(
        &mut self,
        range_utf16: Option<Range<usize>>,
        new_text: &str,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let new_text = if self.multiline {
            new_text.to_string()
        } else {
            new_text.replace('\n', " ")
        };

        let range = range_utf16
            .map(|range_utf16| self.buffer.range_from_utf16(&range_utf16))
            .or(self.buffer.marked_range())
            .unwrap_or(self.buffer.selected_range());

        self.edit(window, cx, |buffer| buffer.replace_range(range, &new_text));
    }

    fn replace_and_mark_text_in_range(
        &mut self,
        range_utf16: Option<Range<usize>>,
        new_text: &str,
        new_selected_range_utf16: Option<Range<usize>>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let range = range_utf16
            .map(|range_utf16| self.buffer.range_from_utf16(&range_utf16))
            .or(self.buffer.marked_range())
            .unwrap_or(self.buffer.selected_range());

        // The new selection is expressed in UTF-16 units of the inserted text.
        let new_selected = new_selected_range_utf16.map(|selected| {
            let inserted = EditBuffer::new(new_text);
            inserted.range_from_utf16(&selected)
        });

        self.edit(window, cx, |buffer| {
            buffer.replace_and_mark(range, new_text, new_selected)
        });
    }

    fn bounds_for_range(
        &mut self,
        range_utf16: Range<usize>,
        _element_bounds: Bounds<Pixels>,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<Bounds<Pixels>> {
        let range = self.buffer.range_from_utf16(&range_utf16);
        let layout = self.layout_for_offset(range.start)?;
        let end = range.end.min(layout.range.end);

        Some(Bounds::from_corners(
            point(
                layout.bounds.left() + self.x_for_offset(layout, range.start),
                layout.bounds.top(),
            ),
            point(
                layout.bounds.left() + self.x_for_offset(layout, end),
                layout.bounds.bottom(),
            ),
        ))
    }

    fn character_index_for_point(
        &mut self,
        point: Point<Pixels>,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<usize> {
        let offset = self.index_for_position(point);
        Some(self.buffer.offset_to_utf16(offset))
    }
}

impl Focusable for InputState {
    fn focus_handle(&self, _: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use gpui::{TestAppContext, VisualTestContext, div};

    struct Host {
        input: Entity<InputState>,
    }

    impl gpui::Render for Host {
        fn render(
            &mut self,
            _window: &mut Window,
            _cx: &mut Context<Self>,
        ) -> impl gpui::IntoElement {
            div()
        }
    }

    fn host(cx: &mut TestAppContext, multiline: bool) -> (Entity<Host>, VisualTestContext) {
        let window = cx.add_window(|window, cx| Host {
            input: cx.new(|cx| InputState::new(window, cx).multiline(multiline)),
        });
        let view = window.root(cx).expect("window root");
        let cx = VisualTestContext::from_window(window.into(), cx);
        (view, cx)
    }

    #[gpui::test]
    fn set_value_emits_changed(cx: &mut TestAppContext) {
        let (view, mut cx) = host(cx, false);
        let input = view.read_with(&cx, |view, _| view.input.clone());
        let events: Rc<RefCell<Vec<InputEvent>>> = Rc::default();

        let _subscription = cx.update(|_window, cx| {
            let events = events.clone();
            cx.subscribe(&input, move |_, event: &InputEvent, _| {
                events.borrow_mut().push(event.clone())
            })
        });

        input.update(&mut cx, |input, cx| input.set_value("hello", cx));
        input.update(&mut cx, |input, cx| input.set_value("hello", cx));

        assert_eq!(
            events.borrow().as_slice(),
            &[InputEvent::Changed("hello".into())],
            "identical value is not reported twice"
        );
    }

    #[gpui::test]
    fn blur_marks_the_input_touched(cx: &mut TestAppContext) {
        let (view, mut cx) = host(cx, false);
        let input = view.read_with(&cx, |view, _| view.input.clone());

        cx.update(|window, cx| {
            let handle = input.read(cx).focus_handle.clone();
            handle.focus(window, cx);
        });
        cx.run_until_parked();
        input.read_with(&cx, |input, _| assert!(!input.touched()));

        cx.update(|window, _cx| window.blur());
        cx.run_until_parked();
        input.read_with(&cx, |input, _| assert!(input.touched()));
    }

    #[gpui::test]
    fn enter_inserts_newline_only_when_multiline(cx: &mut TestAppContext) {
        let (view, mut cx) = host(cx, true);
        let input = view.read_with(&cx, |view, _| view.input.clone());

        cx.update(|window, cx| {
            input.update(cx, |input, cx| {
                input.set_value("a", cx);
                input.submit(&Submit, window, cx);
                input.replace_text_in_range(None, "b", window, cx);
            })
        });

        input.read_with(&cx, |input, _| assert_eq!(input.text(), "a\nb"));
    }

    #[gpui::test]
    fn single_line_flattens_pasted_newlines(cx: &mut TestAppContext) {
        let (view, mut cx) = host(cx, false);
        let input = view.read_with(&cx, |view, _| view.input.clone());

        cx.update(|window, cx| {
            input.update(cx, |input, cx| {
                input.replace_text_in_range(None, "one\ntwo", window, cx);
            })
        });

        input.read_with(&cx, |input, _| assert_eq!(input.text(), "one two"));
    }
}
