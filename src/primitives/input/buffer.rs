use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

/// Text plus selection, independent from any window.
///
/// All offsets are UTF-8 byte offsets into [`EditBuffer::text`] and always sit on
/// char boundaries. The platform input handler speaks UTF-16, so conversions live
/// here as well.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    text: String,
    selected_range: Range<usize>,
    selection_reversed: bool,
    marked_range: Option<Range<usize>>,
}

impl EditBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.len();
        Self {
            text,
            selected_range: end..end,
            selection_reversed: false,
            marked_range: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replaces the whole text and parks the cursor at its end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        *self = Self::new(text);
    }

    pub fn selected_range(&self) -> Range<usize> {
        self.selected_range.clone()
    }

    pub fn selection_reversed(&self) -> bool {
        self.selection_reversed
    }

    pub fn marked_range(&self) -> Option<Range<usize>> {
        self.marked_range.clone()
    }

    pub fn unmark(&mut self) {
        self.marked_range = None;
    }

    pub fn selected_text(&self) -> &str {
        &self.text[self.selected_range.clone()]
    }

    pub fn cursor_offset(&self) -> usize {
        if self.selection_reversed {
            self.selected_range.start
        } else {
            self.selected_range.end
        }
    }

    pub fn move_to(&mut self, offset: usize) {
        let offset = self.clamp_offset(offset);
        self.selected_range = offset..offset;
        self.selection_reversed = false;
    }

    /// Extends the selection so that the cursor lands on `offset`.
    pub fn select_to(&mut self, offset: usize) {
        let offset = self.clamp_offset(offset);

        if self.selection_reversed {
            self.selected_range.start = offset
        } else {
            self.selected_range.end = offset
        };

        if self.selected_range.end < self.selected_range.start {
            self.selection_reversed = !self.selection_reversed;
            self.selected_range = self.selected_range.end..self.selected_range.start;
        }
    }

    pub fn select_all(&mut self) {
        self.move_to(0);
        self.select_to(self.text.len());
    }

    pub fn move_left(&mut self) {
        if self.selected_range.is_empty() {
            self.move_to(self.previous_boundary(self.cursor_offset()));
        } else {
            self.move_to(self.selected_range.start)
        }
    }

    pub fn move_right(&mut self) {
        if self.selected_range.is_empty() {
            self.move_to(self.next_boundary(self.cursor_offset()));
        } else {
            self.move_to(self.selected_range.end)
        }
    }

    pub fn select_left(&mut self) {
        self.select_to(self.previous_boundary(self.cursor_offset()));
    }

    pub fn select_right(&mut self) {
        self.select_to(self.next_boundary(self.cursor_offset()));
    }

    /// Moves to the same column on the previous line. Returns false on the first line.
    pub fn move_up(&mut self, extend: bool) -> bool {
        let (line, col) = self.offset_to_line_col(self.cursor_offset());
        if line == 0 {
            return false;
        }
        let offset = self.line_col_to_offset(line - 1, col);
        if extend {
            self.select_to(offset)
        } else {
            self.move_to(offset)
        }
        true
    }

    /// Moves to the same column on the next line. Returns false on the last line.
    pub fn move_down(&mut self, extend: bool) -> bool {
        let (line, col) = self.offset_to_line_col(self.cursor_offset());
        if line + 1 >= self.line_count() {
            return false;
        }
        let offset = self.line_col_to_offset(line + 1, col);
        if extend {
            self.select_to(offset)
        } else {
            self.move_to(offset)
        }
        true
    }

    pub fn move_home(&mut self) {
        let (line, _) = self.offset_to_line_col(self.cursor_offset());
        self.move_to(self.line_start_offset(line));
    }

    pub fn move_end(&mut self) {
        let (line, _) = self.offset_to_line_col(self.cursor_offset());
        self.move_to(self.line_end_offset(line));
    }

    /// Deletes the selection, or the grapheme before the cursor.
    pub fn backspace(&mut self) {
        if self.selected_range.is_empty() {
            self.select_to(self.previous_boundary(self.cursor_offset()))
        }
        self.replace_selection("")
    }

    /// Deletes the selection, or the grapheme after the cursor.
    pub fn delete(&mut self) {
        if self.selected_range.is_empty() {
            self.select_to(self.next_boundary(self.cursor_offset()))
        }
        self.replace_selection("")
    }

    pub fn replace_selection(&mut self, new_text: &str) {
        let range = self
            .marked_range
            .clone()
            .unwrap_or(self.selected_range.clone());
        self.replace_range(range, new_text);
    }

    /// Replaces `range` and puts the cursor after the inserted text.
    pub fn replace_range(&mut self, range: Range<usize>, new_text: &str) {
        let range = self.clamp_range(range);
        self.text.replace_range(range.clone(), new_text);

        let cursor = range.start + new_text.len();
        self.selected_range = cursor..cursor;
        self.selection_reversed = false;
        self.marked_range = None;
    }

    /// IME composition: replaces `range`, marks the inserted text and selects
    /// `new_selected` relative to the start of the insertion.
    pub fn replace_and_mark(
        &mut self,
        range: Range<usize>,
        new_text: &str,
        new_selected: Option<Range<usize>>,
    ) {
        let range = self.clamp_range(range);
        self.text.replace_range(range.clone(), new_text);

        self.marked_range =
            (!new_text.is_empty()).then(|| range.start..range.start + new_text.len());

        self.selected_range = new_selected
            .map(|new| range.start + new.start..range.start + new.end)
            .map(|new| self.clamp_range(new))
            .unwrap_or_else(|| {
                let cursor = range.start + new_text.len();
                cursor..cursor
            });
        self.selection_reversed = false;
    }

    pub fn previous_boundary(&self, offset: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .rev()
            .find_map(|(idx, _)| (idx < offset).then_some(idx))
            .unwrap_or(0)
    }

    pub fn next_boundary(&self, offset: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .find_map(|(idx, _)| (idx > offset).then_some(idx))
            .unwrap_or(self.text.len())
    }

    pub fn offset_from_utf16(&self, offset: usize) -> usize {
        let mut utf8_offset = 0;
        let mut utf16_count = 0;

        for ch in self.text.chars() {
            if utf16_count >= offset {
                break;
            }
            utf16_count += ch.len_utf16();
            utf8_offset += ch.len_utf8();
        }

        utf8_offset
    }

    pub fn offset_to_utf16(&self, offset: usize) -> usize {
        let mut utf16_offset = 0;
        let mut utf8_count = 0;

        for ch in self.text.chars() {
            if utf8_count >= offset {
                break;
            }
            utf8_count += ch.len_utf8();
            utf16_offset += ch.len_utf16();
        }

        utf16_offset
    }

    pub fn range_to_utf16(&self, range: &Range<usize>) -> Range<usize> {
        self.offset_to_utf16(range.start)..self.offset_to_utf16(range.end)
    }

    pub fn range_from_utf16(&self, range_utf16: &Range<usize>) -> Range<usize> {
        self.offset_from_utf16(range_utf16.start)..self.offset_from_utf16(range_utf16.end)
    }

    pub fn line_count(&self) -> usize {
        self.text.matches('\n').count() + 1
    }

    /// `(start, end)` byte offsets of every line, newline excluded.
    pub fn line_ranges(&self) -> Vec<Range<usize>> {
        let mut start = 0;
        self.text
            .split('\n')
            .map(|line| {
                let range = start..start + line.len();
                start = range.end + 1;
                range
            })
            .collect()
    }

    pub fn line_start_offset(&self, line: usize) -> usize {
        if line == 0 {
            return 0;
        }
        self.text
            .match_indices('\n')
            .nth(line - 1)
            .map(|(idx, _)| idx + 1)
            .unwrap_or(self.text.len())
    }

    pub fn line_end_offset(&self, line: usize) -> usize {
        let start = self.line_start_offset(line);
        self.text[start..]
            .find('\n')
            .map(|p| start + p)
            .unwrap_or(self.text.len())
    }

    /// `(line, column)` for a byte offset; the column is a byte offset inside the line.
    pub fn offset_to_line_col(&self, offset: usize) -> (usize, usize) {
        let offset = self.clamp_offset(offset);
        let before = &self.text[..offset];
        let line = before.matches('\n').count();
        let line_start = before.rfind('\n').map(|p| p + 1).unwrap_or(0);
        (line, offset - line_start)
    }

    /// Byte offset for `(line, column)`, clamping the column to the line and
    /// snapping it back onto a char boundary.
    pub fn line_col_to_offset(&self, line: usize, col: usize) -> usize {
        let start = self.line_start_offset(line);
        let end = self.line_end_offset(line);
        let mut offset = start + col.min(end - start);
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    fn clamp_offset(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    fn clamp_range(&self, range: Range<usize>) -> Range<usize> {
        let start = self.clamp_offset(range.start);
        let end = self.clamp_offset(range.end).max(start);
        start..end
    }
}

/// Maps a byte offset in `text` to the matching offset in `text` after every char
/// went through `transform`.
pub fn display_offset(text: &str, offset: usize, transform: impl Fn(char) -> char) -> usize {
    text.char_indices()
        .take_while(|(idx, _)| *idx < offset)
        .map(|(_, ch)| transform(ch).len_utf8())
        .sum()
}

/// Inverse of [`display_offset`], rounding down to the nearest char.
pub fn source_offset(text: &str, display: usize, transform: impl Fn(char) -> char) -> usize {
    let mut shown = 0;
    for (idx, ch) in text.char_indices() {
        let width = transform(ch).len_utf8();
        if shown + width > display {
            return idx;
        }
        shown += width;
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_appends_at_cursor() {
        let mut buffer = EditBuffer::default();
        buffer.replace_selection("Rea");
        buffer.replace_selection("ct");
        assert_eq!(buffer.text(), "React");
        assert_eq!(buffer.cursor_offset(), 5);
    }

    #[test]
    fn backspace_removes_whole_graphemes() {
        let mut buffer = EditBuffer::new("ae\u{301}");
        buffer.backspace();
        assert_eq!(buffer.text(), "a", "e + combining accent is one grapheme");

        let mut flags = EditBuffer::new("hi 🇨🇦");
        flags.backspace();
        assert_eq!(flags.text(), "hi ");
    }

    #[test]
    fn delete_and_backspace_use_the_selection_first() {
        let mut buffer = EditBuffer::new("hello world");
        buffer.move_to(0);
        buffer.select_to(6);
        buffer.delete();
        assert_eq!(buffer.text(), "world");

        buffer.select_all();
        buffer.backspace();
        assert!(buffer.is_empty());
    }

    #[test]
    fn selection_flips_when_dragged_past_anchor() {
        let mut buffer = EditBuffer::new("abcdef");
        buffer.move_to(3);
        buffer.select_to(5);
        assert_eq!(buffer.selected_range(), 3..5);

        buffer.select_to(1);
        assert_eq!(buffer.selected_range(), 1..3);
        assert!(buffer.selection_reversed());
        assert_eq!(buffer.cursor_offset(), 1);
        assert_eq!(buffer.selected_text(), "bc");
    }

    #[test]
    fn arrows_collapse_selection() {
        let mut buffer = EditBuffer::new("abcdef");
        buffer.move_to(1);
        buffer.select_to(4);

        let mut left = buffer.clone();
        left.move_left();
        assert_eq!(left.selected_range(), 1..1);

        buffer.move_right();
        assert_eq!(buffer.selected_range(), 4..4);
    }

    #[test]
    fn utf16_conversions() {
        let buffer = EditBuffer::new("a€😀b");
        // a = 1 byte / 1 unit, € = 3 / 1, 😀 = 4 / 2.
        assert_eq!(buffer.offset_to_utf16(4), 2);
        assert_eq!(buffer.offset_to_utf16(8), 4);
        assert_eq!(buffer.offset_from_utf16(4), 8);
        assert_eq!(buffer.range_from_utf16(&(1..4)), 1..8);
        assert_eq!(buffer.range_to_utf16(&(0..buffer.text().len())), 0..5);
    }

    #[test]
    fn line_and_column_mapping() {
        let buffer = EditBuffer::new("one\ntwo three\n\nend");
        assert_eq!(buffer.line_count(), 4);
        assert_eq!(buffer.line_start_offset(1), 4);
        assert_eq!(buffer.line_end_offset(1), 13);
        assert_eq!(buffer.line_start_offset(2), 14);
        assert_eq!(buffer.line_end_offset(2), 14);
        assert_eq!(buffer.offset_to_line_col(6), (1, 2));
        assert_eq!(buffer.offset_to_line_col(buffer.text().len()), (3, 3));
        assert_eq!(buffer.line_col_to_offset(0, 10), 3, "column clamps to line");
        assert_eq!(
            buffer.line_ranges(),
            vec![0..3, 4..13, 14..14, 15..18],
            "empty lines keep their slot"
        );
    }

    #[test]
    fn vertical_movement_keeps_column() {
        let mut buffer = EditBuffer::new("abcd\nxy\nlonger");
        buffer.move_to(3);

        assert!(buffer.move_down(false));
        assert_eq!(buffer.cursor_offset(), 7, "clamped to end of short line");
        assert!(buffer.move_down(true));
        assert_eq!(buffer.selected_range(), 7..10);
        assert!(!buffer.move_down(false));

        buffer.move_to(0);
        assert!(!buffer.move_up(false));
    }

    #[test]
    fn home_and_end_stay_on_current_line() {
        let mut buffer = EditBuffer::new("first\nsecond");
        buffer.move_to(8);
        buffer.move_home();
        assert_eq!(buffer.cursor_offset(), 6);
        buffer.move_end();
        assert_eq!(buffer.cursor_offset(), 12);
    }

    #[test]
    fn marked_text_is_replaced_on_commit() {
        let mut buffer = EditBuffer::new("ka");
        buffer.replace_and_mark(2..2, "n", None);
        assert_eq!(buffer.marked_range(), Some(2..3));

        buffer.replace_selection("ん");
        assert_eq!(buffer.text(), "kaん");
        assert_eq!(buffer.marked_range(), None);
        assert_eq!(buffer.cursor_offset(), buffer.text().len());
    }

    #[test]
    fn out_of_range_offsets_are_clamped() {
        let mut buffer = EditBuffer::new("é");
        buffer.move_to(1);
        assert_eq!(buffer.cursor_offset(), 0, "snaps to char boundary");
        buffer.replace_range(5..9, "!");
        assert_eq!(buffer.text(), "é!");
    }

    #[test]
    fn masked_offsets_map_both_ways() {
        let mask = |_| '•';
        let text = "pa😀";
        assert_eq!(display_offset(text, 2, mask), 6);
        assert_eq!(display_offset(text, text.len(), mask), 9);
        assert_eq!(source_offset(text, 6, mask), 2);
        assert_eq!(source_offset(text, 7, mask), 2, "rounds down inside a char");
        assert_eq!(source_offset(text, 99, mask), text.len());
    }
}
