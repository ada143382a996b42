use crate::{Mode, PendingState, Position, Register, SelectionBounds, SelectionKind};
use modal_text::grapheme;

/// Ordered lines, cursor, selection anchor, the single yank register, the
/// operator-pending builder, and the char-limit/width knobs that gate
/// edits and soft-wrap. Owns no undo history — see the crate doc comment.
#[derive(Debug, Clone)]
pub struct Buffer {
    lines: Vec<String>,
    pub cursor: Position,
    pub preferred_col: usize,
    pub mode: Mode,
    pub visual_anchor: Option<Position>,
    pub register: Register,
    pub pending: PendingState,
    pub char_limit: usize,
    pub width: usize,
    pub focused: bool,
}

fn split_lines(content: &str) -> Vec<String> {
    let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

impl Buffer {
    pub fn new(content: &str, char_limit: usize, width: usize, default_mode: Mode) -> Self {
        let mut buf = Self {
            lines: split_lines(content),
            cursor: Position::origin(),
            preferred_col: 0,
            mode: default_mode,
            visual_anchor: None,
            register: Register::default(),
            pending: PendingState::default(),
            char_limit,
            width,
            focused: false,
        };
        buf.clamp_cursor();
        buf
    }

    /// Replace the whole content, clearing selection/pending and resetting
    /// the cursor and mode. The caller (the update loop in `modal-editor`)
    /// is also responsible for clearing undo history, since history is not
    /// owned by this type.
    pub fn set_value(&mut self, content: &str) {
        self.lines = split_lines(content);
        self.cursor = Position::origin();
        self.mode = Mode::Normal;
        self.visual_anchor = None;
        self.pending.clear();
        self.preferred_col = 0;
    }

    pub fn value(&self) -> String {
        self.lines.join("\n")
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    pub fn line_grapheme_count(&self, row: usize) -> usize {
        self.line(row).map(grapheme::count).unwrap_or(0)
    }

    /// Total grapheme count across all lines, counting each line-break as
    /// one grapheme, matching "lines joined by newline" in the char-limit
    /// contract.
    pub fn total_grapheme_count(&self) -> usize {
        let text: usize = self.lines.iter().map(|l| grapheme::count(l)).sum();
        text + self.lines.len().saturating_sub(1)
    }

    pub fn would_exceed_char_limit(&self, additional_graphemes: usize) -> bool {
        self.char_limit > 0 && self.total_grapheme_count() + additional_graphemes > self.char_limit
    }

    pub fn set_line(&mut self, row: usize, text: String) {
        if row < self.lines.len() {
            self.lines[row] = text;
        }
    }

    pub fn insert_line(&mut self, row: usize, text: String) {
        let row = row.min(self.lines.len());
        self.lines.insert(row, text);
    }

    pub fn remove_line(&mut self, row: usize) -> String {
        if self.lines.len() <= 1 {
            tracing::trace!(target: "buffer", "refusing to remove the last remaining line");
            return String::new();
        }
        self.lines.remove(row)
    }

    /// The maximum grapheme column the cursor may occupy on `row` under the
    /// current mode: Insert allows one past the last cluster (an insertion
    /// point after the final character); every other mode caps at the last
    /// cluster itself, or `0` on an empty line.
    pub fn max_col_for_mode(&self, row: usize) -> usize {
        let n = self.line_grapheme_count(row);
        match self.mode {
            Mode::Insert => n,
            _ => n.saturating_sub(1),
        }
    }

    pub fn clamp_cursor(&mut self) {
        if self.lines.is_empty() {
            self.cursor = Position::origin();
            return;
        }
        if self.cursor.row >= self.lines.len() {
            self.cursor.row = self.lines.len() - 1;
        }
        let max_col = self.max_col_for_mode(self.cursor.row);
        if self.cursor.col > max_col {
            self.cursor.col = max_col;
        }
    }

    /// Normalized `(start, end)` bounds of the current Visual/VisualLine
    /// selection, or `None` outside those modes.
    pub fn selection_bounds(&self) -> Option<SelectionBounds> {
        let anchor = self.visual_anchor?;
        match self.mode {
            Mode::Visual => Some(SelectionBounds::new(
                anchor,
                self.cursor,
                SelectionKind::Characterwise,
            )),
            Mode::VisualLine => {
                let row_start = anchor.row.min(self.cursor.row);
                let row_end = anchor.row.max(self.cursor.row);
                let end_col = self.line_grapheme_count(row_end);
                Some(SelectionBounds {
                    start: Position::new(row_start, 0),
                    end: Position::new(row_end, end_col),
                    kind: SelectionKind::Linewise,
                })
            }
            _ => None,
        }
    }

    /// `(start_col, end_col_exclusive)` of the selection on `row`, if any.
    pub fn selection_range_for_row(&self, row: usize) -> Option<(usize, usize)> {
        let bounds = self.selection_bounds()?;
        if row < bounds.start.row || row > bounds.end.row {
            return None;
        }
        let len = self.line_grapheme_count(row);
        let start = if row == bounds.start.row {
            bounds.start.col
        } else {
            0
        };
        let end = if row == bounds.end.row {
            match bounds.kind {
                SelectionKind::Linewise => bounds.end.col,
                SelectionKind::Characterwise => (bounds.end.col + 1).min(len),
            }
        } else {
            len
        };
        Some((start, end.max(start)))
    }

    /// The text currently selected, joined with `\n` across rows.
    pub fn selected_text(&self) -> Option<String> {
        let bounds = self.selection_bounds()?;
        if bounds.start.row == bounds.end.row {
            let line = self.line(bounds.start.row).unwrap_or("");
            let (s, e) = self.selection_range_for_row(bounds.start.row)?;
            return Some(grapheme::slice(line, s, e).to_string());
        }
        let mut parts = Vec::with_capacity(bounds.end.row - bounds.start.row + 1);
        for row in bounds.start.row..=bounds.end.row {
            let line = self.line(row).unwrap_or("");
            let (s, e) = self.selection_range_for_row(row)?;
            parts.push(grapheme::slice(line, s, e).to_string());
        }
        Some(parts.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_never_has_zero_lines() {
        let b = Buffer::new("", 0, 0, Mode::Normal);
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.line(0), Some(""));
    }

    #[test]
    fn set_value_resets_cursor_mode_and_anchor() {
        let mut b = Buffer::new("a\nb", 0, 0, Mode::Normal);
        b.cursor = Position::new(1, 0);
        b.mode = Mode::Visual;
        b.visual_anchor = Some(Position::origin());
        b.set_value("x\ny\nz");
        assert_eq!(b.cursor, Position::origin());
        assert_eq!(b.mode, Mode::Normal);
        assert_eq!(b.visual_anchor, None);
        assert_eq!(b.line_count(), 3);
    }

    #[test]
    fn max_col_differs_insert_vs_normal() {
        let mut b = Buffer::new("abc", 0, 0, Mode::Normal);
        assert_eq!(b.max_col_for_mode(0), 2);
        b.mode = Mode::Insert;
        assert_eq!(b.max_col_for_mode(0), 3);
    }

    #[test]
    fn max_col_on_empty_line_is_zero() {
        let b = Buffer::new("", 0, 0, Mode::Normal);
        assert_eq!(b.max_col_for_mode(0), 0);
    }

    #[test]
    fn char_limit_counts_newlines_as_graphemes() {
        let b = Buffer::new("ab\ncd", 0, 0, Mode::Normal);
        assert_eq!(b.total_grapheme_count(), 5);
    }

    #[test]
    fn remove_line_refuses_to_empty_the_buffer() {
        let mut b = Buffer::new("only", 0, 0, Mode::Normal);
        let removed = b.remove_line(0);
        assert_eq!(removed, "");
        assert_eq!(b.line_count(), 1);
    }

    #[test]
    fn selection_bounds_characterwise_normalizes_order() {
        let mut b = Buffer::new("hello world", 0, 0, Mode::Normal);
        b.mode = Mode::Visual;
        b.visual_anchor = Some(Position::new(0, 6));
        b.cursor = Position::new(0, 2);
        let bounds = b.selection_bounds().unwrap();
        assert_eq!(bounds.start, Position::new(0, 2));
        assert_eq!(bounds.end, Position::new(0, 6));
    }

    #[test]
    fn selection_bounds_linewise_spans_full_rows() {
        let mut b = Buffer::new("line1\nline2\nline3", 0, 0, Mode::Normal);
        b.mode = Mode::VisualLine;
        b.visual_anchor = Some(Position::new(2, 3));
        b.cursor = Position::new(0, 0);
        let bounds = b.selection_bounds().unwrap();
        assert_eq!(bounds.start, Position::new(0, 0));
        assert_eq!(bounds.end, Position::new(2, 5));
    }

    #[test]
    fn selected_text_characterwise_is_inclusive() {
        let mut b = Buffer::new("h😀llo", 0, 0, Mode::Normal);
        b.mode = Mode::Visual;
        b.visual_anchor = Some(Position::new(0, 0));
        b.cursor = Position::new(0, 3);
        assert_eq!(b.selected_text().unwrap(), "h😀ll");
    }

    #[test]
    fn selected_text_multi_row() {
        let mut b = Buffer::new("line1\nline2\nline3", 0, 0, Mode::Normal);
        b.mode = Mode::Visual;
        b.visual_anchor = Some(Position::new(0, 2));
        b.cursor = Position::new(2, 1);
        assert_eq!(b.selected_text().unwrap(), "ne1\nline2\nli");
    }
}
