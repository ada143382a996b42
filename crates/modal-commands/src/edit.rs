//! Grapheme-range and whole-line mutation primitives shared by the
//! concrete edit commands. `modal_state::Buffer` exposes only
//! `set_line`/`insert_line`/`remove_line`; the multi-line splice logic
//! commands need (insert a block of text, delete a charwise or linewise
//! span) lives here rather than on `Buffer` itself, keeping the buffer
//! model a plain data holder.

use modal_state::{Buffer, Position};
use modal_text::grapheme;

/// Deletes `[start, end)` (end exclusive) and returns the removed text,
/// joined with `\n` across rows exactly as it appeared in the buffer.
pub fn delete_charwise(buf: &mut Buffer, start: Position, end: Position) -> String {
    if start.row == end.row {
        let line = buf.line(start.row).unwrap_or("").to_string();
        let removed = grapheme::slice(&line, start.col, end.col).to_string();
        let new_line = format!(
            "{}{}",
            grapheme::slice(&line, 0, start.col),
            grapheme::slice(&line, end.col, grapheme::count(&line))
        );
        buf.set_line(start.row, new_line);
        return removed;
    }

    let mut removed_parts = Vec::new();
    let first_line = buf.line(start.row).unwrap_or("").to_string();
    removed_parts.push(grapheme::slice(&first_line, start.col, grapheme::count(&first_line)).to_string());
    for row in (start.row + 1)..end.row {
        removed_parts.push(buf.line(row).unwrap_or("").to_string());
    }
    let last_line = buf.line(end.row).unwrap_or("").to_string();
    removed_parts.push(grapheme::slice(&last_line, 0, end.col).to_string());

    let merged = format!(
        "{}{}",
        grapheme::slice(&first_line, 0, start.col),
        grapheme::slice(&last_line, end.col, grapheme::count(&last_line))
    );
    for row in (start.row + 1..=end.row).rev() {
        buf.remove_line(row);
    }
    buf.set_line(start.row, merged);
    removed_parts.join("\n")
}

/// Inserts `text` (which may contain `\n`) at `at`, splitting across new
/// lines as needed. Returns the cursor position immediately after the
/// last inserted grapheme.
pub fn insert_charwise(buf: &mut Buffer, at: Position, text: &str) -> Position {
    if !text.contains('\n') {
        let line = buf.line(at.row).unwrap_or("").to_string();
        let new_line = format!(
            "{}{}{}",
            grapheme::slice(&line, 0, at.col),
            text,
            grapheme::slice(&line, at.col, grapheme::count(&line))
        );
        buf.set_line(at.row, new_line);
        return Position::new(at.row, at.col + grapheme::count(text));
    }

    let line = buf.line(at.row).unwrap_or("").to_string();
    let prefix = grapheme::slice(&line, 0, at.col).to_string();
    let suffix = grapheme::slice(&line, at.col, grapheme::count(&line)).to_string();
    let segments: Vec<&str> = text.split('\n').collect();

    let first = format!("{prefix}{}", segments[0]);
    buf.set_line(at.row, first);

    let mut row = at.row;
    for seg in &segments[1..segments.len() - 1] {
        row += 1;
        buf.insert_line(row, seg.to_string());
    }
    let last_segment = segments[segments.len() - 1];
    let last_col = grapheme::count(last_segment);
    row += 1;
    buf.insert_line(row, format!("{last_segment}{suffix}"));

    Position::new(row, last_col)
}

/// Deletes whole rows `[start_row, end_row)` and returns their joined text
/// plus whether the buffer's last remaining line had to be replaced with
/// an empty placeholder rather than removed (the caller's undo needs to
/// know this so it can overwrite that placeholder instead of inserting
/// beside it).
pub fn delete_linewise(buf: &mut Buffer, start_row: usize, end_row: usize) -> (String, bool) {
    let mut removed = Vec::with_capacity(end_row - start_row);
    for row in start_row..end_row {
        removed.push(buf.line(row).unwrap_or("").to_string());
    }
    let mut replaced_sole_line = false;
    for row in (start_row..end_row).rev() {
        if buf.line_count() == 1 {
            buf.set_line(0, String::new());
            replaced_sole_line = true;
        } else {
            buf.remove_line(row);
        }
    }
    (removed.join("\n"), replaced_sole_line)
}

/// Reads `[start, end)` without mutating the buffer, for yank.
pub fn read_charwise(buf: &Buffer, start: Position, end: Position) -> String {
    if start.row == end.row {
        let line = buf.line(start.row).unwrap_or("");
        return grapheme::slice(line, start.col, end.col).to_string();
    }
    let mut parts = Vec::new();
    let first_line = buf.line(start.row).unwrap_or("");
    parts.push(grapheme::slice(first_line, start.col, grapheme::count(first_line)).to_string());
    for row in (start.row + 1)..end.row {
        parts.push(buf.line(row).unwrap_or("").to_string());
    }
    let last_line = buf.line(end.row).unwrap_or("");
    parts.push(grapheme::slice(last_line, 0, end.col).to_string());
    parts.join("\n")
}

/// Reads whole rows `[start_row, end_row)` without mutating the buffer.
pub fn read_linewise(buf: &Buffer, start_row: usize, end_row: usize) -> String {
    (start_row..end_row)
        .map(|row| buf.line(row).unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Inserts `text` split on `\n` as whole lines starting at `row`.
pub fn insert_linewise(buf: &mut Buffer, row: usize, text: &str) {
    let row = row.min(buf.line_count());
    for (i, seg) in text.split('\n').enumerate() {
        buf.insert_line(row + i, seg.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modal_state::Mode;

    fn buf(text: &str) -> Buffer {
        Buffer::new(text, 0, 0, Mode::Normal)
    }

    #[test]
    fn delete_charwise_single_line() {
        let mut b = buf("hello world");
        let removed = delete_charwise(&mut b, Position::origin(), Position::new(0, 6));
        assert_eq!(removed, "hello ");
        assert_eq!(b.value(), "world");
    }

    #[test]
    fn delete_charwise_multi_line_merges_remainder() {
        let mut b = buf("line1\nline2\nline3");
        let removed = delete_charwise(&mut b, Position::new(0, 2), Position::new(2, 1));
        assert_eq!(removed, "ne1\nline2\nl");
        assert_eq!(b.value(), "liine3");
    }

    #[test]
    fn insert_and_delete_charwise_are_inverse() {
        let mut b = buf("hello world");
        let inserted_end = insert_charwise(&mut b, Position::new(0, 5), " vim");
        assert_eq!(b.value(), "hello vim world");
        assert_eq!(inserted_end, Position::new(0, 9));
        delete_charwise(&mut b, Position::new(0, 5), inserted_end);
        assert_eq!(b.value(), "hello world");
    }

    #[test]
    fn insert_charwise_splits_multiline_text() {
        let mut b = buf("ab");
        let end = insert_charwise(&mut b, Position::new(0, 1), "X\nY");
        assert_eq!(b.value(), "aX\nYb");
        assert_eq!(end, Position::new(1, 1));
    }

    #[test]
    fn delete_linewise_never_empties_buffer() {
        let mut b = buf("only");
        let (removed, replaced_sole_line) = delete_linewise(&mut b, 0, 1);
        assert_eq!(removed, "only");
        assert!(replaced_sole_line);
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.value(), "");
    }

    #[test]
    fn delete_linewise_multi_line_reports_no_placeholder() {
        let mut b = buf("a\nb\nc");
        let (removed, replaced_sole_line) = delete_linewise(&mut b, 0, 2);
        assert_eq!(removed, "a\nb");
        assert!(!replaced_sole_line);
        assert_eq!(b.value(), "c");
    }

    #[test]
    fn insert_linewise_inserts_whole_rows() {
        let mut b = buf("a\nd");
        insert_linewise(&mut b, 1, "b\nc");
        assert_eq!(b.value(), "a\nb\nc\nd");
    }
}
