//! Cursor motions: pure functions from `(Buffer, Position)` to the
//! destination `Position`. None of these mutate the buffer or its
//! `preferred_col` — the caller (the concrete-command layer) decides
//! whether a motion resets or preserves the sticky column.
//!
//! `Position::col` is a grapheme index, not a byte offset, so "next/
//! previous boundary" collapses to plain `col + 1` / `col - 1`.

use modal_state::{Buffer, Position};
use modal_text::grapheme::{self, GraphemeClass};
use modal_text::wrap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Blank,
    Word,
    Punct,
    NonBlank,
}

fn is_blank(cluster: &str) -> bool {
    cluster.is_empty() || grapheme::class_of(cluster) == GraphemeClass::Whitespace
}

/// Classify a cluster for word-motion purposes. `big` collapses word and
/// punctuation into a single `NonBlank` class, matching vim's `W`/`B`/`E`.
fn token_of(cluster: &str, big: bool) -> Token {
    if is_blank(cluster) {
        return Token::Blank;
    }
    if big {
        return Token::NonBlank;
    }
    match grapheme::class_of(cluster) {
        GraphemeClass::Word => Token::Word,
        GraphemeClass::Punctuation => Token::Punct,
        GraphemeClass::Whitespace => Token::Blank,
    }
}

fn cluster_at(buf: &Buffer, row: usize, col: usize) -> String {
    buf.line(row).map(|l| grapheme::at(l, col)).unwrap_or("").to_string()
}

fn clamp(buf: &Buffer, row: usize, col: usize) -> Position {
    Position::new(row, col.min(buf.max_col_for_mode(row)))
}

pub fn left(buf: &Buffer, pos: Position) -> Position {
    if pos.col == 0 {
        return pos;
    }
    Position::new(pos.row, pos.col - 1)
}

pub fn right(buf: &Buffer, pos: Position) -> Position {
    let max = buf.max_col_for_mode(pos.row);
    if pos.col < max {
        Position::new(pos.row, pos.col + 1)
    } else {
        pos
    }
}

/// `a`: advance one grapheme past the cursor, but clamped to the
/// Insert-mode bound (one past the last cluster) rather than the
/// caller's current-mode bound, since this runs just before the mode
/// switch to Insert actually happens.
pub fn right_for_insert(buf: &Buffer, pos: Position) -> Position {
    let max = buf.line_grapheme_count(pos.row);
    Position::new(pos.row, (pos.col + 1).min(max))
}

pub fn line_start(pos: Position) -> Position {
    Position::new(pos.row, 0)
}

pub fn first_non_blank(buf: &Buffer, row: usize) -> Position {
    let len = buf.line_grapheme_count(row);
    for col in 0..len {
        if !is_blank(&cluster_at(buf, row, col)) {
            return Position::new(row, col);
        }
    }
    Position::new(row, 0)
}

pub fn line_end(buf: &Buffer, row: usize) -> Position {
    clamp(buf, row, buf.line_grapheme_count(row))
}

pub fn goto_first_line(buf: &Buffer) -> Position {
    first_non_blank(buf, 0)
}

pub fn goto_last_line(buf: &Buffer) -> Position {
    let last = buf.line_count().saturating_sub(1);
    first_non_blank(buf, last)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalDirection {
    Up,
    Down,
}

/// Vertical motion. When `buf.width == 0` this moves by logical line and
/// clamps the column to `preferred_col` (in graphemes, per the resolved
/// open question in `DESIGN.md`). When `buf.width > 0` it moves by wrapped
/// display segment, crossing to a neighboring logical line only once the
/// current line's wrap segments are exhausted.
pub fn vertical(
    buf: &Buffer,
    pos: Position,
    preferred_col: usize,
    dir: VerticalDirection,
) -> Position {
    if buf.width == 0 {
        return vertical_logical(buf, pos, preferred_col, dir);
    }
    vertical_display(buf, pos, preferred_col, dir)
}

fn vertical_logical(
    buf: &Buffer,
    pos: Position,
    preferred_col: usize,
    dir: VerticalDirection,
) -> Position {
    let next_row = match dir {
        VerticalDirection::Up => {
            if pos.row == 0 {
                return pos;
            }
            pos.row - 1
        }
        VerticalDirection::Down => {
            if pos.row + 1 >= buf.line_count() {
                return pos;
            }
            pos.row + 1
        }
    };
    clamp(buf, next_row, preferred_col)
}

fn vertical_display(
    buf: &Buffer,
    pos: Position,
    preferred_col: usize,
    dir: VerticalDirection,
) -> Position {
    let line = buf.line(pos.row).unwrap_or("");
    let chunks = wrap::wrap_line(line, buf.width);
    let (seg_idx, _) = wrap::segment_for_col(line, buf.width, pos.col);

    match dir {
        VerticalDirection::Up => {
            if seg_idx > 0 {
                let (start, end) = chunks[seg_idx - 1];
                return clamp(buf, pos.row, start + preferred_col.min(end - start));
            }
            if pos.row == 0 {
                return pos;
            }
            let prev_row = pos.row - 1;
            let prev_line = buf.line(prev_row).unwrap_or("");
            let prev_chunks = wrap::wrap_line(prev_line, buf.width);
            let (start, end) = *prev_chunks.last().unwrap();
            clamp(buf, prev_row, start + preferred_col.min(end.saturating_sub(start)))
        }
        VerticalDirection::Down => {
            if seg_idx + 1 < chunks.len() {
                let (start, end) = chunks[seg_idx + 1];
                return clamp(buf, pos.row, start + preferred_col.min(end - start));
            }
            if pos.row + 1 >= buf.line_count() {
                return pos;
            }
            let next_row = pos.row + 1;
            let next_line = buf.line(next_row).unwrap_or("");
            let next_chunks = wrap::wrap_line(next_line, buf.width);
            let (start, end) = next_chunks[0];
            clamp(buf, next_row, start + preferred_col.min(end.saturating_sub(start)))
        }
    }
}

fn skip_blanks_forward(buf: &Buffer, mut row: usize, mut col: usize) -> Position {
    loop {
        let len = buf.line_grapheme_count(row);
        if col >= len {
            if row + 1 >= buf.line_count() {
                return Position::new(row, len);
            }
            row += 1;
            col = 0;
            if buf.line_grapheme_count(row) == 0 {
                continue;
            }
        }
        let cluster = cluster_at(buf, row, col);
        if is_blank(&cluster) {
            col += 1;
            continue;
        }
        return Position::new(row, col);
    }
}

/// `w`/`W`: advance to the start of the next word/WORD, skipping blank
/// lines and runs of whitespace, possibly crossing lines.
pub fn word_forward(buf: &Buffer, pos: Position, big: bool) -> Position {
    let mut row = pos.row;
    let mut col = pos.col;
    let len = buf.line_grapheme_count(row);
    if col < len {
        let cluster = cluster_at(buf, row, col);
        let kind = token_of(&cluster, big);
        while col < buf.line_grapheme_count(row) {
            let c = cluster_at(buf, row, col);
            if token_of(&c, big) != kind {
                break;
            }
            col += 1;
        }
    }
    let landed = skip_blanks_forward(buf, row, col);
    row = landed.row;
    clamp(buf, row, landed.col)
}

/// `b`/`B`: retreat to the start of the previous word/WORD.
pub fn word_backward(buf: &Buffer, pos: Position, big: bool) -> Position {
    let mut row = pos.row;
    let mut col = pos.col;
    loop {
        if col == 0 {
            if row == 0 {
                return Position::origin();
            }
            row -= 1;
            col = buf.line_grapheme_count(row);
            continue;
        }
        let prev_col = col - 1;
        let cluster = cluster_at(buf, row, prev_col);
        if is_blank(&cluster) {
            col = prev_col;
            continue;
        }
        let kind = token_of(&cluster, big);
        let mut start = prev_col;
        while start > 0 {
            let before = start - 1;
            let bc = cluster_at(buf, row, before);
            if token_of(&bc, big) != kind {
                break;
            }
            start = before;
        }
        return clamp(buf, row, start);
    }
}

/// `e`/`E`: advance to the last cluster of the current or next word/WORD.
/// Always moves forward at least one cluster.
pub fn word_end(buf: &Buffer, pos: Position, big: bool) -> Position {
    let mut row = pos.row;
    let mut col = pos.col;
    loop {
        let len = buf.line_grapheme_count(row);
        if col + 1 < len {
            col += 1;
        } else if row + 1 < buf.line_count() {
            row += 1;
            col = 0;
        } else {
            return clamp(buf, row, len.saturating_sub(1));
        }
        let len = buf.line_grapheme_count(row);
        if col >= len {
            continue;
        }
        let cluster = cluster_at(buf, row, col);
        if is_blank(&cluster) {
            continue;
        }
        let kind = token_of(&cluster, big);
        let mut end = col;
        loop {
            let len = buf.line_grapheme_count(row);
            if end + 1 >= len {
                break;
            }
            let nc = cluster_at(buf, row, end + 1);
            if token_of(&nc, big) != kind {
                break;
            }
            end += 1;
        }
        return clamp(buf, row, end);
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
    fn left_right_clamp_at_line_bounds() {
        let b = buf("abc");
        assert_eq!(left(&b, Position::origin()), Position::origin());
        assert_eq!(right(&b, Position::new(0, 2)), Position::new(0, 2));
        assert_eq!(right(&b, Position::new(0, 0)), Position::new(0, 1));
    }

    #[test]
    fn line_start_end_and_first_non_blank() {
        let b = buf("   hello");
        assert_eq!(line_start(Position::new(0, 5)), Position::new(0, 0));
        assert_eq!(line_end(&b, 0), Position::new(0, 7));
        assert_eq!(first_non_blank(&b, 0), Position::new(0, 3));
    }

    #[test]
    fn goto_first_and_last_line() {
        let b = buf("a\n  b\nc");
        assert_eq!(goto_first_line(&b), Position::new(0, 0));
        assert_eq!(goto_last_line(&b), Position::new(2, 0));
    }

    #[test]
    fn word_forward_across_punctuation_and_whitespace() {
        let b = buf("foo, bar");
        let p = word_forward(&b, Position::origin(), false);
        assert_eq!(p, Position::new(0, 3)); // ','
        let p = word_forward(&b, p, false);
        assert_eq!(p, Position::new(0, 5)); // 'bar'
    }

    #[test]
    fn word_forward_big_treats_punctuation_as_nonblank() {
        let b = buf("foo, bar");
        let p = word_forward(&b, Position::origin(), true);
        assert_eq!(p, Position::new(0, 5)); // skips "foo," as one WORD
    }

    #[test]
    fn word_forward_crosses_blank_lines() {
        let b = buf("alpha\n\nbeta");
        let p = word_forward(&b, Position::origin(), false);
        assert_eq!(p, Position::new(2, 0));
    }

    #[test]
    fn word_backward_is_inverse_ish() {
        let b = buf("foo bar baz");
        let end = Position::new(0, 11);
        let p = word_backward(&b, end, false);
        assert_eq!(p, Position::new(0, 8));
        let p = word_backward(&b, p, false);
        assert_eq!(p, Position::new(0, 4));
        let p = word_backward(&b, p, false);
        assert_eq!(p, Position::new(0, 0));
    }

    #[test]
    fn word_end_lands_on_last_cluster_of_word() {
        let b = buf("foo bar");
        let p = word_end(&b, Position::origin(), false);
        assert_eq!(p, Position::new(0, 2));
        let p = word_end(&b, p, false);
        assert_eq!(p, Position::new(0, 6));
    }

    #[test]
    fn vertical_logical_preserves_preferred_col() {
        let b = buf("hello\nhi\nworld");
        let p = vertical(&b, Position::new(0, 4), 4, VerticalDirection::Down);
        assert_eq!(p, Position::new(1, 1)); // "hi" clamps to its last col
        let p = vertical(&b, p, 4, VerticalDirection::Down);
        assert_eq!(p, Position::new(2, 4));
    }

    #[test]
    fn vertical_display_crosses_wrap_segments_before_logical_lines() {
        let mut b = buf("abcdef\nxy");
        b.width = 3;
        // cursor at (0,0): segment 0 of "abc|def"
        let p = vertical(&b, Position::origin(), 0, VerticalDirection::Down);
        assert_eq!(p, Position::new(0, 3)); // moved to segment "def", same row
        let p = vertical(&b, p, 0, VerticalDirection::Down);
        assert_eq!(p, Position::new(1, 0)); // crosses to next logical line
    }
}
