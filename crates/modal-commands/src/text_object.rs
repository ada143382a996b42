//! Text-object resolution: word/WORD, quoted, bracketed, and "any-bracket"
//! regions around the cursor, operating entirely within the cursor's line.
//!
//! Every object is resolved to a half-open grapheme range `[start, end)`
//! plus a `found` flag, so a caller (the span resolver or the dispatcher)
//! can tell "empty match" (adjacent delimiters) apart from "no match".

use modal_state::{Buffer, Position};
use modal_text::grapheme::{self, GraphemeClass};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextObjectKind {
    Word,
    BigWord,
    Quote(char),
    Bracket(char, char),
    AnyBracket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextObjectResult {
    pub start: Position,
    pub end: Position,
    pub found: bool,
}

impl TextObjectResult {
    fn not_found(row: usize) -> Self {
        Self {
            start: Position::new(row, 0),
            end: Position::new(row, 0),
            found: false,
        }
    }
}

fn clusters(line: &str) -> Vec<&str> {
    grapheme::iter(line).map(|(c, _, _)| c).collect()
}

fn is_blank(cluster: &str) -> bool {
    grapheme::class_of(cluster) == GraphemeClass::Whitespace
}

fn preceded_by_odd_backslashes(cs: &[&str], idx: usize) -> bool {
    let mut n = 0usize;
    let mut i = idx;
    while i > 0 && cs[i - 1] == "\\" {
        n += 1;
        i -= 1;
    }
    n % 2 == 1
}

pub fn resolve_text_object(
    buf: &Buffer,
    pos: Position,
    kind: TextObjectKind,
    around: bool,
) -> TextObjectResult {
    let line = buf.line(pos.row).unwrap_or("");
    match kind {
        TextObjectKind::Word => word_object(line, pos, false, around),
        TextObjectKind::BigWord => word_object(line, pos, true, around),
        TextObjectKind::Quote(q) => quote_object(line, pos, q, around),
        TextObjectKind::Bracket(open, close) => bracket_object(line, pos, open, close, around),
        TextObjectKind::AnyBracket => any_bracket_object(line, pos, around),
    }
}

fn word_object(line: &str, pos: Position, big: bool, around: bool) -> TextObjectResult {
    let cs = clusters(line);
    let col = pos.col;
    if col >= cs.len() || is_blank(cs[col]) {
        return TextObjectResult::not_found(pos.row);
    }
    let class_of = |c: &str| -> GraphemeClass {
        if big {
            GraphemeClass::Word
        } else {
            grapheme::class_of(c)
        }
    };
    let target = class_of(cs[col]);
    let mut start = col;
    while start > 0 && !is_blank(cs[start - 1]) && class_of(cs[start - 1]) == target {
        start -= 1;
    }
    let mut end = col + 1;
    while end < cs.len() && !is_blank(cs[end]) && class_of(cs[end]) == target {
        end += 1;
    }
    if around {
        let before_end = end;
        while end < cs.len() && is_blank(cs[end]) {
            end += 1;
        }
        if end == before_end {
            while start > 0 && is_blank(cs[start - 1]) {
                start -= 1;
            }
        }
    }
    TextObjectResult {
        start: Position::new(pos.row, start),
        end: Position::new(pos.row, end),
        found: true,
    }
}

fn quote_object(line: &str, pos: Position, quote: char, around: bool) -> TextObjectResult {
    let cs = clusters(line);
    let quote_str = quote.to_string();
    let mut positions = Vec::new();
    for (idx, c) in cs.iter().enumerate() {
        if *c == quote_str && !preceded_by_odd_backslashes(&cs, idx) {
            positions.push(idx);
        }
    }
    let pairs: Vec<(usize, usize)> = positions.chunks_exact(2).map(|p| (p[0], p[1])).collect();
    let col = pos.col;
    let chosen = pairs
        .iter()
        .find(|(a, b)| *a <= col && col <= *b)
        .copied()
        .or_else(|| {
            pairs.iter().min_by_key(|(a, b)| {
                let da = (*a as isize - col as isize).unsigned_abs();
                let db = (*b as isize - col as isize).unsigned_abs();
                da.min(db)
            }).copied()
        });
    match chosen {
        None => TextObjectResult::not_found(pos.row),
        Some((a, b)) => pair_to_result(pos.row, a, b, around),
    }
}

fn find_bracket_pairs(cs: &[&str], open: &str, close: &str) -> Vec<(usize, usize)> {
    let mut stack = Vec::new();
    let mut pairs = Vec::new();
    for (idx, c) in cs.iter().enumerate() {
        let escaped = preceded_by_odd_backslashes(cs, idx);
        if escaped {
            continue;
        }
        if *c == open && open != close {
            stack.push(idx);
        } else if *c == close {
            if let Some(a) = stack.pop() {
                pairs.push((a, idx));
            }
        }
    }
    pairs
}

fn smallest_containing(pairs: &[(usize, usize)], col: usize) -> Option<(usize, usize)> {
    pairs
        .iter()
        .filter(|(a, b)| *a <= col && col <= *b)
        .min_by_key(|(a, b)| b - a)
        .copied()
}

fn bracket_object(
    line: &str,
    pos: Position,
    open: char,
    close: char,
    around: bool,
) -> TextObjectResult {
    let cs = clusters(line);
    let open_s = open.to_string();
    let close_s = close.to_string();
    let pairs = find_bracket_pairs(&cs, &open_s, &close_s);
    match smallest_containing(&pairs, pos.col) {
        None => TextObjectResult::not_found(pos.row),
        Some((a, b)) => pair_to_result(pos.row, a, b, around),
    }
}

fn any_bracket_object(line: &str, pos: Position, around: bool) -> TextObjectResult {
    let cs = clusters(line);
    let mut pairs = find_bracket_pairs(&cs, "(", ")");
    pairs.extend(find_bracket_pairs(&cs, "[", "]"));
    pairs.extend(find_bracket_pairs(&cs, "{", "}"));
    match smallest_containing(&pairs, pos.col) {
        None => TextObjectResult::not_found(pos.row),
        Some((a, b)) => pair_to_result(pos.row, a, b, around),
    }
}

/// `a`/`b` are the delimiter grapheme indices (`a < b` or `a == b - 1`).
fn pair_to_result(row: usize, a: usize, b: usize, around: bool) -> TextObjectResult {
    let (start, end) = if around {
        (a, b + 1)
    } else {
        (a + 1, b)
    };
    TextObjectResult {
        start: Position::new(row, start),
        end: Position::new(row, end),
        found: true,
    }
}
