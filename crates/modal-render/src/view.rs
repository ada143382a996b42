//! Produces the display rows for one frame. Purely derivative: it only
//! reads `Buffer`, never mutates it.

use modal_state::{Buffer, Position};
use modal_text::{grapheme, wrap};

use crate::row::{StyledRow, StyledSpan};
use crate::style::Style;

pub fn view(buf: &Buffer) -> Vec<StyledRow> {
    let mut rows = Vec::with_capacity(buf.line_count());
    for row in 0..buf.line_count() {
        let line = buf.line(row).unwrap_or("");
        // `selection_range_for_row` already folds Linewise/Characterwise
        // into one half-open column range; the renderer just overlays it.
        let sel_range = buf.selection_range_for_row(row);
        let chunks = if buf.width == 0 {
            vec![(0, grapheme::count(line))]
        } else {
            wrap::wrap_line(line, buf.width)
        };
        for (start, end) in chunks {
            rows.push(render_chunk(line, start, end, row, buf.cursor, sel_range));
        }
    }
    rows
}

fn render_chunk(
    line: &str,
    chunk_start: usize,
    chunk_end: usize,
    row: usize,
    cursor: Position,
    sel_range: Option<(usize, usize)>,
) -> StyledRow {
    let mut spans: Vec<StyledSpan> = Vec::new();
    let slice = grapheme::slice(line, chunk_start, chunk_end);
    for (offset, (cluster, _, _)) in grapheme::iter(slice).enumerate() {
        let col = chunk_start + offset;
        let mut style = Style::empty();
        if let Some((s, e)) = sel_range {
            if col >= s && col < e {
                style |= Style::SELECTION;
            }
        }
        if row == cursor.row && col == cursor.col {
            // The cluster at the cursor always takes cursor style
            // precedence over any overlapping selection highlight.
            style = Style::CURSOR;
        }
        match spans.last_mut() {
            Some(last) if last.style == style => last.text.push_str(cluster),
            _ => spans.push(StyledSpan { text: cluster.to_string(), style }),
        }
    }
    if spans.is_empty() {
        spans.push(StyledSpan { text: String::new(), style: Style::empty() });
    }
    StyledRow { spans }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modal_state::Mode;

    fn buf(text: &str) -> Buffer {
        Buffer::new(text, 0, 0, Mode::Normal)
    }

    #[test]
    fn unwrapped_line_is_a_single_row_with_cursor_span() {
        let mut b = buf("hello");
        b.cursor = Position::new(0, 1);
        let rows = view(&b);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text(), "hello");
        assert_eq!(rows[0].spans[0].text, "h");
        assert_eq!(rows[0].spans[0].style, Style::empty());
        assert_eq!(rows[0].spans[1].text, "e");
        assert_eq!(rows[0].spans[1].style, Style::CURSOR);
        assert_eq!(rows[0].spans[2].text, "llo");
        assert_eq!(rows[0].spans[2].style, Style::empty());
    }

    #[test]
    fn wrapped_line_produces_multiple_rows() {
        let b = {
            let mut b = buf("abcdef");
            b.width = 3;
            b
        };
        let rows = view(&b);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text(), "abc");
        assert_eq!(rows[1].text(), "def");
    }

    #[test]
    fn characterwise_selection_highlights_inclusive_range() {
        let mut b = buf("hello world");
        b.mode = Mode::Visual;
        b.visual_anchor = Some(Position::new(0, 0));
        b.cursor = Position::new(0, 4);
        let rows = view(&b);
        let row = &rows[0];
        assert_eq!(row.text(), "hello world");
        let sel_text: String = row
            .spans
            .iter()
            .filter(|s| s.style.contains(Style::SELECTION) || s.style.contains(Style::CURSOR))
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(sel_text, "hello");
    }

    #[test]
    fn linewise_selection_covers_whole_row() {
        let mut b = buf("foo\nbar\nbaz");
        b.mode = Mode::VisualLine;
        b.visual_anchor = Some(Position::new(0, 2));
        b.cursor = Position::new(1, 0);
        let rows = view(&b);
        let highlighted = |r: &StyledRow| -> bool {
            r.spans.iter().any(|s| s.style.contains(Style::SELECTION) || s.style.contains(Style::CURSOR))
        };
        assert!(highlighted(&rows[0]));
        assert!(highlighted(&rows[1]));
        assert!(!highlighted(&rows[2]));
    }

    #[test]
    fn empty_line_renders_as_single_empty_row() {
        let b = buf("");
        let rows = view(&b);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text(), "");
    }
}
