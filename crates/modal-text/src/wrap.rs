//! Soft-wrap segmentation shared by motions (display-line `j`/`k`) and the
//! renderer: both must agree on exactly where a line breaks, or the
//! cursor will drift from the row the renderer draws it on.

use crate::{grapheme, width};

/// Grapheme-index ranges `[start, end)` a line breaks into at `width`
/// display columns. A cluster never straddles a boundary; a cluster wider
/// than `width` gets its own chunk even though that chunk overflows.
/// `width == 0` is not a valid call here — callers check for "no wrap"
/// themselves and skip segmentation entirely.
pub fn wrap_line(line: &str, width: usize) -> Vec<(usize, usize)> {
    debug_assert!(width > 0);
    let total = grapheme::count(line);
    if total == 0 {
        return vec![(0, 0)];
    }
    let mut chunks = Vec::new();
    let mut chunk_start = 0usize;
    let mut col = 0usize;
    for (cluster, _byte, idx) in grapheme::iter(line) {
        let w = width::display_width(cluster) as usize;
        if col > 0 && col + w > width {
            chunks.push((chunk_start, idx));
            chunk_start = idx;
            col = 0;
        }
        col += w;
    }
    chunks.push((chunk_start, total));
    chunks
}

/// Index of the wrap segment containing grapheme column `col`, and the
/// column's offset within that segment.
pub fn segment_for_col(line: &str, width: usize, col: usize) -> (usize, usize) {
    let chunks = wrap_line(line, width);
    for (i, (start, end)) in chunks.iter().enumerate() {
        if col < *end || i == chunks.len() - 1 {
            return (i, col.saturating_sub(*start));
        }
    }
    (0, col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_line_is_one_empty_chunk() {
        assert_eq!(wrap_line("", 10), vec![(0, 0)]);
    }

    #[test]
    fn short_line_is_one_chunk() {
        assert_eq!(wrap_line("hello", 10), vec![(0, 5)]);
    }

    #[test]
    fn exact_multiple_splits_evenly() {
        assert_eq!(wrap_line("abcdef", 3), vec![(0, 3), (3, 6)]);
    }

    #[test]
    fn never_splits_a_wide_cluster() {
        // "a界b" is widths [1,2,1]; width=2 means "界" alone can't share
        // a chunk with "a" (1+2=3 > 2) and must start its own chunk.
        let chunks = wrap_line("a界b", 2);
        assert_eq!(chunks, vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn chunks_reconstruct_the_line_byte_for_byte() {
        let line = "hello😀world界界";
        for width in 1..8 {
            let chunks = wrap_line(line, width);
            let mut rebuilt = String::new();
            for (s, e) in &chunks {
                rebuilt.push_str(grapheme::slice(line, *s, *e));
            }
            assert_eq!(rebuilt, line, "width={width}");
        }
    }

    #[test]
    fn every_chunk_width_is_at_most_target_except_lone_wide_cluster() {
        let line = "a界bcdef界g";
        let width = 3;
        for (s, e) in wrap_line(line, width) {
            let chunk = grapheme::slice(line, s, e);
            let w = width::string_display_width(chunk);
            let single_cluster = e - s == 1;
            assert!(w <= width || single_cluster);
        }
    }
}
