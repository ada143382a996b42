//! Terminal column width for a single grapheme cluster.
//!
//! `display_width` is the one function in this crate allowed to decide how
//! wide a cluster is on screen; nothing above this crate should reach past
//! it into `unicode_width` directly, or cursor/selection alignment will
//! drift between call sites that disagree.
//!
//! Precedence, highest first:
//! 1. A small static override table for sequences the base East-Asian-Width
//!    table mis-measures (flags, ZWJ families, keycaps, skin-tone modifiers).
//! 2. A heuristic classifier biased toward over-estimating width — a stray
//!    blank cell is harmless, an under-estimate causes rendering drift.

use crate::grapheme;

/// Sequences whose width the base `unicode-width` table gets wrong. Keep
/// this sorted by byte value of the key for `override_width`'s binary
/// search to work.
const OVERRIDES: &[(&str, u16)] = &[
    ("1️⃣", 2),
    ("2️⃣", 2),
    ("⚙", 1),
    ("⚙️", 1),
    ("✈️", 2),
    ("🇺🇸", 2),
    ("👍🏻", 2),
    ("👨‍👩‍👧‍👦", 2),
];

fn override_width(egc: &str) -> Option<u16> {
    OVERRIDES
        .binary_search_by(|(seq, _)| (*seq).cmp(egc))
        .ok()
        .map(|idx| OVERRIDES[idx].1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Ascii,
    Narrow,
    Wide,
    EmojiSimple,
    EmojiModifier,
    EmojiKeycap,
    EmojiFlag,
    EmojiZwj,
    Combining { base_wide: bool },
    Control,
}

const ZWJ: char = '\u{200D}';
const KEYCAP_COMBINING: char = '\u{20E3}';

fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

fn is_skin_tone_modifier(c: char) -> bool {
    ('\u{1F3FB}'..='\u{1F3FF}').contains(&c)
}

fn is_extended_pictographic(c: char) -> bool {
    ('\u{1F300}'..='\u{1FAFF}').contains(&c) || ('\u{2600}'..='\u{27BF}').contains(&c)
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
        || ('\u{1AB0}'..='\u{1AFF}').contains(&c)
        || ('\u{1DC0}'..='\u{1DFF}').contains(&c)
        || ('\u{20D0}'..='\u{20FF}').contains(&c)
        || ('\u{FE20}'..='\u{FE2F}').contains(&c)
}

fn classify(egc: &str) -> Kind {
    let mut chars = egc.chars();
    let Some(first) = chars.next() else {
        return Kind::Control;
    };

    if egc.chars().count() == 1 {
        if first.is_control() {
            return Kind::Control;
        }
        if first.is_ascii() {
            return Kind::Ascii;
        }
        if is_extended_pictographic(first) {
            return Kind::EmojiSimple;
        }
        if unicode_width::UnicodeWidthChar::width(first).unwrap_or(1) == 2 {
            return Kind::Wide;
        }
        return Kind::Narrow;
    }

    let mut count_ep = 0usize;
    let mut count_ri = 0usize;
    let mut has_zwj = false;
    let mut has_skin = false;
    let mut has_combining = false;
    let mut keycap_base_seen = false;
    let mut ends_with_keycap = false;
    let mut any_wide = false;
    let mut base_wide_or_emoji = false;
    let mut saw_non_mark_base = false;
    let total = egc.chars().count();

    for (i, c) in egc.chars().enumerate() {
        if is_extended_pictographic(c) {
            count_ep += 1;
        }
        if is_regional_indicator(c) {
            count_ri += 1;
        }
        if c == ZWJ {
            has_zwj = true;
        }
        if is_skin_tone_modifier(c) {
            has_skin = true;
        }
        if is_combining_mark(c) {
            has_combining = true;
        }
        if c == KEYCAP_COMBINING && i == total - 1 {
            ends_with_keycap = true;
        }
        if c.is_ascii_digit() || c == '#' || c == '*' {
            keycap_base_seen = true;
        }
        if unicode_width::UnicodeWidthChar::width(c).unwrap_or(1) == 2 {
            any_wide = true;
        }
        if !saw_non_mark_base && !is_combining_mark(c) {
            saw_non_mark_base = true;
            if is_extended_pictographic(c)
                || unicode_width::UnicodeWidthChar::width(c).unwrap_or(1) == 2
            {
                base_wide_or_emoji = true;
            }
        }
    }

    if ends_with_keycap && keycap_base_seen {
        return Kind::EmojiKeycap;
    }
    if count_ri == 2 && total == 2 {
        return Kind::EmojiFlag;
    }
    if has_zwj && count_ep >= 2 {
        return Kind::EmojiZwj;
    }
    if count_ep >= 1 && has_skin {
        return Kind::EmojiModifier;
    }
    if count_ep == 1 && !has_zwj {
        return Kind::EmojiSimple;
    }
    if has_combining {
        return Kind::Combining {
            base_wide: base_wide_or_emoji,
        };
    }
    if any_wide {
        return Kind::Wide;
    }
    if count_ep > 0 {
        return Kind::EmojiSimple;
    }
    Kind::Narrow
}

fn width_for_kind(kind: Kind) -> u16 {
    match kind {
        Kind::Control => 0,
        Kind::Ascii | Kind::Narrow => 1,
        Kind::Wide
        | Kind::EmojiSimple
        | Kind::EmojiModifier
        | Kind::EmojiKeycap
        | Kind::EmojiFlag
        | Kind::EmojiZwj => 2,
        Kind::Combining { base_wide } => {
            if base_wide {
                2
            } else {
                1
            }
        }
    }
}

/// Display-column width of a single grapheme cluster.
///
/// Precondition: `cluster` is exactly one extended grapheme cluster; the
/// caller is expected to have already segmented with [`crate::grapheme`].
pub fn display_width(cluster: &str) -> u16 {
    if cluster.is_empty() {
        return 0;
    }
    if let Some(w) = override_width(cluster) {
        return w;
    }
    let kind = classify(cluster);
    let mut width = width_for_kind(kind);
    if width == 1 {
        let has_signal = cluster
            .chars()
            .any(|c| is_extended_pictographic(c) || is_regional_indicator(c));
        if has_signal {
            width = 2;
        }
    }
    width
}

/// Sum of cluster widths across `s`.
pub fn string_display_width(s: &str) -> usize {
    grapheme::iter(s)
        .map(|(cluster, _, _)| display_width(cluster) as usize)
        .sum()
}

/// Longest prefix of `s` whose display width is at most `w`; never splits a
/// cluster, so the returned width may be strictly less than `w` when the
/// next cluster would overflow it.
pub fn truncate_to_display_width(s: &str, w: usize) -> &str {
    let mut acc = 0usize;
    let mut end = 0usize;
    for (cluster, byte, _) in grapheme::iter(s) {
        let cw = display_width(cluster) as usize;
        if acc + cw > w {
            break;
        }
        acc += cw;
        end = byte + cluster.len();
    }
    &s[..end]
}
