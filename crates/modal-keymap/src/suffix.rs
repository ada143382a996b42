//! The registered completions for an operator-pending key buffer: what
//! `(operator, buffer)` resolves to. Shared by `d`, `c`, and `y` (their
//! suffix vocabularies are identical apart from the same-letter linewise
//! repeat), and reused — narrowed to just the text-object entries — for
//! the `v` operator's direct-selection role.

use modal_commands::{span::MotionSpan, text_object::TextObjectKind};

use crate::trie::MappingTrie;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuffixOutcome {
    Motion(MotionSpan),
    TextObject { kind: TextObjectKind, around: bool },
}

fn text_object_specs() -> Vec<(&'static str, SuffixOutcome)> {
    use SuffixOutcome::TextObject as T;
    vec![
        ("iw", T { kind: TextObjectKind::Word, around: false }),
        ("aw", T { kind: TextObjectKind::Word, around: true }),
        ("iW", T { kind: TextObjectKind::BigWord, around: false }),
        ("aW", T { kind: TextObjectKind::BigWord, around: true }),
        ("i\"", T { kind: TextObjectKind::Quote('"'), around: false }),
        ("a\"", T { kind: TextObjectKind::Quote('"'), around: true }),
        ("i'", T { kind: TextObjectKind::Quote('\''), around: false }),
        ("a'", T { kind: TextObjectKind::Quote('\''), around: true }),
        ("i(", T { kind: TextObjectKind::Bracket('(', ')'), around: false }),
        ("a(", T { kind: TextObjectKind::Bracket('(', ')'), around: true }),
        ("i)", T { kind: TextObjectKind::Bracket('(', ')'), around: false }),
        ("a)", T { kind: TextObjectKind::Bracket('(', ')'), around: true }),
        ("i[", T { kind: TextObjectKind::Bracket('[', ']'), around: false }),
        ("a[", T { kind: TextObjectKind::Bracket('[', ']'), around: true }),
        ("i]", T { kind: TextObjectKind::Bracket('[', ']'), around: false }),
        ("a]", T { kind: TextObjectKind::Bracket('[', ']'), around: true }),
        ("i{", T { kind: TextObjectKind::Bracket('{', '}'), around: false }),
        ("a{", T { kind: TextObjectKind::Bracket('{', '}'), around: true }),
        ("i}", T { kind: TextObjectKind::Bracket('{', '}'), around: false }),
        ("a}", T { kind: TextObjectKind::Bracket('{', '}'), around: true }),
        ("ib", T { kind: TextObjectKind::AnyBracket, around: false }),
        ("ab", T { kind: TextObjectKind::AnyBracket, around: true }),
    ]
}

/// The full `(operator, buffer)` registry for `d`/`c`/`y`: line motions,
/// the same-letter linewise repeat, and every text object.
pub fn operator_suffix_trie(operator: char) -> MappingTrie<SuffixOutcome> {
    use SuffixOutcome::Motion as M;
    let mut specs = vec![
        ("w", M(MotionSpan::Word)),
        ("$", M(MotionSpan::ToEol)),
        ("0", M(MotionSpan::ToLineStart)),
        ("j", M(MotionSpan::LinesDown)),
        ("k", M(MotionSpan::LinesUp)),
        ("G", M(MotionSpan::ToLastLine)),
        ("gg", M(MotionSpan::ToFirstLine)),
    ];
    specs.push((operator_repeat_key(operator), M(MotionSpan::Line)));
    specs.extend(text_object_specs());
    MappingTrie::build(specs)
}

/// `dd`/`cc`/`yy`: the operator's own key repeated selects the whole
/// current line.
fn operator_repeat_key(operator: char) -> &'static str {
    match operator {
        'd' => "d",
        'c' => "c",
        'y' => "y",
        _ => "",
    }
}

/// `v`'s direct-selection suffix set: text objects only, no line motions —
/// `v` followed by anything else falls back to a plain mode toggle, not
/// an operator.
pub fn visual_text_object_trie() -> MappingTrie<SuffixOutcome> {
    MappingTrie::build(text_object_specs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trie::Resolution;

    #[test]
    fn dw_resolves_to_word_motion() {
        let trie = operator_suffix_trie('d');
        assert_eq!(
            trie.resolve(&['w']),
            Resolution::Matched { consumed: 1, output: SuffixOutcome::Motion(MotionSpan::Word) }
        );
    }

    #[test]
    fn dd_resolves_to_line() {
        let trie = operator_suffix_trie('d');
        assert_eq!(
            trie.resolve(&['d']),
            Resolution::Matched { consumed: 1, output: SuffixOutcome::Motion(MotionSpan::Line) }
        );
    }

    #[test]
    fn diw_resolves_to_inner_word_text_object() {
        let trie = operator_suffix_trie('d');
        assert_eq!(
            trie.resolve(&['i', 'w']),
            Resolution::Matched {
                consumed: 2,
                output: SuffixOutcome::TextObject { kind: TextObjectKind::Word, around: false }
            }
        );
    }

    #[test]
    fn i_alone_needs_more() {
        let trie = operator_suffix_trie('c');
        assert_eq!(trie.resolve(&['i']), Resolution::NeedMore);
    }

    #[test]
    fn ya_paren_resolves_to_around_bracket() {
        let trie = operator_suffix_trie('y');
        assert_eq!(
            trie.resolve(&['a', '(']),
            Resolution::Matched {
                consumed: 2,
                output: SuffixOutcome::TextObject {
                    kind: TextObjectKind::Bracket('(', ')'),
                    around: true
                }
            }
        );
    }

    #[test]
    fn visual_trie_has_no_line_motions() {
        let trie = visual_text_object_trie();
        assert_eq!(trie.resolve(&['$']), Resolution::FallbackLiteral('$'));
    }
}
