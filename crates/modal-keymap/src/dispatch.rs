//! The pending-command builder and dispatcher: turns a resolved
//! `KeyToken` plus the buffer's current mode and `PendingState` into zero,
//! one, or two `Command`s for the caller (`modal-editor`'s update loop) to
//! execute and, where undoable, push to `History`.
//!
//! `dispatch` only builds commands — it never calls `Command::execute`
//! itself (`modal-editor` owns both the `Buffer` and the `History` that
//! execution and undo-push need), except that it mutates `buf.pending`
//! directly, since that state belongs to the buffer and dispatch is its
//! sole writer.

use modal_commands::command::{Command, EditAction, InsertEntry, MotionKind};
use modal_commands::span::MotionSpan;
use modal_state::{Buffer, Mode};

use crate::key_token::{KeyToken, NamedKey};
use crate::suffix::{operator_suffix_trie, visual_text_object_trie, SuffixOutcome};
use crate::trie::Resolution;

/// What a dispatched key produces. Hosts should execute `Sequence` entries
/// in order; only entries where `Command::is_undoable()` should be pushed
/// to history.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Command(Command),
    Sequence(Vec<Command>),
    /// A strict prefix of a registered pending sequence matched; wait for
    /// the next key without side effects.
    NeedMore,
    /// No binding applies; the host may treat the key as unhandled.
    Ignored,
}

pub fn dispatch(buf: &mut Buffer, token: KeyToken) -> DispatchOutcome {
    if buf.pending.is_active() && matches!(token, KeyToken::Named(NamedKey::Escape)) {
        buf.pending.clear();
        return DispatchOutcome::Ignored;
    }
    match buf.mode {
        Mode::Normal => dispatch_normal(buf, token),
        Mode::Insert => dispatch_insert(token),
        Mode::Replace => dispatch_replace(token),
        Mode::Visual | Mode::VisualLine => dispatch_visual(buf, token),
    }
}

fn dispatch_normal(buf: &mut Buffer, token: KeyToken) -> DispatchOutcome {
    if buf.pending.is_active() {
        return dispatch_pending(buf, token);
    }
    if let KeyToken::Named(named) = token {
        return dispatch_normal_named(named);
    }
    let Some(ch) = token.as_char() else {
        return DispatchOutcome::Ignored;
    };
    use Command::*;
    match ch {
        'h' => DispatchOutcome::Command(Motion(MotionKind::Left)),
        'l' => DispatchOutcome::Command(Motion(MotionKind::Right)),
        'j' => DispatchOutcome::Command(Motion(MotionKind::Down)),
        'k' => DispatchOutcome::Command(Motion(MotionKind::Up)),
        'w' => DispatchOutcome::Command(Motion(MotionKind::WordForward)),
        'b' => DispatchOutcome::Command(Motion(MotionKind::WordBackward)),
        'e' => DispatchOutcome::Command(Motion(MotionKind::WordEnd)),
        '0' => DispatchOutcome::Command(Motion(MotionKind::LineStart)),
        '$' => DispatchOutcome::Command(Motion(MotionKind::LineEnd)),
        '^' => DispatchOutcome::Command(Motion(MotionKind::FirstNonBlank)),
        'G' => DispatchOutcome::Command(Motion(MotionKind::LastLine)),
        'x' => DispatchOutcome::Command(DeleteChar { capture: None }),
        'C' => DispatchOutcome::Command(OperatorSpan {
            span_kind: MotionSpan::ToEol,
            action: EditAction::Change,
            capture: None,
        }),
        'Y' => DispatchOutcome::Command(OperatorSpan {
            span_kind: MotionSpan::Line,
            action: EditAction::Yank,
            capture: None,
        }),
        'p' => DispatchOutcome::Command(PasteAfter { capture: None }),
        'P' => DispatchOutcome::Command(PasteBefore { capture: None }),
        'u' => DispatchOutcome::Command(Undo),
        'o' => DispatchOutcome::Command(OpenLine { above: false, capture: None }),
        'O' => DispatchOutcome::Command(OpenLine { above: true, capture: None }),
        'i' => DispatchOutcome::Command(EnterInsert(InsertEntry::Before)),
        'a' => DispatchOutcome::Command(EnterInsert(InsertEntry::After)),
        'I' => DispatchOutcome::Command(EnterInsert(InsertEntry::LineStart)),
        'A' => DispatchOutcome::Command(EnterInsert(InsertEntry::LineEnd)),
        'R' => DispatchOutcome::Command(EnterReplace),
        'V' => DispatchOutcome::Command(EnterVisualLine),
        'd' | 'c' | 'y' | 'g' | 'r' | 'v' => {
            buf.pending.start(ch);
            DispatchOutcome::NeedMore
        }
        _ => DispatchOutcome::Ignored,
    }
}

fn dispatch_normal_named(named: NamedKey) -> DispatchOutcome {
    match named {
        NamedKey::Up => DispatchOutcome::Command(Command::Motion(MotionKind::Up)),
        NamedKey::Down => DispatchOutcome::Command(Command::Motion(MotionKind::Down)),
        NamedKey::Left => DispatchOutcome::Command(Command::Motion(MotionKind::Left)),
        NamedKey::Right => DispatchOutcome::Command(Command::Motion(MotionKind::Right)),
        NamedKey::CtrlR => DispatchOutcome::Command(Command::ConditionalRedo),
        NamedKey::Enter | NamedKey::CtrlJ => DispatchOutcome::Command(Command::Submit),
        _ => DispatchOutcome::Ignored,
    }
}

/// With an operator pending, append the key to the buffer and resolve
/// `(operator, buffer)` against the registry.
fn dispatch_pending(buf: &mut Buffer, token: KeyToken) -> DispatchOutcome {
    let op = buf.pending.operator.expect("dispatch_pending called without a pending operator");

    if op == 'r' {
        buf.pending.clear();
        return dispatch_replace_char_fallback(token);
    }

    if op == 'g' {
        buf.pending.clear();
        return match token.as_char() {
            Some('g') => DispatchOutcome::Command(Command::Motion(MotionKind::FirstLine)),
            _ => DispatchOutcome::Ignored,
        };
    }

    let Some(ch) = token.as_char() else {
        let outcome = if op == 'v' {
            DispatchOutcome::Command(Command::EnterVisual)
        } else {
            DispatchOutcome::Ignored
        };
        buf.pending.clear();
        return outcome;
    };

    buf.pending.push(ch);
    let chars: Vec<char> = buf.pending.key_buffer.chars().collect();

    if op == 'v' {
        let trie = visual_text_object_trie();
        return match trie.resolve(&chars) {
            Resolution::Matched { output: SuffixOutcome::TextObject { kind, around }, .. } => {
                buf.pending.clear();
                DispatchOutcome::Command(Command::SelectTextObject { kind, around })
            }
            Resolution::Matched { output: SuffixOutcome::Motion(_), .. } => {
                // The visual suffix trie never registers bare motions; unreachable.
                buf.pending.clear();
                DispatchOutcome::Ignored
            }
            Resolution::NeedMore => DispatchOutcome::NeedMore,
            Resolution::FallbackLiteral(_) => {
                buf.pending.clear();
                redispatch_as_visual_entry(buf, token)
            }
        };
    }

    let action = match op {
        'd' => EditAction::Delete,
        'c' => EditAction::Change,
        'y' => EditAction::Yank,
        _ => return DispatchOutcome::Ignored,
    };
    let trie = operator_suffix_trie(op);
    match trie.resolve(&chars) {
        Resolution::Matched { output: SuffixOutcome::Motion(span_kind), .. } => {
            buf.pending.clear();
            DispatchOutcome::Command(Command::OperatorSpan { span_kind, action, capture: None })
        }
        Resolution::Matched { output: SuffixOutcome::TextObject { kind, around }, .. } => {
            buf.pending.clear();
            DispatchOutcome::Command(Command::TextObject { kind, around, action, capture: None })
        }
        Resolution::NeedMore => DispatchOutcome::NeedMore,
        Resolution::FallbackLiteral(_) => {
            buf.pending.clear();
            DispatchOutcome::Ignored
        }
    }
}

/// `v`'s fallback policy: enter Visual mode at the cursor, then re-run the
/// triggering key as if it had been typed while already in Visual mode.
fn redispatch_as_visual_entry(buf: &mut Buffer, token: KeyToken) -> DispatchOutcome {
    match dispatch_visual(buf, token) {
        DispatchOutcome::Command(inner) => DispatchOutcome::Sequence(vec![Command::EnterVisual, inner]),
        DispatchOutcome::Sequence(mut inner) => {
            let mut seq = vec![Command::EnterVisual];
            seq.append(&mut inner);
            DispatchOutcome::Sequence(seq)
        }
        DispatchOutcome::NeedMore | DispatchOutcome::Ignored => DispatchOutcome::Command(Command::EnterVisual),
    }
}

/// `r`'s fallback policy: `<enter>` is ignored, any other printable
/// cluster becomes `ReplaceChar`, any other non-printable key cancels.
fn dispatch_replace_char_fallback(token: KeyToken) -> DispatchOutcome {
    match token {
        KeyToken::Named(NamedKey::Enter) => DispatchOutcome::Ignored,
        KeyToken::Named(_) => DispatchOutcome::Ignored,
        KeyToken::Char(c) => DispatchOutcome::Command(Command::ReplaceChar { new: c.to_string(), capture: None }),
        KeyToken::Cluster(s) => DispatchOutcome::Command(Command::ReplaceChar { new: s, capture: None }),
    }
}

fn dispatch_visual(_buf: &mut Buffer, token: KeyToken) -> DispatchOutcome {
    use Command::*;
    if let KeyToken::Named(named) = &token {
        return match named {
            NamedKey::Escape | NamedKey::CtrlC => DispatchOutcome::Command(ExitToNormal),
            NamedKey::Up => DispatchOutcome::Command(Motion(MotionKind::Up)),
            NamedKey::Down => DispatchOutcome::Command(Motion(MotionKind::Down)),
            NamedKey::Left => DispatchOutcome::Command(Motion(MotionKind::Left)),
            NamedKey::Right => DispatchOutcome::Command(Motion(MotionKind::Right)),
            _ => DispatchOutcome::Ignored,
        };
    }
    let Some(ch) = token.as_char() else {
        return DispatchOutcome::Ignored;
    };
    match ch {
        'h' => DispatchOutcome::Command(Motion(MotionKind::Left)),
        'l' => DispatchOutcome::Command(Motion(MotionKind::Right)),
        'j' => DispatchOutcome::Command(Motion(MotionKind::Down)),
        'k' => DispatchOutcome::Command(Motion(MotionKind::Up)),
        'w' => DispatchOutcome::Command(Motion(MotionKind::WordForward)),
        'b' => DispatchOutcome::Command(Motion(MotionKind::WordBackward)),
        'e' => DispatchOutcome::Command(Motion(MotionKind::WordEnd)),
        '0' => DispatchOutcome::Command(Motion(MotionKind::LineStart)),
        '$' => DispatchOutcome::Command(Motion(MotionKind::LineEnd)),
        '^' => DispatchOutcome::Command(Motion(MotionKind::FirstNonBlank)),
        'G' => DispatchOutcome::Command(Motion(MotionKind::LastLine)),
        'g' => DispatchOutcome::Command(Motion(MotionKind::FirstLine)), // gg collapses to g in Visual (no pending state here)
        'd' | 'x' => DispatchOutcome::Command(VisualOperator { action: EditAction::Delete, capture: None }),
        'y' => DispatchOutcome::Command(VisualOperator { action: EditAction::Yank, capture: None }),
        'c' => DispatchOutcome::Command(VisualOperator { action: EditAction::Change, capture: None }),
        'o' => DispatchOutcome::Command(SwapSelectionAnchor),
        'v' => DispatchOutcome::Command(EnterVisual),
        'V' => DispatchOutcome::Command(EnterVisualLine),
        _ => DispatchOutcome::Ignored,
    }
}

fn dispatch_insert(token: KeyToken) -> DispatchOutcome {
    use Command::*;
    if let KeyToken::Named(named) = &token {
        return match named {
            NamedKey::Escape | NamedKey::CtrlC => DispatchOutcome::Command(ExitToNormal),
            NamedKey::Enter | NamedKey::CtrlJ => DispatchOutcome::Command(Submit),
            NamedKey::AltEnter => {
                DispatchOutcome::Command(InsertText { text: "\n".to_string(), capture: None })
            }
            NamedKey::Space => DispatchOutcome::Command(InsertText { text: " ".to_string(), capture: None }),
            NamedKey::Backspace => DispatchOutcome::Command(InsertBackspace { capture: None }),
            NamedKey::Delete => DispatchOutcome::Command(InsertDeleteKey { capture: None }),
            NamedKey::Tab => DispatchOutcome::Command(InsertText { text: "\t".to_string(), capture: None }),
            NamedKey::Up => DispatchOutcome::Command(Motion(MotionKind::Up)),
            NamedKey::Down => DispatchOutcome::Command(Motion(MotionKind::Down)),
            NamedKey::Left | NamedKey::CtrlB => DispatchOutcome::Command(Motion(MotionKind::Left)),
            NamedKey::Right | NamedKey::CtrlF => DispatchOutcome::Command(Motion(MotionKind::Right)),
            NamedKey::CtrlA => DispatchOutcome::Command(KillToLineStart { capture: None }),
            NamedKey::CtrlE => DispatchOutcome::Command(KillToLineEnd { capture: None }),
            NamedKey::CtrlR => DispatchOutcome::Command(ConditionalRedo),
        };
    }
    match token.literal() {
        Some(text) => DispatchOutcome::Command(InsertText { text, capture: None }),
        None => DispatchOutcome::Ignored,
    }
}

fn dispatch_replace(token: KeyToken) -> DispatchOutcome {
    use Command::*;
    match token {
        KeyToken::Named(NamedKey::Escape) | KeyToken::Named(NamedKey::CtrlC) => {
            DispatchOutcome::Command(ExitToNormal)
        }
        KeyToken::Named(NamedKey::Space) => {
            DispatchOutcome::Command(ReplaceModeChar { new: " ".to_string(), capture: None })
        }
        KeyToken::Named(NamedKey::Backspace) => DispatchOutcome::Command(ReplaceModeBackspace),
        KeyToken::Named(_) => DispatchOutcome::Ignored,
        KeyToken::Char(c) => DispatchOutcome::Command(ReplaceModeChar { new: c.to_string(), capture: None }),
        KeyToken::Cluster(s) => DispatchOutcome::Command(ReplaceModeChar { new: s, capture: None }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modal_commands::text_object::TextObjectKind;
    use modal_state::Position;

    fn buf(text: &str) -> Buffer {
        Buffer::new(text, 0, 0, Mode::Normal)
    }

    #[test]
    fn single_motion_key_dispatches_immediately() {
        let mut b = buf("hello");
        assert_eq!(dispatch(&mut b, KeyToken::Char('l')), DispatchOutcome::Command(Command::Motion(MotionKind::Right)));
    }

    #[test]
    fn dw_builds_across_two_keys() {
        let mut b = buf("hello world");
        assert_eq!(dispatch(&mut b, KeyToken::Char('d')), DispatchOutcome::NeedMore);
        assert_eq!(
            dispatch(&mut b, KeyToken::Char('w')),
            DispatchOutcome::Command(Command::OperatorSpan {
                span_kind: MotionSpan::Word,
                action: EditAction::Delete,
                capture: None
            })
        );
        assert!(!b.pending.is_active());
    }

    #[test]
    fn diw_resolves_text_object_delete() {
        let mut b = buf("hello world");
        dispatch(&mut b, KeyToken::Char('d'));
        dispatch(&mut b, KeyToken::Char('i'));
        let outcome = dispatch(&mut b, KeyToken::Char('w'));
        assert_eq!(
            outcome,
            DispatchOutcome::Command(Command::TextObject {
                kind: TextObjectKind::Word,
                around: false,
                action: EditAction::Delete,
                capture: None
            })
        );
    }

    #[test]
    fn ci_quote_resolves_change_quoted_object() {
        let mut b = buf("say \"hi\" now");
        dispatch(&mut b, KeyToken::Char('c'));
        dispatch(&mut b, KeyToken::Char('i'));
        let outcome = dispatch(&mut b, KeyToken::Char('"'));
        assert_eq!(
            outcome,
            DispatchOutcome::Command(Command::TextObject {
                kind: TextObjectKind::Quote('"'),
                around: false,
                action: EditAction::Change,
                capture: None
            })
        );
    }

    #[test]
    fn dd_is_a_single_letter_repeat_for_linewise() {
        let mut b = buf("a\nb");
        dispatch(&mut b, KeyToken::Char('d'));
        let outcome = dispatch(&mut b, KeyToken::Char('d'));
        assert_eq!(
            outcome,
            DispatchOutcome::Command(Command::OperatorSpan {
                span_kind: MotionSpan::Line,
                action: EditAction::Delete,
                capture: None
            })
        );
    }

    #[test]
    fn gg_pending_resolves_goto_first_line() {
        let mut b = buf("a\nb\nc");
        assert_eq!(dispatch(&mut b, KeyToken::Char('g')), DispatchOutcome::NeedMore);
        assert_eq!(
            dispatch(&mut b, KeyToken::Char('g')),
            DispatchOutcome::Command(Command::Motion(MotionKind::FirstLine))
        );
    }

    #[test]
    fn replace_operator_consumes_one_printable_cluster() {
        let mut b = buf("hello");
        dispatch(&mut b, KeyToken::Char('r'));
        let outcome = dispatch(&mut b, KeyToken::Char('X'));
        assert_eq!(outcome, DispatchOutcome::Command(Command::ReplaceChar { new: "X".to_string(), capture: None }));
    }

    #[test]
    fn replace_operator_ignores_enter() {
        let mut b = buf("hello");
        dispatch(&mut b, KeyToken::Char('r'));
        assert_eq!(dispatch(&mut b, KeyToken::Named(NamedKey::Enter)), DispatchOutcome::Ignored);
    }

    #[test]
    fn viw_selects_inner_word_directly() {
        let mut b = buf("foo bar baz");
        b.cursor = Position::new(0, 5);
        dispatch(&mut b, KeyToken::Char('v'));
        dispatch(&mut b, KeyToken::Char('i'));
        let outcome = dispatch(&mut b, KeyToken::Char('w'));
        assert_eq!(
            outcome,
            DispatchOutcome::Command(Command::SelectTextObject { kind: TextObjectKind::Word, around: false })
        );
    }

    #[test]
    fn v_then_unrelated_key_falls_back_to_toggle_and_redispatch() {
        let mut b = buf("hello world");
        dispatch(&mut b, KeyToken::Char('v'));
        let outcome = dispatch(&mut b, KeyToken::Char('j'));
        assert_eq!(
            outcome,
            DispatchOutcome::Sequence(vec![Command::EnterVisual, Command::Motion(MotionKind::Down)])
        );
    }

    #[test]
    fn insert_mode_printable_char_becomes_insert_text() {
        let mut b = buf("");
        b.mode = Mode::Insert;
        assert_eq!(
            dispatch(&mut b, KeyToken::Char('x')),
            DispatchOutcome::Command(Command::InsertText { text: "x".to_string(), capture: None })
        );
    }

    #[test]
    fn insert_mode_escape_exits_to_normal() {
        let mut b = buf("hi");
        b.mode = Mode::Insert;
        assert_eq!(dispatch(&mut b, KeyToken::Named(NamedKey::Escape)), DispatchOutcome::Command(Command::ExitToNormal));
    }

    #[test]
    fn visual_delete_acts_immediately_without_pending() {
        let mut b = buf("hello");
        b.mode = Mode::Visual;
        b.visual_anchor = Some(Position::origin());
        assert_eq!(
            dispatch(&mut b, KeyToken::Char('d')),
            DispatchOutcome::Command(Command::VisualOperator { action: EditAction::Delete, capture: None })
        );
    }

    #[test]
    fn submit_key_in_normal_mode() {
        let mut b = buf("hi");
        assert_eq!(dispatch(&mut b, KeyToken::Named(NamedKey::Enter)), DispatchOutcome::Command(Command::Submit));
    }

    #[test]
    fn escape_clears_pending_operator_without_action() {
        let mut b = buf("hello world");
        dispatch(&mut b, KeyToken::Char('d'));
        assert!(b.pending.is_active());
        assert_eq!(dispatch(&mut b, KeyToken::Named(NamedKey::Escape)), DispatchOutcome::Ignored);
        assert!(!b.pending.is_active());
    }
}
