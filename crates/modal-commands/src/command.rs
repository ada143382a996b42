//! Concrete commands: a tagged-variant `Command` rather than the
//! cloneable-prototype object hierarchy a reflective language would reach
//! for. The dispatcher's registry stores constructor thunks (plain closures
//! returning a fresh `Command`) so each dispatch gets its own undo capture,
//! matching the prototype-per-invocation contract without reflection.
//!
//! `Undo`/`Redo`/`ConditionalRedo` and `Submit` are listed here as marker
//! variants but are never run through [`Command::execute`] — they need the
//! sibling `History`, which `Buffer` does not have a handle to, so the
//! update loop in `modal-editor` recognizes and handles them directly.

use modal_state::{Buffer, ExecuteResult, Mode, Position, Register, SelectionKind};

use crate::edit;
use crate::motion;
use crate::span::{resolve_motion_span, MotionSpan};
use crate::text_object::{resolve_text_object, TextObjectKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Delete,
    Change,
    Yank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertEntry {
    Before,
    After,
    LineStart,
    LineEnd,
}

/// What [`restore_capture`] must do to reverse a command's effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureOp {
    /// `text` was removed from `[at, end)` (or whole rows `[at.row,
    /// end.row)` when `linewise`); undo reinserts it.
    Removed,
    /// New content was inserted at `at` through `end` (or whole rows
    /// `[at.row, end.row)` when `linewise`); undo deletes it.
    Inserted,
    /// The cluster at `at` was overwritten; `text` is the original, and
    /// `new_len` graphemes of replacement text must be deleted before
    /// `text` is reinserted.
    Replaced { new_len: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Capture {
    op: CaptureOp,
    text: String,
    linewise: bool,
    replaced_sole_line: bool,
    at: Position,
    end: Position,
    prior_cursor: Position,
    prior_mode: Mode,
    prior_anchor: Option<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Motion(MotionKind),
    OperatorSpan { span_kind: MotionSpan, action: EditAction, capture: Option<Capture> },
    TextObject { kind: TextObjectKind, around: bool, action: EditAction, capture: Option<Capture> },
    InsertText { text: String, capture: Option<Capture> },
    SplitLine { capture: Option<Capture> },
    OpenLine { above: bool, capture: Option<Capture> },
    DeleteChar { capture: Option<Capture> },
    ReplaceChar { new: String, capture: Option<Capture> },
    ReplaceModeChar { new: String, capture: Option<Capture> },
    ReplaceModeBackspace,
    InsertBackspace { capture: Option<Capture> },
    InsertDeleteKey { capture: Option<Capture> },
    KillToLineStart { capture: Option<Capture> },
    KillToLineEnd { capture: Option<Capture> },
    PasteAfter { capture: Option<Capture> },
    PasteBefore { capture: Option<Capture> },
    VisualOperator { action: EditAction, capture: Option<Capture> },
    /// `v` followed directly by a text-object suffix (`viw`, `va"`, …):
    /// enters Visual mode with the selection already spanning the
    /// resolved object, rather than requiring a separate motion to extend
    /// it. Pure selection — no content change, so no capture.
    SelectTextObject { kind: TextObjectKind, around: bool },
    EnterInsert(InsertEntry),
    EnterReplace,
    EnterVisual,
    EnterVisualLine,
    ExitToNormal,
    SwapSelectionAnchor,
    Undo,
    Redo,
    ConditionalRedo,
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    Down,
    Up,
    WordForward,
    WordForwardBig,
    WordBackward,
    WordBackwardBig,
    WordEnd,
    WordEndBig,
    LineStart,
    LineEnd,
    FirstNonBlank,
    FirstLine,
    LastLine,
}

impl Command {
    pub fn id(&self) -> &'static str {
        match self {
            Command::Motion(_) => "motion",
            Command::OperatorSpan { action: EditAction::Delete, .. } => "delete.span",
            Command::OperatorSpan { action: EditAction::Change, .. } => "change.span",
            Command::OperatorSpan { action: EditAction::Yank, .. } => "yank.span",
            Command::TextObject { action: EditAction::Delete, .. } => "delete.object",
            Command::TextObject { action: EditAction::Change, .. } => "change.object",
            Command::TextObject { action: EditAction::Yank, .. } => "yank.object",
            Command::InsertText { .. } => "insert.text",
            Command::SplitLine { .. } => "insert.split_line",
            Command::OpenLine { .. } => "insert.open_line",
            Command::DeleteChar { .. } => "delete.char",
            Command::ReplaceChar { .. } => "replace.char",
            Command::ReplaceModeChar { .. } => "replace.mode_char",
            Command::ReplaceModeBackspace => "replace.mode_backspace",
            Command::InsertBackspace { .. } => "insert.backspace",
            Command::InsertDeleteKey { .. } => "insert.delete_key",
            Command::KillToLineStart { .. } => "insert.kill_to_line_start",
            Command::KillToLineEnd { .. } => "insert.kill_to_line_end",
            Command::PasteAfter { .. } => "paste.after",
            Command::PasteBefore { .. } => "paste.before",
            Command::VisualOperator { .. } => "visual.operator",
            Command::SelectTextObject { .. } => "visual.select_text_object",
            Command::EnterInsert(_) => "mode.enter_insert",
            Command::EnterReplace => "mode.enter_replace",
            Command::EnterVisual => "mode.enter_visual",
            Command::EnterVisualLine => "mode.enter_visual_line",
            Command::ExitToNormal => "mode.exit_to_normal",
            Command::SwapSelectionAnchor => "visual.swap_anchor",
            Command::Undo => "history.undo",
            Command::Redo => "history.redo",
            Command::ConditionalRedo => "history.conditional_redo",
            Command::Submit => "meta.submit",
        }
    }

    pub fn is_undoable(&self) -> bool {
        match self {
            Command::OperatorSpan { action, .. } | Command::TextObject { action, .. } => {
                *action != EditAction::Yank
            }
            Command::InsertText { .. }
            | Command::SplitLine { .. }
            | Command::OpenLine { .. }
            | Command::DeleteChar { .. }
            | Command::ReplaceChar { .. }
            | Command::ReplaceModeChar { .. }
            | Command::InsertBackspace { .. }
            | Command::InsertDeleteKey { .. }
            | Command::KillToLineStart { .. }
            | Command::KillToLineEnd { .. }
            | Command::PasteAfter { .. }
            | Command::PasteBefore { .. } => true,
            Command::VisualOperator { action, .. } => *action != EditAction::Yank,
            _ => false,
        }
    }

    pub fn changes_content(&self) -> bool {
        self.is_undoable()
    }

    pub fn is_mode_change(&self) -> bool {
        matches!(
            self,
            Command::OpenLine { .. }
                | Command::EnterInsert(_)
                | Command::EnterReplace
                | Command::EnterVisual
                | Command::EnterVisualLine
                | Command::ExitToNormal
                | Command::SelectTextObject { .. }
        ) || matches!(self, Command::OperatorSpan { action: EditAction::Change, .. })
            || matches!(self, Command::TextObject { action: EditAction::Change, .. })
            || matches!(self, Command::VisualOperator { action: EditAction::Change, .. })
    }

    pub fn is_submit(&self) -> bool {
        matches!(self, Command::Submit)
    }

    pub fn execute(&mut self, buf: &mut Buffer) -> ExecuteResult {
        match self {
            Command::Motion(kind) => {
                exec_motion(*kind, buf);
                ExecuteResult::Executed
            }
            Command::OperatorSpan { span_kind, action, capture } => {
                exec_operator_span(buf, *span_kind, *action, capture)
            }
            Command::TextObject { kind, around, action, capture } => {
                exec_text_object(buf, *kind, *around, *action, capture)
            }
            Command::InsertText { text, capture } => exec_insert_text(buf, text, capture),
            Command::SplitLine { capture } => exec_split_line(buf, capture),
            Command::OpenLine { above, capture } => exec_open_line(buf, *above, capture),
            Command::DeleteChar { capture } => exec_delete_char(buf, capture),
            Command::ReplaceChar { new, capture } => exec_replace_char(buf, new, capture),
            Command::ReplaceModeChar { new, capture } => exec_replace_mode_char(buf, new, capture),
            Command::ReplaceModeBackspace => exec_replace_mode_backspace(buf),
            Command::InsertBackspace { capture } => exec_insert_backspace(buf, capture),
            Command::InsertDeleteKey { capture } => exec_insert_delete_key(buf, capture),
            Command::KillToLineStart { capture } => exec_kill_to_line_start(buf, capture),
            Command::KillToLineEnd { capture } => exec_kill_to_line_end(buf, capture),
            Command::PasteAfter { capture } => exec_paste(buf, true, capture),
            Command::PasteBefore { capture } => exec_paste(buf, false, capture),
            Command::VisualOperator { action, capture } => exec_visual_operator(buf, *action, capture),
            Command::SelectTextObject { kind, around } => exec_select_text_object(buf, *kind, *around),
            Command::EnterInsert(entry) => exec_enter_insert(buf, *entry),
            Command::EnterReplace => {
                buf.mode = Mode::Replace;
                ExecuteResult::Executed
            }
            Command::EnterVisual => {
                exec_toggle_visual(buf, false);
                ExecuteResult::Executed
            }
            Command::EnterVisualLine => {
                exec_toggle_visual(buf, true);
                ExecuteResult::Executed
            }
            Command::ExitToNormal => {
                exec_exit_to_normal(buf);
                ExecuteResult::Executed
            }
            Command::SwapSelectionAnchor => {
                if let Some(anchor) = buf.visual_anchor {
                    buf.visual_anchor = Some(buf.cursor);
                    buf.cursor = anchor;
                    buf.clamp_cursor();
                }
                ExecuteResult::Executed
            }
            Command::Undo | Command::Redo | Command::ConditionalRedo | Command::Submit => {
                ExecuteResult::PassThrough
            }
        }
    }

    pub fn undo(&mut self, buf: &mut Buffer) -> ExecuteResult {
        let capture = match self {
            Command::OperatorSpan { capture, .. }
            | Command::TextObject { capture, .. }
            | Command::InsertText { capture, .. }
            | Command::SplitLine { capture, .. }
            | Command::OpenLine { capture, .. }
            | Command::DeleteChar { capture, .. }
            | Command::ReplaceChar { capture, .. }
            | Command::ReplaceModeChar { capture, .. }
            | Command::InsertBackspace { capture, .. }
            | Command::InsertDeleteKey { capture, .. }
            | Command::KillToLineStart { capture, .. }
            | Command::KillToLineEnd { capture, .. }
            | Command::PasteAfter { capture, .. }
            | Command::PasteBefore { capture, .. }
            | Command::VisualOperator { capture, .. } => capture.take(),
            _ => None,
        };
        let Some(cap) = capture else {
            return ExecuteResult::Skipped;
        };
        restore_capture(buf, &cap);
        ExecuteResult::Executed
    }
}

fn restore_capture(buf: &mut Buffer, cap: &Capture) {
    match cap.op {
        CaptureOp::Removed => {
            if cap.linewise {
                if cap.replaced_sole_line {
                    let segments: Vec<&str> = cap.text.split('\n').collect();
                    buf.set_line(0, segments[0].to_string());
                    for (i, seg) in segments[1..].iter().enumerate() {
                        buf.insert_line(i + 1, seg.to_string());
                    }
                } else {
                    edit::insert_linewise(buf, cap.at.row, &cap.text);
                }
            } else if !cap.text.is_empty() {
                edit::insert_charwise(buf, cap.at, &cap.text);
            }
        }
        CaptureOp::Inserted => {
            if cap.linewise {
                edit::delete_linewise(buf, cap.at.row, cap.end.row);
            } else {
                edit::delete_charwise(buf, cap.at, cap.end);
            }
        }
        CaptureOp::Replaced { new_len } => {
            let del_end = Position::new(cap.at.row, cap.at.col + new_len);
            edit::delete_charwise(buf, cap.at, del_end);
            edit::insert_charwise(buf, cap.at, &cap.text);
        }
    }
    buf.cursor = cap.prior_cursor;
    buf.mode = cap.prior_mode;
    buf.visual_anchor = cap.prior_anchor;
    buf.clamp_cursor();
}

fn exec_motion(kind: MotionKind, buf: &mut Buffer) {
    use motion::VerticalDirection;
    let pos = buf.cursor;
    let new_pos = match kind {
        MotionKind::Left => motion::left(buf, pos),
        MotionKind::Right => motion::right(buf, pos),
        MotionKind::Down => motion::vertical(buf, pos, buf.preferred_col, VerticalDirection::Down),
        MotionKind::Up => motion::vertical(buf, pos, buf.preferred_col, VerticalDirection::Up),
        MotionKind::WordForward => motion::word_forward(buf, pos, false),
        MotionKind::WordForwardBig => motion::word_forward(buf, pos, true),
        MotionKind::WordBackward => motion::word_backward(buf, pos, false),
        MotionKind::WordBackwardBig => motion::word_backward(buf, pos, true),
        MotionKind::WordEnd => motion::word_end(buf, pos, false),
        MotionKind::WordEndBig => motion::word_end(buf, pos, true),
        MotionKind::LineStart => motion::line_start(pos),
        MotionKind::LineEnd => motion::line_end(buf, pos.row),
        MotionKind::FirstNonBlank => motion::first_non_blank(buf, pos.row),
        MotionKind::FirstLine => motion::goto_first_line(buf),
        MotionKind::LastLine => motion::goto_last_line(buf),
    };
    buf.cursor = new_pos;
    if !matches!(kind, MotionKind::Down | MotionKind::Up) {
        buf.preferred_col = new_pos.col;
    }
}

fn span_text(buf: &Buffer, span: &crate::span::OperatorSpan) -> String {
    if span.linewise {
        edit::read_linewise(buf, span.start.row, span.end.row)
    } else {
        edit::read_charwise(buf, span.start, span.end)
    }
}

fn exec_operator_span(
    buf: &mut Buffer,
    span_kind: MotionSpan,
    action: EditAction,
    capture: &mut Option<Capture>,
) -> ExecuteResult {
    let Some(span) = resolve_motion_span(buf, buf.cursor, span_kind) else {
        return ExecuteResult::Skipped;
    };
    if action == EditAction::Yank {
        buf.register = Register { text: span_text(buf, &span), linewise: span.linewise };
        return ExecuteResult::Executed;
    }
    let prior_cursor = buf.cursor;
    let prior_mode = buf.mode;
    let (removed, replaced_sole_line) = if span.linewise {
        edit::delete_linewise(buf, span.start.row, span.end.row)
    } else {
        (edit::delete_charwise(buf, span.start, span.end), false)
    };
    buf.register = Register { text: removed.clone(), linewise: span.linewise };
    *capture = Some(Capture {
        op: CaptureOp::Removed,
        text: removed,
        linewise: span.linewise,
        replaced_sole_line,
        at: span.start,
        end: span.end,
        prior_cursor,
        prior_mode,
        prior_anchor: buf.visual_anchor,
    });
    buf.cursor = if span.linewise {
        Position::new(span.start.row.min(buf.line_count() - 1), 0)
    } else {
        span.start
    };
    if action == EditAction::Change {
        buf.mode = Mode::Insert;
    }
    buf.clamp_cursor();
    ExecuteResult::Executed
}

fn exec_text_object(
    buf: &mut Buffer,
    kind: TextObjectKind,
    around: bool,
    action: EditAction,
    capture: &mut Option<Capture>,
) -> ExecuteResult {
    let result = resolve_text_object(buf, buf.cursor, kind, around);
    if !result.found {
        return ExecuteResult::Skipped;
    }
    let text = edit::read_charwise(buf, result.start, result.end);
    if action == EditAction::Yank {
        buf.register = Register { text, linewise: false };
        return ExecuteResult::Executed;
    }
    let prior_cursor = buf.cursor;
    let prior_mode = buf.mode;
    let removed = edit::delete_charwise(buf, result.start, result.end);
    buf.register = Register { text: removed.clone(), linewise: false };
    *capture = Some(Capture {
        op: CaptureOp::Removed,
        text: removed,
        linewise: false,
        replaced_sole_line: false,
        at: result.start,
        end: result.end,
        prior_cursor,
        prior_mode,
        prior_anchor: buf.visual_anchor,
    });
    buf.cursor = result.start;
    if action == EditAction::Change {
        buf.mode = Mode::Insert;
    }
    buf.clamp_cursor();
    ExecuteResult::Executed
}

fn exec_insert_text(buf: &mut Buffer, text: &str, capture: &mut Option<Capture>) -> ExecuteResult {
    let additional = modal_text::grapheme::count(text);
    if buf.would_exceed_char_limit(additional) {
        return ExecuteResult::Skipped;
    }
    let prior_cursor = buf.cursor;
    let prior_mode = buf.mode;
    let end = edit::insert_charwise(buf, buf.cursor, text);
    *capture = Some(Capture {
        op: CaptureOp::Inserted,
        text: text.to_string(),
        linewise: false,
        replaced_sole_line: false,
        at: prior_cursor,
        end,
        prior_cursor,
        prior_mode,
        prior_anchor: buf.visual_anchor,
    });
    buf.cursor = end;
    buf.preferred_col = end.col;
    ExecuteResult::Executed
}

fn exec_split_line(buf: &mut Buffer, capture: &mut Option<Capture>) -> ExecuteResult {
    let prior_cursor = buf.cursor;
    let prior_mode = buf.mode;
    edit::insert_charwise(buf, buf.cursor, "\n");
    let new_cursor = Position::new(prior_cursor.row + 1, 0);
    *capture = Some(Capture {
        op: CaptureOp::Inserted,
        text: "\n".to_string(),
        linewise: false,
        replaced_sole_line: false,
        at: prior_cursor,
        end: new_cursor,
        prior_cursor,
        prior_mode,
        prior_anchor: buf.visual_anchor,
    });
    buf.cursor = new_cursor;
    buf.preferred_col = 0;
    ExecuteResult::Executed
}

fn exec_open_line(buf: &mut Buffer, above: bool, capture: &mut Option<Capture>) -> ExecuteResult {
    let prior_cursor = buf.cursor;
    let prior_mode = buf.mode;
    let row = if above { prior_cursor.row } else { prior_cursor.row + 1 };
    buf.insert_line(row, String::new());
    *capture = Some(Capture {
        op: CaptureOp::Inserted,
        text: String::new(),
        linewise: true,
        replaced_sole_line: false,
        at: Position::new(row, 0),
        end: Position::new(row + 1, 0),
        prior_cursor,
        prior_mode,
        prior_anchor: buf.visual_anchor,
    });
    buf.mode = Mode::Insert;
    buf.cursor = Position::new(row, 0);
    buf.preferred_col = 0;
    ExecuteResult::Executed
}

fn exec_delete_char(buf: &mut Buffer, capture: &mut Option<Capture>) -> ExecuteResult {
    let pos = buf.cursor;
    if buf.line_grapheme_count(pos.row) == 0 {
        return ExecuteResult::Skipped;
    }
    let prior_mode = buf.mode;
    let end = Position::new(pos.row, pos.col + 1);
    let removed = edit::delete_charwise(buf, pos, end);
    buf.register = Register { text: removed.clone(), linewise: false };
    *capture = Some(Capture {
        op: CaptureOp::Removed,
        text: removed,
        linewise: false,
        replaced_sole_line: false,
        at: pos,
        end,
        prior_cursor: pos,
        prior_mode,
        prior_anchor: buf.visual_anchor,
    });
    buf.clamp_cursor();
    ExecuteResult::Executed
}

fn exec_replace_char(buf: &mut Buffer, new: &str, capture: &mut Option<Capture>) -> ExecuteResult {
    let pos = buf.cursor;
    if buf.line_grapheme_count(pos.row) == 0 {
        return ExecuteResult::Skipped;
    }
    let line = buf.line(pos.row).unwrap_or("").to_string();
    let old = modal_text::grapheme::at(&line, pos.col).to_string();
    edit::delete_charwise(buf, pos, Position::new(pos.row, pos.col + 1));
    edit::insert_charwise(buf, pos, new);
    *capture = Some(Capture {
        op: CaptureOp::Replaced { new_len: modal_text::grapheme::count(new) },
        text: old,
        linewise: false,
        replaced_sole_line: false,
        at: pos,
        end: pos,
        prior_cursor: pos,
        prior_mode: buf.mode,
        prior_anchor: buf.visual_anchor,
    });
    buf.cursor = pos;
    ExecuteResult::Executed
}

fn exec_replace_mode_char(buf: &mut Buffer, new: &str, capture: &mut Option<Capture>) -> ExecuteResult {
    let pos = buf.cursor;
    let len = buf.line_grapheme_count(pos.row);
    let prior_cursor = pos;
    if pos.col >= len {
        let end = edit::insert_charwise(buf, pos, new);
        *capture = Some(Capture {
            op: CaptureOp::Inserted,
            text: new.to_string(),
            linewise: false,
            replaced_sole_line: false,
            at: pos,
            end,
            prior_cursor,
            prior_mode: buf.mode,
            prior_anchor: buf.visual_anchor,
        });
        buf.cursor = end;
    } else {
        let line = buf.line(pos.row).unwrap_or("").to_string();
        let old = modal_text::grapheme::at(&line, pos.col).to_string();
        edit::delete_charwise(buf, pos, Position::new(pos.row, pos.col + 1));
        edit::insert_charwise(buf, pos, new);
        *capture = Some(Capture {
            op: CaptureOp::Replaced { new_len: modal_text::grapheme::count(new) },
            text: old,
            linewise: false,
            replaced_sole_line: false,
            at: pos,
            end: pos,
            prior_cursor,
            prior_mode: buf.mode,
            prior_anchor: buf.visual_anchor,
        });
        buf.cursor = Position::new(pos.row, pos.col + modal_text::grapheme::count(new));
    }
    ExecuteResult::Executed
}

/// Per the resolved open question: no content change, pure cursor-back-one
/// while remaining in Replace mode.
fn exec_replace_mode_backspace(buf: &mut Buffer) -> ExecuteResult {
    if buf.cursor.col == 0 {
        return ExecuteResult::Skipped;
    }
    buf.cursor.col -= 1;
    ExecuteResult::Executed
}

fn exec_insert_backspace(buf: &mut Buffer, capture: &mut Option<Capture>) -> ExecuteResult {
    let pos = buf.cursor;
    if pos.col == 0 {
        if pos.row == 0 {
            return ExecuteResult::Skipped;
        }
        let prior_cursor = pos;
        let join_col = buf.line_grapheme_count(pos.row - 1);
        let at = Position::new(pos.row - 1, join_col);
        let end = Position::new(pos.row, 0);
        edit::delete_charwise(buf, at, end);
        *capture = Some(Capture {
            op: CaptureOp::Removed,
            text: "\n".to_string(),
            linewise: false,
            replaced_sole_line: false,
            at,
            end,
            prior_cursor,
            prior_mode: buf.mode,
            prior_anchor: buf.visual_anchor,
        });
        buf.cursor = at;
        return ExecuteResult::Executed;
    }
    let prior_cursor = pos;
    let at = Position::new(pos.row, pos.col - 1);
    let line = buf.line(pos.row).unwrap_or("").to_string();
    let removed_char = modal_text::grapheme::at(&line, at.col).to_string();
    edit::delete_charwise(buf, at, pos);
    *capture = Some(Capture {
        op: CaptureOp::Removed,
        text: removed_char,
        linewise: false,
        replaced_sole_line: false,
        at,
        end: pos,
        prior_cursor,
        prior_mode: buf.mode,
        prior_anchor: buf.visual_anchor,
    });
    buf.cursor = at;
    ExecuteResult::Executed
}

fn exec_insert_delete_key(buf: &mut Buffer, capture: &mut Option<Capture>) -> ExecuteResult {
    let pos = buf.cursor;
    let len = buf.line_grapheme_count(pos.row);
    if pos.col >= len {
        if pos.row + 1 >= buf.line_count() {
            return ExecuteResult::Skipped;
        }
        let end = Position::new(pos.row + 1, 0);
        edit::delete_charwise(buf, pos, end);
        *capture = Some(Capture {
            op: CaptureOp::Removed,
            text: "\n".to_string(),
            linewise: false,
            replaced_sole_line: false,
            at: pos,
            end,
            prior_cursor: pos,
            prior_mode: buf.mode,
            prior_anchor: buf.visual_anchor,
        });
        return ExecuteResult::Executed;
    }
    let line = buf.line(pos.row).unwrap_or("").to_string();
    let removed_char = modal_text::grapheme::at(&line, pos.col).to_string();
    let end = Position::new(pos.row, pos.col + 1);
    edit::delete_charwise(buf, pos, end);
    *capture = Some(Capture {
        op: CaptureOp::Removed,
        text: removed_char,
        linewise: false,
        replaced_sole_line: false,
        at: pos,
        end,
        prior_cursor: pos,
        prior_mode: buf.mode,
        prior_anchor: buf.visual_anchor,
    });
    ExecuteResult::Executed
}

fn exec_kill_to_line_start(buf: &mut Buffer, capture: &mut Option<Capture>) -> ExecuteResult {
    let pos = buf.cursor;
    if pos.col == 0 {
        return ExecuteResult::Skipped;
    }
    let prior_cursor = pos;
    let start = Position::new(pos.row, 0);
    let removed = edit::delete_charwise(buf, start, pos);
    *capture = Some(Capture {
        op: CaptureOp::Removed,
        text: removed,
        linewise: false,
        replaced_sole_line: false,
        at: start,
        end: pos,
        prior_cursor,
        prior_mode: buf.mode,
        prior_anchor: buf.visual_anchor,
    });
    buf.cursor = start;
    ExecuteResult::Executed
}

fn exec_kill_to_line_end(buf: &mut Buffer, capture: &mut Option<Capture>) -> ExecuteResult {
    let pos = buf.cursor;
    let len = buf.line_grapheme_count(pos.row);
    if pos.col >= len {
        return ExecuteResult::Skipped;
    }
    let prior_cursor = pos;
    let end = Position::new(pos.row, len);
    let removed = edit::delete_charwise(buf, pos, end);
    *capture = Some(Capture {
        op: CaptureOp::Removed,
        text: removed,
        linewise: false,
        replaced_sole_line: false,
        at: pos,
        end,
        prior_cursor,
        prior_mode: buf.mode,
        prior_anchor: buf.visual_anchor,
    });
    ExecuteResult::Executed
}

fn exec_paste(buf: &mut Buffer, after: bool, capture: &mut Option<Capture>) -> ExecuteResult {
    if buf.register.is_empty() {
        return ExecuteResult::Skipped;
    }
    let prior_cursor = buf.cursor;
    let prior_mode = buf.mode;
    let text = buf.register.text.clone();
    let linewise = buf.register.linewise;
    if linewise {
        let row = if after { prior_cursor.row + 1 } else { prior_cursor.row };
        edit::insert_linewise(buf, row, &text);
        let inserted_rows = text.split('\n').count();
        *capture = Some(Capture {
            op: CaptureOp::Inserted,
            text,
            linewise: true,
            replaced_sole_line: false,
            at: Position::new(row, 0),
            end: Position::new(row + inserted_rows, 0),
            prior_cursor,
            prior_mode,
            prior_anchor: buf.visual_anchor,
        });
        buf.cursor = motion::first_non_blank(buf, row);
    } else {
        let at = if after {
            Position::new(prior_cursor.row, (prior_cursor.col + 1).min(buf.line_grapheme_count(prior_cursor.row)))
        } else {
            prior_cursor
        };
        let end = edit::insert_charwise(buf, at, &text);
        *capture = Some(Capture {
            op: CaptureOp::Inserted,
            text,
            linewise: false,
            replaced_sole_line: false,
            at,
            end,
            prior_cursor,
            prior_mode,
            prior_anchor: buf.visual_anchor,
        });
        buf.cursor = Position::new(end.row, end.col.saturating_sub(1));
    }
    buf.clamp_cursor();
    ExecuteResult::Executed
}

fn exec_select_text_object(buf: &mut Buffer, kind: TextObjectKind, around: bool) -> ExecuteResult {
    let result = resolve_text_object(buf, buf.cursor, kind, around);
    if !result.found {
        return ExecuteResult::Skipped;
    }
    if !buf.mode.is_visual() {
        buf.mode = Mode::Visual;
    }
    buf.visual_anchor = Some(result.start);
    buf.cursor = Position::new(result.end.row, result.end.col.saturating_sub(1));
    buf.clamp_cursor();
    ExecuteResult::Executed
}

fn exec_visual_operator(buf: &mut Buffer, action: EditAction, capture: &mut Option<Capture>) -> ExecuteResult {
    let Some(bounds) = buf.selection_bounds() else {
        return ExecuteResult::Skipped;
    };
    let linewise = bounds.kind == SelectionKind::Linewise;
    let Some(text) = buf.selected_text() else {
        return ExecuteResult::Skipped;
    };
    if action == EditAction::Yank {
        buf.register = Register { text, linewise };
        buf.mode = Mode::Normal;
        buf.visual_anchor = None;
        buf.clamp_cursor();
        return ExecuteResult::Executed;
    }
    let prior_cursor = buf.cursor;
    let prior_mode = buf.mode;
    let prior_anchor = buf.visual_anchor;
    let (removed, replaced_sole_line, delete_start, delete_end) = if linewise {
        let end_row = bounds.end.row + 1;
        let (removed, replaced) = edit::delete_linewise(buf, bounds.start.row, end_row);
        (removed, replaced, Position::new(bounds.start.row, 0), Position::new(end_row, 0))
    } else {
        let end = Position::new(bounds.end.row, bounds.end.col + 1);
        let removed = edit::delete_charwise(buf, bounds.start, end);
        (removed, false, bounds.start, end)
    };
    buf.register = Register { text: removed.clone(), linewise };
    *capture = Some(Capture {
        op: CaptureOp::Removed,
        text: removed,
        linewise,
        replaced_sole_line,
        at: delete_start,
        end: delete_end,
        prior_cursor,
        prior_mode,
        prior_anchor,
    });
    buf.mode = if action == EditAction::Change { Mode::Insert } else { Mode::Normal };
    buf.visual_anchor = None;
    buf.cursor = if linewise {
        Position::new(delete_start.row.min(buf.line_count() - 1), 0)
    } else {
        delete_start
    };
    buf.clamp_cursor();
    ExecuteResult::Executed
}

fn exec_enter_insert(buf: &mut Buffer, entry: InsertEntry) -> ExecuteResult {
    match entry {
        InsertEntry::Before => {}
        InsertEntry::After => buf.cursor = motion::right_for_insert(buf, buf.cursor),
        InsertEntry::LineStart => buf.cursor = motion::first_non_blank(buf, buf.cursor.row),
        InsertEntry::LineEnd => buf.cursor = Position::new(buf.cursor.row, buf.line_grapheme_count(buf.cursor.row)),
    }
    buf.mode = Mode::Insert;
    buf.clamp_cursor();
    ExecuteResult::Executed
}

fn exec_toggle_visual(buf: &mut Buffer, linewise: bool) {
    let target_mode = if linewise { Mode::VisualLine } else { Mode::Visual };
    if buf.mode == target_mode {
        buf.mode = Mode::Normal;
        buf.visual_anchor = None;
        return;
    }
    if buf.visual_anchor.is_none() {
        buf.visual_anchor = Some(buf.cursor);
    }
    buf.mode = target_mode;
}

fn exec_exit_to_normal(buf: &mut Buffer) {
    if matches!(buf.mode, Mode::Insert | Mode::Replace) && buf.cursor.col > 0 {
        buf.cursor.col -= 1;
    }
    buf.mode = Mode::Normal;
    buf.visual_anchor = None;
    buf.clamp_cursor();
}
