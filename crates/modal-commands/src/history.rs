//! Linear undo/redo stack. Owned as a sibling of `Buffer`, not nested
//! inside it — see the crate doc comment for why.

use modal_state::{Buffer, ExecuteResult};

use crate::command::Command;

/// Scaled up from the ~200-snapshot cap a whole-buffer-clone undo engine
/// would need, since each entry here is a small per-edit object rather
/// than a full buffer snapshot.
pub const HISTORY_CAPACITY: usize = 1000;

/// `index == None` means "at base state": nothing has been applied yet,
/// or every applied command has been undone.
#[derive(Debug, Default)]
pub struct History {
    commands: Vec<Command>,
    index: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.index = None;
    }

    pub fn can_undo(&self) -> bool {
        self.index.is_some()
    }

    pub fn can_redo(&self) -> bool {
        match self.index {
            None => !self.commands.is_empty(),
            Some(i) => i + 1 < self.commands.len(),
        }
    }

    /// Truncates any redoable tail and appends `cmd`, evicting the oldest
    /// entry once `HISTORY_CAPACITY` is exceeded.
    pub fn push(&mut self, cmd: Command) {
        let keep = match self.index {
            None => 0,
            Some(i) => i + 1,
        };
        self.commands.truncate(keep);
        self.commands.push(cmd);
        self.index = Some(self.commands.len() - 1);

        if self.commands.len() > HISTORY_CAPACITY {
            let overflow = self.commands.len() - HISTORY_CAPACITY;
            self.commands.drain(0..overflow);
            self.index = self.index.map(|i| i.saturating_sub(overflow));
        }
    }

    pub fn undo(&mut self, buf: &mut Buffer) -> ExecuteResult {
        let Some(i) = self.index else {
            return ExecuteResult::Skipped;
        };
        let result = self.commands[i].undo(buf);
        self.index = if i == 0 { None } else { Some(i - 1) };
        result
    }

    pub fn redo(&mut self, buf: &mut Buffer) -> ExecuteResult {
        let next = match self.index {
            None if !self.commands.is_empty() => 0,
            Some(i) if i + 1 < self.commands.len() => i + 1,
            _ => return ExecuteResult::PassThrough,
        };
        let result = self.commands[next].execute(buf);
        self.index = Some(next);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Command, EditAction};
    use crate::span::MotionSpan;
    use modal_state::{Mode, Position};

    fn buf(text: &str) -> Buffer {
        Buffer::new(text, 0, 0, Mode::Normal)
    }

    fn insert(text: &str) -> Command {
        Command::InsertText { text: text.to_string(), capture: None }
    }

    #[test]
    fn push_then_undo_then_redo_round_trips() {
        let mut b = buf("hello world");
        b.cursor = Position::new(0, 5);
        let mut h = History::new();
        let mut cmd = insert(" vim");
        cmd.execute(&mut b);
        h.push(cmd);
        assert_eq!(b.value(), "hello vim world");

        h.undo(&mut b);
        assert_eq!(b.value(), "hello world");

        h.redo(&mut b);
        assert_eq!(b.value(), "hello vim world");
    }

    #[test]
    fn push_after_undo_truncates_redo_tail() {
        let mut b = buf("");
        let mut h = History::new();

        let mut a = insert("a");
        a.execute(&mut b);
        h.push(a);

        let mut c = insert("c");
        c.execute(&mut b);
        h.push(c);
        assert_eq!(b.value(), "ac");

        h.undo(&mut b);
        assert_eq!(b.value(), "a");

        let mut b_cmd = insert("b");
        b.cursor = Position::new(0, 1);
        b_cmd.execute(&mut b);
        h.push(b_cmd);
        assert_eq!(b.value(), "ab");

        assert!(!h.can_redo());
    }

    #[test]
    fn undo_at_base_and_redo_at_tip_are_no_ops() {
        let mut b = buf("x");
        let mut h = History::new();
        assert_eq!(h.undo(&mut b), ExecuteResult::Skipped);
        assert_eq!(h.redo(&mut b), ExecuteResult::PassThrough);
    }

    #[test]
    fn yank_is_never_pushed_to_history() {
        let mut b = buf("hello world");
        let mut h = History::new();
        let mut yank = Command::OperatorSpan {
            span_kind: MotionSpan::Word,
            action: EditAction::Yank,
            capture: None,
        };
        yank.execute(&mut b);
        assert!(!yank.is_undoable());
        // A real dispatcher would skip this push entirely; History itself
        // doesn't gate on is_undoable() so this documents the contract
        // the caller (the update loop) is responsible for honoring.
        let _ = &mut h;
    }

    #[test]
    fn capacity_eviction_keeps_undo_depth_bounded() {
        let mut b = buf("");
        let mut h = History::new();
        for i in 0..(HISTORY_CAPACITY + 10) {
            let mut cmd = insert("a");
            b.cursor = Position::new(0, i.min(b.line_grapheme_count(0)));
            cmd.execute(&mut b);
            h.push(cmd);
        }
        assert_eq!(h.commands.len(), HISTORY_CAPACITY);
    }
}
