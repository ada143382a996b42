//! The embeddable editor facade: owns a [`Buffer`] and its sibling
//! [`History`], drives key events through `modal-keymap`'s dispatcher and
//! `modal-commands`' `Command::execute`, and hands rendering off to
//! `modal-render`. This crate is the only one in the workspace that knows
//! about all four of `modal-text`/`modal-state`/`modal-commands`/
//! `modal-keymap`/`modal-render` at once — every other crate stays a leaf
//! or a thin layer over its own predecessors.

mod config;

pub use config::{Config, ConfigError, DefaultMode};
pub use modal_commands::Command;
pub use modal_keymap::{DispatchOutcome, KeyToken, NamedKey};
pub use modal_render::{view, StyledRow, StyledSpan, Style};
pub use modal_state::{Mode, Position, SelectionBounds, SelectionKind};

use modal_commands::History;
use modal_state::{Buffer, ExecuteResult};
use tracing::{debug, trace};

type ModeChangeHandler = Box<dyn FnMut(Mode, Mode)>;
type SubmitHandler = Box<dyn FnMut(&str)>;

/// The host-facing editor instance. Construct with [`Editor::new`],
/// drive it with [`Editor::update`], and read it back with
/// [`Editor::view`]/[`Editor::value`]/[`Editor::mode`].
pub struct Editor {
    config: Config,
    buffer: Buffer,
    history: History,
    on_mode_change: Option<ModeChangeHandler>,
    on_submit: Option<SubmitHandler>,
}

impl Editor {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let buffer = Buffer::new("", config.char_limit, config.width, config.default_mode.as_mode());
        Ok(Self {
            config,
            buffer,
            history: History::new(),
            on_mode_change: None,
            on_submit: None,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Feeds one normalized host key event through the dispatcher. Returns
    /// the [`ExecuteResult`] of the last command actually executed
    /// (`Skipped` when the dispatcher produced `NeedMore`/`Ignored` and no
    /// command ran at all).
    pub fn update(&mut self, token: KeyToken) -> ExecuteResult {
        if !self.config.vim_enabled && matches!(token, KeyToken::Named(NamedKey::Escape)) {
            trace!(target: "editor", "escape passes through with vim disabled");
            return ExecuteResult::PassThrough;
        }
        let outcome = modal_keymap::dispatch(&mut self.buffer, token);
        match outcome {
            DispatchOutcome::Command(cmd) => self.run(cmd),
            DispatchOutcome::Sequence(cmds) => {
                let mut last = ExecuteResult::Skipped;
                for cmd in cmds {
                    last = self.run(cmd);
                }
                last
            }
            DispatchOutcome::NeedMore => {
                trace!(target: "editor", "awaiting further keys");
                ExecuteResult::Skipped
            }
            DispatchOutcome::Ignored => ExecuteResult::Skipped,
        }
    }

    /// Runs one already-dispatched [`Command`], handling the
    /// history-needing marker variants (`Undo`/`Redo`/`ConditionalRedo`/
    /// `Submit`) itself, since [`Command::execute`] only returns
    /// `PassThrough` for those — see `modal-commands`' crate doc comment.
    fn run(&mut self, mut cmd: Command) -> ExecuteResult {
        let prior_mode = self.buffer.mode;
        let result = match &cmd {
            Command::Undo => self.history.undo(&mut self.buffer),
            Command::Redo => self.history.redo(&mut self.buffer),
            Command::ConditionalRedo => {
                if self.history.can_redo() {
                    self.history.redo(&mut self.buffer)
                } else {
                    ExecuteResult::PassThrough
                }
            }
            Command::Submit => {
                debug!(target: "editor", "submit");
                let value = self.buffer.value();
                if let Some(cb) = self.on_submit.as_mut() {
                    cb(&value);
                }
                ExecuteResult::Executed
            }
            _ => {
                let result = cmd.execute(&mut self.buffer);
                if matches!(result, ExecuteResult::Executed) && cmd.is_undoable() {
                    self.history.push(cmd);
                }
                result
            }
        };
        if self.buffer.mode != prior_mode {
            debug!(target: "editor", from = ?prior_mode, to = ?self.buffer.mode, "mode changed");
            if let Some(cb) = self.on_mode_change.as_mut() {
                cb(prior_mode, self.buffer.mode);
            }
        }
        result
    }

    pub fn view(&self) -> Vec<StyledRow> {
        modal_render::view(&self.buffer)
    }

    /// Replaces the buffer's content and clears undo history (history is
    /// not owned by `Buffer`, so this crate — not `modal-state` — is
    /// responsible for keeping the two in sync).
    pub fn set_value(&mut self, content: &str) {
        self.buffer.set_value(content);
        self.history.clear();
    }

    pub fn value(&self) -> String {
        self.buffer.value()
    }

    pub fn focus(&mut self) {
        self.buffer.focused = true;
    }

    pub fn blur(&mut self) {
        self.buffer.focused = false;
    }

    pub fn mode(&self) -> Mode {
        self.buffer.mode
    }

    pub fn cursor(&self) -> Position {
        self.buffer.cursor
    }

    pub fn selection(&self) -> Option<SelectionBounds> {
        self.buffer.selection_bounds()
    }

    pub fn on_mode_change(&mut self, f: impl FnMut(Mode, Mode) + 'static) {
        self.on_mode_change = Some(Box::new(f));
    }

    pub fn on_submit(&mut self, f: impl FnMut(&str) + 'static) {
        self.on_submit = Some(Box::new(f));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn editor() -> Editor {
        Editor::new(Config::default()).unwrap()
    }

    #[test]
    fn new_editor_starts_empty_in_normal_mode() {
        let ed = editor();
        assert_eq!(ed.value(), "");
        assert_eq!(ed.mode(), Mode::Normal);
    }

    #[test]
    fn insert_text_then_escape_round_trips_through_update() {
        let mut ed = editor();
        ed.update(KeyToken::Char('i'));
        assert_eq!(ed.mode(), Mode::Insert);
        ed.update(KeyToken::Char('h'));
        ed.update(KeyToken::Char('i'));
        ed.update(KeyToken::Named(NamedKey::Escape));
        assert_eq!(ed.mode(), Mode::Normal);
        assert_eq!(ed.value(), "hi");
    }

    #[test]
    fn undo_after_insert_restores_prior_value() {
        let mut ed = editor();
        ed.update(KeyToken::Char('i'));
        ed.update(KeyToken::Char('x'));
        ed.update(KeyToken::Named(NamedKey::Escape));
        assert_eq!(ed.value(), "x");
        ed.update(KeyToken::Char('u'));
        assert_eq!(ed.value(), "");
    }

    #[test]
    fn set_value_clears_history_so_undo_is_a_no_op() {
        let mut ed = editor();
        ed.update(KeyToken::Char('i'));
        ed.update(KeyToken::Char('x'));
        ed.update(KeyToken::Named(NamedKey::Escape));
        ed.set_value("seed");
        assert_eq!(ed.value(), "seed");
        let result = ed.update(KeyToken::Char('u'));
        assert_eq!(result, ExecuteResult::Skipped);
        assert_eq!(ed.value(), "seed");
    }

    #[test]
    fn escape_passes_through_when_vim_disabled() {
        let mut cfg = Config::default();
        cfg.vim_enabled = false;
        let mut ed = Editor::new(cfg).unwrap();
        let result = ed.update(KeyToken::Named(NamedKey::Escape));
        assert_eq!(result, ExecuteResult::PassThrough);
    }

    #[test]
    fn mode_change_callback_fires_on_entering_insert() {
        let mut ed = editor();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_cb = Rc::clone(&seen);
        ed.on_mode_change(move |from, to| seen_cb.borrow_mut().push((from, to)));
        ed.update(KeyToken::Char('i'));
        assert_eq!(*seen.borrow(), vec![(Mode::Normal, Mode::Insert)]);
    }

    #[test]
    fn submit_callback_fires_with_current_value() {
        let mut ed = editor();
        ed.update(KeyToken::Char('i'));
        ed.update(KeyToken::Char('h'));
        ed.update(KeyToken::Char('i'));
        let captured = Rc::new(RefCell::new(String::new()));
        let captured_cb = Rc::clone(&captured);
        ed.on_submit(move |v| *captured_cb.borrow_mut() = v.to_string());
        ed.update(KeyToken::Named(NamedKey::Enter));
        assert_eq!(*captured.borrow(), "hi");
    }

    #[test]
    fn view_produces_one_row_for_a_short_line() {
        let mut ed = editor();
        ed.update(KeyToken::Char('i'));
        ed.update(KeyToken::Char('h'));
        ed.update(KeyToken::Named(NamedKey::Escape));
        let rows = ed.view();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text(), "h");
    }
}
