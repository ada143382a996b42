//! Concrete commands, undo history, text objects, and motion-to-selection
//! resolution: everything that turns a resolved key sequence into a
//! mutation of a `modal_state::Buffer`.
//!
//! History is deliberately not a field on `Buffer` — it lives alongside one
//! in `modal-editor::Editor`, as a sibling. Nesting it inside `Buffer` would
//! make `modal-state` depend on the `Command` type defined here, and this
//! crate already depends on `modal-state` for `Buffer` itself.

pub mod command;
pub mod edit;
pub mod history;
pub mod motion;
pub mod span;
pub mod text_object;

pub use command::Command;
pub use history::History;
pub use span::resolve_motion_span;
pub use text_object::{resolve_text_object, TextObjectKind};
