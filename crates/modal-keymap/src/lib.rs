//! The pending-command builder and dispatcher: turns normalized host key
//! tokens into the `modal_commands::Command`s that mutate a buffer.
//!
//! Single-key bindings resolve immediately; an operator key (`d`, `c`,
//! `y`, `g`, `r`, `v`) opens an operator-pending state that buffers
//! further keys and resolves them against a trie (see [`trie`]) of
//! registered motion and text-object suffixes.

pub mod dispatch;
pub mod key_token;
pub mod suffix;
pub mod trie;

pub use dispatch::{dispatch, DispatchOutcome};
pub use key_token::{KeyToken, NamedKey};
