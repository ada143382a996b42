//! Construction-time configuration. The host builds this directly — there
//! is no file format or loader here; that belongs to the application
//! shell this core is embedded in, not the core itself.

use modal_state::Mode;

/// The mode a fresh [`crate::Editor`] (or one that just received
/// [`crate::Editor::set_value`]) starts in. Only `Normal` and `Insert` are
/// offered: starting in Visual/VisualLine/Replace has no sensible "just
/// opened" meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultMode {
    Normal,
    Insert,
}

impl DefaultMode {
    pub(crate) fn as_mode(self) -> Mode {
        match self {
            DefaultMode::Normal => Mode::Normal,
            DefaultMode::Insert => Mode::Insert,
        }
    }
}

impl Default for DefaultMode {
    fn default() -> Self {
        DefaultMode::Normal
    }
}

/// Construction-time settings for an [`crate::Editor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// When `false`, Normal-mode commands are unreachable and `<escape>`
    /// passes through to the host instead of leaving Insert mode.
    pub vim_enabled: bool,
    pub default_mode: DefaultMode,
    /// `0` means unlimited.
    pub char_limit: usize,
    /// `0` means no soft-wrap.
    pub width: usize,
    pub placeholder: String,
    pub prompt_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vim_enabled: true,
            default_mode: DefaultMode::default(),
            char_limit: 0,
            width: 0,
            placeholder: String::new(),
            prompt_prefix: String::new(),
        }
    }
}

/// Returned by [`crate::Editor::new`]. Reserved for future validation: no
/// field combination in the current [`Config`] shape is actually
/// self-contradictory, but every other constructor in this corpus is
/// fallible at its crate boundary and a host should not have to
/// special-case this one.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
