//! Normalized host key events: either a printable key or one of a closed
//! set of named keys. A printable cluster that spans more than one
//! Unicode scalar (a ZWJ emoji sequence, a combining-mark cluster) gets
//! its own variant rather than being truncated to its first scalar, since
//! this core's editing surface is grapheme-indexed.

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyToken {
    /// A single extended grapheme cluster entered by the user, when that
    /// cluster happens to be exactly one Unicode scalar.
    Char(char),
    /// A printable cluster spanning more than one scalar value.
    Cluster(String),
    Named(NamedKey),
}

impl KeyToken {
    /// The single `char` this token represents, when it is a one-scalar
    /// printable key. Named keys and multi-scalar clusters return `None`.
    pub fn as_char(&self) -> Option<char> {
        match self {
            KeyToken::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// The literal text this key would insert or echo, for any printable
    /// token.
    pub fn literal(&self) -> Option<String> {
        match self {
            KeyToken::Char(c) => Some(c.to_string()),
            KeyToken::Cluster(s) => Some(s.clone()),
            KeyToken::Named(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Escape,
    Enter,
    Backspace,
    Delete,
    Tab,
    Space,
    Up,
    Down,
    Left,
    Right,
    CtrlA,
    CtrlB,
    CtrlE,
    CtrlF,
    CtrlJ,
    CtrlR,
    CtrlC,
    AltEnter,
}
