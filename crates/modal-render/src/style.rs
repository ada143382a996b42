//! Per-cluster style attributes: a bitflag attached to each
//! [`crate::row::StyledSpan`] so a run of clusters can carry more than one
//! overlay (cursor, selection) at once.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Style: u8 {
        const CURSOR = 0b0000_0001;
        const SELECTION = 0b0000_0010;
    }
}
