//! Renders a [`modal_state::Buffer`] into display-ready rows.
//!
//! This crate produces data only — `Vec<StyledRow>` — and never touches a
//! terminal. The host embedding the editor owns the actual drawing; an
//! embeddable core has no business assuming its host even has one.

mod row;
mod style;
mod view;

pub use row::{StyledRow, StyledSpan};
pub use style::Style;
pub use view::view;
