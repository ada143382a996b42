//! Extended-grapheme-cluster segmentation and display-width primitives.
//!
//! Every column position elsewhere in the editor is a grapheme index, not a
//! byte offset or scalar-value index. This crate is the only place that
//! crosses between bytes and graphemes; callers above this crate never see
//! a byte offset except as an opaque return value from [`grapheme::nth`] or
//! [`grapheme::grapheme_to_byte`].

pub mod grapheme;
pub mod width;
pub mod wrap;

pub use grapheme::GraphemeClass;
pub use width::{display_width, string_display_width, truncate_to_display_width};
pub use wrap::{segment_for_col, wrap_line};
