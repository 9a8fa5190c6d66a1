//! Pure, allocation-light helpers that turn loosely authored sheet rows into
//! display fields. Nothing here performs I/O or holds shared state.

pub mod field;
pub mod flag;
pub mod image;
pub mod link;
pub mod source;
pub mod text;

pub use field::*;
pub use flag::*;
pub use image::*;
pub use link::*;
pub use source::*;
pub use text::*;
