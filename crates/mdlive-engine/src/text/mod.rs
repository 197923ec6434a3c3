//! # Position and range utilities
//!
//! Byte-offset arithmetic shared by every pass: spans, line lookup, previews and
//! char-boundary clamping. All offsets in the engine are UTF-8 byte offsets into the
//! document.

pub mod lines;
pub mod slice;
pub mod span;

pub use lines::{Line, lines_with_spans};
pub use slice::{ceil_char_boundary, floor_char_boundary, preview};
pub use span::Span;
