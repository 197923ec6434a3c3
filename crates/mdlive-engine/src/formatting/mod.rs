//! Inline style toggling.
//!
//! [`toggle`] turns a selection and an [`InlineMarker`] into the edits that add or remove
//! that style, plus the selection to restore afterwards so the same text stays selected.
//! Applying the edits is left to the caller; [`crate::editing::Session::toggle_style`]
//! does it as a single undo step.

pub mod delimited;
pub mod marker;
pub mod toggle;

pub use marker::{InlineMarker, UnknownMarker};
pub use toggle::{ToggleResult, ToggleStep, toggle, toggle_with_window};
