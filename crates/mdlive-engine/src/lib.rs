//! Markdown live-preview engine.
//!
//! Three passes over one immutable document snapshot:
//!
//! - [`build`] turns the syntax tree and the selection into a sorted list of
//!   [`decorations::DecorationItem`]s that hide syntax outside the selection.
//! - [`renumber`] fixes ordered list numerals after an edit.
//! - [`toggle`] adds or removes an inline style marker around a selection.
//!
//! [`editing::Session`] wires them to a document, a parser and an undo history.

pub mod decorations;
pub mod editing;
pub mod formatting;
pub mod lists;
pub mod options;
pub mod syntax;
pub mod text;

// Re-export key types for easier usage
pub use decorations::{DecorationItem, DecorationKind, Side, build, build_with_options};
pub use editing::{ChangeSet, Document, Selection, SelectionRange, Session, TextEdit, Transaction};
pub use formatting::{InlineMarker, ToggleResult, toggle};
pub use lists::renumber;
pub use options::PreviewOptions;
pub use syntax::{MarkdownParser, PulldownParser, SyntaxTree};
pub use text::Span;
