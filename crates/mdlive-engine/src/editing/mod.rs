/*!
 * # Editing core
 *
 * The host-facing half of the engine: versioned documents, edit batches, selections and
 * the [`Session`] that ties them to the three passes.
 *
 * ## Model
 *
 * - A [`Document`] is one immutable version of the text. The whole document lives in a
 *   single `xi_rope::Rope` and is never regenerated from a model, so saving writes the
 *   exact bytes back.
 * - Every change is a [`ChangeSet`]: a sorted batch of [`TextEdit`]s, all expressed in the
 *   coordinates of the version they are applied to. One batch is one undo step.
 * - [`Selection`] ranges are carried across batches with [`ChangeSet::map_pos`].
 * - A [`Session`] owns the current version, its syntax tree and the selection, and
 *   re-derives decorations from scratch whenever it is asked.
 *
 * ## Usage
 *
 * ```rust
 * use mdlive_engine::editing::{Selection, Session, Transaction};
 * use mdlive_engine::formatting::InlineMarker;
 *
 * let mut session = Session::with_default_parser("say hello", Default::default());
 * session.dispatch(Transaction::select(Selection::single(4, 9))).unwrap();
 * session.toggle_style(InlineMarker::Asterisk).unwrap();
 * assert_eq!(session.document().text(), "say *hello*");
 *
 * session.undo().unwrap();
 * assert_eq!(session.document().text(), "say hello");
 * ```
 */

pub mod document;
pub mod patch;
pub mod selection;
pub mod session;

pub use document::{Document, DocumentError};
pub use patch::{Assoc, ChangeSet, EditError, Patch, TextEdit};
pub use selection::{Selection, SelectionRange};
pub use session::{Session, Transaction};
