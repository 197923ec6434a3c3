use serde::Serialize;

use crate::editing::Document;
use crate::text::Span;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("edit {from}..{to} is out of bounds (document length: {len})")]
    OutOfBounds { from: usize, to: usize, len: usize },
    #[error("edit {from}..{to} has its start after its end")]
    Inverted { from: usize, to: usize },
    #[error("edits {first:?} and {second:?} overlap")]
    Overlapping { first: Span, second: Span },
    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },
}

/// Replace `[from, to)` with `insert`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub from: usize,
    pub to: usize,
    pub insert: String,
}

impl TextEdit {
    pub fn replace(from: usize, to: usize, insert: impl Into<String>) -> Self {
        Self {
            from,
            to,
            insert: insert.into(),
        }
    }

    pub fn insert(at: usize, insert: impl Into<String>) -> Self {
        Self::replace(at, at, insert)
    }

    pub fn delete(from: usize, to: usize) -> Self {
        Self::replace(from, to, "")
    }

    pub fn span(&self) -> Span {
        Span::new(self.from, self.to)
    }

    /// Change in document length caused by this edit.
    fn delta(&self) -> isize {
        self.insert.len() as isize - (self.to - self.from) as isize
    }
}

/// Which side of an insertion point a mapped position sticks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    /// Stay before text inserted exactly at the position.
    Before,
    /// Move past text inserted exactly at the position.
    After,
}

/// A batch of non-overlapping edits, all expressed in the coordinates of the same
/// document version and applied together as one undo step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    edits: Vec<TextEdit>,
}

impl ChangeSet {
    /// Sort the edits by position and reject overlaps.
    ///
    /// Several insertions at the same offset are allowed and keep their given order.
    pub fn new(mut edits: Vec<TextEdit>) -> Result<Self, EditError> {
        for edit in &edits {
            if edit.from > edit.to {
                return Err(EditError::Inverted {
                    from: edit.from,
                    to: edit.to,
                });
            }
        }
        edits.sort_by_key(|e| (e.from, e.to));
        for pair in edits.windows(2) {
            if pair[0].to > pair[1].from {
                return Err(EditError::Overlapping {
                    first: pair[0].span(),
                    second: pair[1].span(),
                });
            }
        }
        Ok(Self { edits })
    }

    pub fn single(edit: TextEdit) -> Self {
        Self { edits: vec![edit] }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn edits(&self) -> &[TextEdit] {
        &self.edits
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Check the batch against the document it is about to be applied to.
    pub fn validate(&self, doc: &Document) -> Result<(), EditError> {
        let len = doc.len();
        for edit in &self.edits {
            if edit.to > len {
                return Err(EditError::OutOfBounds {
                    from: edit.from,
                    to: edit.to,
                    len,
                });
            }
            for offset in [edit.from, edit.to] {
                if !doc.text().is_char_boundary(offset) {
                    return Err(EditError::NotCharBoundary { offset });
                }
            }
        }
        Ok(())
    }

    /// Ranges of the new document that contain inserted text.
    pub fn changed_ranges(&self) -> Vec<Span> {
        let mut shift = 0isize;
        let mut changed = Vec::with_capacity(self.edits.len());
        for edit in &self.edits {
            let start = (edit.from as isize + shift) as usize;
            changed.push(Span::new(start, start + edit.insert.len()));
            shift += edit.delta();
        }
        changed
    }

    /// Map an offset in the old document to the new one.
    ///
    /// Offsets strictly inside a replaced range have no counterpart and map to `None`.
    pub fn map_pos(&self, pos: usize, assoc: Assoc) -> Option<usize> {
        let mut shift = 0isize;
        for edit in &self.edits {
            if pos < edit.from {
                break;
            }
            if edit.from == edit.to {
                if pos == edit.from && assoc == Assoc::Before {
                    break;
                }
            } else if pos == edit.from {
                break;
            } else if pos < edit.to {
                return None;
            }
            shift += edit.delta();
        }
        Some((pos as isize + shift) as usize)
    }

    /// Like [`ChangeSet::map_pos`], but offsets inside a replaced range collapse onto
    /// the start (`Before`) or end (`After`) of the replacement text.
    pub fn map_pos_lossy(&self, pos: usize, assoc: Assoc) -> usize {
        if let Some(mapped) = self.map_pos(pos, assoc) {
            return mapped;
        }
        let mut shift = 0isize;
        for edit in &self.edits {
            if edit.from < pos && pos < edit.to {
                let start = (edit.from as isize + shift) as usize;
                return match assoc {
                    Assoc::Before => start,
                    Assoc::After => start + edit.insert.len(),
                };
            }
            shift += edit.delta();
        }
        pos
    }

    /// The batch that undoes this one once it has been applied to `original`.
    pub fn invert(&self, original: &Document) -> ChangeSet {
        let mut shift = 0isize;
        let mut edits = Vec::with_capacity(self.edits.len());
        for edit in &self.edits {
            let from = (edit.from as isize + shift) as usize;
            edits.push(TextEdit::replace(
                from,
                from + edit.insert.len(),
                original.slice(edit.from, edit.to),
            ));
            shift += edit.delta();
        }
        ChangeSet { edits }
    }
}

/// Result of applying a transaction
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    pub changed: Vec<Span>,
    pub new_selection: crate::editing::Selection,
    pub version: u64,
}
