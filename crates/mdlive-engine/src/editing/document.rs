use std::sync::Arc;

use xi_rope::{Rope, delta::Builder};

use crate::editing::patch::{ChangeSet, EditError};
use crate::text::{Line, Span, ceil_char_boundary, floor_char_boundary, lines_with_spans};

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// One immutable version of the edited Markdown text.
///
/// The xi-rope buffer is the source of truth and answers line queries; a flattened copy
/// of the same text backs the regex-driven passes, which all work on `&str`. Both are
/// reference counted, so cloning a `Document` is cheap and a clone never observes later
/// edits: [`Document::apply`] always produces a new version.
///
/// ```rust
/// # use mdlive_engine::editing::{ChangeSet, Document, TextEdit};
/// let doc = Document::new("# Hello\n\n- Item 1");
/// let edited = doc
///     .apply(&ChangeSet::single(TextEdit::insert(0, "#")))
///     .unwrap();
/// assert_eq!(edited.text(), "## Hello\n\n- Item 1");
/// assert_eq!(edited.version(), doc.version() + 1);
/// ```
#[derive(Clone)]
pub struct Document {
    buffer: Rope,
    text: Arc<str>,
    version: u64,
}

impl Document {
    pub fn new(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            text: Arc::from(text),
            version: 0,
        }
    }

    /// Create a new document from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::new(text))
    }

    /// Get the document's content as raw bytes (exact round-trip)
    pub fn to_bytes(&self) -> Vec<u8> {
        self.text.as_bytes().to_vec()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Slice `[from, to)` out of the document.
    ///
    /// Out-of-range bounds are clamped and snapped outward to char boundaries; callers
    /// routinely hold offsets from a slightly stale parse while the user is typing.
    pub fn slice(&self, from: usize, to: usize) -> &str {
        let start = floor_char_boundary(&self.text, from.min(self.len()));
        let end = ceil_char_boundary(&self.text, to.min(self.len())).max(start);
        &self.text[start..end]
    }

    pub fn slice_span(&self, span: Span) -> &str {
        self.slice(span.start, span.end)
    }

    /// Number of lines, counting the empty line after a trailing newline.
    pub fn line_count(&self) -> usize {
        self.buffer.line_of_offset(self.len()) + 1
    }

    /// The line containing `offset` (clamped to the document and snapped back to a char
    /// boundary).
    pub fn line_at(&self, offset: usize) -> Line {
        let offset = floor_char_boundary(&self.text, offset.min(self.len()));
        let index = self.buffer.line_of_offset(offset);
        self.line_by_index(index)
    }

    /// Line by 1-based number, or `None` past the end of the document.
    pub fn line(&self, number: usize) -> Option<Line> {
        if number == 0 || number > self.line_count() {
            return None;
        }
        Some(self.line_by_index(number - 1))
    }

    pub fn lines(&self) -> impl Iterator<Item = Line> {
        lines_with_spans(&self.buffer)
    }

    fn line_by_index(&self, index: usize) -> Line {
        let from = self.buffer.offset_of_line(index);
        let rest = &self.text[from..];
        let raw_end = rest.find('\n').map_or(self.len(), |i| from + i);
        let text = self.text[from..raw_end].trim_end_matches('\r').to_string();
        Line {
            number: index + 1,
            from,
            to: from + text.len(),
            text,
        }
    }

    /// Apply a batch of edits, producing the next version of the document.
    ///
    /// Every edit is expressed in this document's coordinates; the whole batch becomes a
    /// single delta, which is what lets a host record it as one undo step.
    pub fn apply(&self, changes: &ChangeSet) -> Result<Document, EditError> {
        changes.validate(self)?;

        let mut builder = Builder::new(self.buffer.len());
        for edit in changes.edits() {
            builder.replace(edit.from..edit.to, Rope::from(edit.insert.as_str()));
        }
        let delta = builder.build();
        let buffer = delta.apply(&self.buffer);
        let text: Arc<str> = Arc::from(buffer.to_string());

        Ok(Self {
            buffer,
            text,
            version: self.version + 1,
        })
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("version", &self.version)
            .field("len", &self.len())
            .finish()
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text && self.version == other.version
    }
}
