use serde::Serialize;

/// A byte range `[start, end)` into a document.
///
/// Decorations, syntax nodes and edits all store spans rather than copied text, so
/// slicing the document with any span reproduces the exact source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// True when `other` lies entirely inside this span (boundaries included).
    #[must_use]
    pub fn contains(self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// True when the two spans touch or overlap.
    ///
    /// The check is inclusive at both ends, so `0..3` and `3..5` intersect. A caret right
    /// after `**bold**` still intersects it, which keeps markers visible while the user is
    /// typing at the edge of a node.
    #[must_use]
    pub fn intersects(self, other: Span) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}
