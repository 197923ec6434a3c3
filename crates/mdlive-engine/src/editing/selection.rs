use crate::editing::patch::{Assoc, ChangeSet};
use crate::text::Span;

/// One selection range. `anchor` stays put while `head` follows the caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    pub anchor: usize,
    pub head: usize,
}

impl SelectionRange {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    pub fn cursor(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    pub fn from(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn to(&self) -> usize {
        self.anchor.max(self.head)
    }

    pub fn span(&self) -> Span {
        Span::new(self.from(), self.to())
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// Map through an edit batch, keeping a non-empty range on the text it covered.
    fn map(&self, changes: &ChangeSet) -> Self {
        if self.is_empty() {
            return Self::cursor(changes.map_pos_lossy(self.head, Assoc::After));
        }
        let from = changes.map_pos_lossy(self.from(), Assoc::After);
        let to = changes.map_pos_lossy(self.to(), Assoc::Before).max(from);
        if self.anchor <= self.head {
            Self::new(from, to)
        } else {
            Self::new(to, from)
        }
    }
}

/// The host's selection: a set of ranges, one of which is the main range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    ranges: Vec<SelectionRange>,
    main: usize,
}

impl Selection {
    /// Build a selection from its ranges. An empty list becomes a caret at 0 and an
    /// out-of-range `main` index falls back to the last range.
    pub fn new(ranges: Vec<SelectionRange>, main: usize) -> Self {
        let ranges = if ranges.is_empty() {
            vec![SelectionRange::cursor(0)]
        } else {
            ranges
        };
        let main = main.min(ranges.len() - 1);
        Self { ranges, main }
    }

    pub fn single(anchor: usize, head: usize) -> Self {
        Self::new(vec![SelectionRange::new(anchor, head)], 0)
    }

    pub fn cursor(pos: usize) -> Self {
        Self::single(pos, pos)
    }

    pub fn main(&self) -> SelectionRange {
        self.ranges[self.main]
    }

    pub fn ranges(&self) -> &[SelectionRange] {
        &self.ranges
    }

    pub fn map(&self, changes: &ChangeSet) -> Self {
        Self {
            ranges: self.ranges.iter().map(|r| r.map(changes)).collect(),
            main: self.main,
        }
    }

    /// Clamp every range into a document of length `len`.
    pub fn clamp(&self, len: usize) -> Self {
        Self {
            ranges: self
                .ranges
                .iter()
                .map(|r| SelectionRange::new(r.anchor.min(len), r.head.min(len)))
                .collect(),
            main: self.main,
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::cursor(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::patch::TextEdit;

    #[test]
    fn from_and_to_normalise_direction() {
        let r = SelectionRange::new(9, 3);
        assert_eq!(r.from(), 3);
        assert_eq!(r.to(), 9);
        assert_eq!(r.span(), Span::new(3, 9));
    }

    #[test]
    fn new_falls_back_for_bad_input() {
        let s = Selection::new(vec![], 4);
        assert_eq!(s.main(), SelectionRange::cursor(0));

        let s = Selection::new(vec![SelectionRange::cursor(1), SelectionRange::cursor(7)], 9);
        assert_eq!(s.main(), SelectionRange::cursor(7));
    }

    #[test]
    fn map_keeps_wrapped_text_selected() {
        // wrapping "text" in "**": the selection stays on the inner text
        let changes = ChangeSet::new(vec![TextEdit::insert(0, "**"), TextEdit::insert(4, "**")]).unwrap();
        let mapped = Selection::single(0, 4).map(&changes);
        assert_eq!(mapped.main(), SelectionRange::new(2, 6));
    }

    #[test]
    fn map_moves_caret_past_insertion() {
        let changes = ChangeSet::single(TextEdit::insert(2, "ab"));
        assert_eq!(Selection::cursor(2).map(&changes).main(), SelectionRange::cursor(4));
    }

    #[test]
    fn map_preserves_backward_direction() {
        let changes = ChangeSet::single(TextEdit::insert(0, "x"));
        let mapped = Selection::single(5, 2).map(&changes);
        assert_eq!(mapped.main(), SelectionRange::new(6, 3));
    }

    #[test]
    fn clamp_limits_offsets() {
        let s = Selection::single(2, 40).clamp(10);
        assert_eq!(s.main(), SelectionRange::new(2, 10));
    }
}
