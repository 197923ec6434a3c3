//! # Decoration builder
//!
//! Turns a document, its syntax tree and the selection into the full, sorted list of
//! instructions a host needs to render live preview: which syntax markers to hide, which
//! to show with a style class, which spans to swap for widgets and which lines to style.
//!
//! The list is recomputed from scratch on every transaction. See [`build`].

pub mod builder;
pub mod classes;
pub mod definitions;
pub mod invariants;
pub mod kinds;
pub mod widget;

use serde::Serialize;

pub use builder::{build, build_with_options};
pub use widget::{Widget, WidgetKind};

/// Tie-breaker between decorations covering the same range.
///
/// The host requires non-decreasing ranges, and at one offset a closing marker must come
/// before an opening one. Variant order is sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Side {
    /// Line attributes, attached at the start of a line.
    LineStart,
    /// Trailing delimiter of a node.
    Closing,
    /// Whole-node replacements and marks that are neither opening nor closing.
    Inline,
    /// Leading delimiter of a node.
    Opening,
}

/// Attributes of one line inside a blockquote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuoteLine {
    /// Number of `>` characters in the line prefix.
    pub nesting_depth: usize,
    pub is_first_line: bool,
    pub is_last_line: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DecorationKind {
    /// Style `[from, to)` without changing what is displayed.
    Mark { class: &'static str },
    /// Hide `[from, to)`, optionally showing a widget in its place.
    Replace { widget: Option<Widget> },
    /// Attributes for the line starting at `from` (`from == to`).
    Line {
        class: &'static str,
        quote: Option<QuoteLine>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecorationItem {
    pub from: usize,
    pub to: usize,
    pub side: Side,
    pub kind: DecorationKind,
}

impl DecorationItem {
    pub fn mark(from: usize, to: usize, side: Side, class: &'static str) -> Self {
        Self {
            from,
            to,
            side,
            kind: DecorationKind::Mark { class },
        }
    }

    pub fn hide(from: usize, to: usize, side: Side) -> Self {
        Self {
            from,
            to,
            side,
            kind: DecorationKind::Replace { widget: None },
        }
    }

    pub fn widget(widget: Widget) -> Self {
        Self {
            from: widget.original_from,
            to: widget.original_to,
            side: Side::Inline,
            kind: DecorationKind::Replace {
                widget: Some(widget),
            },
        }
    }

    pub fn line(at: usize, class: &'static str, quote: Option<QuoteLine>) -> Self {
        Self {
            from: at,
            to: at,
            side: Side::LineStart,
            kind: DecorationKind::Line { class, quote },
        }
    }

    pub fn sort_key(&self) -> (usize, usize, Side) {
        (self.from, self.to, self.side)
    }

    pub fn is_replace(&self) -> bool {
        matches!(self.kind, DecorationKind::Replace { .. })
    }

    pub fn widget_ref(&self) -> Option<&Widget> {
        match &self.kind {
            DecorationKind::Replace { widget } => widget.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closing_sorts_before_opening_at_same_point() {
        let closing = DecorationItem::hide(6, 8, Side::Closing);
        let opening = DecorationItem::hide(6, 8, Side::Opening);
        assert!(closing.sort_key() < opening.sort_key());
    }

    #[test]
    fn line_decorations_are_empty_ranges() {
        let line = DecorationItem::line(4, classes::HORIZONTAL_RULE, None);
        assert_eq!((line.from, line.to), (4, 4));
        assert!(!line.is_replace());
    }
}
