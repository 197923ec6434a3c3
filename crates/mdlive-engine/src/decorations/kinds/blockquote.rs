use std::collections::HashSet;

use crate::decorations::kinds::NodeContext;
use crate::decorations::{DecorationItem, QuoteLine, Side, classes};
use crate::text::Span;

/// Quote ranges already decorated during one pass.
///
/// A nested quote lies inside its parent's lines, which the parent already decorated
/// with the full nesting depth, so it is skipped.
#[derive(Debug, Default)]
pub struct VisitedQuotes {
    ranges: HashSet<(usize, usize)>,
}

impl VisitedQuotes {
    /// Records `span` and reports whether it still needs decorating.
    fn visit(&mut self, span: Span) -> bool {
        let seen = self
            .ranges
            .iter()
            .any(|&(from, to)| Span::new(from, to).contains(span));
        if seen {
            return false;
        }
        self.ranges.insert((span.start, span.end));
        true
    }
}

pub struct Blockquote;

impl Blockquote {
    pub const MARKER: char = '>';

    /// A `Line` decoration for every line spanned, and each `>` of the line prefix hidden
    /// or shown.
    pub fn decorate(cx: &NodeContext<'_>, visited: &mut VisitedQuotes) -> Vec<DecorationItem> {
        if !visited.visit(cx.span()) {
            return Vec::new();
        }
        let first = cx.doc.line_at(cx.from).number;
        let last = cx.doc.line_at(cx.to.saturating_sub(1).max(cx.from)).number;

        let mut items = Vec::new();
        for number in first..=last {
            let Some(line) = cx.doc.line(number) else {
                break;
            };
            let prefix = Self::prefix(&line.text);
            let depth = prefix.chars().filter(|c| *c == Self::MARKER).count();
            items.push(DecorationItem::line(
                line.from,
                classes::BLOCKQUOTE_LINE,
                Some(QuoteLine {
                    nesting_depth: depth,
                    is_first_line: number == first,
                    is_last_line: number == last,
                }),
            ));
            for (at, _) in prefix.match_indices(Self::MARKER) {
                let from = line.from + at;
                items.push(cx.syntax(from, from + 1, Side::Opening));
            }
        }
        items
    }

    /// Leading run of whitespace and `>` characters.
    fn prefix(line: &str) -> &str {
        let end = line
            .find(|c: char| c != Self::MARKER && !c.is_whitespace())
            .unwrap_or(line.len());
        &line[..end]
    }
}
