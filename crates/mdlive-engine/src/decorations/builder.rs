use std::collections::HashSet;

use crate::decorations::DecorationItem;
use crate::decorations::definitions;
use crate::decorations::kinds::{
    Blockquote, CodeFence, DefinitionLine, Emphasis, Heading, HorizontalRule, Image, InlineCode,
    Link, ListItem, NodeContext, SpanStyle, StyledSpan, VisitedQuotes,
};
use crate::editing::{Document, Selection};
use crate::options::PreviewOptions;
use crate::syntax::{NodeKind, SyntaxTree};

/// Compute the decorations for one snapshot with default options apart from
/// `hiding_enabled`.
pub fn build(
    doc: &Document,
    tree: &SyntaxTree,
    selection: &Selection,
    hiding_enabled: bool,
) -> Vec<DecorationItem> {
    let options = PreviewOptions {
        hiding_enabled,
        ..PreviewOptions::default()
    };
    build_with_options(doc, tree, selection, &options)
}

/// Compute the full, sorted decoration list for one snapshot.
///
/// Definition lines are found by a line scan first and claim their lines; the tree walk
/// then skips every node that starts on a claimed line, together with its subtree. All
/// other nodes are dispatched on their kind. The result is sorted by
/// [`DecorationItem::sort_key`].
pub fn build_with_options(
    doc: &Document,
    tree: &SyntaxTree,
    selection: &Selection,
    options: &PreviewOptions,
) -> Vec<DecorationItem> {
    let mut items = Vec::new();

    let definitions = definitions::scan(doc);
    let claimed: HashSet<usize> = definitions.iter().map(|d| d.line.number).collect();
    for def in &definitions {
        items.extend(DefinitionLine::decorate(doc, selection, options, def));
    }

    let mut quotes = VisitedQuotes::default();
    let root = tree.root();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let node = tree.node(id);
        if id != root && claimed.contains(&doc.line_at(node.from()).number) {
            continue;
        }
        let cx = NodeContext::new(doc, tree, id, selection, options);
        items.extend(decorate_node(&cx, &node.kind, &mut quotes));
        stack.extend(node.children.iter().rev());
    }

    items.retain(|item| item.from <= item.to && item.to <= doc.len());
    items.sort_by_key(DecorationItem::sort_key);

    log::debug!(
        "built {} decorations ({} definition lines, {} nodes)",
        items.len(),
        definitions.len(),
        tree.len()
    );
    items
}

fn decorate_node(
    cx: &NodeContext<'_>,
    kind: &NodeKind,
    quotes: &mut VisitedQuotes,
) -> Vec<DecorationItem> {
    match kind {
        NodeKind::Heading(level) => Heading::decorate(cx, *level),
        NodeKind::Emphasis => Emphasis::decorate(cx, 1),
        NodeKind::StrongEmphasis => Emphasis::decorate(cx, 2),
        NodeKind::Strikethrough => StyledSpan::decorate(cx, SpanStyle::Strikethrough),
        NodeKind::Mark => StyledSpan::decorate(cx, SpanStyle::Highlight),
        NodeKind::Underline => StyledSpan::decorate(cx, SpanStyle::Underline),
        NodeKind::InlineCode => InlineCode::decorate(cx),
        NodeKind::Link | NodeKind::LinkReference => Link::decorate(cx),
        NodeKind::Image => Image::decorate(cx),
        NodeKind::ListItem => ListItem::decorate(cx),
        NodeKind::Blockquote => Blockquote::decorate(cx, quotes),
        NodeKind::FencedCode => CodeFence::decorate(cx),
        NodeKind::HorizontalRule => HorizontalRule::decorate(cx),
        NodeKind::Document
        | NodeKind::Paragraph
        | NodeKind::BulletList
        | NodeKind::OrderedList
        | NodeKind::ListMark
        | NodeKind::CodeBlock
        | NodeKind::FootnoteDefinition
        | NodeKind::Table
        | NodeKind::Other(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorations::{DecorationKind, Side, WidgetKind, classes};
    use crate::syntax::TreeBuilder;
    use crate::text::Span;
    use pretty_assertions::assert_eq;

    fn tree_of(len: usize, nodes: &[(NodeKind, Span)]) -> SyntaxTree {
        let mut b = TreeBuilder::new(len);
        b.start_node(NodeKind::Paragraph, Span::new(0, len));
        for (kind, span) in nodes {
            b.leaf(kind.clone(), *span);
        }
        b.finish_node();
        b.finish()
    }

    #[test]
    fn output_is_sorted() {
        let text = "`c` **b** ~~s~~";
        let doc = Document::new(text);
        let tree = tree_of(
            doc.len(),
            &[
                (NodeKind::Strikethrough, Span::new(10, 15)),
                (NodeKind::StrongEmphasis, Span::new(4, 9)),
                (NodeKind::InlineCode, Span::new(0, 3)),
            ],
        );
        let items = build(&doc, &tree, &Selection::cursor(6), true);
        let keys: Vec<_> = items.iter().map(DecorationItem::sort_key).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(items.len(), 4);
    }

    #[test]
    fn selection_inside_bold_shows_markers_without_widget() {
        let doc = Document::new("**bold**");
        let tree = tree_of(8, &[(NodeKind::StrongEmphasis, Span::new(0, 8))]);
        let items = build(&doc, &tree, &Selection::cursor(2), true);
        assert_eq!(
            items,
            vec![
                DecorationItem::mark(0, 2, Side::Opening, classes::VISIBLE_SYNTAX),
                DecorationItem::mark(6, 8, Side::Closing, classes::VISIBLE_SYNTAX),
            ]
        );
    }

    #[test]
    fn nodes_on_definition_lines_are_skipped() {
        // a grammar that reports inline code inside the definition line
        let text = "[^1]: see `code`";
        let doc = Document::new(text);
        let tree = tree_of(doc.len(), &[(NodeKind::InlineCode, Span::new(10, 16))]);
        let items = build(&doc, &tree, &Selection::cursor(0), true);
        assert!(items.iter().all(|i| !matches!(
            i.widget_ref().map(|w| &w.kind),
            Some(WidgetKind::InlineCode { .. })
        )));
    }

    #[test]
    fn unselected_definition_line_is_one_widget() {
        let text = "body\n\n[^1]: note text";
        let doc = Document::new(text);
        let tree = tree_of(doc.len(), &[]);
        let items = build(&doc, &tree, &Selection::cursor(0), true);
        let widgets: Vec<_> = items.iter().filter_map(DecorationItem::widget_ref).collect();
        assert_eq!(widgets.len(), 1);
        assert_eq!(widgets[0].original_span(), Span::new(6, 21));
    }

    #[test]
    fn hiding_disabled_produces_no_replacements() {
        let text = "# T\n\n**b** `c`";
        let doc = Document::new(text);
        let mut b = TreeBuilder::new(doc.len());
        b.leaf(NodeKind::Heading(1), Span::new(0, 3));
        b.start_node(NodeKind::Paragraph, Span::new(5, 14));
        b.leaf(NodeKind::StrongEmphasis, Span::new(5, 10));
        b.leaf(NodeKind::InlineCode, Span::new(11, 14));
        b.finish_node();
        let tree = b.finish();

        let items = build(&doc, &tree, &Selection::cursor(0), false);
        assert_eq!(items.len(), 5);
        assert!(items.iter().all(|i| matches!(i.kind, DecorationKind::Mark { .. })));
    }

    #[test]
    fn stale_out_of_range_nodes_are_dropped() {
        // tree parsed from "`a` x", document already shortened to "`a"
        let tree = tree_of(5, &[(NodeKind::InlineCode, Span::new(0, 3))]);
        let shorter = Document::new("`a");
        let items = build(&shorter, &tree, &Selection::cursor(0), true);
        assert!(items.iter().all(|i| i.to <= shorter.len()));
    }
}
