//! One handler per decorated node kind.
//!
//! Every handler is total: when the node's source text does not have the shape the
//! handler expects (the user is usually halfway through typing it) it returns nothing.

pub mod blockquote;
pub mod code_fence;
pub mod definition;
pub mod emphasis;
pub mod heading;
pub mod image;
pub mod inline_code;
pub mod link;
pub mod list_item;
pub mod rule;
pub mod styled_span;

pub use blockquote::{Blockquote, VisitedQuotes};
pub use code_fence::CodeFence;
pub use definition::DefinitionLine;
pub use emphasis::Emphasis;
pub use heading::Heading;
pub use image::Image;
pub use inline_code::InlineCode;
pub use link::Link;
pub use list_item::ListItem;
pub use rule::HorizontalRule;
pub use styled_span::{SpanStyle, StyledSpan};

use crate::decorations::{DecorationItem, Side, classes};
use crate::editing::{Document, Selection};
use crate::options::PreviewOptions;
use crate::syntax::{NodeId, SyntaxTree};
use crate::text::Span;

/// What a handler gets to look at for one node.
#[derive(Debug, Clone, Copy)]
pub struct NodeContext<'a> {
    pub doc: &'a Document,
    pub tree: &'a SyntaxTree,
    pub node: NodeId,
    pub selection: &'a Selection,
    pub options: &'a PreviewOptions,
    /// The main selection range touches or overlaps the node.
    pub is_selected: bool,
    pub from: usize,
    pub to: usize,
}

impl<'a> NodeContext<'a> {
    pub fn new(
        doc: &'a Document,
        tree: &'a SyntaxTree,
        node: NodeId,
        selection: &'a Selection,
        options: &'a PreviewOptions,
    ) -> Self {
        let span = tree.node(node).span;
        Self {
            doc,
            tree,
            node,
            selection,
            options,
            is_selected: span.intersects(selection.main().span()),
            from: span.start,
            to: span.end,
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.from, self.to)
    }

    pub fn source(&self) -> &'a str {
        self.doc.slice(self.from, self.to)
    }

    /// Markers are shown rather than hidden.
    pub fn revealed(&self) -> bool {
        self.is_selected || !self.options.hiding_enabled
    }

    /// A syntax marker over `[from, to)`: hidden, or marked visible when revealed.
    pub fn syntax(&self, from: usize, to: usize, side: Side) -> DecorationItem {
        if self.revealed() {
            DecorationItem::mark(from, to, side, classes::VISIBLE_SYNTAX)
        } else {
            DecorationItem::hide(from, to, side)
        }
    }

    /// Leading and trailing markers of `len` bytes each.
    pub fn edges(&self, len: usize) -> Vec<DecorationItem> {
        vec![
            self.syntax(self.from, self.from + len, Side::Opening),
            self.syntax(self.to - len, self.to, Side::Closing),
        ]
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::syntax::{NodeKind, TreeBuilder};

    /// A document whose tree holds a single node of `kind` over `span`.
    pub fn single_node(text: &str, kind: NodeKind, span: Span) -> (Document, SyntaxTree, NodeId) {
        let doc = Document::new(text);
        let mut builder = TreeBuilder::new(doc.len());
        let id = builder.leaf(kind, span);
        (doc, builder.finish(), id)
    }

    pub fn context<'a>(
        doc: &'a Document,
        tree: &'a SyntaxTree,
        node: NodeId,
        selection: &'a Selection,
        options: &'a PreviewOptions,
    ) -> NodeContext<'a> {
        NodeContext::new(doc, tree, node, selection, options)
    }
}
