//! Syntax trees consumed by the decoration builder.
//!
//! The engine does not own a Markdown grammar. Any grammar can feed it by implementing
//! [`MarkdownParser`] and producing a [`SyntaxTree`]: an arena of nodes with integer child
//! ids, re-derived for every document version and never mutated in place.
//! [`markdown::PulldownParser`] is the reference implementation.

pub mod markdown;

use crate::editing::Document;
use crate::text::Span;

pub use markdown::PulldownParser;

/// Node kinds the engine knows about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Paragraph,
    /// ATX or setext heading, level 1-6
    Heading(u8),
    Emphasis,
    StrongEmphasis,
    /// `~~text~~`
    Strikethrough,
    /// `==text==`
    Mark,
    /// `~text~`
    Underline,
    InlineCode,
    /// Inline link, autolink or footnote reference
    Link,
    /// `[text][ref]` and its collapsed/shortcut forms
    LinkReference,
    Image,
    BulletList,
    OrderedList,
    ListItem,
    /// The `-`, `*`, `+` or `1.` that starts a list item
    ListMark,
    Blockquote,
    FencedCode,
    CodeBlock,
    HorizontalRule,
    FootnoteDefinition,
    Table,
    /// Anything else the grammar reports, by its type name
    Other(String),
}

impl NodeKind {
    /// Map a grammar type name onto a kind.
    ///
    /// Accepts the node names incremental Markdown grammars use (`ATXHeading2`,
    /// `StrongEmphasis`, `QuoteMark`, ...), so hosts can pass them straight through.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Document" => Self::Document,
            "Paragraph" => Self::Paragraph,
            "ATXHeading1" | "SetextHeading1" => Self::Heading(1),
            "ATXHeading2" | "SetextHeading2" => Self::Heading(2),
            "ATXHeading3" => Self::Heading(3),
            "ATXHeading4" => Self::Heading(4),
            "ATXHeading5" => Self::Heading(5),
            "ATXHeading6" => Self::Heading(6),
            "Emphasis" => Self::Emphasis,
            "StrongEmphasis" => Self::StrongEmphasis,
            "Strikethrough" => Self::Strikethrough,
            "Mark" | "Highlight" => Self::Mark,
            "Underline" => Self::Underline,
            "InlineCode" => Self::InlineCode,
            "Link" => Self::Link,
            "LinkReference" => Self::LinkReference,
            "Image" => Self::Image,
            "BulletList" => Self::BulletList,
            "OrderedList" => Self::OrderedList,
            "ListItem" => Self::ListItem,
            "ListMark" => Self::ListMark,
            "Blockquote" => Self::Blockquote,
            "FencedCode" => Self::FencedCode,
            "CodeBlock" => Self::CodeBlock,
            "HorizontalRule" => Self::HorizontalRule,
            "FootnoteDefinition" => Self::FootnoteDefinition,
            "Table" => Self::Table,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Index of a node in its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub span: Span,
    pub children: Vec<NodeId>,
}

impl SyntaxNode {
    pub fn from(&self) -> usize {
        self.span.start
    }

    pub fn to(&self) -> usize {
        self.span.end
    }
}

/// Arena-allocated syntax tree. Node 0 is always the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
}

impl SyntaxTree {
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Ids of all nodes in depth-first pre-order, children in source order.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            order.push(id);
            let node = self.node(id);
            for child in node.children.iter().rev() {
                stack.push(*child);
            }
        }
        order
    }

    /// First child of `id` with the given kind.
    pub fn child_of_kind(&self, id: NodeId, kind: &NodeKind) -> Option<&SyntaxNode> {
        self.node(id)
            .children
            .iter()
            .map(|c| self.node(*c))
            .find(|c| &c.kind == kind)
    }
}

/// Builds a [`SyntaxTree`] from nested start/finish calls.
///
/// Children are kept sorted by start offset when the tree is finished, so grammars may
/// add leaf nodes out of order.
#[derive(Debug)]
pub struct TreeBuilder {
    nodes: Vec<SyntaxNode>,
    open: Vec<NodeId>,
}

impl TreeBuilder {
    /// Start a tree whose root `Document` node covers `len` bytes.
    pub fn new(len: usize) -> Self {
        Self {
            nodes: vec![SyntaxNode {
                kind: NodeKind::Document,
                span: Span::new(0, len),
                children: Vec::new(),
            }],
            open: vec![NodeId(0)],
        }
    }

    fn push(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SyntaxNode {
            kind,
            span,
            children: Vec::new(),
        });
        let parent = self.open.last().copied().unwrap_or(NodeId(0));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Open a node; later nodes become its children until [`TreeBuilder::finish_node`].
    pub fn start_node(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = self.push(kind, span);
        self.open.push(id);
        id
    }

    /// Close the most recently opened node. The root is never closed.
    pub fn finish_node(&mut self) {
        if self.open.len() > 1 {
            self.open.pop();
        }
    }

    pub fn leaf(&mut self, kind: NodeKind, span: Span) -> NodeId {
        self.push(kind, span)
    }

    pub fn finish(mut self) -> SyntaxTree {
        let starts: Vec<(usize, usize)> = self.nodes.iter().map(|n| (n.span.start, n.span.end)).collect();
        for node in &mut self.nodes {
            node.children.sort_by_key(|c| (starts[c.0].0, std::cmp::Reverse(starts[c.0].1)));
        }
        SyntaxTree { nodes: self.nodes }
    }
}

/// A Markdown grammar that can produce a syntax tree for a document version.
pub trait MarkdownParser {
    fn parse(&self, doc: &Document) -> SyntaxTree;
}
