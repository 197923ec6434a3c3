//! Footnote and link-reference definition lines.
//!
//! Both are plain paragraphs as far as most grammars are concerned, so they are found by
//! scanning lines rather than the tree.

use std::sync::OnceLock;

use regex::Regex;

use crate::editing::Document;
use crate::text::{Line, Span};

static FOOTNOTE_DEFINITION: OnceLock<Regex> = OnceLock::new();
static LINK_DEFINITION: OnceLock<Regex> = OnceLock::new();

fn footnote_definition_regex() -> &'static Regex {
    FOOTNOTE_DEFINITION.get_or_init(|| Regex::new(r"^\[\^([^\]]+)\]:\s*(.*)$").unwrap())
}

fn link_definition_regex() -> &'static Regex {
    LINK_DEFINITION.get_or_init(|| Regex::new(r"^\[([^\]^][^\]]*)\]:\s*(\S+)").unwrap())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    /// `[^id]: text`
    Footnote,
    /// `[id]: url`
    Link,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub kind: DefinitionKind,
    pub line: Line,
    pub id: String,
    /// Footnote text, or the link URL.
    pub content: String,
    /// Absolute offset of the `:` after the closing `]`.
    pub colon: usize,
}

impl Definition {
    /// `[id]:` or `[^id]:`, including the colon.
    pub fn label_span(&self) -> Span {
        Span::new(self.line.from, self.colon + 1)
    }

    /// Everything after the colon.
    pub fn content_span(&self) -> Span {
        Span::new(self.colon + 1, self.line.to)
    }

    /// Parse one line. Footnote definitions win over link definitions.
    pub fn parse(line: &Line) -> Option<Definition> {
        let (kind, caps) = if let Some(caps) = footnote_definition_regex().captures(&line.text) {
            (DefinitionKind::Footnote, caps)
        } else {
            (
                DefinitionKind::Link,
                link_definition_regex().captures(&line.text)?,
            )
        };
        let close = line.text.find(']')?;
        let colon = close + line.text[close..].find(':')?;
        Some(Definition {
            kind,
            line: line.clone(),
            id: caps.get(1)?.as_str().to_string(),
            content: caps.get(2).map_or("", |m| m.as_str()).to_string(),
            colon: line.from + colon,
        })
    }
}

/// Every definition line in the document, in line order.
pub fn scan(doc: &Document) -> Vec<Definition> {
    doc.lines().filter_map(|line| Definition::parse(&line)).collect()
}

/// The definition of `[^id]`.
pub fn find_footnote(doc: &Document, id: &str) -> Option<Definition> {
    find(doc, DefinitionKind::Footnote, id)
}

/// The definition of `[text][id]`.
pub fn find_link(doc: &Document, id: &str) -> Option<Definition> {
    find(doc, DefinitionKind::Link, id)
}

fn find(doc: &Document, kind: DefinitionKind, id: &str) -> Option<Definition> {
    doc.lines()
        .filter_map(|line| Definition::parse(&line))
        .find(|d| d.kind == kind && d.id == id)
}

/// First use of a definition's label outside any definition line.
pub fn first_usage(doc: &Document, kind: DefinitionKind, id: &str) -> Option<Span> {
    let needle = match kind {
        DefinitionKind::Footnote => format!("[^{id}]"),
        DefinitionKind::Link => format!("[{id}]"),
    };
    doc.lines()
        .filter(|line| Definition::parse(line).is_none())
        .find_map(|line| {
            line.text
                .find(&needle)
                .map(|at| Span::new(line.from + at, line.from + at + needle.len()))
        })
}
