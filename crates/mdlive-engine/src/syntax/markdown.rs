//! Reference grammar adapter over pulldown-cmark's offset iterator.

use std::sync::OnceLock;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, LinkType, Options, Parser, Tag, TagEnd};
use regex::Regex;

use crate::editing::Document;
use crate::syntax::{MarkdownParser, NodeKind, SyntaxTree, TreeBuilder};
use crate::text::Span;

static LIST_MARK: OnceLock<Regex> = OnceLock::new();
static HIGHLIGHT: OnceLock<Regex> = OnceLock::new();

fn list_mark_regex() -> &'static Regex {
    LIST_MARK.get_or_init(|| Regex::new(r"^[ \t]*(\d{1,9}[.)]|[-*+])(?:[ \t]|$)").unwrap())
}

fn highlight_regex() -> &'static Regex {
    HIGHLIGHT.get_or_init(|| Regex::new(r"==([^=\n]+)==").unwrap())
}

/// Parse a document with the default [`PulldownParser`].
pub fn parse(doc: &Document) -> SyntaxTree {
    PulldownParser::default().parse(doc)
}

/// CommonMark + GFM strikethrough, tables and footnotes.
///
/// pulldown-cmark has no notion of `==highlight==`, list markers as nodes or underline, so
/// those are recovered from the source: highlights inside contiguous text runs, a
/// `ListMark` child for each item, and single-tilde strikethrough reported as `Underline`.
#[derive(Debug, Clone, Copy)]
pub struct PulldownParser {
    options: Options,
}

impl Default for PulldownParser {
    fn default() -> Self {
        Self {
            options: Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_TABLES,
        }
    }
}

impl MarkdownParser for PulldownParser {
    fn parse(&self, doc: &Document) -> SyntaxTree {
        let text = doc.text();
        let mut builder = TreeBuilder::new(text.len());
        let mut text_run: Option<Span> = None;
        let mut code_depth = 0usize;

        for (event, range) in Parser::new_ext(text, self.options).into_offset_iter() {
            let span = trim_line_end(text, Span::from(range));

            if let Event::Text(_) = event {
                if code_depth == 0 {
                    text_run = match text_run {
                        Some(run) if run.end == span.start => Some(Span::new(run.start, span.end)),
                        Some(run) => {
                            push_highlights(&mut builder, text, run);
                            Some(span)
                        }
                        None => Some(span),
                    };
                }
                continue;
            }
            if let Some(run) = text_run.take() {
                push_highlights(&mut builder, text, run);
            }

            match event {
                Event::Start(tag) => {
                    if matches!(tag, Tag::CodeBlock(_)) {
                        code_depth += 1;
                    }
                    let is_item = matches!(tag, Tag::Item);
                    builder.start_node(kind_for_tag(&tag, text, span), span);
                    if is_item {
                        if let Some(mark) = list_mark(text, span) {
                            builder.leaf(NodeKind::ListMark, mark);
                        }
                    }
                }
                Event::End(end) => {
                    if matches!(end, TagEnd::CodeBlock) {
                        code_depth = code_depth.saturating_sub(1);
                    }
                    builder.finish_node();
                }
                Event::Code(_) => {
                    builder.leaf(NodeKind::InlineCode, span);
                }
                Event::FootnoteReference(_) => {
                    builder.leaf(NodeKind::Link, span);
                }
                Event::Rule => {
                    builder.leaf(NodeKind::HorizontalRule, span);
                }
                _ => {}
            }
        }
        if let Some(run) = text_run {
            push_highlights(&mut builder, text, run);
        }

        let tree = builder.finish();
        log::trace!("parsed {} syntax nodes", tree.len());
        tree
    }
}

fn kind_for_tag(tag: &Tag<'_>, text: &str, span: Span) -> NodeKind {
    match tag {
        Tag::Paragraph => NodeKind::Paragraph,
        Tag::Heading { level, .. } => NodeKind::Heading(heading_level(*level)),
        Tag::BlockQuote(_) => NodeKind::Blockquote,
        Tag::CodeBlock(CodeBlockKind::Fenced(_)) => NodeKind::FencedCode,
        Tag::CodeBlock(CodeBlockKind::Indented) => NodeKind::CodeBlock,
        Tag::List(Some(_)) => NodeKind::OrderedList,
        Tag::List(None) => NodeKind::BulletList,
        Tag::Item => NodeKind::ListItem,
        Tag::FootnoteDefinition(_) => NodeKind::FootnoteDefinition,
        Tag::Table(_) => NodeKind::Table,
        Tag::Emphasis => NodeKind::Emphasis,
        Tag::Strong => NodeKind::StrongEmphasis,
        Tag::Strikethrough => {
            if text[span.start..span.end].starts_with("~~") {
                NodeKind::Strikethrough
            } else {
                NodeKind::Underline
            }
        }
        Tag::Link { link_type, .. } => match link_type {
            LinkType::Reference | LinkType::Collapsed | LinkType::Shortcut => {
                NodeKind::LinkReference
            }
            _ => NodeKind::Link,
        },
        Tag::Image { .. } => NodeKind::Image,
        other => NodeKind::Other(tag_name(other)),
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Bare variant name of a tag, e.g. `TableRow`.
fn tag_name(tag: &Tag<'_>) -> String {
    let debug = format!("{tag:?}");
    debug
        .split(|c: char| !c.is_alphanumeric())
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Block ranges from pulldown-cmark include the line terminator; nodes end before it.
fn trim_line_end(text: &str, span: Span) -> Span {
    let mut end = span.end.min(text.len());
    let bytes = text.as_bytes();
    while end > span.start && matches!(bytes[end - 1], b'\n' | b'\r') {
        end -= 1;
    }
    Span::new(span.start, end)
}

fn list_mark(text: &str, item: Span) -> Option<Span> {
    let caps = list_mark_regex().captures(&text[item.start..item.end])?;
    let mark = caps.get(1)?;
    Some(Span::new(item.start + mark.start(), item.start + mark.end()))
}

fn push_highlights(builder: &mut TreeBuilder, text: &str, run: Span) {
    for m in highlight_regex().find_iter(&text[run.start..run.end]) {
        builder.leaf(
            NodeKind::Mark,
            Span::new(run.start + m.start(), run.start + m.end()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn nodes(text: &str) -> Vec<(NodeKind, String)> {
        let doc = Document::new(text);
        let tree = parse(&doc);
        tree.preorder()
            .into_iter()
            .skip(1)
            .map(|id| {
                let node = tree.node(id);
                (node.kind.clone(), doc.slice_span(node.span).to_string())
            })
            .collect()
    }

    fn find(text: &str, kind: NodeKind) -> Vec<String> {
        nodes(text)
            .into_iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, s)| s)
            .collect()
    }

    #[test]
    fn heading_span_excludes_newline() {
        assert_eq!(find("## Title\n\nbody", NodeKind::Heading(2)), vec!["## Title"]);
    }

    #[test]
    fn inline_styles() {
        let text = "Some **bold**, *it*, `code` and ~~gone~~.";
        assert_eq!(find(text, NodeKind::StrongEmphasis), vec!["**bold**"]);
        assert_eq!(find(text, NodeKind::Emphasis), vec!["*it*"]);
        assert_eq!(find(text, NodeKind::InlineCode), vec!["`code`"]);
        assert_eq!(find(text, NodeKind::Strikethrough), vec!["~~gone~~"]);
    }

    #[test]
    fn highlights_are_found_in_text() {
        assert_eq!(
            find("a ==marked== word", NodeKind::Mark),
            vec!["==marked=="]
        );
    }

    #[test]
    fn highlights_are_not_found_in_code() {
        assert!(find("```\na ==x== b\n```", NodeKind::Mark).is_empty());
    }

    #[test]
    fn list_items_get_list_marks() {
        let text = "1. one\n2. two\n\n- bullet";
        assert_eq!(find(text, NodeKind::ListMark), vec!["1.", "2.", "-"]);
        assert_eq!(find(text, NodeKind::OrderedList).len(), 1);
        assert_eq!(find(text, NodeKind::BulletList).len(), 1);
    }

    #[test]
    fn links_are_classified_by_type() {
        let text = "[a](http://x) and [b][r] and [^1]\n\n[r]: http://y\n\n[^1]: note";
        assert_eq!(find(text, NodeKind::Link), vec!["[a](http://x)", "[^1]"]);
        assert_eq!(find(text, NodeKind::LinkReference), vec!["[b][r]"]);
    }

    #[test]
    fn blocks() {
        let text = "> quote\n\n```rust\nfn x() {}\n```\n\n---\n";
        assert_eq!(find(text, NodeKind::Blockquote), vec!["> quote"]);
        assert_eq!(
            find(text, NodeKind::FencedCode),
            vec!["```rust\nfn x() {}\n```"]
        );
        assert_eq!(find(text, NodeKind::HorizontalRule), vec!["---"]);
    }

    #[test]
    fn tag_name_strips_fields() {
        assert_eq!(tag_name(&Tag::TableRow), "TableRow");
        assert_eq!(tag_name(&Tag::HtmlBlock), "HtmlBlock");
    }
}
