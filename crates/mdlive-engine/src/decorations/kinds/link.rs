use std::sync::OnceLock;

use regex::Regex;

use crate::decorations::kinds::NodeContext;
use crate::decorations::{DecorationItem, Side, Widget, WidgetKind, classes};

static FOOTNOTE_REF: OnceLock<Regex> = OnceLock::new();
static INLINE_LINK: OnceLock<Regex> = OnceLock::new();
static REFERENCE_LINK: OnceLock<Regex> = OnceLock::new();

fn footnote_ref_regex() -> &'static Regex {
    FOOTNOTE_REF.get_or_init(|| Regex::new(r"^\[\^([^\]]+)\]$").unwrap())
}

fn inline_link_regex() -> &'static Regex {
    INLINE_LINK.get_or_init(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap())
}

fn reference_link_regex() -> &'static Regex {
    REFERENCE_LINK.get_or_init(|| Regex::new(r"\[([^\]]+)\]\[([^\]]+)\]").unwrap())
}

/// The three shapes a `Link`/`LinkReference` node can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkShape {
    /// `[^id]`
    FootnoteRef { id: String },
    /// `[text](url)`
    Inline { text: String, url: String },
    /// `[text][ref]`
    Reference { text: String, ref_id: String },
}

impl LinkShape {
    pub fn classify(source: &str) -> Option<LinkShape> {
        if let Some(caps) = footnote_ref_regex().captures(source) {
            return Some(LinkShape::FootnoteRef {
                id: caps[1].to_string(),
            });
        }
        if let Some(caps) = inline_link_regex().captures(source) {
            let url = caps[2].to_string();
            let text = caps
                .get(1)
                .map(|m| m.as_str())
                .filter(|t| !t.is_empty())
                .unwrap_or(url.as_str())
                .to_string();
            return Some(LinkShape::Inline { text, url });
        }
        reference_link_regex()
            .captures(source)
            .map(|caps| LinkShape::Reference {
                text: caps[1].to_string(),
                ref_id: caps[2].to_string(),
            })
    }
}

pub struct Link;

impl Link {
    pub fn decorate(cx: &NodeContext<'_>) -> Vec<DecorationItem> {
        let source = cx.source();
        let Some(shape) = LinkShape::classify(source) else {
            log::trace!("link at {}..{} matches no link shape", cx.from, cx.to);
            return Vec::new();
        };

        match shape {
            LinkShape::FootnoteRef { id } => {
                if cx.revealed() {
                    vec![
                        cx.syntax(cx.from, cx.from + 2, Side::Opening),
                        cx.syntax(cx.to - 1, cx.to, Side::Closing),
                    ]
                } else {
                    vec![DecorationItem::widget(Widget::new(
                        cx.doc,
                        cx.span(),
                        WidgetKind::FootnoteRef { id },
                    ))]
                }
            }
            LinkShape::Inline { text, url } => {
                if cx.revealed() {
                    Self::delimiters(cx, source, '(', ')')
                } else {
                    vec![DecorationItem::widget(Widget::new(
                        cx.doc,
                        cx.span(),
                        WidgetKind::Link { text, url },
                    ))]
                }
            }
            LinkShape::Reference { text, ref_id } => {
                if cx.revealed() {
                    Self::delimiters(cx, source, '[', ']')
                } else {
                    vec![DecorationItem::widget(Widget::new(
                        cx.doc,
                        cx.span(),
                        WidgetKind::ReferenceLink { text, ref_id },
                    ))]
                }
            }
        }
    }

    /// Marks the first `[`, the first `]` after it, then the first `open` and `close`
    /// after that, leaving the text and target between them untouched.
    fn delimiters(cx: &NodeContext<'_>, source: &str, open: char, close: char) -> Vec<DecorationItem> {
        let Some(positions) = Self::delimiter_positions(source, open, close) else {
            return Vec::new();
        };
        let sides = [Side::Opening, Side::Closing, Side::Opening, Side::Closing];
        positions
            .into_iter()
            .zip(sides)
            .map(|(at, side)| {
                let from = cx.from + at;
                DecorationItem::mark(from, from + 1, side, classes::VISIBLE_SYNTAX)
            })
            .collect()
    }

    fn delimiter_positions(source: &str, open: char, close: char) -> Option<[usize; 4]> {
        let text_open = source.find('[')?;
        let text_close = text_open + source[text_open..].find(']')?;
        let target_open = text_close + source[text_close..].find(open)?;
        let target_close = target_open + 1 + source[target_open + 1..].find(close)?;
        Some([text_open, text_close, target_open, target_close])
    }
}
