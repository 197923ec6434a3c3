use crate::decorations::kinds::NodeContext;
use crate::decorations::{DecorationItem, Widget, WidgetKind};
use crate::text::Span;

/// Inline styles rendered as a widget while the caret is elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    /// `~~text~~`
    Strikethrough,
    /// `==text==`
    Highlight,
    /// `~text~`
    Underline,
}

impl SpanStyle {
    pub fn marker(self) -> &'static str {
        match self {
            SpanStyle::Strikethrough => "~~",
            SpanStyle::Highlight => "==",
            SpanStyle::Underline => "~",
        }
    }

    fn widget_kind(self, text: String) -> WidgetKind {
        match self {
            SpanStyle::Strikethrough => WidgetKind::Strikethrough { text },
            SpanStyle::Highlight => WidgetKind::Highlight { text },
            SpanStyle::Underline => WidgetKind::Underline { text },
        }
    }
}

pub struct StyledSpan;

impl StyledSpan {
    /// Not revealed: the whole span becomes a widget showing the inner text. Revealed: the
    /// two markers are marked visible.
    pub fn decorate(cx: &NodeContext<'_>, style: SpanStyle) -> Vec<DecorationItem> {
        let len = style.marker().len();
        let source = cx.source();
        if source.len() < len * 2 + 1
            || !source.starts_with(style.marker())
            || !source.ends_with(style.marker())
        {
            log::trace!("{style:?} at {}..{} is not delimited", cx.from, cx.to);
            return Vec::new();
        }
        if cx.revealed() {
            return cx.edges(len);
        }
        let text = cx.doc.slice(cx.from + len, cx.to - len).to_string();
        vec![DecorationItem::widget(Widget::new(
            cx.doc,
            Span::new(cx.from, cx.to),
            style.widget_kind(text),
        ))]
    }
}
