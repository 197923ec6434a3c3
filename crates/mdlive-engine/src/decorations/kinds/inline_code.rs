use crate::decorations::kinds::NodeContext;
use crate::decorations::{DecorationItem, Widget, WidgetKind};

pub struct InlineCode;

impl InlineCode {
    pub const BACKTICK: char = '`';

    /// Exactly one backtick is stripped from each side, whatever the run length.
    pub fn decorate(cx: &NodeContext<'_>) -> Vec<DecorationItem> {
        let source = cx.source();
        if source.len() < 2
            || !source.starts_with(Self::BACKTICK)
            || !source.ends_with(Self::BACKTICK)
        {
            return Vec::new();
        }
        if cx.revealed() {
            return cx.edges(1);
        }
        let code = cx.doc.slice(cx.from + 1, cx.to - 1).to_string();
        vec![DecorationItem::widget(Widget::new(
            cx.doc,
            cx.span(),
            WidgetKind::InlineCode { code },
        ))]
    }
}
