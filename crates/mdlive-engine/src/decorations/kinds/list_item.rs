use crate::decorations::kinds::NodeContext;
use crate::decorations::{DecorationItem, Side, classes};
use crate::syntax::NodeKind;

pub struct ListItem;

impl ListItem {
    /// Style-only mark on an ordered item's numeral. Numbering itself is maintained by
    /// [`crate::lists::renumber`].
    pub fn decorate(cx: &NodeContext<'_>) -> Vec<DecorationItem> {
        let Some(mark) = cx.tree.child_of_kind(cx.node, &NodeKind::ListMark) else {
            return Vec::new();
        };
        let text = cx.doc.slice_span(mark.span);
        if !text.chars().any(|c| c.is_ascii_digit()) {
            return Vec::new();
        }
        vec![DecorationItem::mark(
            mark.from(),
            mark.to(),
            Side::Inline,
            classes::ORDERED_LIST_MARKER,
        )]
    }
}
